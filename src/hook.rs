use std::collections::HashMap;

use thiserror::Error;

use crate::parameters::SearchParamMap;

#[derive(Debug, Error)]
#[error("query hook failed: {0}")]
pub struct HookError(pub String);

/// Pluggable search-param tuner that can stand in for the built-in ef
/// estimation. The built-in optimizer accepts one but never calls it.
pub trait QueryHook: Send + Sync {
    fn run(&self, params: &mut SearchParamMap) -> Result<(), HookError>;
    fn init(&self, engine: &str) -> Result<(), HookError>;
    fn init_tuning_config(&self, config: &HashMap<String, String>) -> Result<(), HookError>;
    fn delete_tuning_config(&self, name: &str) -> Result<(), HookError>;
}

impl QueryHook for () {
    fn run(&self, _params: &mut SearchParamMap) -> Result<(), HookError> {
        Ok(())
    }

    fn init(&self, _engine: &str) -> Result<(), HookError> {
        Ok(())
    }

    fn init_tuning_config(&self, _config: &HashMap<String, String>) -> Result<(), HookError> {
        Ok(())
    }

    fn delete_tuning_config(&self, _name: &str) -> Result<(), HookError> {
        Ok(())
    }
}

impl QueryHook for Box<dyn QueryHook> {
    fn run(&self, params: &mut SearchParamMap) -> Result<(), HookError> {
        (**self).run(params)
    }

    fn init(&self, engine: &str) -> Result<(), HookError> {
        (**self).init(engine)
    }

    fn init_tuning_config(&self, config: &HashMap<String, String>) -> Result<(), HookError> {
        (**self).init_tuning_config(config)
    }

    fn delete_tuning_config(&self, name: &str) -> Result<(), HookError> {
        (**self).delete_tuning_config(name)
    }
}
