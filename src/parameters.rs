use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TuneError;

/// Engine search params as an open map. Keys the tuner does not know about are
/// carried through untouched.
pub type SearchParamMap = Map<String, Value>;

pub const LEVEL_KEY: &str = "level";
pub const EF_KEY: &str = "ef";
pub const DEFAULT_LEVEL: i64 = 1;

pub fn extract_search_params(search_params: &str) -> Result<SearchParamMap, TuneError> {
    if search_params.is_empty() {
        return Ok(SearchParamMap::new());
    }
    serde_json::from_str(search_params).map_err(|e| {
        TuneError::parameter_invalid_with("unmarshal search plan", "plan with unmarshal error", e)
    })
}

/// Tuning level from the `level` key.
///
/// Numbers truncate toward zero, strings are parsed as integers. A missing key,
/// any other JSON type, or an unparsable string all fall back to
/// [`DEFAULT_LEVEL`].
pub fn resolve_level(params: &SearchParamMap) -> i64 {
    let Some(value) = params.get(LEVEL_KEY) else {
        return DEFAULT_LEVEL;
    };
    let level = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };
    level.unwrap_or_else(|| {
        debug!(level = %value, "unusable level in search params, using default");
        DEFAULT_LEVEL
    })
}

pub fn encode_search_params(params: &SearchParamMap) -> Result<String, TuneError> {
    serde_json::to_string(params)
        .map_err(|e| TuneError::service_unavailable(e, "queryHook execution failed"))
}
