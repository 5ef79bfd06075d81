pub mod codec;
pub mod config;
pub mod error;
pub mod estimate;
pub mod hook;
pub mod optimizer;
pub mod parameters;
pub mod plan;
pub mod rewrite;
pub mod telemetry;
pub mod types;
pub mod version_registry;

pub use codec::{CodecError, JsonPlanCodec, PlanCodec};
pub use error::TuneError;
pub use estimate::{estimate_ef, EfEstimate};
pub use hook::{HookError, QueryHook};
pub use optimizer::{optimize_search_params, Outcome, SearchParamOptimizer, SearchRequest};
pub use parameters::SearchParamMap;
pub use plan::{PlanKind, PlanNode, QueryInfo, VectorAnnsNode};
pub use types::{CollectionId, ServerId};
pub use version_registry::EngineVersionRegistry;
