pub mod config;
pub mod error;
pub mod types;

pub use config::Settings;
pub use error::AssetGraphError;
pub use types::{
    Intent, LocationFilter, ParamValue, PlanStrategy, QueryCategory, QueryPlan, QueryResponse,
    ResultKind, ResultRow,
};
