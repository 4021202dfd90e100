//! Body extractors rejecting with [`Error`](crate::handler::Error).

mod json;
mod validated_json;

pub use json::Json;
pub use validated_json::ValidateJson;
