pub mod backend;
pub mod errors;
pub mod model;
pub mod registry;

pub use backend::{InferenceClient, SummarizerBackend};
pub use errors::{BackendError, SummarizeError};
pub use model::{GenerationPolicy, LengthControl, ModelFamily, ModelKind};
pub use registry::{ModelBackend, ModelRegistry};

#[cfg(test)]
pub use backend::MockSummarizerBackend;
