//! Domain types and pure logic for the recast generation service.
//!
//! Everything here is side-effect free: status vocabulary, pipeline
//! stages, generation settings, task/upload records, and input
//! validation. Network and storage concerns live in the `provider`,
//! `storage`, and `store` crates.

pub mod error;
pub mod settings;
pub mod stage;
pub mod status;
pub mod task;
pub mod upload;
pub mod validation;

pub use error::CoreError;
pub use settings::{AspectRatio, GenerationSettings, ModelVariant};
pub use stage::PipelineStage;
pub use status::ProviderStatus;
pub use task::{TaskInputs, TaskRecord};
pub use upload::UploadRecord;
