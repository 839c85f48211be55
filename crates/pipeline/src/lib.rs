//! Pipeline coordinator: submits generation jobs and advances
//! multi-step pipelines in response to status requests.

pub mod coordinator;

pub use coordinator::{PipelineCoordinator, PipelineError};
