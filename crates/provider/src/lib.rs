//! Provider gateway: the create/poll contract against the Freepik
//! generation API.
//!
//! [`gateway::ProviderGateway`] is the seam the pipeline coordinator
//! depends on. [`freepik::FreepikClient`] is the real HTTP
//! implementation; [`mock::MockGateway`] simulates progress locally
//! when `MOCK_MODE` is enabled.

pub mod config;
pub mod error;
pub mod freepik;
pub mod gateway;
pub mod mock;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use freepik::FreepikClient;
pub use gateway::{PollResult, ProviderEndpoint, ProviderGateway, Submission, SubmitJob};
pub use mock::MockGateway;
