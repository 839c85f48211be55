//! Upload records: resolved asset URLs from a prior upload request.

use serde::{Deserialize, Serialize};

/// A stored pair of uploaded assets with their storage-provider ids.
///
/// Consumed by the generate path to resolve input references; never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub character_url: String,
    pub reference_url: String,
    pub character_public_id: String,
    pub reference_public_id: String,
}
