//! Pipeline stages for two-step (image edit -> video) generation.

use serde::{Deserialize, Serialize};

/// Position of a two-step task within its pipeline.
///
/// Stages advance strictly forward through the ordinal order, except
/// for [`PipelineStage::Failed`], which is reachable from any stage and
/// absorbing. Single-step tasks never carry a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    ImageEditStarted,
    ImageEditCompleted,
    VideoStarted,
    PipelineCompleted,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::ImageEditStarted => "IMAGE_EDIT_STARTED",
            PipelineStage::ImageEditCompleted => "IMAGE_EDIT_COMPLETED",
            PipelineStage::VideoStarted => "VIDEO_STARTED",
            PipelineStage::PipelineCompleted => "PIPELINE_COMPLETED",
            PipelineStage::Failed => "FAILED",
        }
    }

    /// Position in the forward stage order. `Failed` has no ordinal.
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            PipelineStage::ImageEditStarted => Some(0),
            PipelineStage::ImageEditCompleted => Some(1),
            PipelineStage::VideoStarted => Some(2),
            PipelineStage::PipelineCompleted => Some(3),
            PipelineStage::Failed => None,
        }
    }

    /// Terminal stages accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineStage::PipelineCompleted | PipelineStage::Failed
        )
    }

    /// Whether a transition from `self` to `next` respects the stage
    /// invariant: strictly forward through the ordinal order, or a jump
    /// to `Failed` from any non-terminal stage.
    pub fn can_transition_to(&self, next: PipelineStage) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == PipelineStage::Failed {
            return true;
        }
        match (self.ordinal(), next.ordinal()) {
            (Some(a), Some(b)) => b > a,
            _ => false,
        }
    }
}
