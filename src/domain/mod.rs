pub mod classification;
pub mod input;
pub mod state;

pub use classification::{ClassificationResult, Severity};
pub use input::{SelectedFile, SubmissionInput, FALLBACK_MIME_TYPE};
pub use state::UiState;
