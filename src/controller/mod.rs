mod feedback;
mod submission;
mod validation;

pub use submission::{ControllerSettings, FileSelection, SubmissionController, SubmitError};
