#[allow(clippy::module_inception)]
pub mod error;

pub use error::{CliError, ManifestError, RecorderError};
pub use crate::session::TransitionError;
