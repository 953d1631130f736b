pub mod prompt;
pub mod save;
pub mod types;
pub mod validate;

pub use prompt::{Prompter, Questionnaire};
pub use save::{fallback_path, manifest_file_name, save_json, to_pretty_json};
pub use types::{AudioMode, Manifest, ManifestDraft};
pub use validate::InputError;
