use thiserror::Error;

use crate::session::TransitionError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("recorder failed: {0}")]
    Recorder(#[from] RecorderError),
    #[error("manifest failed: {0}")]
    Manifest(#[from] ManifestError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("session is not recording")]
    NotRecording,
    #[error("participant id already assigned ({0})")]
    ParticipantAlreadySet(String),
    #[error("participant id must be assigned before the first mark")]
    MissingParticipant,
    #[error("no mark to annotate")]
    NoMark,
    #[error("mark #{0} already has its annotation")]
    AlreadyAnnotated(u32),
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("input interrupted")]
    Interrupted,
    #[error("input stream error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to save manifest: {0}")]
    Save(#[source] anyhow::Error),
}
