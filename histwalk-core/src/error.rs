use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    Git { args: String, stderr: String },

    #[error("Invalid starting reference: {0}")]
    InvalidReference(String),

    #[error("Unexpected git output: {0}")]
    Parse(String),

    #[error("Viewer '{program}' exited with {status}")]
    ViewerFailed { program: String, status: String },

    #[error("Classifier failed: {0}")]
    ClassifierFailed(String),
}
