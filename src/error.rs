use thiserror::Error;

/// Failure of a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed, empty or unreadable transcript
    #[error("input error: {0}")]
    Input(String),

    /// Invalid window, overlap or threshold parameters
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A lemma, vector or cluster capability failed to initialize
    #[error("failed to load {capability}: {message}")]
    ModelLoad {
        capability: &'static str,
        message: String,
    },

    /// A capability initialized but failed while running
    #[error("{stage} failed: {message}")]
    Capability {
        stage: &'static str,
        message: String,
    },
}

impl PipelineError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
