use thiserror::Error;

/// Failures while obtaining the journey data.
///
/// `Network` covers everything that prevented a body from arriving
/// (unreachable host, non-2xx status, timeout, retries exhausted).
/// `Malformed` means a body arrived but does not match the schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("journey data unreachable: {0}")]
    Network(String),

    #[error("journey data malformed: {0}")]
    Malformed(String),
}

impl LoadError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Star {id} not found")]
    StarNotFound { id: u32 },

    #[error("Journey already attached ({stars} stars placed)")]
    AlreadyLoaded { stars: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
