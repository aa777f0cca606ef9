use thiserror::Error;

/// The single failure kind of the catalog boundary, split by where it happened.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("base url '{0}' cannot carry endpoint paths")]
    InvalidBaseUrl(String),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("invalid JSON payload from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            FetchError::InvalidBaseUrl(_) => None,
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }
}

/// Result of one catalog fetch after the fail-soft conversion.
///
/// `Empty` and `Failed` both leave the target list empty; they are kept apart
/// so a front end can render an error state if it wants to.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Empty,
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Loaded(value) => FetchOutcome::Loaded(f(value)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(err) => FetchOutcome::Failed(err),
        }
    }
}

impl<T> FetchOutcome<Vec<T>> {
    /// Wraps a list result, mapping an empty list to `Empty`.
    pub fn from_list(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => FetchOutcome::Empty,
            Ok(items) => FetchOutcome::Loaded(items),
            Err(err) => FetchOutcome::Failed(err),
        }
    }
}
