use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RequestId = u64;

/// A genre record as served by the backend.
///
/// Only `id` and `name` are typed; every other field is carried through
/// untouched so the record keeps its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Genre {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Outcome of one genre fetch.
///
/// Failures never escape as errors; they land here so callers can still tell
/// "no genres" apart from "could not load genres".
#[derive(Debug, Clone, PartialEq)]
pub enum GenreFetch {
    Loaded(Vec<Genre>),
    Failed(FetchError),
}

impl GenreFetch {
    /// The fetched genres, or an empty slice on failure.
    pub fn genres(&self) -> &[Genre] {
        match self {
            GenreFetch::Loaded(genres) => genres,
            GenreFetch::Failed(_) => &[],
        }
    }

    pub fn into_genres(self) -> Vec<Genre> {
        match self {
            GenreFetch::Loaded(genres) => genres,
            GenreFetch::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GenreFetch::Failed(_))
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            GenreFetch::Loaded(_) => None,
            GenreFetch::Failed(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    GenresLoaded {
        request_id: RequestId,
        result: GenreFetch,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
