use hyper::{http, StatusCode};
use std::{fmt::Display, io, sync};

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    InvalidId(String),
    PayloadTooLarge(usize),
    PoisonedLock,
    InvalidBody,
    IoError(io::Error),
    HyperError(hyper::Error),
    HttpError(http::Error),
    SerializationError(serde_json::Error),
}

impl Error {
    /// The HTTP status a handler answers with when it fails with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(id) => write!(
                f,
                "No request could be found with the ID '{}'. Maybe it's been popped out?",
                id
            ),
            Error::InvalidId(id) => write!(f, "'{}' is not a valid request ID", id),
            Error::PayloadTooLarge(limit) => {
                write!(f, "The request body exceeds the limit of {} bytes", limit)
            }
            Error::PoisonedLock => write!(f, "The lock was poisoned"),
            Error::InvalidBody => write!(f, "Invalid body"),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::HyperError(e) => write!(f, "Hyper error: {}", e),
            Error::HttpError(e) => write!(f, "Http Error: {}", e),
            Error::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Error::HyperError(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::HttpError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e)
    }
}
