use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    NotFound(u64, String),
    UnexpectedStatus(u16, String),
    ReqwestError(reqwest::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(..))
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ReqwestError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(_, message) => write!(f, "{}", message),
            Error::UnexpectedStatus(status, message) => {
                write!(f, "Unexpected status {}: {}", status, message)
            }
            Error::ReqwestError(e) => write!(f, "{}", e.to_string()),
        }
    }
}
