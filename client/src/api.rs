//! Calls to the Viper Vegas backend.

pub mod client;

/// Broad classification of the ways a call to the backend can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The form holds values that cannot be sent.
    InvalidInput,

    /// The backend could not be reached, or the exchange was interrupted.
    Transport,

    /// The backend answered with a non-2xx status.
    RequestFailed,

    /// The backend answered with something that is not JSON.
    InvalidResponse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InvalidInput => "Invalid input",
            Self::Transport => "Backend unreachable",
            Self::RequestFailed => "Request failed",
            Self::InvalidResponse => "Invalid response",
        })
    }
}

/// Implemented by the errors of calls to the backend.
pub trait IsApiError: std::error::Error {
    fn kind(&self) -> ErrorKind;

    /// The body of the response, when the backend rejected the request.
    fn response_body(&self) -> Option<&str> {
        None
    }
}
