use thiserror::Error;

/// Rejections of review form data, raised before anything is stored or sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nickname is required")]
    EmptyNickname,

    #[error("Review text is required")]
    EmptyText,

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid access code")]
    InvalidCode,
}

/// Failures of a call to the review service, as seen by the front end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Admin code rejected by the review service")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Review service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-success HTTP status and its body.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            _ => ApiError::Service { status, message },
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}
