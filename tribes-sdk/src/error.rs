use crate::ui::document::NodeId;
use std::fmt::Debug;
use thiserror::Error;
use tribes_api::tribes_http::error::ApiErrorKind;
use tribes_api::tribes_http::http::StatusCode;
use tribes_api::tribes_http::Error as ApiError;

/// Error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("api error: {0}")]
    Api(Box<GenericApiError>),
    #[error("loading config error: {0}")]
    ConfigLoad(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("saving config error: {0}")]
    ConfigSave(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("element has no `{0}` attribute")]
    MissingAttribute(&'static str),
    #[error("invalid `{attribute}` attribute: {reason}")]
    InvalidAttribute { attribute: &'static str, reason: &'static str },
    #[error("invalid tree operation: {0}")]
    InvalidTree(&'static str),
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}

impl Error {
    /// The HTTP status of a failed request, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => match e.as_ref() {
                GenericApiError::Response { status, .. } => Some(*status),
                GenericApiError::Other(_) => None,
            },
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum GenericApiError {
    Response { status: StatusCode, error: Option<String> },
    Other(String),
}

impl std::fmt::Display for GenericApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Response { status, error } => {
                write!(f, "{}", status.as_str())?;
                let Some(error) = &error else {
                    return Ok(());
                };
                if !error.is_empty() {
                    write!(f, " {error}")?;
                }
            }
            Self::Other(s) => {
                write!(f, "{s}")?;
            }
        }
        Ok(())
    }
}

impl<E> From<ApiError<E>> for Error
where
    E: Debug,
{
    fn from(err: ApiError<E>) -> Self {
        if let ApiError::ApiResponse(e) = err {
            Self::Api(Box::new(GenericApiError::Response {
                status: e.status,
                error: e.error.map(|e| match e {
                    ApiErrorKind::Custom(custom) => format!("{custom:?}"),
                    ApiErrorKind::Undefined(res) => res.to_string(),
                }),
            }))
        } else {
            Self::Api(Box::new(GenericApiError::Other(err.to_string())))
        }
    }
}

/// Type alias to use this crate's [`Error`](enum@crate::Error) type in a [`Result`](core::result::Result).
pub type Result<T> = core::result::Result<T, Error>;
