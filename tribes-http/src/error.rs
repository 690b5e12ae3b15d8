#![doc = "Error types."]
use http::StatusCode;
use std::fmt::{self, Debug, Display};

/// Error body returned by the endpoints.
///
/// Django views answer failures with `{"error": "...", "message": "..."}`
/// when they answer with JSON at all, so both fields are optional.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponseBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl Display for ErrorResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.message) {
            (Some(error), Some(message)) => write!(f, "{error}: {message}"),
            (Some(text), None) | (None, Some(text)) => write!(f, "{text}"),
            (None, None) => Ok(()),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiErrorKind<E> {
    Custom(E),
    Undefined(ErrorResponseBody),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError<E> {
    pub status: StatusCode,
    pub error: Option<ApiErrorKind<E>>,
}

impl<E: Debug> Display for ApiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status.as_str())?;
        let Some(error) = &self.error else {
            return Ok(());
        };
        match error {
            ApiErrorKind::Custom(e) => write!(f, " {e:?}"),
            ApiErrorKind::Undefined(e) => write!(f, " {e}"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error<E> {
    #[error("api response error: {0}")]
    ApiResponse(ApiError<E>),
    #[error("http request error: {0}")]
    HttpRequest(#[from] http::Error),
    #[error("http client error: {0}")]
    HttpClient(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("serde_html_form error: {0}")]
    SerdeHtmlForm(#[from] serde_html_form::ser::Error),
    #[error("unexpected response type")]
    UnexpectedResponseType,
}

impl<E> Error<E> {
    /// The HTTP status of an error response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ApiResponse(e) => Some(e.status),
            _ => None,
        }
    }
}

pub type Result<T, E> = core::result::Result<T, self::Error<E>>;
