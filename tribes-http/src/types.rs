use http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use http::Method;
use serde::{de::DeserializeOwned, Serialize};

pub const MIME_JSON: &str = "application/json";
pub const MIME_FORM: &str = "application/x-www-form-urlencoded";

/// HTTP headers which can be used in API requests.
pub enum Header {
    ContentType,
    Accept,
    CsrfToken,
}

impl From<Header> for HeaderName {
    fn from(value: Header) -> Self {
        match value {
            Header::ContentType => CONTENT_TYPE,
            Header::Accept => ACCEPT,
            Header::CsrfToken => HeaderName::from_static("x-csrftoken"),
        }
    }
}

/// A request which can be executed with [`ApiClient::send_api()`](crate::ApiClient::send_api).
pub struct ApiRequest<P, I>
where
    I: Serialize,
{
    pub method: Method,
    /// Path relative to the base URI, starting with `/`.
    pub path: String,
    pub parameters: Option<P>,
    pub input: Option<InputDataOrBytes<I>>,
    pub encoding: Option<String>,
}

/// A type which can be used as a parameter of [`ApiRequest`].
///
/// JSON serializable data, form serializable data or raw bytes.
pub enum InputDataOrBytes<T>
where
    T: Serialize,
{
    Data(T),
    Form(T),
    Bytes(Vec<u8>),
}

impl<T> InputDataOrBytes<T>
where
    T: Serialize,
{
    /// The content type used when the request does not set one.
    pub fn default_encoding(&self) -> Option<&'static str> {
        match self {
            Self::Data(_) => Some(MIME_JSON),
            Self::Form(_) => Some(MIME_FORM),
            Self::Bytes(_) => None,
        }
    }
}

/// A type which can be used as a return value of [`ApiClient::send_api()`](crate::ApiClient::send_api).
///
/// JSON deserializable data or raw bytes.
pub enum OutputDataOrBytes<T>
where
    T: DeserializeOwned,
{
    Data(T),
    Bytes(Vec<u8>),
}
