use crate::error::{ApiError, ApiErrorKind, Error};
use crate::types::{Header, MIME_JSON};
use crate::{ApiRequest, InputDataOrBytes, OutputDataOrBytes};
use http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, future::Future};

/// An abstract HTTP client.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait HttpClient {
    /// Send an HTTP request and return the response.
    fn send_http(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<
        Output = core::result::Result<
            Response<Vec<u8>>,
            Box<dyn std::error::Error + Send + Sync + 'static>,
        >,
    >;
}

type ApiResult<O, E> = core::result::Result<OutputDataOrBytes<O>, self::Error<E>>;

/// An abstract client for the tribes endpoints.
///
/// [`send_api()`](ApiClient::send_api) method has a default implementation,
/// which wraps the [`HttpClient::send_http()`] method to handle input and output as JSON.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait ApiClient: HttpClient {
    /// The base URI of the web server, without a trailing slash.
    fn base_uri(&self) -> String;
    /// Get the anti-forgery token to use in the `X-CSRFToken` header.
    fn csrf_token(&self) -> impl Future<Output = Option<String>> {
        async { None }
    }
    /// Send an API request and return the response.
    #[cfg(not(target_arch = "wasm32"))]
    fn send_api<P, I, O, E>(
        &self,
        request: &ApiRequest<P, I>,
    ) -> impl Future<Output = ApiResult<O, E>>
    where
        P: Serialize + Send + Sync,
        I: Serialize + Send + Sync,
        O: DeserializeOwned + Send + Sync,
        E: DeserializeOwned + Send + Sync + Debug,
        // `Self` has to be `Sync` for `Future` to be `Send`.
        Self: Sync,
    {
        send_api(self, request)
    }
    #[cfg(target_arch = "wasm32")]
    fn send_api<P, I, O, E>(
        &self,
        request: &ApiRequest<P, I>,
    ) -> impl Future<Output = ApiResult<O, E>>
    where
        P: Serialize + Send + Sync,
        I: Serialize + Send + Sync,
        O: DeserializeOwned + Send + Sync,
        E: DeserializeOwned + Send + Sync + Debug,
    {
        send_api(self, request)
    }
}

#[inline(always)]
async fn send_api<P, I, O, E, C: ApiClient + ?Sized>(
    client: &C,
    request: &ApiRequest<P, I>,
) -> ApiResult<O, E>
where
    P: Serialize + Send + Sync,
    I: Serialize + Send + Sync,
    O: DeserializeOwned + Send + Sync,
    E: DeserializeOwned + Send + Sync + Debug,
{
    let mut uri = format!("{}{}", client.base_uri().trim_end_matches('/'), request.path);
    // Query parameters
    if let Some(p) = &request.parameters {
        serde_html_form::to_string(p).map(|qs| {
            if !qs.is_empty() {
                uri += "?";
                uri += &qs;
            }
        })?;
    };
    let mut builder = Request::builder().method(&request.method).uri(&uri);
    // Headers
    builder = builder.header(Header::Accept, MIME_JSON);
    if let Some(encoding) = request
        .encoding
        .as_deref()
        .or_else(|| request.input.as_ref().and_then(InputDataOrBytes::default_encoding))
    {
        builder = builder.header(Header::ContentType, encoding);
    }
    if let Some(token) = client.csrf_token().await {
        builder = builder.header(Header::CsrfToken, token);
    }
    // Body
    let body = if let Some(input) = &request.input {
        match input {
            InputDataOrBytes::Data(data) => serde_json::to_vec(&data)?,
            InputDataOrBytes::Form(data) => serde_html_form::to_string(data)?.into_bytes(),
            InputDataOrBytes::Bytes(bytes) => bytes.clone(),
        }
    } else {
        Vec::new()
    };
    // Send
    let (parts, body) =
        client.send_http(builder.body(body)?).await.map_err(Error::HttpClient)?.into_parts();
    if parts.status.is_success() {
        if parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |content_type| content_type.starts_with(MIME_JSON))
        {
            Ok(OutputDataOrBytes::Data(serde_json::from_slice(&body)?))
        } else {
            Ok(OutputDataOrBytes::Bytes(body))
        }
    } else {
        Err(Error::ApiResponse(ApiError {
            status: parts.status,
            error: serde_json::from_slice::<ApiErrorKind<E>>(&body).ok(),
        }))
    }
}
