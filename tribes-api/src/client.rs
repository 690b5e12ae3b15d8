#![doc = "A client for the tribe endpoints."]
use crate::tribe::{join, leader};
use crate::types::TribeId;
use serde::de::IgnoredAny;
use std::sync::Arc;
use tribes_http::http::Method;
use tribes_http::{ApiClient, ApiRequest, InputDataOrBytes, OutputDataOrBytes};

/// Client struct for the tribe service.
pub struct TribeServiceClient<T>
where
    T: ApiClient + Send + Sync,
{
    pub service: Service<T>,
}

impl<T> TribeServiceClient<T>
where
    T: ApiClient + Send + Sync,
{
    pub fn new(client: T) -> Self {
        Self { service: Service::new(Arc::new(client)) }
    }
}

pub struct Service<T>
where
    T: ApiClient + Send + Sync,
{
    pub tribe: TribeService<T>,
}

impl<T> Service<T>
where
    T: ApiClient + Send + Sync,
{
    pub fn new(client: Arc<T>) -> Self {
        Self { tribe: TribeService::new(client) }
    }
}

pub struct TribeService<T>
where
    T: ApiClient + Send + Sync,
{
    pub(crate) client: Arc<T>,
}

impl<T> TribeService<T>
where
    T: ApiClient + Send + Sync,
{
    pub(crate) fn new(client: Arc<T>) -> Self {
        Self { client }
    }
    /// Toggle the membership of the current user in `tribe`.
    pub async fn join(
        &self,
        tribe: &TribeId,
    ) -> tribes_http::Result<join::Output, join::Error> {
        let response = self
            .client
            .send_api::<(), (), join::Output, join::Error>(&ApiRequest {
                method: Method::POST,
                path: join::path(tribe),
                parameters: None,
                input: None,
                encoding: None,
            })
            .await?;
        match response {
            OutputDataOrBytes::Data(data) => Ok(data),
            _ => Err(tribes_http::Error::UnexpectedResponseType),
        }
    }
    /// Promote a tribe member to leader.
    pub async fn leader(&self, input: leader::Input) -> tribes_http::Result<(), leader::Error> {
        let response = self
            .client
            .send_api::<(), leader::Input, IgnoredAny, leader::Error>(&ApiRequest {
                method: Method::POST,
                path: leader::PATH.into(),
                parameters: None,
                input: Some(InputDataOrBytes::Form(input)),
                encoding: None,
            })
            .await?;
        match response {
            OutputDataOrBytes::Data(_) | OutputDataOrBytes::Bytes(_) => Ok(()),
        }
    }
}
