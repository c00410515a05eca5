//! HTTP client for the items API.

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use items_core::error::{Error, ProtocolError, TransportError};
use items_core::types::StoreUrl;

use crate::endpoints::ErrorResponse;

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client bound to one items API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: StoreUrl,
}

impl ApiClient {
    /// Create a new client for the API at `base`.
    pub fn new(base: StoreUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("items/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self { client, base })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &StoreUrl {
        &self.base
    }

    /// GET a JSON resource.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<Q, R>(&self, path: &str, params: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// GET a JSON resource that may not exist.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_optional<R>(&self, path: &str) -> Result<Option<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    /// PUT a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "PUT");

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// DELETE a resource. A resource that is already gone counts as
    /// deleted.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.base.endpoint(path);
        debug!(%url, "DELETE");

        let response = self.client.delete(&url).send().await.map_err(transport)?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport)
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.detail_text()),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = StoreUrl::new("https://api.example.com").unwrap();
        let client = ApiClient::new(base.clone()).unwrap();
        assert_eq!(client.base(), &base);
    }
}
