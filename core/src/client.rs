//! Client for the organisation accounts API.
//!
//! # Design
//! `AccountClient` holds its configuration, the validated collection URL and
//! a `Transport`; nothing changes between calls, so one client can serve
//! any number of concurrent callers through `&self`.
//!
//! Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that turns an `HttpResponse` into a
//! `ClientResponse`. The async methods join the two halves with a transport
//! round trip bounded by a `RequestContext`. Callers that run their own I/O
//! can use the halves directly.

use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::request::{account_url, build_request, collection_url};
use crate::response::{classify_outcome, decode_account, ClientResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Account, Envelope};

const CREATED: u16 = 201;
const OK: u16 = 200;
const NO_CONTENT: u16 = 204;

#[derive(Debug, Clone)]
pub struct AccountClient<T = ReqwestTransport> {
    config: ClientConfig,
    collection_url: Url,
    transport: T,
}

impl AccountClient<ReqwestTransport> {
    /// Client over the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new()?)
    }
}

impl<T: Transport> AccountClient<T> {
    /// Client over a caller-supplied transport. Fails if the root URL cannot
    /// host the accounts collection.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let collection_url = collection_url(&config)?;
        Ok(Self {
            config,
            collection_url,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_create_account(&self, account: &Account) -> Result<HttpRequest> {
        let body = Envelope::new(account).encode()?;
        build_request(HttpMethod::Post, self.collection_url.clone(), Some(body))
    }

    pub fn build_fetch_account(&self, id: &str) -> Result<HttpRequest> {
        build_request(HttpMethod::Get, account_url(&self.config, id)?, None)
    }

    pub fn build_delete_account(&self, id: &str, version: i64) -> Result<HttpRequest> {
        let mut url = account_url(&self.config, id)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        build_request(HttpMethod::Delete, url, None)
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<ClientResponse> {
        self.parse_account_response(response, CREATED)
    }

    pub fn parse_fetch_account(&self, response: HttpResponse) -> Result<ClientResponse> {
        self.parse_account_response(response, OK)
    }

    /// Delete responses carry no body; only the status matters.
    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<ClientResponse> {
        if classify_outcome(NO_CONTENT, response.status) {
            Ok(ClientResponse::success(response.status, None))
        } else {
            Ok(ClientResponse::failure(response.status))
        }
    }

    fn parse_account_response(&self, response: HttpResponse, expected: u16) -> Result<ClientResponse> {
        if !classify_outcome(expected, response.status) {
            return Ok(ClientResponse::failure(response.status));
        }
        let account = decode_account(&response.body, self.config.debug_enabled())?;
        Ok(ClientResponse::success(response.status, Some(account)))
    }

    pub async fn create_account(&self, account: &Account) -> Result<ClientResponse> {
        self.create_account_with_context(account, &RequestContext::background())
            .await
    }

    pub async fn create_account_with_context(
        &self,
        account: &Account,
        ctx: &RequestContext,
    ) -> Result<ClientResponse> {
        let request = self.build_create_account(account)?;
        let response = self.execute(request, ctx).await?;
        self.parse_create_account(response)
    }

    pub async fn fetch_account(&self, id: &str) -> Result<ClientResponse> {
        self.fetch_account_with_context(id, &RequestContext::background())
            .await
    }

    pub async fn fetch_account_with_context(
        &self,
        id: &str,
        ctx: &RequestContext,
    ) -> Result<ClientResponse> {
        let request = self.build_fetch_account(id)?;
        let response = self.execute(request, ctx).await?;
        self.parse_fetch_account(response)
    }

    pub async fn delete_account(&self, id: &str, version: i64) -> Result<ClientResponse> {
        self.delete_account_with_context(id, version, &RequestContext::background())
            .await
    }

    pub async fn delete_account_with_context(
        &self,
        id: &str,
        version: i64,
        ctx: &RequestContext,
    ) -> Result<ClientResponse> {
        let request = self.build_delete_account(id, version)?;
        let response = self.execute(request, ctx).await?;
        self.parse_delete_account(response)
    }

    async fn execute(&self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        let method = request.method;
        let url = request.url.to_string();
        debug!(%method, %url, "sending request");

        let response = ctx
            .run(self.transport.send(request))
            .await
            .map_err(|e| {
                warn!(%method, %url, error = %e, "request failed");
                ApiError::from(e)
            })?;

        debug!(%method, %url, status = %response.status_line(), "received response");
        Ok(response)
    }
}
