use std::{error::Error as _, time::Duration};

use async_trait::async_trait;
use reqwest::{header, Client};
use shared::{
    error::QueryError,
    protocol::{ErrorBody, LawsQueryResponse, LAWS_PATH, QUERY_PARAM},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// The remote answering service, seen from the client.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn fetch_answer(&self, query: &str) -> Result<LawsQueryResponse, QueryError>;
}

#[derive(Debug, Error)]
pub enum TransportConfigError {
    #[error("invalid endpoint url '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("endpoint url '{0}' cannot carry a path")]
    UnsupportedEndpoint(String),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// `GET {endpoint}/laws?query=...` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpQueryTransport {
    http: Client,
    laws_url: Url,
}

impl HttpQueryTransport {
    pub fn new(endpoint_url: &str) -> Result<Self, TransportConfigError> {
        Self::with_timeout(endpoint_url, None)
    }

    pub fn with_timeout(
        endpoint_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            laws_url: laws_url(endpoint_url)?,
        })
    }

    /// Full request URL for `query`; the text is carried as-is, url-encoded.
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.laws_url.clone();
        url.query_pairs_mut().append_pair(QUERY_PARAM, query);
        url
    }
}

fn laws_url(endpoint_url: &str) -> Result<Url, TransportConfigError> {
    let trimmed = endpoint_url.trim();
    let mut url = Url::parse(trimmed).map_err(|source| TransportConfigError::InvalidEndpoint {
        url: trimmed.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(TransportConfigError::UnsupportedEndpoint(trimmed.to_string()));
    }

    // Keep any path prefix the service is mounted under.
    let path = format!("{}{LAWS_PATH}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl QueryTransport for HttpQueryTransport {
    async fn fetch_answer(&self, query: &str) -> Result<LawsQueryResponse, QueryError> {
        let url = self.request_url(query);
        debug!(%url, "sending laws query");

        let res = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| QueryError::transport(describe_transport_error(&err)))?;

        let status = res.status();
        if !status.is_success() {
            let detail = match res.bytes().await {
                Ok(body) => ErrorBody::detail_from(&body),
                Err(_) => None,
            };
            return Err(QueryError::Protocol {
                status: status.as_u16(),
                detail,
            });
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| QueryError::transport(describe_transport_error(&err)))?;
        LawsQueryResponse::parse(&body)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
