//! API client library.
//!
//! This module provides the Rust client for the door-control endpoint, used
//! by the CLI and TUI binaries. The [`DoorEndpoint`] trait is the single
//! network seam; [`HttpDoorClient`] implements it over reqwest.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};

use crate::config::EndpointConfig;
use crate::error::{Error, Result, SendError};
use crate::tracing::prelude::*;

pub use types::Command;

/// Something that accepts door commands.
#[async_trait]
pub trait DoorEndpoint: Send + Sync {
    /// Deliver one command. No retry is attempted.
    async fn post_command(&self, command: Command) -> std::result::Result<(), SendError>;
}

/// HTTP implementation of [`DoorEndpoint`].
///
/// Each command is a `POST` with a `text/plain` body holding the command's
/// wire form. Any 2xx status is success; the response body is ignored.
#[derive(Debug, Clone)]
pub struct HttpDoorClient {
    client: Client,
    url: Url,
}

impl HttpDoorClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let url = parse_endpoint_url(&config.url)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DoorEndpoint for HttpDoorClient {
    async fn post_command(&self, command: Command) -> std::result::Result<(), SendError> {
        trace!(url = %self.url, %command, "Posting door command");

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "text/plain")
            .body(command.as_str())
            .send()
            .await
            .map_err(|e| SendError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SendError::Status(status.as_u16()))
        }
    }
}

/// Validate that `raw` is an absolute http(s) URL.
pub fn parse_endpoint_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("invalid endpoint URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "endpoint URL '{raw}' has unsupported scheme '{other}'"
        ))),
    }
}
