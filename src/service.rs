// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTP connector for the Mission Control API.
//!
//! Service structures in this module provide a low-level way to interact
//! with Mission Control over HTTP: they send exactly one request per call and
//! report what came back, leaving the interpretation of the result to
//! [`MissionControl`](crate::client::MissionControl).

use crate::http::{HTTPClientFactory, HTTPError, HTTPResult};
use log::debug;
use reqwest::{Client, StatusCode, header};
use url::Url;

/// A service for sending requests to Mission Control.
///
/// Using this trait, clients can implement different ways of connecting
/// to Mission Control, such as an actual connector for production code,
/// and a deterministic connector for testing purposes.
pub trait Service {
    /// Sends a HEAD request to `target`, passing `auth` verbatim as the
    /// `Authorization` header, and returns the response's status code.
    ///
    /// Any status code is a successful result; only failing to get a
    /// response at all is an error.
    fn head(&self, target: Url, auth: &str) -> impl Future<Output = HTTPResult<u16>> + Send;

    /// Sends a GET request for JSON to `target`, passing `auth` verbatim as
    /// the `Authorization` header, and returns the body as a list of strings
    /// in the order they were received.
    fn get_list(
        &self,
        target: Url,
        auth: &str,
    ) -> impl Future<Output = HTTPResult<Vec<String>>> + Send;
}

/// A service that contacts Mission Control directly.
#[derive(Debug, Default)]
pub struct MissionControlService {
    factory: HTTPClientFactory,
}

impl MissionControlService {
    /// Creates a new service using clients from the given factory.
    pub fn new(factory: HTTPClientFactory) -> Self {
        Self { factory }
    }
}

impl Service for MissionControlService {
    async fn head(&self, target: Url, auth: &str) -> HTTPResult<u16> {
        debug!("HEAD {target}");
        let status = self
            .factory
            .perform(|client| send_head(client, target, auth))
            .await?;
        debug!("HEAD returned {status}");
        Ok(status.as_u16())
    }

    async fn get_list(&self, target: Url, auth: &str) -> HTTPResult<Vec<String>> {
        debug!("GET {target}");
        self.factory
            .perform(|client| send_get_list(client, target, auth))
            .await
    }
}

async fn send_head(client: Client, target: Url, auth: &str) -> HTTPResult<StatusCode> {
    let resp = client
        .head(target)
        .header(header::AUTHORIZATION, auth)
        .send()
        .await
        .map_err(HTTPError::Request)?;
    Ok(resp.status())
}

async fn send_get_list(client: Client, target: Url, auth: &str) -> HTTPResult<Vec<String>> {
    let resp = client
        .get(target)
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, auth)
        .send()
        .await
        .map_err(HTTPError::Request)?;
    debug!("GET returned {}", resp.status());

    if !resp.status().is_success() {
        return Err(HTTPError::Http(resp.status()));
    }

    let body = resp.text().await.map_err(HTTPError::Body)?;
    Ok(serde_json::from_str(&body)?)
}
