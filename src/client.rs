// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A facade for the Mission Control validation and OpenShift APIs.

use crate::conf::{self, ConfigError, ServiceAddress, Settings};
use crate::endpoint::{EndpointError, Endpoints};
use crate::http::{self, HTTPClientFactory};
use crate::service::{MissionControlService, Service};
use crate::validation::Check;
use log::{debug, warn};
use thiserror::Error;
use url::Url;

/// An error raised by a [`MissionControl`] facade.
///
/// Only construction returns these to callers; validation and listing turn
/// them into a message or an empty list.
#[derive(Debug, Error)]
pub enum Error {
    /// Mission Control's address or the request timeout is misconfigured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A URI could not be built.
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),
}

/// Asks Mission Control whether resources exist and lists OpenShift
/// resources available to a user.
///
/// Every operation takes the value of the `Authorization` header to send,
/// which is passed to Mission Control untouched. The facade holds no state
/// other than Mission Control's base URIs, so a single instance can be
/// shared between tasks.
#[derive(Debug)]
pub struct MissionControl<S: Service = MissionControlService> {
    endpoints: Endpoints,
    service: S,
}

impl MissionControl {
    /// Creates a facade for the Mission Control instance at `host` and
    /// `port`.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, Error> {
        let address = ServiceAddress::new(host, port)?;
        Self::with_service(&address, MissionControlService::default())
    }

    /// Creates a facade configured from the environment.
    ///
    /// Returns an error if the configured port is not a number.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_settings(&Settings::new())
    }

    /// Creates a facade configured from `settings`.
    ///
    /// Returns an error if the configured port is not a number or the
    /// configured timeout is not a positive number of seconds.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let address = ServiceAddress::from_settings(settings)?;
        let timeout = conf::request_timeout(settings)?;
        let factory = HTTPClientFactory::default().timeout(timeout);
        Self::with_service(&address, MissionControlService::new(factory))
    }
}

impl<S: Service> MissionControl<S> {
    /// Creates a facade that uses `service` to talk to the Mission Control
    /// instance at `address`.
    pub fn with_service(address: &ServiceAddress, service: S) -> Result<Self, Error> {
        let endpoints = Endpoints::new(address)?;
        debug!("using Mission Control at {}", endpoints.validation());
        Ok(Self { endpoints, service })
    }

    /// Mission Control's base URIs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The service used to send requests to Mission Control.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validates that no OpenShift project named `project` exists, on
    /// `cluster` if given.
    ///
    /// Returns [`VALIDATION_MESSAGE_OK`](crate::validation::VALIDATION_MESSAGE_OK)
    /// if the project does not exist.
    pub async fn validate_openshift_project_exists(
        &self,
        auth: &str,
        project: &str,
        cluster: Option<&str>,
    ) -> String {
        let target = self.endpoints.project(project, cluster);
        self.validate(Check::OpenShiftProject(project), target, auth)
            .await
    }

    /// Validates that no GitHub repository named `repository` exists.
    ///
    /// Returns [`VALIDATION_MESSAGE_OK`](crate::validation::VALIDATION_MESSAGE_OK)
    /// if the repository does not exist.
    pub async fn validate_github_repository_exists(&self, auth: &str, repository: &str) -> String {
        let target = self.endpoints.repository(repository);
        self.validate(Check::GitHubRepository(repository), target, auth)
            .await
    }

    /// Validates that the user has an OpenShift token, for `cluster` if
    /// given.
    ///
    /// Returns [`VALIDATION_MESSAGE_OK`](crate::validation::VALIDATION_MESSAGE_OK)
    /// if the token exists.
    pub async fn validate_openshift_token_exists(&self, auth: &str, cluster: Option<&str>) -> String {
        let target = self.endpoints.openshift_token(cluster);
        self.validate(Check::OpenShiftToken, target, auth).await
    }

    /// Validates that the user has a GitHub token.
    ///
    /// Returns [`VALIDATION_MESSAGE_OK`](crate::validation::VALIDATION_MESSAGE_OK)
    /// if the token exists.
    pub async fn validate_github_token_exists(&self, auth: &str) -> String {
        let target = self.endpoints.github_token();
        self.validate(Check::GitHubToken, target, auth).await
    }

    /// The OpenShift clusters available to the user.
    ///
    /// Returns an empty list if the clusters cannot be retrieved for any
    /// reason.
    pub async fn get_openshift_clusters(&self, auth: &str) -> Vec<String> {
        let target = self.endpoints.clusters();
        self.list(target, auth).await
    }

    /// The OpenShift projects available to the user, on `cluster` if given.
    ///
    /// Returns an empty list if the projects cannot be retrieved for any
    /// reason.
    pub async fn get_projects(&self, auth: &str, cluster: Option<&str>) -> Vec<String> {
        let target = self.endpoints.projects(cluster);
        self.list(target, auth).await
    }

    async fn validate(
        &self,
        check: Check<'_>,
        target: Result<Url, EndpointError>,
        auth: &str,
    ) -> String {
        let result = match target {
            Ok(target) => self.service.head(target, auth).await.map_err(Error::from),
            Err(err) => Err(Error::from(err)),
        };
        if let Err(err) = &result {
            warn!("{check:?} failed: {err}");
        }
        check.outcome(result)
    }

    // TODO: Offer a variant that reports why a listing failed, since an
    //       empty list currently means either "nothing" or "unreachable".
    async fn list(&self, target: Result<Url, EndpointError>, auth: &str) -> Vec<String> {
        let result = match target {
            Ok(target) => self.service.get_list(target, auth).await.map_err(Error::from),
            Err(err) => Err(Error::from(err)),
        };
        result.unwrap_or_else(|err| {
            warn!("listing failed, returning no items: {err}");
            Vec::new()
        })
    }
}
