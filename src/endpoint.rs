//! Construction of the URIs used to call Mission Control.
//!
//! Mission Control exposes two API surfaces, one for validation under
//! `/api/validate` and one for querying OpenShift under `/api/openshift`.
//! The base URI of each surface is computed once from a
//! [`ServiceAddress`]; every target URI is derived from one of them by
//! appending path segments and, optionally, a `cluster` query parameter.

use crate::conf::ServiceAddress;
use thiserror::Error;
use url::Url;

const VALIDATION_ROOT: &str = "/api/validate";
const OPENSHIFT_ROOT: &str = "/api/openshift";

/// Characters rejected in a path segment. Slashes, question marks, and
/// hashes would change the URI's structure. Braces mark variables in a
/// URI template (RFC 6570), so a name containing them is never literal.
const RESERVED: &[char] = &['/', '?', '#', '{', '}'];

/// Indicates a URI could not be built.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The service address does not form a valid URI.
    #[error("Invalid Mission Control address: {0}")]
    Address(#[from] url::ParseError),

    /// The base URI cannot have path segments appended to it.
    #[error("Cannot append path segments to {0}")]
    CannotBeABase(Url),

    /// An identifier cannot be used as a path segment.
    #[error("Invalid path segment '{0}'")]
    InvalidSegment(String),
}

/// The fixed base URIs for both Mission Control APIs.
#[derive(Clone, Debug)]
pub struct Endpoints {
    validation: Url,
    openshift: Url,
}

impl Endpoints {
    /// Computes the base URIs for the Mission Control instance at `address`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mission_control::conf::ServiceAddress;
    /// use mission_control::endpoint::Endpoints;
    /// let address = ServiceAddress::new("localhost", 8080).unwrap();
    /// let endpoints = Endpoints::new(&address).unwrap();
    /// assert_eq!(endpoints.validation().as_str(), "http://localhost:8080/api/validate");
    /// assert_eq!(endpoints.openshift().as_str(), "http://localhost:8080/api/openshift");
    /// ```
    pub fn new(address: &ServiceAddress) -> Result<Self, EndpointError> {
        let validation = base_uri(address, VALIDATION_ROOT)?;
        let openshift = base_uri(address, OPENSHIFT_ROOT)?;
        Ok(Self {
            validation,
            openshift,
        })
    }

    /// Base URI of the validation API.
    pub fn validation(&self) -> &Url {
        &self.validation
    }

    /// Base URI of the OpenShift API.
    pub fn openshift(&self) -> &Url {
        &self.openshift
    }

    /// Target for checking whether an OpenShift project exists.
    pub fn project(&self, project: &str, cluster: Option<&str>) -> Result<Url, EndpointError> {
        target(&self.validation, &["project", project], cluster)
    }

    /// Target for checking whether a GitHub repository exists.
    pub fn repository(&self, repository: &str) -> Result<Url, EndpointError> {
        target(&self.validation, &["repository", repository], None)
    }

    /// Target for checking whether the user has an OpenShift token.
    pub fn openshift_token(&self, cluster: Option<&str>) -> Result<Url, EndpointError> {
        target(&self.validation, &["token", "openshift"], cluster)
    }

    /// Target for checking whether the user has a GitHub token.
    pub fn github_token(&self) -> Result<Url, EndpointError> {
        target(&self.validation, &["token", "github"], None)
    }

    /// Target for listing OpenShift clusters.
    pub fn clusters(&self) -> Result<Url, EndpointError> {
        target(&self.openshift, &["clusters"], None)
    }

    /// Target for listing OpenShift projects.
    pub fn projects(&self, cluster: Option<&str>) -> Result<Url, EndpointError> {
        target(&self.openshift, &["projects"], cluster)
    }
}

fn base_uri(address: &ServiceAddress, root: &str) -> Result<Url, EndpointError> {
    let host = address.host();
    // Bare IPv6 literals need brackets to be used as an authority.
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    let uri = format!(
        "{}://{host}:{}{root}",
        ServiceAddress::SCHEME,
        address.port()
    );
    Ok(Url::parse(&uri)?)
}

/// Builds a target URI by appending `segments` to `base`, adding the
/// `cluster` query parameter when one is given.
///
/// Segments are checked before they are appended; a segment that is empty,
/// is a dot segment, or contains a reserved or control character is
/// rejected rather than silently rewritten.
pub fn target(base: &Url, segments: &[&str], cluster: Option<&str>) -> Result<Url, EndpointError> {
    for segment in segments {
        check_segment(segment)?;
    }

    let mut uri = base.clone();
    uri.path_segments_mut()
        .map_err(|_| EndpointError::CannotBeABase(base.clone()))?
        .pop_if_empty()
        .extend(segments);

    if let Some(cluster) = cluster {
        uri.query_pairs_mut().append_pair("cluster", cluster);
    }

    Ok(uri)
}

fn check_segment(segment: &str) -> Result<(), EndpointError> {
    let malformed = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment
            .chars()
            .any(|c| c.is_control() || RESERVED.contains(&c));
    if malformed {
        Err(EndpointError::InvalidSegment(segment.to_string()))
    } else {
        Ok(())
    }
}
