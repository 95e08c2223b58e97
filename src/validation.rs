//! Turning the results of Mission Control calls into validation messages.
//!
//! Validation never fails outright. A [`Check`] knows how to describe each
//! possible outcome of asking Mission Control about one kind of resource:
//! the resource exists, it does not, Mission Control cannot be reached, or
//! something else went wrong.
//!
//! Project and repository checks are looking for _conflicts_, so a resource
//! that exists is a problem. Token checks are looking for _credentials_, so
//! a token that exists is exactly what we want.

use std::error::Error;
use std::io;

/// The message returned when validation succeeds.
pub const VALIDATION_MESSAGE_OK: &str = "OK";

/// Message prefix the resolver uses when host name lookup fails.
const LOOKUP_FAILURE: &str = "failed to lookup address information";

/// Description hyper attaches to failed host name lookups.
const DNS_ERROR: &str = "dns error";

/// A single kind of validation that can be requested from Mission Control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check<'a> {
    /// Does an OpenShift project with this name already exist?
    OpenShiftProject(&'a str),

    /// Does a GitHub repository with this name already exist?
    GitHubRepository(&'a str),

    /// Has the user stored an OpenShift token?
    OpenShiftToken,

    /// Has the user stored a GitHub token?
    GitHubToken,
}

impl Check<'_> {
    /// The validation message for a response with the given HTTP status.
    ///
    /// # Examples
    ///
    /// ```
    /// use mission_control::validation::Check;
    /// let check = Check::OpenShiftProject("my-project");
    /// assert_eq!(check.status_message(200), "OpenShift Project 'my-project' already exists");
    /// assert_eq!(check.status_message(404), "OK");
    /// assert_eq!(Check::GitHubToken.status_message(200), "OK");
    /// assert_eq!(Check::GitHubToken.status_message(404), "GitHub Token does not exist");
    /// ```
    pub fn status_message(&self, status: u16) -> String {
        let found = status == 200;
        match self {
            Check::OpenShiftProject(project) if found => {
                format!("OpenShift Project '{project}' already exists")
            }
            Check::GitHubRepository(repository) if found => {
                format!("GitHub Repository '{repository}' already exists")
            }
            Check::OpenShiftProject(_) | Check::GitHubRepository(_) => {
                VALIDATION_MESSAGE_OK.to_string()
            }
            Check::OpenShiftToken | Check::GitHubToken if found => {
                VALIDATION_MESSAGE_OK.to_string()
            }
            Check::OpenShiftToken => String::from("OpenShift Token does not exist"),
            Check::GitHubToken => String::from("GitHub Token does not exist"),
        }
    }

    /// The validation message when Mission Control cannot be reached.
    pub fn offline_message(&self) -> &'static str {
        match self {
            Check::OpenShiftProject(_) => {
                "Mission Control is offline and cannot validate the OpenShift Project Name"
            }
            Check::GitHubRepository(_) => {
                "Mission Control is offline and cannot validate the GitHub Repository Name"
            }
            Check::OpenShiftToken => {
                "Mission Control is offline and cannot validate if the OpenShift token exists"
            }
            Check::GitHubToken => {
                "Mission Control is offline and cannot validate if the GitHub token exists"
            }
        }
    }

    fn error_prefix(&self) -> &'static str {
        match self {
            Check::OpenShiftProject(_) => "Error while validating OpenShift Project Name: ",
            Check::GitHubRepository(_) => "Error while validating GitHub Repository Name: ",
            Check::OpenShiftToken => "Error while validating if the OpenShift Token exists: ",
            Check::GitHubToken => "Error while validating if the GitHub Token exists: ",
        }
    }

    /// The validation message for a call that failed with `error`.
    pub fn failure_message(&self, error: &(dyn Error + 'static)) -> String {
        match classify(error) {
            Failure::Offline => self.offline_message().to_string(),
            Failure::Other(message) => format!("{}{message}", self.error_prefix()),
        }
    }

    /// The validation message for the result of a HEAD call.
    pub fn outcome<E>(&self, result: Result<u16, E>) -> String
    where
        E: Error + 'static,
    {
        match result {
            Ok(status) => self.status_message(status),
            Err(err) => self.failure_message(&err),
        }
    }
}

/// Why a call to Mission Control failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Mission Control's host could not be found or refused the connection.
    Offline,

    /// Anything else, described by the most specific message available.
    Other(String),
}

/// Classifies `error` by looking at its root cause.
///
/// The message of an [`Other`](Failure::Other) failure is the root cause's
/// message, or `error`'s own message if the root cause has none.
pub fn classify(error: &(dyn Error + 'static)) -> Failure {
    let root = root_cause(error);
    if is_offline(error, root) {
        return Failure::Offline;
    }
    let message = root.to_string();
    if message.is_empty() {
        Failure::Other(error.to_string())
    } else {
        Failure::Other(message)
    }
}

/// The innermost error in `error`'s chain of sources.
pub fn root_cause<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut root = error;
    while let Some(source) = root.source() {
        root = source;
    }
    root
}

fn is_offline(error: &(dyn Error + 'static), root: &(dyn Error + 'static)) -> bool {
    match root.downcast_ref::<io::Error>() {
        Some(err) => is_unreachable(err) || is_unknown_host(error, err),
        None => false,
    }
}

fn is_unreachable(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
    )
}

// Failed lookups don't have an error kind of their own, so they are
// recognized by how the resolver and hyper describe them.
fn is_unknown_host(error: &(dyn Error + 'static), root: &io::Error) -> bool {
    root.to_string().starts_with(LOOKUP_FAILURE)
        || chain(error).any(|err| err.to_string() == DNS_ERROR)
}

fn chain<'a>(error: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(error), |err| (*err).source())
}
