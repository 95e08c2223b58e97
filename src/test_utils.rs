use crate::client::MissionControl;
use crate::conf::ServiceAddress;
use crate::http::{HTTPError, HTTPResult};
use crate::service::Service;
use reqwest::StatusCode;
use std::sync::Mutex;
use url::Url;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn mission_control(service: TestService) -> MissionControl<TestService> {
    let address = ServiceAddress::new("localhost", 8080).unwrap();
    MissionControl::with_service(&address, service).unwrap()
}

/// What a [`TestService`] answers with.
#[derive(Clone, Debug)]
pub enum Reply {
    /// HEAD requests return this status; GET requests fail unless it is
    /// a success status, in which case they return no items.
    Status(u16),

    /// HEAD requests return 200; GET requests return these items.
    Items(Vec<String>),

    /// Every request fails with this HTTP status.
    Failure(u16),

    /// Every request fails as if the body was not a JSON list.
    Malformed,
}

#[derive(Clone, Debug)]
pub struct Request {
    pub method: &'static str,
    pub target: String,
    pub auth: String,
}

#[derive(Debug)]
pub struct TestService {
    reply: Reply,
    requests: Mutex<Vec<Request>>,
}

impl TestService {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, target: &Url, auth: &str) {
        self.requests.lock().unwrap().push(Request {
            method,
            target: target.to_string(),
            auth: auth.to_string(),
        });
    }
}

fn http_failure(status: u16) -> HTTPError {
    HTTPError::Http(StatusCode::from_u16(status).expect("invalid status code"))
}

fn malformed() -> HTTPError {
    let err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
    HTTPError::Deserialization(err)
}

impl Service for TestService {
    async fn head(&self, target: Url, auth: &str) -> HTTPResult<u16> {
        self.record("HEAD", &target, auth);
        match &self.reply {
            Reply::Status(status) => Ok(*status),
            Reply::Items(_) => Ok(200),
            Reply::Failure(status) => Err(http_failure(*status)),
            Reply::Malformed => Err(malformed()),
        }
    }

    async fn get_list(&self, target: Url, auth: &str) -> HTTPResult<Vec<String>> {
        self.record("GET", &target, auth);
        match &self.reply {
            Reply::Status(status) if (200..300).contains(status) => Ok(Vec::new()),
            Reply::Status(status) | Reply::Failure(status) => Err(http_failure(*status)),
            Reply::Items(items) => Ok(items.clone()),
            Reply::Malformed => Err(malformed()),
        }
    }
}
