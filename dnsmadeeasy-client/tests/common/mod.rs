//! Shared test helpers

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dnsmadeeasy_client::{
    ApiRequest, DnsMadeEasy, HttpTransport, RawResponse, Transport, TransportError,
};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// In-memory transport replaying scripted responses and recording every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<RawResponse, TransportError>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Ok(RawResponse::new(status, body)))
    }

    /// Queue a fully built response.
    pub fn respond_with(self, response: RawResponse) -> Self {
        self.push(Ok(response))
    }

    /// Queue a transport fault.
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<RawResponse, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The only request sent; panics unless exactly one was sent.
    pub fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

/// Client over a mock transport, plus a handle to inspect it.
pub fn mock_client(transport: MockTransport) -> (DnsMadeEasy<MockTransport>, MockTransport) {
    (DnsMadeEasy::with_transport(transport.clone()), transport)
}

/// Unique record name for live tests.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Sandbox test context.
pub struct TestContext {
    pub client: DnsMadeEasy<HttpTransport>,
    pub domain: String,
}

impl TestContext {
    pub fn sandbox() -> Option<Self> {
        let api_key = env::var("DNSMADEEASY_API_KEY").ok()?;
        let secret_key = env::var("DNSMADEEASY_SECRET_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let client = DnsMadeEasy::builder(api_key, secret_key)
            .sandbox(true)
            .build()
            .ok()?;

        Some(Self { client, domain })
    }
}
