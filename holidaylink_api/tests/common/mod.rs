#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};

use holidaylink_api::{Client, Credentials, Error, RawResponse, Request, Transport};

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

pub fn credentials() -> Credentials {
    Credentials::new("test-key", "test-secret")
}

/// Transport that records every request and answers with a canned response.
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    response: RawResponse,
}

impl RecordingTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: RawResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Request {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: Request) -> impl Future<Output = Result<RawResponse, Error>> + Send {
        self.requests.lock().unwrap().push(request);
        let response = self.response.clone();
        async move { Ok(response) }
    }
}

pub fn fake_client(transport: &RecordingTransport) -> Client<RecordingTransport> {
    Client::with_transport("https://api.test", transport.clone(), credentials())
}
