//! Test doubles for the vendor boundary.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::{VendorClient, VendorError};

/// Records every request and answers with a canned body or status error.
pub(crate) struct StubClient<Req> {
    requests: Mutex<Vec<Req>>,
    reply: Result<serde_json::Value, (u16, String)>,
}

impl<Req: Clone> StubClient<Req> {
    pub(crate) fn ok(body: serde_json::Value) -> Self {
        StubClient {
            requests: Mutex::new(Vec::new()),
            reply: Ok(body),
        }
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        StubClient {
            requests: Mutex::new(Vec::new()),
            reply: Err((status, message.to_string())),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Req> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl<Req> VendorClient<Req> for StubClient<Req>
where
    Req: Clone + Send + Sync,
{
    async fn send(&self, request: &Req) -> Result<serde_json::Value, VendorError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err((status, message)) => Err(VendorError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
