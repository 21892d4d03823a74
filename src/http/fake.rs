use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::{
    error::TransportError,
    request::{HttpRequest, HttpResponse},
    transport::Transport,
};

/// In-memory transport: records every request and answers with queued responses in order.
/// Running out of responses is reported as a connection failure.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    barrier: Option<Barrier>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send` waits until `parties` sends are in flight at the same time
    pub fn with_barrier(parties: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(parties)),
            ..Self::default()
        }
    }

    pub fn push_response(&self, response: HttpResponse) -> &Self {
        lock(&self.responses).push_back(Ok(response));
        self
    }

    pub fn push_failure(&self, message: &str) -> &Self {
        lock(&self.responses).push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match lock(&self.responses).pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Connection(message)),
            None => Err(TransportError::Connection(
                "No response queued on fake transport".to_string(),
            )),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Only poisoned when a test already panicked
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
