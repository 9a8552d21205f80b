//! In-memory transport for exercising services and views without a server.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use hero_geo_core::{ApiError, HttpRequest, HttpResponse};

use crate::transport::Transport;

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Unreachable(String),
    Hang,
}

/// Replays a fixed script of replies, one per request, and records every
/// request it sees. Once the script runs out it answers as if the server
/// were unreachable.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Reply::Response(HttpResponse::new(status, body)))
    }

    /// Fail without a status, as a refused connection would.
    pub fn unreachable(self, message: impl Into<String>) -> Self {
        self.push(Reply::Unreachable(message.into()))
    }

    /// Never answer. Useful for observing cancellation.
    pub fn hang(self) -> Self {
        self.push(Reply::Hang)
    }

    fn push(self, reply: Reply) -> Self {
        lock(&self.replies).push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        lock(&self.requests).push(request.clone());
        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Unreachable(message)) => Err(ApiError::Connectivity(message)),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(ApiError::Connectivity("script exhausted".to_string())),
        }
    }
}
