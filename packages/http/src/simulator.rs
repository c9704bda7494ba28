//! Scripted HTTP client backend.
//!
//! [`SimulatorClient`] never touches the network. Responses are queued up front with
//! [`SimulatorClient::respond`] / [`SimulatorClient::fail`] and handed out in FIFO order, and
//! every request that reaches the client is recorded so callers can assert on exactly what
//! would have been sent.
//!
//! When the queue is empty, [`SimulatorClient::execute`](crate::HttpClient::execute) fails with
//! [`Error::NoResponse`].

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Error, HttpClient, Request, Response, StatusCode};

enum Scripted {
    Respond(Response),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    queue: VecDeque<Scripted>,
    requests: Vec<Request>,
}

/// Cloning shares the same queue and request log.
#[derive(Clone, Default)]
pub struct SimulatorClient {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatorClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    ///
    /// # Panics
    ///
    /// * If the internal `Mutex` is poisoned
    pub fn respond(&self, status: StatusCode, body: impl Into<Bytes>) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .queue
            .push_back(Scripted::Respond(Response::new(status, body)));
        self
    }

    /// Queues a transport failure.
    ///
    /// # Panics
    ///
    /// * If the internal `Mutex` is poisoned
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .queue
            .push_back(Scripted::Fail(message.into()));
        self
    }

    /// Every request received so far, oldest first.
    ///
    /// # Panics
    ///
    /// * If the internal `Mutex` is poisoned
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// # Panics
    ///
    /// * If the internal `Mutex` is poisoned
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }
}

#[async_trait]
impl HttpClient for SimulatorClient {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let method = request.method;
        let url = request.url.clone();
        inner.requests.push(request);

        match inner.queue.pop_front() {
            Some(Scripted::Respond(response)) => {
                log::trace!("execute: {method} {url} -> {}", response.status);
                Ok(response)
            }
            Some(Scripted::Fail(message)) => {
                log::trace!("execute: {method} {url} -> failure: {message}");
                Err(Error::Simulated(message))
            }
            None => Err(Error::NoResponse { method, url }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Method;

    #[test_log::test(actix_web::test)]
    async fn returns_queued_responses_in_order() {
        let client = SimulatorClient::new();
        client
            .respond(StatusCode::OK, "first")
            .respond(StatusCode::CREATED, "second");

        let first = client.execute(Request::get("http://a/1")).await.unwrap();
        let second = client.execute(Request::get("http://a/2")).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.text(), "first");
        assert_eq!(second.status(), StatusCode::CREATED);
        assert_eq!(second.text(), "second");
        assert_eq!(client.pending(), 0);
    }

    #[test_log::test(actix_web::test)]
    async fn records_requests_even_when_failing() {
        let client = SimulatorClient::new();
        client.fail("connection refused");

        let result = client
            .execute(Request::post("http://a/users").header("x-test", "1"))
            .await;

        assert!(matches!(result, Err(Error::Simulated(message)) if message == "connection refused"));

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].header_value("X-Test"), Some("1"));
    }

    #[test_log::test(actix_web::test)]
    async fn empty_queue_is_an_error() {
        let client = SimulatorClient::new();

        let result = client.execute(Request::get("http://a/none")).await;

        assert!(matches!(
            result,
            Err(Error::NoResponse { method: Method::Get, url }) if url == "http://a/none"
        ));
    }

    #[test_log::test(actix_web::test)]
    async fn clones_share_state() {
        let client = SimulatorClient::new();
        let clone = client.clone();
        clone.respond(StatusCode::OK, "shared");

        let response = client.execute(Request::get("http://a/")).await.unwrap();

        assert_eq!(response.text(), "shared");
        assert_eq!(clone.requests().len(), 1);
    }
}
