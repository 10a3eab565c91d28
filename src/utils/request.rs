use reqwest::{Client, Method, header::HeaderMap};

use crate::error::Route53Error;

/// Status, headers and raw body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Transport seam used by the client. Implementations must not interpret the body.
pub trait DnsHttpClient: Send + Sync {
    fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> impl Future<Output = Result<HttpResponse, Route53Error>> + Send;
}

pub struct DefaultDnsClient {
    inner: Client,
}

impl DefaultDnsClient {
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }
}

impl Default for DefaultDnsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsHttpClient for DefaultDnsClient {
    async fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, Route53Error> {
        let mut req = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| Route53Error::Network(format!("failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::Method;

    use super::{DnsHttpClient, HttpResponse};
    use crate::error::Route53Error;

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub url: String,
        pub headers: HeaderMap,
        pub body: Option<String>,
    }

    /// Replays queued responses in order and records every request it sees.
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        responses: Arc<Mutex<VecDeque<HttpResponse>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, status: u16, body: &str) -> &Self {
            self.push_response(HttpResponse {
                status,
                headers: HeaderMap::new(),
                body: body.to_string(),
            })
        }

        pub fn push_with_header(&self, status: u16, name: &'static str, value: &str) -> &Self {
            let mut headers = HeaderMap::new();
            headers.insert(name, HeaderValue::from_str(value).unwrap());
            self.push_response(HttpResponse { status, headers, body: String::new() })
        }

        pub fn push_response(&self, response: HttpResponse) -> &Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl DnsHttpClient for MockHttpClient {
        async fn request(
            &self,
            method: Method,
            url: String,
            headers: HeaderMap,
            body: Option<String>,
        ) -> Result<HttpResponse, Route53Error> {
            self.requests.lock().unwrap().push(RecordedRequest { method, url, headers, body });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Route53Error::Network("no mock response queued".into()))
        }
    }
}
