// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::sync::Mutex;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::api::wire::api_error;
use crate::auth::Authorization;
use crate::error::{Result, Route53Error};
use crate::types::Change;
use crate::utils::request::{DefaultDnsClient, DnsHttpClient, HttpResponse};
use crate::utils::xml::from_xml;

pub const DEFAULT_ENDPOINT: &str = "https://route53.amazonaws.com/";

/// Where the signing date comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// The local system clock.
    #[default]
    Local,
    /// The provider's `Date` header, fetched before every signed request.
    Server,
}

/// Builder for creating Route53 client instances.
pub struct Route53ClientBuilder<T: DnsHttpClient + Default = DefaultDnsClient> {
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    endpoint: Option<String>,
    clock: ClockSource,
    invalid: Vec<String>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: DnsHttpClient + Default> Default for Route53ClientBuilder<T> {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            clock: ClockSource::Local,
            invalid: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: DnsHttpClient + Default> Route53ClientBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets configuration parameters for the client builder.
    ///
    /// Supported keys:
    /// - "access_key_id"
    /// - "secret_access_key"
    /// - "endpoint"
    /// - "clock" (`local` or `server`)
    ///
    /// Unknown keys or values are reported by [`build`](Self::build).
    pub fn set_param(mut self, key: &str, value: &str) -> Self {
        match key {
            "access_key_id" => self.access_key_id = Some(value.into()),
            "secret_access_key" => self.secret_access_key = Some(value.into()),
            "endpoint" => self.endpoint = Some(value.into()),
            "clock" => match value {
                "local" => self.clock = ClockSource::Local,
                "server" => self.clock = ClockSource::Server,
                _ => self.invalid.push(format!("clock={}", value)),
            },
            _ => self.invalid.push(key.to_string()),
        }
        self
    }

    /// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `ROUTE53_ENDPOINT`.
    ///
    /// Variables that are unset leave the current value untouched.
    pub fn from_env(mut self) -> Self {
        for (var, key) in [
            ("AWS_ACCESS_KEY_ID", "access_key_id"),
            ("AWS_SECRET_ACCESS_KEY", "secret_access_key"),
            ("ROUTE53_ENDPOINT", "endpoint"),
        ] {
            if let Ok(value) = std::env::var(var) {
                self = self.set_param(key, &value);
            }
        }
        self
    }

    /// Constructs the client. Missing credentials only produce warnings.
    pub fn build(self) -> Result<Route53Client<T>> {
        if !self.invalid.is_empty() {
            return Err(Route53Error::Config(format!(
                "invalid parameter(s): {}",
                self.invalid.join(", ")
            )));
        }
        let mut client = Route53Client::with_http_client(
            self.access_key_id.as_deref().unwrap_or_default(),
            self.secret_access_key.as_deref().unwrap_or_default(),
            T::default(),
        );
        if let Some(endpoint) = self.endpoint {
            client.endpoint = normalize_endpoint(&endpoint)?;
        }
        client.clock = self.clock;
        Ok(client)
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim();
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(Route53Error::Config(format!("endpoint must be an http(s) URL: {}", endpoint)));
    }
    if endpoint.ends_with('/') {
        Ok(endpoint.to_string())
    } else {
        Ok(format!("{}/", endpoint))
    }
}

/// Credentials, transport and last-error state shared by every API version.
pub struct Route53Client<T: DnsHttpClient = DefaultDnsClient> {
    /// HTTP client for making requests
    http_client: T,
    /// Base URL, always ending with `/`
    endpoint: String,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    clock: ClockSource,
    last_error: Mutex<Option<Route53Error>>,
}

impl Route53Client<DefaultDnsClient> {
    /// Creates a client over the default reqwest transport.
    ///
    /// Empty credentials are accepted with a warning; signed requests will
    /// fail later with [`Route53Error::MissingCredentials`].
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self::with_http_client(access_key_id, secret_access_key, DefaultDnsClient::new())
    }

    pub fn builder() -> Route53ClientBuilder<DefaultDnsClient> {
        Route53ClientBuilder::new()
    }
}

impl<T: DnsHttpClient> Route53Client<T> {
    pub fn with_http_client(access_key_id: &str, secret_access_key: &str, http_client: T) -> Self {
        let access_key_id = non_empty(access_key_id);
        let secret_access_key = non_empty(secret_access_key);
        if access_key_id.is_none() {
            log::warn!("Route53 client created without an access key id");
        }
        if secret_access_key.is_none() {
            log::warn!("Route53 client created without a secret access key");
        }
        Self {
            http_client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key_id,
            secret_access_key,
            clock: ClockSource::Local,
            last_error: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn http_client(&self) -> &T {
        &self.http_client
    }

    pub fn clock(&self) -> ClockSource {
        self.clock
    }

    /// The error produced by the most recent failing request, if the last
    /// request did not succeed.
    pub fn last_error(&self) -> Option<Route53Error> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn clear_last_error(&self) {
        self.set_last_error(None);
    }

    fn set_last_error(&self, error: Option<Route53Error>) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = error;
        }
    }

    /// Passes a result through, remembering its error.
    pub(crate) fn record<R>(&self, result: Result<R>) -> Result<R> {
        if let Err(e) = &result {
            self.set_last_error(Some(e.clone()));
        }
        result
    }

    /// Builds `<endpoint><version>/<path>[?query]`, URL-escaping query values.
    pub(crate) fn url(&self, version: &str, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}/{}", self.endpoint, version, path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    /// XML namespace for request bodies of the given API version.
    pub(crate) fn namespace(&self, version: &str) -> String {
        format!("{}doc/{}/", self.endpoint, version)
    }

    /// Reads the provider's clock from the `Date` header of `GET <endpoint>date`.
    pub async fn get_server_date(&self) -> Result<String> {
        let url = format!("{}date", self.endpoint);
        let response = self.dispatch(Method::GET, url, HeaderMap::new(), None).await?;
        match response.header("date") {
            Some(date) => Ok(date.to_string()),
            None => {
                log::warn!("Route53 date endpoint returned no Date header");
                self.record(Err(Route53Error::MissingDateHeader))
            }
        }
    }

    async fn authorization(&self) -> Authorization {
        match self.clock {
            ClockSource::Local => Authorization::new(),
            ClockSource::Server => match self.get_server_date().await {
                Ok(date) => Authorization::at(date),
                Err(e) => {
                    log::warn!("falling back to local clock for signing: {}", e);
                    Authorization::new()
                }
            },
        }
    }

    /// Signs and dispatches a request. Non-success responses become
    /// [`Route53Error::Api`].
    pub(crate) async fn send(&self, method: Method, url: String, body: Option<String>) -> Result<HttpResponse> {
        let access_key_id = self
            .access_key_id
            .as_deref()
            .ok_or(Route53Error::MissingCredentials("access_key_id"));
        let secret_access_key = self
            .secret_access_key
            .as_deref()
            .ok_or(Route53Error::MissingCredentials("secret_access_key"));
        let (access_key_id, secret_access_key) = match (access_key_id, secret_access_key) {
            (Ok(id), Ok(key)) => (id, key),
            (Err(e), _) | (_, Err(e)) => return self.record(Err(e)),
        };

        let mut headers = self
            .authorization()
            .await
            .build_request_headers(access_key_id, secret_access_key)?;
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        }

        self.dispatch(method, url, headers, body).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        log::debug!("[route53] {} {}", method, url);
        if let Some(body) = &body {
            log::debug!("[route53] Request Body: {}", body);
        }

        let response = self
            .record(self.http_client.request(method, url, headers, body).await)?;

        log::debug!("[route53] Response Status: {}", response.status);
        log::debug!("[route53] Response Body: {}", response.body);

        if !response.is_success() {
            let error = api_error(response.status, &response.body);
            log::error!("[route53] {}", error);
            return self.record(Err(error));
        }

        self.clear_last_error();
        Ok(response)
    }

    /// Decodes a response body, remembering decode failures.
    pub(crate) fn decode<W: DeserializeOwned>(&self, body: &str) -> Result<W> {
        self.record(from_xml(body))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parameters for a hosted-zone or record-set operation.
///
/// Each operation reads only the fields it needs and rejects the call before
/// any request is made when a required one is missing.
#[derive(Debug, Clone, Default)]
pub struct ZoneOperationBuilder {
    pub(crate) zone_id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) caller_reference: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) marker: Option<String>,
    pub(crate) max_items: Option<u32>,
    pub(crate) record_name: Option<String>,
    pub(crate) record_type: Option<String>,
    pub(crate) record_identifier: Option<String>,
    pub(crate) changes: Option<Vec<Change>>,
    pub(crate) change_id: Option<String>,
}

impl ZoneOperationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hosted zone id, with or without the `/hostedzone/` prefix.
    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    /// Zone name; a trailing dot is added when missing.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn caller_reference(mut self, caller_reference: &str) -> Self {
        self.caller_reference = Some(caller_reference.into());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Opaque pagination marker from a previous page.
    pub fn marker(mut self, marker: &str) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn max_items(mut self, max_items: u32) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// First record name to list from.
    pub fn record_name(mut self, record_name: &str) -> Self {
        self.record_name = Some(record_name.into());
        self
    }

    pub fn record_type(mut self, record_type: &str) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    pub fn record_identifier(mut self, record_identifier: &str) -> Self {
        self.record_identifier = Some(record_identifier.into());
        self
    }

    /// Appends one change to the batch.
    pub fn change(mut self, change: Change) -> Self {
        self.changes.get_or_insert_with(Vec::new).push(change);
        self
    }

    pub fn changes(mut self, changes: Vec<Change>) -> Self {
        self.changes = Some(changes);
        self
    }

    /// Change id, with or without the `/change/` prefix.
    pub fn change_id(mut self, change_id: &str) -> Self {
        self.change_id = Some(change_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AUTHORIZATION_HEADER, DATE_HEADER};
    use crate::utils::request::mock::MockHttpClient;

    fn client(mock: &MockHttpClient) -> Route53Client<MockHttpClient> {
        Route53Client::with_http_client("AKID", "secret", mock.clone())
    }

    #[test]
    fn missing_credentials_do_not_fail_construction() {
        let client = Route53Client::with_http_client("", " ", MockHttpClient::new());
        assert!(client.last_error().is_none());
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_dispatch() {
        let mock = MockHttpClient::new();
        let client = Route53Client::with_http_client("AKID", "", mock.clone());

        let err = client
            .send(Method::GET, client.url("2013-04-01", "hostedzone", &[]), None)
            .await
            .unwrap_err();

        assert_eq!(err, Route53Error::MissingCredentials("secret_access_key"));
        assert_eq!(client.last_error(), Some(err));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn urls_escape_query_values() {
        let client = client(&MockHttpClient::new());
        let url = client.url(
            "2013-04-01",
            "hostedzone",
            &[("marker", "a b/c".to_string()), ("maxitems", "100".to_string())],
        );
        assert_eq!(
            url,
            "https://route53.amazonaws.com/2013-04-01/hostedzone?marker=a%20b%2Fc&maxitems=100"
        );
        assert_eq!(
            client.namespace("2013-04-01"),
            "https://route53.amazonaws.com/doc/2013-04-01/"
        );
    }

    #[tokio::test]
    async fn signed_requests_carry_auth_headers() {
        let mock = MockHttpClient::new();
        mock.push(200, "<Ok/>");
        let client = client(&mock);

        client
            .send(Method::POST, client.url("2013-04-01", "hostedzone", &[]), Some("<x/>".into()))
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert!(headers.contains_key(DATE_HEADER));
        let auth = headers.get(AUTHORIZATION_HEADER).unwrap().to_str().unwrap();
        assert!(auth.starts_with("AWS3-HTTPS AWSAccessKeyId=AKID,Algorithm=HmacSHA256,Signature="));
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/xml");
    }

    #[tokio::test]
    async fn api_errors_fill_the_last_error_slot_until_next_success() {
        let mock = MockHttpClient::new();
        mock.push(
            404,
            "<ErrorResponse><Error><Type>Sender</Type><Code>NoSuchHostedZone</Code>\
             <Message>No hosted zone found with ID: Z1</Message></Error>\
             <RequestId>req-1</RequestId></ErrorResponse>",
        );
        mock.push(200, "<Ok/>");
        let client = client(&mock);
        let url = client.url("2013-04-01", "hostedzone/Z1", &[]);

        let err = client.send(Method::GET, url.clone(), None).await.unwrap_err();
        assert_eq!(
            err,
            Route53Error::Api {
                status: 404,
                code: "NoSuchHostedZone".into(),
                message: "No hosted zone found with ID: Z1".into(),
                request_id: Some("req-1".into()),
            }
        );
        assert_eq!(client.last_error().and_then(|e| e.code().map(String::from)).as_deref(), Some("NoSuchHostedZone"));

        client.send(Method::GET, url, None).await.unwrap();
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn server_date_is_read_from_header() {
        let mock = MockHttpClient::new();
        mock.push_with_header(200, "date", "Mon, 01 Apr 2013 12:30:05 GMT");
        mock.push(200, "");
        let client = client(&mock);

        assert_eq!(client.get_server_date().await.unwrap(), "Mon, 01 Apr 2013 12:30:05 GMT");
        assert_eq!(mock.requests()[0].url, "https://route53.amazonaws.com/date");
        assert!(!mock.requests()[0].headers.contains_key(AUTHORIZATION_HEADER));

        assert_eq!(client.get_server_date().await.unwrap_err(), Route53Error::MissingDateHeader);
        assert_eq!(client.last_error(), Some(Route53Error::MissingDateHeader));
    }

    #[tokio::test]
    async fn server_clock_signs_with_provider_date() {
        let mock = MockHttpClient::new();
        mock.push_with_header(200, "date", "Mon, 01 Apr 2013 12:30:05 GMT");
        mock.push(200, "<Ok/>");
        let mut client = client(&mock);
        client.clock = ClockSource::Server;

        client
            .send(Method::GET, client.url("2013-04-01", "hostedzone", &[]), None)
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].headers.get(DATE_HEADER).unwrap(), "Mon, 01 Apr 2013 12:30:05 GMT");
    }

    #[test]
    fn builder_params() {
        let client = Route53ClientBuilder::<MockHttpClient>::new()
            .set_param("access_key_id", "AKID")
            .set_param("secret_access_key", "secret")
            .set_param("endpoint", "http://localhost:8080")
            .set_param("clock", "server")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/");
        assert_eq!(client.clock(), ClockSource::Server);

        let err = Route53ClientBuilder::<MockHttpClient>::new()
            .set_param("region", "us-east-1")
            .set_param("clock", "atomic")
            .build()
            .err()
            .unwrap();
        assert_eq!(err, Route53Error::Config("invalid parameter(s): region, clock=atomic".into()));

        let err = Route53ClientBuilder::<MockHttpClient>::new()
            .set_param("endpoint", "route53.amazonaws.com")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Route53Error::Config(_)));
    }

    #[test]
    fn operation_builder_accumulates_changes() {
        use crate::types::ResourceRecordSet;

        let rrs = ResourceRecordSet::new("a.example.com.", "A", 60, vec!["192.0.2.1".into()]);
        let builder = ZoneOperationBuilder::new()
            .zone_id("/hostedzone/Z1")
            .change(Change::create(rrs.clone()))
            .change(Change::delete(rrs));
        assert_eq!(builder.changes.as_ref().map(Vec::len), Some(2));
        assert_eq!(builder.zone_id.as_deref(), Some("/hostedzone/Z1"));
    }
}
