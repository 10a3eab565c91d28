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

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::Sha256;

use crate::error::{Result, Route53Error};

type HmacSha256 = Hmac<Sha256>;

pub const DATE_HEADER: &str = "x-amz-date";
pub const AUTHORIZATION_HEADER: &str = "x-amzn-authorization";

/// Formats a timestamp the way the provider's `Date` header does (RFC 1123).
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Helper for the AWS3-HTTPS request signature.
///
/// The signature is an HMAC-SHA256 of the request date keyed with the secret
/// access key, so signing only depends on the date and the credentials.
#[derive(Clone)]
pub(crate) struct Authorization {
    algorithm: String,
    date: String,
}

impl Authorization {
    /// Creates an authorization context dated now on the local clock.
    pub(crate) fn new() -> Self {
        Self::at(http_date(Utc::now()))
    }

    /// Creates an authorization context for an explicit date string.
    pub(crate) fn at(date: impl Into<String>) -> Self {
        Self {
            algorithm: "HmacSHA256".to_string(),
            date: date.into(),
        }
    }

    /// Signs a message using HMAC-SHA256 and returns the base64 digest.
    fn sign(key: &[u8], msg: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| Route53Error::Config(format!("invalid signing key: {}", e)))?;
        mac.update(msg.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Generates the authorization header value.
    pub(crate) fn generate_authorization_header(&self, access_key_id: &str, secret_key: &str) -> Result<String> {
        let signature = Self::sign(secret_key.as_bytes(), &self.date)?;
        Ok(format!(
            "AWS3-HTTPS AWSAccessKeyId={},Algorithm={},Signature={}",
            access_key_id, self.algorithm, signature
        ))
    }

    /// Builds signed HTTP request headers.
    pub(crate) fn build_request_headers(&self, access_key_id: &str, secret_key: &str) -> Result<HeaderMap> {
        let authorization_header = self.generate_authorization_header(access_key_id, secret_key)?;

        let mut headers = HeaderMap::new();
        headers.insert(DATE_HEADER, header_value(&self.date)?);
        headers.insert(AUTHORIZATION_HEADER, header_value(&authorization_header)?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Route53Error::Serialization(format!("invalid header value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn http_date_format() {
        let at = Utc.with_ymd_and_hms(2013, 4, 1, 12, 30, 5).unwrap();
        assert_eq!(http_date(at), "Mon, 01 Apr 2013 12:30:05 GMT");
    }

    #[test]
    fn signature_is_hmac_of_the_date() {
        let auth = Authorization::at("Thu, 14 Aug 2008 17:08:48 GMT");
        let header = auth.generate_authorization_header("AKIDEXAMPLE", "key").unwrap();
        assert_eq!(
            header,
            "AWS3-HTTPS AWSAccessKeyId=AKIDEXAMPLE,Algorithm=HmacSHA256,\
             Signature=RQGJ4tbp1N0n7gVVaNZrk8oSEVR36VLIDnFQ8X+yAx0="
        );

        let again = Authorization::at("Thu, 14 Aug 2008 17:08:48 GMT")
            .generate_authorization_header("AKIDEXAMPLE", "key")
            .unwrap();
        assert_eq!(header, again);

        let other = Authorization::at("Fri, 15 Aug 2008 17:08:48 GMT")
            .generate_authorization_header("AKIDEXAMPLE", "key")
            .unwrap();
        assert_ne!(header, other);
    }

    #[test]
    fn headers_carry_date_and_signature() {
        let headers = Authorization::at("Mon, 01 Apr 2013 12:30:05 GMT")
            .build_request_headers("id", "secret")
            .unwrap();
        assert_eq!(headers.get(DATE_HEADER).unwrap(), "Mon, 01 Apr 2013 12:30:05 GMT");
        let auth = headers.get(AUTHORIZATION_HEADER).unwrap().to_str().unwrap();
        let signature = auth.rsplit("Signature=").next().unwrap();
        // 32-byte digest in padded base64
        assert_eq!(signature.len(), 44);
        assert!(signature.ends_with('='));
    }
}
