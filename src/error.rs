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

use route53_sdk_macros::MissingParameter;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Route53Error>;

/// Errors returned by every client operation.
///
/// The type is `Clone` so the client can keep a copy of the most recent
/// failure in its last-error slot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Route53Error {
    /// A required operation parameter was absent or empty.
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// A signed request was attempted without an access key id or secret.
    #[error("missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("API error (HTTP {status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("failed to serialize request: {0}")]
    Serialization(String),

    #[error("server response carried no Date header")]
    MissingDateHeader,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Route53Error {
    /// The provider error code, when the failure came from the API.
    pub fn code(&self) -> Option<&str> {
        match self {
            Route53Error::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<MissingParameter> for Route53Error {
    fn from(e: MissingParameter) -> Self {
        Route53Error::MissingParameter(e.0)
    }
}

impl From<reqwest::Error> for Route53Error {
    fn from(e: reqwest::Error) -> Self {
        Route53Error::Network(e.to_string())
    }
}

impl From<quick_xml::DeError> for Route53Error {
    fn from(e: quick_xml::DeError) -> Self {
        Route53Error::Parse(e.to_string())
    }
}
