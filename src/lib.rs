//! Route53 SDK for the hosted-zone XML API
//!
//! Supported features:
//! - Hosted zones: list, get, find by name, create, delete
//! - Record sets: list, change batches, change status
//! - API versions 2012-02-29 and 2013-04-01
//! - AWS3-HTTPS request signing against the local or the server clock
//! - Builder pattern for request configuration
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use route53_sdk::{ApiVersion, Route53Client, ZoneOperationBuilder, connect};
//!
//! # async fn run() -> route53_sdk::Result<()> {
//! let client = Route53Client::builder()
//!     .set_param("access_key_id", "your_id")
//!     .set_param("secret_access_key", "your_key")
//!     .build()?;
//!
//! let api = connect(Arc::new(client), ApiVersion::V2013_04_01);
//! let lookup = api
//!     .find_hosted_zone(&ZoneOperationBuilder::new().name("example.com"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

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

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod types;
pub mod utils;

pub use api::{ApiVersion, HostedZoneApi, V20120229, V20130401, ZoneLookup, connect};
pub use client::{ClockSource, Route53Client, Route53ClientBuilder, ZoneOperationBuilder};
pub use error::{Result, Route53Error};
pub use types::*;
pub use utils::request::{DefaultDnsClient, DnsHttpClient, HttpResponse};
pub use utils::xml::{OrderedFields, ordered_hash};
