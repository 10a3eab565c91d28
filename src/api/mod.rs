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

pub mod v2012_02_29;
pub mod v2013_04_01;
pub(crate) mod wire;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use route53_sdk_macros::extract_params;

use crate::client::{Route53Client, ZoneOperationBuilder};
use crate::error::{Result, Route53Error};
use crate::types::{ChangeInfo, CreatedHostedZone, HostedZoneDetail, HostedZonePage, RecordSetPage};
use crate::utils::names::normalize_zone_name;
use crate::utils::request::DnsHttpClient;

pub use v2012_02_29::V20120229;
pub use v2013_04_01::V20130401;

/// Page size `find_hosted_zone` requests.
pub const FIND_PAGE_SIZE: u32 = 100;

/// Provider API versions, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ApiVersion {
    V2012_02_29,
    #[default]
    V2013_04_01,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2012_02_29 => "2012-02-29",
            ApiVersion::V2013_04_01 => "2013-04-01",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = Route53Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2012-02-29" => Ok(ApiVersion::V2012_02_29),
            "2013-04-01" => Ok(ApiVersion::V2013_04_01),
            other => Err(Route53Error::Config(format!("unsupported API version: {}", other))),
        }
    }
}

/// Outcome of [`HostedZoneApi::find_hosted_zone`] when no request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneLookup {
    Found(HostedZoneDetail),
    NotFound,
}

impl ZoneLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, ZoneLookup::Found(_))
    }

    pub fn into_found(self) -> Option<HostedZoneDetail> {
        match self {
            ZoneLookup::Found(detail) => Some(detail),
            ZoneLookup::NotFound => None,
        }
    }
}

/// Hosted-zone and record-set operations of one provider API version.
///
/// Every operation takes its parameters from a [`ZoneOperationBuilder`] and
/// validates the required ones before any request is made.
#[async_trait]
pub trait HostedZoneApi: Send + Sync {
    /// The version used for paths and request namespaces.
    fn version(&self) -> ApiVersion;

    /// Lists one page of hosted zones.
    ///
    /// Optional: `marker`, `max_items`.
    async fn list_hosted_zones(&self, builder: &ZoneOperationBuilder) -> Result<HostedZonePage>;

    /// Gets a hosted zone and its name servers.
    ///
    /// Required: `zone_id`.
    async fn get_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<HostedZoneDetail>;

    /// Looks a hosted zone up by name, paging through every zone on the
    /// account until a case-sensitive match is found.
    ///
    /// Required: `name`.
    async fn find_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<ZoneLookup> {
        let params = extract_params!(builder, RequestParams, {
            required name: String;
        });
        let name = normalize_zone_name(&params.name);

        let mut marker: Option<String> = None;
        loop {
            let mut page_request = ZoneOperationBuilder::new().max_items(FIND_PAGE_SIZE);
            if let Some(marker) = &marker {
                page_request = page_request.marker(marker);
            }
            let page = self.list_hosted_zones(&page_request).await?;

            if let Some(zone) = page.hosted_zones.iter().find(|zone| zone.name == name) {
                let detail = self
                    .get_hosted_zone(&ZoneOperationBuilder::new().zone_id(&zone.id))
                    .await?;
                return Ok(ZoneLookup::Found(detail));
            }

            if page.hosted_zones.len() < FIND_PAGE_SIZE as usize {
                break;
            }
            match page.next_marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        log::debug!("no hosted zone named {}", name);
        Ok(ZoneLookup::NotFound)
    }

    /// Creates a hosted zone.
    ///
    /// Required: `name`, `caller_reference`. Optional: `comment`.
    async fn create_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<CreatedHostedZone>;

    /// Deletes an empty hosted zone.
    ///
    /// Required: `zone_id`.
    async fn delete_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo>;

    /// Lists one page of record sets in a zone.
    ///
    /// Required: `zone_id`. Optional: `record_name`, `record_type`,
    /// `record_identifier`, `max_items`.
    async fn list_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<RecordSetPage>;

    /// Submits a change batch.
    ///
    /// Required: `zone_id`, `changes` (non-empty). Optional: `comment`.
    async fn change_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo>;

    /// Reads the status of a submitted change.
    ///
    /// Required: `change_id`.
    async fn get_change(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo>;
}

/// Returns the module implementing `version` over a shared client.
pub fn connect<T: DnsHttpClient + 'static>(client: Arc<Route53Client<T>>, version: ApiVersion) -> Box<dyn HostedZoneApi> {
    match version {
        ApiVersion::V2012_02_29 => Box::new(V20120229::new(client)),
        ApiVersion::V2013_04_01 => Box::new(V20130401::new(client)),
    }
}
