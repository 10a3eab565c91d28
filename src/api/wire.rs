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

//! XML response shapes as the provider sends them.
//!
//! Repeated elements (`HostedZone`, `NameServer`, `ResourceRecordSet`,
//! `ResourceRecord`) are always collected into `Vec`s, so one element and
//! many elements decode the same way.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Result, Route53Error};
use crate::types::{
    AliasTarget, ChangeInfo, DelegationSet, HostedZone, HostedZoneConfig, HostedZonePage, RecordSetPage,
    ResourceRecordSet,
};
use crate::utils::serde_utils::{empty_string_as_none, trimmed_string};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireHostedZone {
    #[serde(deserialize_with = "trimmed_string")]
    id: String,
    name: String,
    caller_reference: String,
    #[serde(default)]
    config: Option<WireHostedZoneConfig>,
    #[serde(default)]
    resource_record_set_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireHostedZoneConfig {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    comment: Option<String>,
}

/// Which optional hosted-zone fields an API version reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneShape {
    Basic,
    WithRecordSetCount,
}

impl WireHostedZone {
    pub(crate) fn into_zone(self, shape: ZoneShape) -> HostedZone {
        HostedZone {
            id: self.id,
            name: self.name,
            caller_reference: self.caller_reference,
            // `Config` may carry nothing but `PrivateZone`
            config: self
                .config
                .and_then(|c| c.comment)
                .map(|comment| HostedZoneConfig { comment: Some(comment) }),
            resource_record_set_count: match shape {
                ZoneShape::Basic => None,
                ZoneShape::WithRecordSetCount => self.resource_record_set_count,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireHostedZones {
    #[serde(rename = "HostedZone", default)]
    zones: Vec<WireHostedZone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListHostedZonesResponse {
    #[serde(default)]
    hosted_zones: WireHostedZones,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    marker: Option<String>,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    next_marker: Option<String>,
    #[serde(default)]
    max_items: u32,
}

impl ListHostedZonesResponse {
    pub(crate) fn into_page(self, shape: ZoneShape) -> HostedZonePage {
        HostedZonePage {
            hosted_zones: self.hosted_zones.zones.into_iter().map(|z| z.into_zone(shape)).collect(),
            marker: self.marker,
            is_truncated: self.is_truncated,
            next_marker: self.next_marker,
            max_items: self.max_items,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireDelegationSet {
    #[serde(default)]
    name_servers: WireNameServers,
}

#[derive(Debug, Default, Deserialize)]
struct WireNameServers {
    #[serde(rename = "NameServer", default)]
    name_servers: Vec<String>,
}

impl From<WireDelegationSet> for DelegationSet {
    fn from(wire: WireDelegationSet) -> Self {
        DelegationSet {
            name_servers: wire.name_servers.name_servers,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetHostedZoneResponse {
    pub(crate) hosted_zone: WireHostedZone,
    #[serde(default)]
    pub(crate) delegation_set: WireDelegationSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireChangeInfo {
    #[serde(deserialize_with = "trimmed_string")]
    id: String,
    #[serde(deserialize_with = "trimmed_string")]
    status: String,
    #[serde(deserialize_with = "trimmed_string")]
    submitted_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    comment: Option<String>,
}

impl TryFrom<WireChangeInfo> for ChangeInfo {
    type Error = Route53Error;

    fn try_from(wire: WireChangeInfo) -> Result<Self> {
        let submitted_at = DateTime::parse_from_rfc3339(&wire.submitted_at)
            .map_err(|e| Route53Error::Parse(format!("invalid SubmittedAt '{}': {}", wire.submitted_at, e)))?
            .with_timezone(&Utc);
        Ok(ChangeInfo {
            id: wire.id,
            status: wire.status.parse()?,
            submitted_at,
            comment: wire.comment,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateHostedZoneResponse {
    pub(crate) hosted_zone: WireHostedZone,
    pub(crate) change_info: WireChangeInfo,
    #[serde(default)]
    pub(crate) delegation_set: WireDelegationSet,
}

/// Body of every response that only reports a change: delete zone, change
/// record sets, get change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ChangeInfoResponse {
    pub(crate) change_info: WireChangeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireAliasTarget {
    hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    dns_name: String,
    #[serde(default)]
    evaluate_target_health: bool,
}

#[derive(Debug, Deserialize)]
struct WireResourceRecord {
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    records: Vec<WireResourceRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireResourceRecordSet {
    name: String,
    #[serde(rename = "Type")]
    record_type: String,
    #[serde(rename = "TTL", default)]
    ttl: Option<u32>,
    #[serde(default)]
    resource_records: WireResourceRecords,
    #[serde(default)]
    set_identifier: Option<String>,
    #[serde(default)]
    weight: Option<u32>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    alias_target: Option<WireAliasTarget>,
}

impl From<WireResourceRecordSet> for ResourceRecordSet {
    fn from(wire: WireResourceRecordSet) -> Self {
        ResourceRecordSet {
            name: wire.name,
            record_type: wire.record_type,
            ttl: wire.ttl,
            values: wire.resource_records.records.into_iter().map(|r| r.value).collect(),
            set_identifier: wire.set_identifier,
            weight: wire.weight,
            region: wire.region,
            alias_target: wire.alias_target.map(|a| AliasTarget {
                hosted_zone_id: a.hosted_zone_id,
                dns_name: a.dns_name,
                evaluate_target_health: a.evaluate_target_health,
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireResourceRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    sets: Vec<WireResourceRecordSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListResourceRecordSetsResponse {
    #[serde(default)]
    resource_record_sets: WireResourceRecordSets,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    max_items: u32,
    #[serde(default)]
    next_record_name: Option<String>,
    #[serde(default)]
    next_record_type: Option<String>,
    #[serde(default)]
    next_record_identifier: Option<String>,
}

impl From<ListResourceRecordSetsResponse> for RecordSetPage {
    fn from(wire: ListResourceRecordSetsResponse) -> Self {
        RecordSetPage {
            record_sets: wire.resource_record_sets.sets.into_iter().map(Into::into).collect(),
            is_truncated: wire.is_truncated,
            max_items: wire.max_items,
            next_record_name: wire.next_record_name,
            next_record_type: wire.next_record_type,
            next_record_identifier: wire.next_record_identifier,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error: ErrorDetail,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorDetail {
    code: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvalidChangeBatch {
    messages: InvalidChangeBatchMessages,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InvalidChangeBatchMessages {
    #[serde(rename = "Message", default)]
    messages: Vec<String>,
}

/// Maps a non-success response body to [`Route53Error::Api`].
///
/// Understands `ErrorResponse` and `InvalidChangeBatch` bodies; anything else
/// keeps the raw body as the message.
pub(crate) fn api_error(status: u16, body: &str) -> Route53Error {
    if let Ok(error) = quick_xml::de::from_str::<ErrorResponse>(body) {
        return Route53Error::Api {
            status,
            code: error.error.code,
            message: error.error.message.unwrap_or_default(),
            request_id: error.request_id,
        };
    }
    if let Ok(batch) = quick_xml::de::from_str::<InvalidChangeBatch>(body) {
        return Route53Error::Api {
            status,
            code: "InvalidChangeBatch".to_string(),
            message: batch.messages.messages.join("; "),
            request_id: batch.request_id,
        };
    }
    Route53Error::Api {
        status,
        code: "Unknown".to_string(),
        message: format!("HTTP {}: {}", status, body.trim()),
        request_id: None,
    }
}
