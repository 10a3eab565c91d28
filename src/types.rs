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

//! Domain shapes returned by the API modules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Route53Error;
use crate::utils::serde_utils::{option_is_empty, vec_is_empty};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostedZoneConfig {
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub comment: Option<String>,
}

/// A DNS namespace container managed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Provider id, verbatim (usually `/hostedzone/<id>`).
    pub id: String,
    /// Fully qualified name with trailing dot.
    pub name: String,
    pub caller_reference: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub config: Option<HostedZoneConfig>,
    /// Only reported from API version 2013-04-01 on.
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub resource_record_set_count: Option<u64>,
}

/// Name servers answering for a hosted zone, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelegationSet {
    pub name_servers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "INSYNC")]
    InSync,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Pending => "PENDING",
            ChangeStatus::InSync => "INSYNC",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeStatus {
    type Err = Route53Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PENDING" => Ok(ChangeStatus::Pending),
            "INSYNC" => Ok(ChangeStatus::InSync),
            other => Err(Route53Error::Parse(format!("unknown change status '{}'", other))),
        }
    }
}

/// Tracking handle for a submitted change batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Provider id, verbatim (usually `/change/<id>`).
    pub id: String,
    pub status: ChangeStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub comment: Option<String>,
}

/// One page of `list_hosted_zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZonePage {
    pub hosted_zones: Vec<HostedZone>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub marker: Option<String>,
    pub is_truncated: bool,
    /// Absent when the provider has no further pages.
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub next_marker: Option<String>,
    pub max_items: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZoneDetail {
    pub hosted_zone: HostedZone,
    pub delegation_set: DelegationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedHostedZone {
    pub hosted_zone: HostedZone,
    pub change_info: ChangeInfo,
    pub delegation_set: DelegationSet,
}

/// Points a record set at another provider-managed resource instead of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    pub hosted_zone_id: String,
    pub dns_name: String,
    /// Sent only by API version 2013-04-01 and later.
    pub evaluate_target_health: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    pub name: String,
    pub record_type: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "vec_is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub set_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub alias_target: Option<AliasTarget>,
}

impl ResourceRecordSet {
    /// A plain value record set.
    pub fn new(name: &str, record_type: &str, ttl: u32, values: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl: Some(ttl),
            values,
            set_identifier: None,
            weight: None,
            region: None,
            alias_target: None,
        }
    }

    /// An alias record set. Alias records carry no TTL and no values.
    pub fn alias(name: &str, record_type: &str, target: AliasTarget) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl: None,
            values: Vec::new(),
            set_identifier: None,
            weight: None,
            region: None,
            alias_target: Some(target),
        }
    }

    /// Marks the set as one member of a weighted group.
    pub fn weighted(mut self, set_identifier: &str, weight: u32) -> Self {
        self.set_identifier = Some(set_identifier.to_string());
        self.weight = Some(weight);
        self
    }

    /// Marks the set as one member of a latency group.
    pub fn latency(mut self, set_identifier: &str, region: &str) -> Self {
        self.set_identifier = Some(set_identifier.to_string());
        self.region = Some(region.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeAction {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "UPSERT")]
    Upsert,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
            ChangeAction::Delete => "DELETE",
            ChangeAction::Upsert => "UPSERT",
        }
    }
}

/// One mutation inside a change batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: ResourceRecordSet,
}

impl Change {
    pub fn create(record_set: ResourceRecordSet) -> Self {
        Self { action: ChangeAction::Create, record_set }
    }

    pub fn delete(record_set: ResourceRecordSet) -> Self {
        Self { action: ChangeAction::Delete, record_set }
    }

    pub fn upsert(record_set: ResourceRecordSet) -> Self {
        Self { action: ChangeAction::Upsert, record_set }
    }
}

/// One page of `list_resource_record_sets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetPage {
    pub record_sets: Vec<ResourceRecordSet>,
    pub is_truncated: bool,
    pub max_items: u32,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub next_record_name: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub next_record_type: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub next_record_identifier: Option<String>,
}
