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

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::v2012_02_29::V20120229;
use crate::api::wire::ZoneShape;
use crate::api::{ApiVersion, HostedZoneApi};
use crate::client::{Route53Client, ZoneOperationBuilder};
use crate::error::Result;
use crate::types::{ChangeInfo, CreatedHostedZone, HostedZoneDetail, HostedZonePage, RecordSetPage};
use crate::utils::request::DnsHttpClient;

/// Operations of API version 2013-04-01.
///
/// Zone listing, lookup and creation report the record-set count; deleting
/// zones, record-set listing, change batches and change status are forwarded
/// to [`V20120229`] unchanged.
pub struct V20130401<T: DnsHttpClient> {
    previous: V20120229<T>,
}

impl<T: DnsHttpClient> V20130401<T> {
    pub fn new(client: Arc<Route53Client<T>>) -> Self {
        Self {
            previous: V20120229::with_version(client, ApiVersion::V2013_04_01),
        }
    }

    pub fn client(&self) -> &Route53Client<T> {
        self.previous.client()
    }
}

#[async_trait]
impl<T: DnsHttpClient> HostedZoneApi for V20130401<T> {
    fn version(&self) -> ApiVersion {
        ApiVersion::V2013_04_01
    }

    async fn list_hosted_zones(&self, builder: &ZoneOperationBuilder) -> Result<HostedZonePage> {
        let response = self.previous.fetch_hosted_zones(builder).await?;
        Ok(response.into_page(ZoneShape::WithRecordSetCount))
    }

    async fn get_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<HostedZoneDetail> {
        let response = self.previous.fetch_hosted_zone(builder).await?;
        Ok(HostedZoneDetail {
            hosted_zone: response.hosted_zone.into_zone(ZoneShape::WithRecordSetCount),
            delegation_set: response.delegation_set.into(),
        })
    }

    async fn create_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<CreatedHostedZone> {
        let response = self.previous.post_hosted_zone(builder).await?;
        Ok(CreatedHostedZone {
            hosted_zone: response.hosted_zone.into_zone(ZoneShape::WithRecordSetCount),
            change_info: self.client().record(response.change_info.try_into())?,
            delegation_set: response.delegation_set.into(),
        })
    }

    async fn delete_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        self.previous.delete_hosted_zone(builder).await
    }

    async fn list_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<RecordSetPage> {
        self.previous.list_resource_record_sets(builder).await
    }

    async fn change_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        self.previous.change_resource_record_sets(builder).await
    }

    async fn get_change(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        self.previous.get_change(builder).await
    }
}
