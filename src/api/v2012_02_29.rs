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
use reqwest::Method;
use route53_sdk_macros::extract_params;

use crate::api::wire::{
    ChangeInfoResponse, CreateHostedZoneResponse, GetHostedZoneResponse, ListHostedZonesResponse,
    ListResourceRecordSetsResponse, ZoneShape,
};
use crate::api::{ApiVersion, HostedZoneApi};
use crate::client::{Route53Client, ZoneOperationBuilder};
use crate::error::Result;
use crate::types::{
    Change, ChangeInfo, CreatedHostedZone, HostedZoneDetail, HostedZonePage, RecordSetPage, ResourceRecordSet,
};
use crate::utils::names::{normalize_zone_name, strip_change_id, strip_zone_id};
use crate::utils::request::DnsHttpClient;
use crate::utils::xml::OrderedFields;

/// Operations of API version 2012-02-29.
///
/// Newer versions wrap this type built with [`V20120229::with_version`], so
/// the operations they forward run against the newer path and namespace.
pub struct V20120229<T: DnsHttpClient> {
    client: Arc<Route53Client<T>>,
    version: ApiVersion,
}

impl<T: DnsHttpClient> V20120229<T> {
    pub fn new(client: Arc<Route53Client<T>>) -> Self {
        Self::with_version(client, ApiVersion::V2012_02_29)
    }

    /// Runs these operations under another version's path and namespace.
    pub fn with_version(client: Arc<Route53Client<T>>, version: ApiVersion) -> Self {
        Self { client, version }
    }

    pub fn client(&self) -> &Route53Client<T> {
        &self.client
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        self.client.url(self.version.as_str(), path, query)
    }

    fn namespace(&self) -> String {
        self.client.namespace(self.version.as_str())
    }

    pub(crate) async fn fetch_hosted_zones(&self, builder: &ZoneOperationBuilder) -> Result<ListHostedZonesResponse> {
        let params = extract_params!(builder, RequestParams, {
            optional marker: String;
            optional max_items: u32;
        });

        let mut query = Vec::new();
        if let Some(marker) = params.marker {
            query.push(("marker", marker));
        }
        if let Some(max_items) = params.max_items {
            query.push(("maxitems", max_items.to_string()));
        }

        let response = self
            .client
            .send(Method::GET, self.url("hostedzone", &query), None)
            .await?;
        self.client.decode(&response.body)
    }

    pub(crate) async fn fetch_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<GetHostedZoneResponse> {
        let params = extract_params!(builder, RequestParams, {
            required zone_id: String;
        });

        let path = format!("hostedzone/{}", strip_zone_id(&params.zone_id));
        let response = self.client.send(Method::GET, self.url(&path, &[]), None).await?;
        self.client.decode(&response.body)
    }

    /// Request body for `create_hosted_zone`.
    pub(crate) fn create_hosted_zone_body(&self, builder: &ZoneOperationBuilder) -> Result<OrderedFields> {
        let params = extract_params!(builder, RequestParams, {
            required name: String;
            required caller_reference: String;
            optional comment: String;
        });

        let config = params
            .comment
            .map(|comment| OrderedFields::new().text("Comment", comment));

        Ok(OrderedFields::new()
            .attribute("xmlns", self.namespace())
            .text("Name", normalize_zone_name(&params.name))
            .text("CallerReference", params.caller_reference)
            .nested_opt("HostedZoneConfig", config))
    }

    pub(crate) async fn post_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<CreateHostedZoneResponse> {
        let body = self
            .create_hosted_zone_body(builder)?
            .to_document("CreateHostedZoneRequest")?;

        let response = self
            .client
            .send(Method::POST, self.url("hostedzone", &[]), Some(body))
            .await?;
        self.client.decode(&response.body)
    }

    /// Request body for `change_resource_record_sets`.
    pub(crate) fn change_batch_body(&self, builder: &ZoneOperationBuilder) -> Result<OrderedFields> {
        let params = extract_params!(builder, RequestParams, {
            required changes: Vec<Change>;
            optional comment: String;
        });

        let changes = params
            .changes
            .iter()
            .fold(OrderedFields::new(), |acc, change| acc.nested("Change", self.change_fields(change)));

        let batch = OrderedFields::new()
            .text_opt("Comment", params.comment)
            .nested("Changes", changes);

        Ok(OrderedFields::new()
            .attribute("xmlns", self.namespace())
            .nested("ChangeBatch", batch))
    }

    fn change_fields(&self, change: &Change) -> OrderedFields {
        OrderedFields::new()
            .text("Action", change.action.as_str())
            .nested("ResourceRecordSet", self.record_set_fields(&change.record_set))
    }

    fn record_set_fields(&self, rrs: &ResourceRecordSet) -> OrderedFields {
        let fields = OrderedFields::new()
            .text("Name", rrs.name.as_str())
            .text("Type", rrs.record_type.as_str())
            .text_opt("SetIdentifier", rrs.set_identifier.as_deref())
            .text_opt("Weight", rrs.weight.map(|w| w.to_string()))
            .text_opt("Region", rrs.region.as_deref());

        if let Some(alias) = &rrs.alias_target {
            let mut target = OrderedFields::new()
                .text("HostedZoneId", alias.hosted_zone_id.as_str())
                .text("DNSName", alias.dns_name.as_str());
            if self.version >= ApiVersion::V2013_04_01 {
                target = target.text("EvaluateTargetHealth", alias.evaluate_target_health.to_string());
            }
            return fields.nested("AliasTarget", target);
        }

        let records = rrs.values.iter().fold(OrderedFields::new(), |acc, value| {
            acc.nested("ResourceRecord", OrderedFields::new().text("Value", value.as_str()))
        });
        fields
            .text_opt("TTL", rrs.ttl.map(|ttl| ttl.to_string()))
            .nested("ResourceRecords", records)
    }
}

#[async_trait]
impl<T: DnsHttpClient> HostedZoneApi for V20120229<T> {
    fn version(&self) -> ApiVersion {
        self.version
    }

    async fn list_hosted_zones(&self, builder: &ZoneOperationBuilder) -> Result<HostedZonePage> {
        Ok(self.fetch_hosted_zones(builder).await?.into_page(ZoneShape::Basic))
    }

    async fn get_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<HostedZoneDetail> {
        let response = self.fetch_hosted_zone(builder).await?;
        Ok(HostedZoneDetail {
            hosted_zone: response.hosted_zone.into_zone(ZoneShape::Basic),
            delegation_set: response.delegation_set.into(),
        })
    }

    async fn create_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<CreatedHostedZone> {
        let response = self.post_hosted_zone(builder).await?;
        Ok(CreatedHostedZone {
            hosted_zone: response.hosted_zone.into_zone(ZoneShape::Basic),
            change_info: self.client.record(response.change_info.try_into())?,
            delegation_set: response.delegation_set.into(),
        })
    }

    async fn delete_hosted_zone(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        let params = extract_params!(builder, RequestParams, {
            required zone_id: String;
        });

        let path = format!("hostedzone/{}", strip_zone_id(&params.zone_id));
        let response = self.client.send(Method::DELETE, self.url(&path, &[]), None).await?;
        let parsed: ChangeInfoResponse = self.client.decode(&response.body)?;
        self.client.record(parsed.change_info.try_into())
    }

    async fn list_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<RecordSetPage> {
        let params = extract_params!(builder, RequestParams, {
            required zone_id: String;
            optional record_name: String;
            optional record_type: String;
            optional record_identifier: String;
            optional max_items: u32;
        });

        let mut query = Vec::new();
        if let Some(name) = params.record_name {
            query.push(("name", name));
        }
        if let Some(record_type) = params.record_type {
            query.push(("type", record_type));
        }
        if let Some(identifier) = params.record_identifier {
            query.push(("identifier", identifier));
        }
        if let Some(max_items) = params.max_items {
            query.push(("maxitems", max_items.to_string()));
        }

        let path = format!("hostedzone/{}/rrset", strip_zone_id(&params.zone_id));
        let response = self.client.send(Method::GET, self.url(&path, &query), None).await?;
        let parsed: ListResourceRecordSetsResponse = self.client.decode(&response.body)?;
        Ok(parsed.into())
    }

    async fn change_resource_record_sets(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        let params = extract_params!(builder, RequestParams, {
            required zone_id: String;
        });
        let body = self
            .change_batch_body(builder)?
            .to_document("ChangeResourceRecordSetsRequest")?;

        let path = format!("hostedzone/{}/rrset", strip_zone_id(&params.zone_id));
        let response = self.client.send(Method::POST, self.url(&path, &[]), Some(body)).await?;
        let parsed: ChangeInfoResponse = self.client.decode(&response.body)?;
        self.client.record(parsed.change_info.try_into())
    }

    async fn get_change(&self, builder: &ZoneOperationBuilder) -> Result<ChangeInfo> {
        let params = extract_params!(builder, RequestParams, {
            required change_id: String;
        });

        let path = format!("change/{}", strip_change_id(&params.change_id));
        let response = self.client.send(Method::GET, self.url(&path, &[]), None).await?;
        let parsed: ChangeInfoResponse = self.client.decode(&response.body)?;
        self.client.record(parsed.change_info.try_into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Route53Error;
    use crate::types::{AliasTarget, ChangeStatus};
    use crate::utils::request::mock::MockHttpClient;

    const CHANGE_INFO: &str = "<ChangeInfo><Id>/change/C2682N5HXP0BZ4</Id><Status>PENDING</Status>\
                               <SubmittedAt>2012-03-15T01:36:41.958Z</SubmittedAt></ChangeInfo>";

    fn api(mock: &MockHttpClient) -> V20120229<MockHttpClient> {
        V20120229::new(Arc::new(Route53Client::with_http_client("AKID", "secret", mock.clone())))
    }

    #[tokio::test]
    async fn list_uses_version_path_and_ignores_record_count() {
        let mock = MockHttpClient::new();
        mock.push(
            200,
            "<ListHostedZonesResponse><HostedZones><HostedZone><Id>/hostedzone/Z1</Id>\
             <Name>example.com.</Name><CallerReference>r</CallerReference>\
             <ResourceRecordSetCount>4</ResourceRecordSetCount></HostedZone></HostedZones>\
             <IsTruncated>false</IsTruncated><MaxItems>100</MaxItems></ListHostedZonesResponse>",
        );

        let page = api(&mock).list_hosted_zones(&ZoneOperationBuilder::new()).await.unwrap();

        assert_eq!(page.hosted_zones.len(), 1);
        assert_eq!(page.hosted_zones[0].resource_record_set_count, None);
        assert_eq!(mock.requests()[0].url, "https://route53.amazonaws.com/2012-02-29/hostedzone");
    }

    #[tokio::test]
    async fn delete_strips_prefix_and_returns_change() {
        let mock = MockHttpClient::new();
        mock.push(200, &format!("<DeleteHostedZoneResponse>{}</DeleteHostedZoneResponse>", CHANGE_INFO));

        let change = api(&mock)
            .delete_hosted_zone(&ZoneOperationBuilder::new().zone_id("/hostedzone/Z1"))
            .await
            .unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url, "https://route53.amazonaws.com/2012-02-29/hostedzone/Z1");
        assert_eq!(change.id, "/change/C2682N5HXP0BZ4");
        assert_eq!(change.status, ChangeStatus::Pending);
    }

    #[tokio::test]
    async fn change_batch_body_is_ordered() {
        let mock = MockHttpClient::new();
        mock.push(
            200,
            &format!("<ChangeResourceRecordSetsResponse>{}</ChangeResourceRecordSetsResponse>", CHANGE_INFO),
        );

        let builder = ZoneOperationBuilder::new()
            .zone_id("Z1")
            .comment("rotate www")
            .change(Change::delete(ResourceRecordSet::new(
                "www.example.com.",
                "A",
                300,
                vec!["192.0.2.1".into()],
            )))
            .change(Change::create(
                ResourceRecordSet::new("www.example.com.", "A", 60, vec!["192.0.2.2".into(), "192.0.2.3".into()])
                    .weighted("blue", 10),
            ));
        api(&mock).change_resource_record_sets(&builder).await.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://route53.amazonaws.com/2012-02-29/hostedzone/Z1/rrset");
        assert_eq!(
            request.body.as_deref().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <ChangeResourceRecordSetsRequest xmlns=\"https://route53.amazonaws.com/doc/2012-02-29/\">\
             <ChangeBatch><Comment>rotate www</Comment><Changes>\
             <Change><Action>DELETE</Action><ResourceRecordSet><Name>www.example.com.</Name><Type>A</Type>\
             <TTL>300</TTL><ResourceRecords><ResourceRecord><Value>192.0.2.1</Value></ResourceRecord>\
             </ResourceRecords></ResourceRecordSet></Change>\
             <Change><Action>CREATE</Action><ResourceRecordSet><Name>www.example.com.</Name><Type>A</Type>\
             <SetIdentifier>blue</SetIdentifier><Weight>10</Weight><TTL>60</TTL><ResourceRecords>\
             <ResourceRecord><Value>192.0.2.2</Value></ResourceRecord>\
             <ResourceRecord><Value>192.0.2.3</Value></ResourceRecord>\
             </ResourceRecords></ResourceRecordSet></Change>\
             </Changes></ChangeBatch></ChangeResourceRecordSetsRequest>"
        );
    }

    #[test]
    fn alias_targets_omit_health_evaluation_before_2013() {
        let api = api(&MockHttpClient::new());
        let builder = ZoneOperationBuilder::new().change(Change::create(ResourceRecordSet::alias(
            "example.com.",
            "A",
            AliasTarget {
                hosted_zone_id: "Z2FDTNDATAQYW2".into(),
                dns_name: "d1.cloudfront.net.".into(),
                evaluate_target_health: true,
            },
        )));

        let doc = api.change_batch_body(&builder).unwrap().to_document("R").unwrap();
        assert!(doc.contains("<AliasTarget><HostedZoneId>Z2FDTNDATAQYW2</HostedZoneId><DNSName>d1.cloudfront.net.</DNSName></AliasTarget>"));
        assert!(!doc.contains("TTL"));
        assert!(!doc.contains("ResourceRecords"));
    }

    #[tokio::test]
    async fn empty_change_batch_is_rejected_before_dispatch() {
        let mock = MockHttpClient::new();
        let err = api(&mock)
            .change_resource_record_sets(&ZoneOperationBuilder::new().zone_id("Z1").changes(vec![]))
            .await
            .unwrap_err();

        assert_eq!(err, Route53Error::MissingParameter("changes"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn list_record_sets_passes_filters() {
        let mock = MockHttpClient::new();
        mock.push(
            200,
            "<ListResourceRecordSetsResponse><ResourceRecordSets>\
             <ResourceRecordSet><Name>www.example.com.</Name><Type>CNAME</Type><TTL>60</TTL>\
             <ResourceRecords><ResourceRecord><Value>example.com</Value></ResourceRecord></ResourceRecords>\
             </ResourceRecordSet></ResourceRecordSets>\
             <IsTruncated>false</IsTruncated><MaxItems>10</MaxItems></ListResourceRecordSetsResponse>",
        );

        let page = api(&mock)
            .list_resource_record_sets(
                &ZoneOperationBuilder::new()
                    .zone_id("/hostedzone/Z1")
                    .record_name("www.example.com.")
                    .record_type("CNAME")
                    .max_items(10),
            )
            .await
            .unwrap();

        assert_eq!(
            mock.requests()[0].url,
            "https://route53.amazonaws.com/2012-02-29/hostedzone/Z1/rrset?name=www.example.com.&type=CNAME&maxitems=10"
        );
        assert_eq!(page.record_sets.len(), 1);
        assert_eq!(page.record_sets[0].values, vec!["example.com"]);
        assert!(!page.is_truncated);
        assert!(page.next_record_name.is_none());
    }

    #[tokio::test]
    async fn get_change_strips_prefix() {
        let mock = MockHttpClient::new();
        mock.push(
            200,
            "<GetChangeResponse><ChangeInfo><Id>/change/C1</Id><Status>INSYNC</Status>\
             <SubmittedAt>2012-03-15T01:36:41.958Z</SubmittedAt></ChangeInfo></GetChangeResponse>",
        );

        let change = api(&mock)
            .get_change(&ZoneOperationBuilder::new().change_id("/change/C1"))
            .await
            .unwrap();

        assert_eq!(mock.requests()[0].url, "https://route53.amazonaws.com/2012-02-29/change/C1");
        assert_eq!(change.status, ChangeStatus::InSync);
    }

    #[tokio::test]
    async fn invalid_status_is_recorded_as_last_error() {
        let mock = MockHttpClient::new();
        mock.push(
            200,
            "<GetChangeResponse><ChangeInfo><Id>C1</Id><Status>LOST</Status>\
             <SubmittedAt>2012-03-15T01:36:41.958Z</SubmittedAt></ChangeInfo></GetChangeResponse>",
        );
        let api = api(&mock);

        let err = api.get_change(&ZoneOperationBuilder::new().change_id("C1")).await.unwrap_err();
        assert!(matches!(err, Route53Error::Parse(_)));
        assert_eq!(api.client().last_error(), Some(err));
    }
}
