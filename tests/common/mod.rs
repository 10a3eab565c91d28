//! Shared fixtures for the Route53 integration tests

use route53_sdk::{Route53Client, ZoneOperationBuilder};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with the given credentials and clock
pub fn client_for(server: &MockServer, secret_access_key: &str, clock: &str) -> Route53Client {
    Route53Client::builder()
        .set_param("access_key_id", "AKID")
        .set_param("secret_access_key", secret_access_key)
        .set_param("endpoint", &server.uri())
        .set_param("clock", clock)
        .build()
        .expect("valid client configuration")
}

pub fn zone_xml(id: &str, name: &str) -> String {
    format!(
        "<HostedZone><Id>/hostedzone/{}</Id><Name>{}</Name>\
         <CallerReference>ref-{}</CallerReference><ResourceRecordSetCount>3</ResourceRecordSetCount></HostedZone>",
        id, name, id
    )
}

pub fn list_xml(zones: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListHostedZonesResponse xmlns=\"https://route53.amazonaws.com/doc/2013-04-01/\">\
         <HostedZones>{}</HostedZones><IsTruncated>false</IsTruncated><MaxItems>100</MaxItems>\
         </ListHostedZonesResponse>",
        zones.concat()
    )
}

#[allow(dead_code)]
pub fn by_name(name: &str) -> ZoneOperationBuilder {
    ZoneOperationBuilder::new().name(name)
}
