use manuf_common::{ErrorKind, ManufError, Registry};
use manuf_core::source::{HttpSource, RecordSource};

use crate::server::ListingServer;

const OUI_CSV: &str = "\
Registry,Assignment,Organization Name,Organization Address
MA-L,002272,American Micro-Fuel Device Corp.,2181 Buchanan Loop Ferndale WA US 98248 
MA-L,00D0EF,IGT,\"9295 Prototype Drive, Reno NV US 89511 \"
";

#[tokio::test]
async fn listing_is_downloaded_and_decoded() {
    let server = ListingServer::new().csv("/oui/oui.csv", OUI_CSV).start().await;
    let source = HttpSource::new().unwrap();

    let records = source.fetch(&server.url("/oui/oui.csv")).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].registry, Registry::MaL);
    assert_eq!(records[0].assignment.as_str(), "002272");
    assert_eq!(records[0].organization_address, "2181 Buchanan Loop Ferndale WA US 98248");
    assert_eq!(records[1].organization_name, "IGT");
    assert_eq!(records[1].organization_address, "9295 Prototype Drive, Reno NV US 89511");
}

#[tokio::test]
async fn non_200_status_is_reported_with_url() {
    let server = ListingServer::new()
        .status("/cid/cid.csv", 500, "Internal Server Error")
        .start()
        .await;
    let url = server.url("/cid/cid.csv");

    let err = HttpSource::new().unwrap().fetch(&url).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.status(), Some(500));
    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains(&url), "{message}");
}

#[tokio::test]
async fn unknown_path_is_a_remote_error() {
    let server = ListingServer::new().start().await;
    let err = HttpSource::new()
        .unwrap()
        .fetch(&server.url("/missing.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ManufError::Remote { status: 404, .. }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = ListingServer::new().csv("/oui/oui.csv", OUI_CSV).start().await;
    let source = HttpSource::new().unwrap().with_body_limit(64);

    let err = source.fetch(&server.url("/oui/oui.csv")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("exceeds 64 bytes"), "{err}");

    let roomy = HttpSource::new().unwrap().with_body_limit(OUI_CSV.len());
    assert_eq!(roomy.fetch(&server.url("/oui/oui.csv")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn truncated_body_is_a_parse_error() {
    let server = ListingServer::new()
        .csv("/oui/oui.csv", "MA-L,00D0EF,IGT,\"9295 Prototype Drive")
        .start()
        .await;

    let err = HttpSource::new()
        .unwrap()
        .fetch(&server.url("/oui/oui.csv"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = ListingServer::new()
        .csv("/iab/iab.csv", "IAB,0050C2000,Only three\n")
        .start()
        .await;

    let err = HttpSource::new()
        .unwrap()
        .fetch(&server.url("/iab/iab.csv"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}
