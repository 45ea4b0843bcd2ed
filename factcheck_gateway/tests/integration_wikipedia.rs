//! Wikipedia gateway over a local HTTP server.

use factcheck_core::{GatewayError, KnowledgeGateway, PageRef, TableEvidence};
use factcheck_gateway::{GatewayConfig, WikipediaGateway};
use mockito::{Matcher, Server};
use tokio::net::TcpListener;

const PAGE: &str = r#"<html><body>
<table class="infobox vcard">
<tr><th>Born</th><td>7 November 1867, Warsaw</td></tr>
</table>
<p>Marie Curie was born in Warsaw.</p>
</body></html>"#;

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn gateway(base_url: String) -> WikipediaGateway {
    WikipediaGateway::new(GatewayConfig {
        base_url,
        ..GatewayConfig::default()
    })
    .expect("gateway should build")
}

#[tokio::test]
async fn search_returns_first_title() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("list".into(), "search".into()),
            Matcher::UrlEncoded("srsearch".into(), "Marie Curie".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"query":{"search":[{"title":"Marie Curie"},{"title":"Pierre Curie"}]}}"#)
        .create_async()
        .await;

    let hit = gateway(server.url()).search("Marie Curie").await;
    assert_eq!(hit, Ok(PageRef::Matched("Marie Curie".to_string())));
    mock.assert_async().await;
}

#[tokio::test]
async fn page_is_downloaded_once_for_table_and_paragraphs() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/wiki/Marie_Curie")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PAGE)
        .expect(1)
        .create_async()
        .await;

    let gateway = gateway(server.url());
    let Ok(TableEvidence::Table(table)) = gateway.fetch_table("Marie Curie").await else {
        panic!("expected an infobox");
    };
    assert_eq!(
        table.get("born").map(String::as_str),
        Some("7 November 1867, Warsaw")
    );

    let paragraphs = gateway.fetch_paragraphs("Marie Curie").await;
    assert_eq!(
        paragraphs,
        Ok(Some(vec!["Marie Curie was born in Warsaw.".to_string()]))
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_page_is_no_match_and_memoized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/wiki/Nobody")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let gateway = gateway(server.url());
    assert_eq!(
        gateway.fetch_table("Nobody").await,
        Ok(TableEvidence::NoMatch)
    );
    assert_eq!(gateway.fetch_paragraphs("Nobody").await, Ok(None));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_fails_the_fetch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/wiki/Warsaw")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let result = gateway(server.url()).fetch_table("Warsaw").await;
    assert!(matches!(result, Err(GatewayError::Status { status: 500, .. })));
    mock.assert_async().await;
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn configured_retries_repeat_failed_requests() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/wiki/Warsaw")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let gateway = WikipediaGateway::new(GatewayConfig {
        base_url: server.url(),
        retry_delays: vec![0, 0],
        ..GatewayConfig::default()
    })
    .expect("gateway should build");

    let result = gateway.fetch_paragraphs("Warsaw").await;
    assert!(matches!(result, Err(GatewayError::Status { status: 503, .. })));
    mock.assert_async().await;
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn silent_server_times_out() {
    // accepted by the kernel backlog, never answered
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");

    let gateway = WikipediaGateway::new(GatewayConfig {
        base_url: format!("http://{addr}"),
        timeout: 1,
        ..GatewayConfig::default()
    })
    .expect("gateway should build");

    let result = gateway.fetch_table("Marie Curie").await;
    assert!(matches!(result, Err(GatewayError::Timeout { .. })));
    drop(listener);
}
