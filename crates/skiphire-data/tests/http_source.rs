use skiphire_data::{
    CatalogLocation, CatalogSource, FetchClient, FetchError, HttpCatalogSource, TimeoutConfig,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP response and return the request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        String::from_utf8_lossy(&head).into_owned()
    });

    (base_url, handle)
}

fn source(base_url: &str, location: CatalogLocation) -> HttpCatalogSource {
    let client = FetchClient::new(TimeoutConfig::from_millis(5_000))
        .unwrap()
        .with_base_url(base_url);
    HttpCatalogSource::new(client, location)
}

#[tokio::test]
async fn fetches_catalog_for_location() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[{"id": 17933, "size": 4, "price_before_vat": 278, "vat": 20, "postcode": "NR32"}]"#,
    )
    .await;

    let offerings = source(&base_url, CatalogLocation::default())
        .fetch_catalog()
        .await
        .unwrap();
    assert_eq!(offerings.len(), 1);
    assert_eq!(offerings[0].final_price_whole(), 334);

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /api/skips/by-location?postcode=NR32&area=Lowestoft HTTP/1.1"));
}

#[tokio::test]
async fn server_error_is_http_error() {
    let (base_url, server) = serve_once("503 Service Unavailable", "down").await;

    let err = source(&base_url, CatalogLocation::default())
        .fetch_catalog()
        .await
        .unwrap_err();
    match err {
        FetchError::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "down");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn invalid_json_is_parse_error() {
    let (base_url, server) = serve_once("200 OK", "<html>oops</html>").await;

    let err = source(&base_url, CatalogLocation::default())
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn object_body_is_empty_catalog() {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "no skips"}"#).await;

    let offerings = source(&base_url, CatalogLocation::new("IP1 1AA", "Ipswich"))
        .fetch_catalog()
        .await
        .unwrap();
    assert!(offerings.is_empty());

    let head = server.await.unwrap();
    assert!(head.contains("postcode=IP1%201AA&area=Ipswich"));
}

#[tokio::test]
async fn unreachable_host_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = source(&base_url, CatalogLocation::default())
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Connection(_)));
}
