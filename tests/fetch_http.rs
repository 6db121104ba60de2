// tests/fetch_http.rs
// HttpFetcher against a one-shot local HTTP/1.1 server.
use google_trends_scraper::error::TrendsError;
use google_trends_scraper::{HttpFetcher, TrendsFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one request with `status` and `body`; yields the raw request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });
    (format!("http://{addr}/trends/api/dailytrends?hl=tr"), handle)
}

#[tokio::test]
async fn sends_browser_headers_and_returns_raw_body() {
    let (url, server) = serve_once("200 OK", ")]}',{\"a\":1}").await;
    let fetcher = HttpFetcher::new().unwrap();

    let body = fetcher.fetch_text(&url, &[]).await.unwrap();
    assert_eq!(body, ")]}',{\"a\":1}", "body must come back unstripped");

    let req = server.await.unwrap().to_ascii_lowercase();
    assert!(req.starts_with("get /trends/api/dailytrends?hl=tr "), "{req}");
    assert!(req.contains("user-agent: mozilla/5.0 (windows nt 10.0; win64; x64)"), "{req}");
    assert!(req.contains("chrome/119.0.0.0"), "{req}");
    assert!(req.contains("accept: */*"), "{req}");
    assert!(req.contains("referer: https://trends.google.com/"), "{req}");
}

#[tokio::test]
async fn per_call_headers_override_defaults() {
    let (url, server) = serve_once("200 OK", "{}").await;
    let fetcher = HttpFetcher::new()
        .unwrap()
        .with_headers(vec![("X-Test".into(), "1".into())]);

    fetcher
        .fetch_text(&url, &[("Referer".into(), "https://example.test/".into())])
        .await
        .unwrap();

    let req = server.await.unwrap().to_ascii_lowercase();
    assert!(req.contains("referer: https://example.test/"), "{req}");
    assert!(!req.contains("referer: https://trends.google.com/"), "{req}");
    assert!(req.contains("x-test: 1"), "{req}");
}

#[tokio::test]
async fn non_success_status_is_fetch_error() {
    let (url, server) = serve_once("429 Too Many Requests", "slow down").await;
    let fetcher = HttpFetcher::new().unwrap();

    let err = fetcher.fetch_text(&url, &[]).await.unwrap_err();
    assert!(matches!(err, TrendsError::Fetch { .. }), "{err:?}");
    server.await.unwrap();
}

#[tokio::test]
async fn connection_refused_is_fetch_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher
        .fetch_text(&format!("http://{addr}/"), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::Fetch { .. }));
}

#[tokio::test]
async fn invalid_override_header_is_configuration_error() {
    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher
        .fetch_text("http://127.0.0.1:9/", &[("bad header".into(), "v".into())])
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::Configuration(_)));
}
