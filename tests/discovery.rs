//! Content Discovery Integration Tests
//!
//! Runs the Google and YouTube clients against a one-shot local HTTP
//! server that replays canned API responses.

use notecheck::adapters::{ArticleSearch, GoogleSearchClient, VideoSearch, YouTubeClient};
use notecheck::{Difficulty, Note};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single HTTP response; the handle yields the request line
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        // The client may hang up first on error statuses
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (base_url, handle)
}

/// Direct client, unaffected by proxy environment variables
fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn note() -> Note {
    Note::new("Sorting Algorithms", Difficulty::Intermediate).with_subject("Computer Science")
}

#[tokio::test]
async fn test_google_search_returns_articles() {
    let body = r#"{"items": [{"title": "Merge sort", "link": "https://example.org/merge", "snippet": "Divide and conquer"}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let client = GoogleSearchClient::new(Some("test-key".to_string()), Some("test-cx".to_string()))
        .with_base_url(base_url)
        .with_http_client(http_client())
        .with_max_results(3);

    let articles = client.related_articles(&note()).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].link, "https://example.org/merge");

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /customsearch/v1?"));
    assert!(request_line.contains("key=test-key"));
    assert!(request_line.contains("cx=test-cx"));
    assert!(request_line.contains("q=Sorting+Algorithms+Computer+Science"));
    assert!(request_line.contains("num=3"));
}

#[tokio::test]
async fn test_google_search_without_items_is_empty() {
    let (base_url, server) = serve_once("200 OK", r#"{"kind": "customsearch#search"}"#).await;

    let client = GoogleSearchClient::new(Some("k".to_string()), Some("cx".to_string()))
        .with_base_url(base_url)
        .with_http_client(http_client());

    let articles = client.related_articles(&note()).await.unwrap();
    assert!(articles.is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn test_google_search_http_error_fails() {
    let body = r#"{"error": {"code": 403, "message": "Daily limit exceeded"}}"#;
    let (base_url, server) = serve_once("403 Forbidden", body).await;

    let client = GoogleSearchClient::new(Some("k".to_string()), Some("cx".to_string()))
        .with_base_url(base_url)
        .with_http_client(http_client());

    assert!(client.related_articles(&note()).await.is_err());
    server.await.unwrap();
}

#[tokio::test]
async fn test_youtube_returns_videos() {
    let body = r#"{"items": [{"id": {"kind": "youtube#video", "videoId": "xyz"}, "snippet": {"title": "Sorting in 10 minutes", "channelTitle": "CS Lectures"}}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let client = YouTubeClient::new(Some("yt-key".to_string()))
        .with_base_url(base_url)
        .with_http_client(http_client());

    let videos = client.related_videos(&note()).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].video_id, "xyz");
    assert_eq!(videos[0].title, "Sorting in 10 minutes");

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /youtube/v3/search?"));
    assert!(request_line.contains("part=snippet"));
    assert!(request_line.contains("type=video"));
    assert!(request_line.contains("maxResults=5"));
    assert!(request_line.contains("key=yt-key"));
}

#[tokio::test]
async fn test_youtube_server_error_fails() {
    let (base_url, server) = serve_once("500 Internal Server Error", "{}").await;

    let client = YouTubeClient::new(Some("yt-key".to_string()))
        .with_base_url(base_url)
        .with_http_client(http_client());

    assert!(client.related_videos(&note()).await.is_err());
    server.await.unwrap();
}
