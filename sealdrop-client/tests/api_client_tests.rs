use sealdrop_client::api_client::{ApiClient, CLIENT_KEY_HEADER, CONTAINER_FORMAT_HEADER};
use sealdrop_client::config::ClientConfig;
use sealdrop_client::error::ClientError;
use sealdrop_client::types::ContainerFormat;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> ApiClient {
    let config = ClientConfig {
        api_base_url: server.uri(),
        request_timeout_secs: 5,
        chunked_threshold_bytes: 1024,
    };
    ApiClient::new(config).unwrap()
}

fn file_meta_response() -> serde_json::Value {
    serde_json::json!({
        "id": "f-123",
        "file_name": "report.pdf",
        "mime_type": "application/pdf",
        "size_bytes": 1234,
        "container_format": "one-shot",
        "client_encrypted": true,
        "uploaded_at": "2026-01-01T00:00:00Z"
    })
}

// --- Auth state ---

#[tokio::test]
async fn not_authenticated_initially() {
    let server = MockServer::start().await;
    let client = setup(&server);
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn set_token_makes_authenticated() {
    let server = MockServer::start().await;
    let client = setup(&server);
    client.set_token("tok".into()).await;
    assert!(client.is_authenticated().await);

    client.clear_token().await;
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn requests_without_token_fail_locally() {
    let server = MockServer::start().await;
    let client = setup(&server);
    let result = client.list_files().await;
    assert!(matches!(result.unwrap_err(), ClientError::AuthRequired));
    // Nothing should have reached the server
    assert!(server.received_requests().await.unwrap().is_empty());
}

// --- Upload ---

#[tokio::test]
async fn upload_file_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_meta_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let meta = client
        .upload_file(
            "report.pdf",
            "application/pdf",
            vec![0xAB; 64],
            ContainerFormat::OneShot,
            Some("a-base64-key"),
        )
        .await
        .unwrap();
    assert_eq!(meta.id, "f-123");
    assert!(meta.client_encrypted);
}

#[tokio::test]
async fn upload_sends_key_as_separate_field_not_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_meta_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let container = vec![0xCD; 32];
    client
        .upload_file(
            "a.bin",
            "application/octet-stream",
            container.clone(),
            ContainerFormat::OneShot,
            Some("THEKEYSTRING+pad="),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    // Key appears in its own multipart field, after the file part
    let file_pos = body.find("name=\"file\"").unwrap();
    let key_pos = body.find("name=\"client_key\"").unwrap();
    assert!(body.contains("THEKEYSTRING+pad="));
    assert_ne!(file_pos, key_pos);
}

#[tokio::test]
async fn upload_server_error_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let err = client
        .upload_file("a", "text/plain", vec![], ContainerFormat::OneShot, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api(_)));
}

// --- Download ---

#[tokio::test]
async fn download_returns_body_and_key_side_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/download/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![1u8, 2, 3, 4])
                .insert_header(CLIENT_KEY_HEADER, "the-key")
                .insert_header(CONTAINER_FORMAT_HEADER, "chunked"),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let blob = client.download_file("f-1").await.unwrap();
    assert_eq!(blob.body, vec![1, 2, 3, 4]);
    assert_eq!(blob.client_key.as_deref(), Some("the-key"));
    assert_eq!(blob.format, ContainerFormat::Chunked);
}

#[tokio::test]
async fn download_without_key_header_signals_no_client_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-2/download/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8; 16]))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let blob = client.download_file("f-2").await.unwrap();
    // Absent header is "no client key", not an empty key
    assert!(blob.client_key.is_none());
    assert_eq!(blob.format, ContainerFormat::OneShot);
}

#[tokio::test]
async fn download_missing_file_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/nope/download/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let err = client.download_file("nope").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn expired_token_maps_to_auth_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("stale".into()).await;
    let err = client.list_files().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthRequired));
}

// --- Share ---

#[tokio::test]
async fn share_file_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/f-1/share/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "file_id": "f-1",
            "recipient_email": "ana@example.com",
            "granted_at": "2026-01-02T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let grant = client.share_file("f-1", "ana@example.com").await.unwrap();
    assert_eq!(grant.recipient_email, "ana@example.com");
}

// --- List ---

#[tokio::test]
async fn list_files_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([file_meta_response()])),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.set_token("tok".into()).await;
    let files = client.list_files().await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "report.pdf");
}
