//! Signed download link integration tests.
//!
//! Run with: `cargo test -p arkiva-api --test signed_link_test`

mod helpers;

use uuid::Uuid;

use helpers::{api_path, setup_test_app, setup_test_app_with};

#[tokio::test]
async fn test_issue_link_returns_signed_url() {
    let app = setup_test_app().await;
    let original = app
        .seed_original("report.pdf", "application/pdf", b"pdf bytes".to_vec())
        .await;

    let response = app
        .client()
        .post(&api_path(&format!("/files/{}/link", original.id)))
        .await;

    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();

    let url = data["url"].as_str().unwrap_or("");
    assert!(
        url.contains(&format!("/api/v0/files/{}/download", original.id)),
        "URL should point at the download route: {}",
        url
    );

    let expires_at = data["expires_at"].as_i64().expect("expires_at is a timestamp");
    assert!(expires_at > chrono::Utc::now().timestamp());

    let signature = data["signature"].as_str().unwrap_or("");
    assert!(!signature.is_empty());

    assert_eq!(
        data["download_url"].as_str(),
        Some(format!("{}?expires={}&signature={}", url, expires_at, signature).as_str())
    );
}

#[tokio::test]
async fn test_issued_link_downloads_file() {
    let app = setup_test_app().await;
    let content = b"the document body".to_vec();
    let original = app
        .seed_original("report.pdf", "application/pdf", content.clone())
        .await;

    let issued = app
        .client()
        .post(&api_path(&format!("/files/{}/link", original.id)))
        .await;
    let data: serde_json::Value = issued.json();
    let expires = data["expires_at"].as_i64().unwrap();
    let signature = data["signature"].as_str().unwrap().to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", original.id)))
        .add_query_param("expires", expires.to_string())
        .add_query_param("signature", &signature)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), content.as_slice());

    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    let disposition = headers
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("report.pdf"));
}

#[tokio::test]
async fn test_tampered_signature_is_forbidden() {
    let app = setup_test_app().await;
    let original = app
        .seed_original("report.pdf", "application/pdf", b"pdf bytes".to_vec())
        .await;

    let issued = app
        .client()
        .post(&api_path(&format!("/files/{}/link", original.id)))
        .await;
    let data: serde_json::Value = issued.json();
    let expires = data["expires_at"].as_i64().unwrap();
    let signature = data["signature"].as_str().unwrap();

    // Flip the final character of the signature.
    let mut chars: Vec<char> = signature.chars().collect();
    let last = chars.last_mut().unwrap();
    *last = if *last == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", original.id)))
        .add_query_param("expires", expires.to_string())
        .add_query_param("signature", &tampered)
        .await;

    assert_eq!(response.status_code(), 403);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("SIGNATURE_MISMATCH"));
}

#[tokio::test]
async fn test_link_does_not_open_other_file() {
    let app = setup_test_app().await;
    let first = app
        .seed_original("first.pdf", "application/pdf", b"first".to_vec())
        .await;
    let second = app
        .seed_original("second.pdf", "application/pdf", b"second".to_vec())
        .await;

    let issued = app
        .client()
        .post(&api_path(&format!("/files/{}/link", first.id)))
        .await;
    let data: serde_json::Value = issued.json();
    let expires = data["expires_at"].as_i64().unwrap();
    let signature = data["signature"].as_str().unwrap().to_string();

    // The signature covers the full URL, so it is bound to the file it was
    // issued for.
    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", second.id)))
        .add_query_param("expires", expires.to_string())
        .add_query_param("signature", &signature)
        .await;

    assert_eq!(response.status_code(), 403);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("SIGNATURE_MISMATCH"));
}

#[tokio::test]
async fn test_expired_link_is_forbidden() {
    // A negative lifetime makes every issued link already expired.
    let app = setup_test_app_with(|config| config.download_url_lifetime_secs = -10).await;
    let original = app
        .seed_original("report.pdf", "application/pdf", b"pdf bytes".to_vec())
        .await;

    let issued = app
        .client()
        .post(&api_path(&format!("/files/{}/link", original.id)))
        .await;
    assert_eq!(issued.status_code(), 201);
    let data: serde_json::Value = issued.json();
    let expires = data["expires_at"].as_i64().unwrap();
    let signature = data["signature"].as_str().unwrap().to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", original.id)))
        .add_query_param("expires", expires.to_string())
        .add_query_param("signature", &signature)
        .await;

    assert_eq!(response.status_code(), 403);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("LINK_EXPIRED"));
}

#[tokio::test]
async fn test_missing_parameters_is_bad_request() {
    let app = setup_test_app().await;
    let original = app
        .seed_original("report.pdf", "application/pdf", b"pdf bytes".to_vec())
        .await;

    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", original.id)))
        .await;
    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("INVALID_INPUT"));

    let response = app
        .client()
        .get(&api_path(&format!("/files/{}/download", original.id)))
        .add_query_param("expires", "1700000000")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_link_for_unknown_file_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path(&format!("/files/{}/link", Uuid::new_v4())))
        .await;

    assert_eq!(response.status_code(), 404);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("NOT_FOUND"));
}
