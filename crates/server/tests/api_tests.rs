//! End-to-end API tests over the router.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use std::io::Cursor;

fn zip_member_names(bytes: &[u8]) -> Vec<String> {
    let mut names: Vec<String> = zip::ZipArchive::new(Cursor::new(bytes))
        .unwrap()
        .file_names()
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn service_root_is_unauthenticated() {
    let server = TestServer::new().await;
    let (status, body) = server.json("GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "satchel");
}

#[tokio::test]
async fn create_requires_a_valid_secret() {
    let server = TestServer::new().await;

    let (status, body) = server.json("POST", "/folder", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, body) = server.json("POST", "/folder", Some("Bearer WRONG")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized", "wrong secret is indistinguishable");

    let (status, _) = server.json("POST", "/folder", Some("s2cr2t")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "missing scheme is malformed");
}

#[tokio::test]
async fn create_redirects_and_writes_metadata() {
    let server = TestServer::new().await;
    let (status, headers, _) = server
        .send("POST", "/folder", Some("Bearer s2cr2t"), Some("test-agent"))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let location = headers["location"].to_str().unwrap();
    let folder_id = location.rsplit('/').next().unwrap();
    assert!(location.starts_with("/folder/"));
    assert_eq!(folder_id.split('-').count(), 3);

    assert!(server.root().join(folder_id).is_dir());
    let meta_raw =
        std::fs::read_to_string(server.root().join(format!("{folder_id}.meta"))).unwrap();
    let meta: serde_json::Value = serde_json::from_str(&meta_raw).unwrap();
    assert_eq!(meta["user-agent"], "test-agent");
    assert_eq!(meta["secret"], "s2c...");
    assert!(!meta_raw.contains("s2cr2t"), "full secret never persisted");
    assert!(meta["created"].is_i64());
}

#[tokio::test]
async fn get_folder_lists_files_and_settings() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    let dir = server.root().join(&folder_id);

    std::fs::write(dir.join("a.txt"), b"A").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    std::fs::write(dir.join("b.txt"), b"BB").unwrap();

    let (status, body) = server.json("GET", &format!("/folder/{folder_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["folder"], folder_id);
    assert!(body["created"].is_i64());
    assert_eq!(body["settings"]["retention_days"], 7);

    let names: Vec<&str> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["b.txt", "a.txt"], "newest first");
}

#[tokio::test]
async fn get_folder_without_sidecar_omits_provenance() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    std::fs::remove_file(server.root().join(format!("{folder_id}.meta"))).unwrap();

    let (status, body) = server.json("GET", &format!("/folder/{folder_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["created"].is_i64());
    assert!(body.get("host").is_none());
    assert!(body.get("user-agent").is_none());
    assert!(body.get("secret").is_none());
}

#[tokio::test]
async fn download_archive_is_idempotent_and_has_disposition() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    let dir = server.root().join(&folder_id);
    std::fs::write(dir.join("x.bin"), b"xxx").unwrap();
    std::fs::write(dir.join("y.bin"), b"yyyy").unwrap();

    let uri = format!("/folder/{folder_id}/download");
    let (status, headers, body) = server.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-disposition"]
        .to_str()
        .unwrap()
        .ends_with(&format!("{folder_id}.zip\"")));
    assert_eq!(headers["content-type"], "application/zip");
    assert_eq!(zip_member_names(&body), vec!["x.bin", "y.bin"]);

    let (status, _, body) = server.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(zip_member_names(&body), vec!["x.bin", "y.bin"], "no duplicates");
}

#[tokio::test]
async fn download_archive_for_unknown_folder_is_404() {
    let server = TestServer::new().await;
    let (status, _) = server.json("GET", "/folder/oak-lime-pine/download", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetch_file_returns_attachment() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    std::fs::write(server.root().join(&folder_id).join("note.md"), b"# hello").unwrap();

    let (status, headers, body) = server
        .send("GET", &format!("/file/{folder_id}/note.md"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-disposition"]
        .to_str()
        .unwrap()
        .ends_with("note.md\""));
    assert_eq!(&body[..], b"# hello");
}

#[tokio::test]
async fn delete_removes_folder_and_sidecars() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    let dir = server.root().join(&folder_id);
    std::fs::write(dir.join("t.txt"), b"t").unwrap();

    // Build the archive so all three artifacts exist.
    let (status, _, _) = server
        .send("GET", &format!("/folder/{folder_id}/download"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server
        .json("DELETE", &format!("/folder/{folder_id}"), Some("Bearer s2cr2t"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));

    assert!(!dir.exists());
    assert!(!server.root().join(format!("{folder_id}.zip")).exists());
    assert!(!server.root().join(format!("{folder_id}.meta")).exists());

    // A second delete finds nothing, rather than erroring on missing sidecars.
    let (status, _) = server
        .json("DELETE", &format!("/folder/{folder_id}"), Some("Bearer s2cr2t"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unauthorized_delete_is_401_even_for_unknown_folders() {
    let server = TestServer::new().await;
    let (status, body) = server
        .json("DELETE", "/folder/oak-lime-pine", Some("Bearer WRONG"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn malformed_folder_id_is_422() {
    let server = TestServer::new().await;
    let (status, body) = server.json("GET", "/folder/NOPE_not-valid", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_failed");
}

#[tokio::test]
async fn malformed_filename_is_422() {
    let server = TestServer::new().await;
    let folder_id = server.create_folder().await;
    let (status, _) = server
        .json("GET", &format!("/file/{folder_id}/bad:name.txt"), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_folder_is_404() {
    let server = TestServer::new().await;
    let (status, body) = server.json("GET", "/folder/oak-lime-pine", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn creation_sweeps_expired_folders() {
    let server = TestServer::with_config(|c| c.folders.retention_days = 0).await;

    // Plant an expired folder by hand: directory plus a sidecar dated two
    // days back.
    let stale = server.root().join("oak-lime-pine");
    std::fs::create_dir(&stale).unwrap();
    let created = time::OffsetDateTime::now_utc().unix_timestamp() - 2 * 86_400;
    std::fs::write(
        server.root().join("oak-lime-pine.meta"),
        serde_json::json!({ "created": created }).to_string(),
    )
    .unwrap();

    let _ = server.create_folder().await;
    assert!(!stale.exists(), "expired folder reaped during creation");
}
