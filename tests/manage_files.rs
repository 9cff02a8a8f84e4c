use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestApp;

mod common;

#[tokio::test]
async fn delete_succeeds_once_then_not_found() {
    let app = TestApp::spawn().await;
    app.put_file("trash.txt", b"bye");

    let response = app.client.delete(app.url("/delete/trash.txt")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "File deleted successfully", "filename": "trash.txt" }));
    assert!(!app.root().join("trash.txt").exists());

    let response = app.client.delete(app.url("/delete/trash.txt")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn move_into_existing_folder() {
    let app = TestApp::spawn().await;
    app.put_file("report.txt", b"q3");
    app.mkdir("archive");

    let response = app
        .client
        .post(app.url("/move"))
        .query(&[("file", "report.txt"), ("to", "archive")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "File moved successfully");
    assert_eq!(body["file"], "report.txt");
    assert_eq!(body["from"], app.root().join("report.txt").to_string_lossy().as_ref());
    assert_eq!(body["to"], app.root().join("archive").join("report.txt").to_string_lossy().as_ref());

    assert!(!app.root().join("report.txt").exists());
    assert_eq!(std::fs::read(app.root().join("archive").join("report.txt")).unwrap(), b"q3");
}

#[tokio::test]
async fn move_into_missing_folder_leaves_source() {
    let app = TestApp::spawn().await;
    app.put_file("report.txt", b"q3");

    let response = app
        .client
        .post(app.url("/move"))
        .query(&[("file", "report.txt"), ("to", "nowhere")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Target folder does not exist");
    assert!(app.root().join("report.txt").exists());
}

#[tokio::test]
async fn move_without_parameters_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.client.post(app.url("/move")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn move_missing_source_is_not_found() {
    let app = TestApp::spawn().await;
    app.mkdir("archive");

    let response = app
        .client
        .post(app.url("/move?file=ghost.txt&to=archive"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn rename_in_place() {
    let app = TestApp::spawn().await;
    app.put_file("draft.md", b"# title");

    let response = app
        .client
        .put(app.url("/rename"))
        .query(&[("old_name", "draft.md"), ("new_name", "final.md")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "File renamed successfully", "old_name": "draft.md", "new_name": "final.md" })
    );
    assert!(!app.root().join("draft.md").exists());
    assert_eq!(std::fs::read(app.root().join("final.md")).unwrap(), b"# title");
}

#[tokio::test]
async fn rename_refuses_existing_target() {
    let app = TestApp::spawn().await;
    app.put_file("a.txt", b"a");
    app.put_file("b.txt", b"b");

    let response = app
        .client
        .put(app.url("/rename?old_name=a.txt&new_name=b.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File with new name already exists");
    assert_eq!(std::fs::read(app.root().join("a.txt")).unwrap(), b"a");
    assert_eq!(std::fs::read(app.root().join("b.txt")).unwrap(), b"b");
}

#[tokio::test]
async fn rename_missing_file_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .put(app.url("/rename?old_name=ghost.txt&new_name=b.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_a_folder_is_a_server_error() {
    let app = TestApp::spawn().await;
    app.mkdir("archive");
    let expected = std::fs::remove_file(app.root().join("archive")).unwrap_err().to_string();

    let response = app.client.delete(app.url("/delete/archive")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": expected }));
    assert!(app.root().join("archive").is_dir());
}

#[tokio::test]
async fn move_into_a_file_is_a_server_error() {
    let app = TestApp::spawn().await;
    app.put_file("report.txt", b"q3");
    app.put_file("archive", b"not a folder");

    let response = app
        .client
        .post(app.url("/move"))
        .query(&[("file", "report.txt"), ("to", "archive")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert_eq!(std::fs::read(app.root().join("report.txt")).unwrap(), b"q3");
}
