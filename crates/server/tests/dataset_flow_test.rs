//! End-to-end tests of the dataset lifecycle: upload, listing, retrieval,
//! media serving and deletion, with the classifier mocked at the HTTP
//! boundary.

mod common;

use common::{build_zip, gemini_reply, image_analysis_payload, png_bytes, TestApp, MODEL_PATH};
use httpmock::Method::POST;
use serde_json::Value;

fn mount_classifier_ok(app: &TestApp) {
    app.mock_server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH);
        then.status(200)
            .json_body(gemini_reply(&image_analysis_payload()));
    });
}

#[tokio::test]
async fn upload_list_get_serve_delete_flow() {
    let app = TestApp::spawn().await.unwrap();
    mount_classifier_ok(&app);

    let archive = build_zip(&[
        ("creatives/one.png", png_bytes(4, 4)),
        ("two.png", png_bytes(8, 2)),
    ]);

    // Upload: the response carries the full analysis document.
    let response = app.upload("campaign.zip", archive).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let document = &body["result"];
    assert_eq!(document.as_object().unwrap().len(), 2);
    for name in ["one.png", "two.png"] {
        let record = &document[name];
        assert_eq!(record["semantic"]["targeting_type"], "first_impression");
        assert_eq!(record["technical"]["format"], "PNG");
        assert!(record.get("error").is_none(), "{name} should have no error");
    }
    assert_eq!(document["two.png"]["technical"]["resolution"], "8x2");

    // List: one dataset, analysis present, both files inventoried.
    let body: Value = app
        .client
        .get(format!("{}/datasets", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listing = body["result"].as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["name"], "campaign");
    assert_eq!(listing[0]["has_analysis"], true);
    assert_eq!(
        listing[0]["files"],
        serde_json::json!(["one.png", "two.png"])
    );

    // Retrieval returns the persisted document.
    let response = app
        .client
        .get(format!("{}/datasets/campaign/analysis", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"].as_object().unwrap().len(), 2);

    // Byte-serving returns the stored media with its content type.
    let response = app
        .client
        .get(format!(
            "{}/datasets/campaign/media/images/one.png",
            app.address
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert!(!response.bytes().await.unwrap().is_empty());

    // Deletion removes the document and the directory together.
    let response = app
        .client
        .delete(format!("{}/datasets/campaign", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(!app.data_dir.path().join("campaign").exists());

    let response = app
        .client
        .get(format!("{}/datasets/campaign/analysis", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = app
        .client
        .get(format!("{}/datasets", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn rejects_bytes_that_are_not_an_archive() {
    let app = TestApp::spawn().await.unwrap();

    let response = app
        .upload("garbage.zip", b"these are not zip bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invalid archive"));
}

#[tokio::test]
async fn rejects_uploads_that_are_not_named_zip() {
    let app = TestApp::spawn().await.unwrap();

    let response = app.upload("media.tar.gz", vec![0u8; 16]).await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn rejects_archives_without_recognized_media() {
    let app = TestApp::spawn().await.unwrap();

    let archive = build_zip(&[("readme.txt", b"hello".to_vec())]);
    let response = app.upload("docs.zip", archive).await.unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no recognized image or video files"));

    // No dataset directory may survive the failed ingestion.
    let body: Value = app
        .client
        .get(format!("{}/datasets", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_uploads_conflict() {
    let app = TestApp::spawn().await.unwrap();
    mount_classifier_ok(&app);

    let archive = build_zip(&[("ad.png", png_bytes(2, 2))]);
    let first = app.upload("repeat.zip", archive.clone()).await.unwrap();
    assert_eq!(first.status(), 200);

    let second = app.upload("repeat.zip", archive).await.unwrap();
    assert_eq!(second.status(), 409);
}

#[tokio::test]
async fn classifier_failures_are_recorded_per_file_not_fatal() {
    let app = TestApp::spawn().await.unwrap();
    app.mock_server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH);
        then.status(500).body("model fell over");
    });

    let archive = build_zip(&[("ad.png", png_bytes(5, 5))]);
    let response = app.upload("degraded.zip", archive).await.unwrap();
    assert_eq!(response.status(), 200, "the batch itself still completes");

    let body: Value = response.json().await.unwrap();
    let record = &body["result"]["ad.png"];
    assert!(record.get("semantic").is_none());
    assert_eq!(record["technical"]["resolution"], "5x5");
    assert!(record["error"].as_str().unwrap().contains("rejected"));
}

#[tokio::test]
async fn deleting_an_unknown_dataset_reports_not_found() {
    let app = TestApp::spawn().await.unwrap();

    let response = app
        .client
        .delete(format!("{}/datasets/ghost", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
