mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use common::{harness, png_bytes, wait_for, Harness, ScriptedInference};
use detection_viewer::adapters::http::{router, state::HttpState};
use detection_viewer::application::dto::SessionView;

const BOUNDARY: &str = "viewer-test-boundary";

fn app(h: &Harness) -> Router {
    router(HttpState { viewer: h.viewer.clone() }, 16 * 1024 * 1024)
}

fn multipart_body(field: &str, file_name: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn file_request(body: Vec<u8>) -> Request<Body> {
    Request::post("/api/file")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, body, content_type)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn initial_session_is_idle() {
    let h = harness(ScriptedInference::json("{}"));
    let app = app(&h);

    let (status, body, _) = send(&app, get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    let view: SessionView = serde_json::from_slice(&body).unwrap();
    assert!(!view.busy);
    assert!(!view.upload.enabled);
    assert_eq!(view.upload.caption, "Upload & Detect");
    assert!(view.file_name.is_none());
}

#[tokio::test]
async fn upload_without_file_conflicts() {
    let h = harness(ScriptedInference::json("{}"));
    let app = app(&h);

    let (status, body, _) = send(&app, post("/api/upload")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(err["error"].is_string());
    assert_eq!(h.inference.calls(), 0);
}

#[tokio::test]
async fn select_upload_and_fetch_overlay() {
    let h = harness(ScriptedInference::json(
        r#"{"result":[{"bbox":[10,20,50,60],"confidence":0.9,"class_id":2}]}"#,
    ));
    let app = app(&h);
    let png = png_bytes(64, 80);

    let (status, body, _) = send(&app, file_request(multipart_body("file", "street.png", "image/png", &png))).await;
    assert_eq!(status, StatusCode::OK);
    let view: SessionView = serde_json::from_slice(&body).unwrap();
    assert_eq!(view.file_name.as_deref(), Some("street.png"));
    assert!(view.upload.enabled);
    let preview_url = view.preview_url.expect("preview url");

    let (status, body, content_type) = send(&app, get(&preview_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, png);

    // Aún sin detecciones: no hay nada que dibujar.
    let (status, _, _) = send(&app, get("/api/overlay.png")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, post("/api/upload")).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let view = wait_for(&h.viewer, |v| !v.busy && v.overlay_url.is_some()).await;
    assert_eq!(view.summary.unwrap().count("Car"), Some(1));

    let (status, body, content_type) = send(&app, get(view.overlay_url.as_deref().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    let overlay = image::load_from_memory(&body).unwrap();
    assert_eq!((overlay.width(), overlay.height()), (64, 80));
}

#[tokio::test]
async fn form_without_file_part_changes_nothing() {
    let h = harness(ScriptedInference::json("{}"));
    let app = app(&h);

    let (status, body, _) = send(&app, file_request(multipart_body("other", "x.txt", "text/plain", b"hi"))).await;
    assert_eq!(status, StatusCode::OK);
    let view: SessionView = serde_json::from_slice(&body).unwrap();
    assert!(view.file_name.is_none());
    assert!(view.preview_url.is_none());
}

#[tokio::test]
async fn released_preview_is_gone() {
    let h = harness(ScriptedInference::json("{}"));
    let app = app(&h);

    send(&app, file_request(multipart_body("file", "a.png", "image/png", &png_bytes(4, 4)))).await;
    send(&app, file_request(multipart_body("file", "b.png", "image/png", &png_bytes(4, 4)))).await;

    let (status, _, _) = send(&app, get("/api/preview/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, get("/api/preview/2")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn notice_is_cleared_on_acknowledge() {
    let h = harness(ScriptedInference::json("{}"));
    let app = app(&h);

    send(&app, file_request(multipart_body("file", "a.png", "image/png", &png_bytes(4, 4)))).await;
    send(&app, post("/api/upload")).await;
    let view = wait_for(&h.viewer, |v| !v.busy && v.notice.is_some()).await;
    assert_eq!(view.notice.unwrap().message, "No detections found.");

    let (status, body, _) = send(&app, post("/api/notice/ack")).await;
    assert_eq!(status, StatusCode::OK);
    let view: SessionView = serde_json::from_slice(&body).unwrap();
    assert!(view.notice.is_none());
}
