//! End-to-end route tests against an isolated asset directory.
//!
//! Everything lives in one test because ARGUS_ASSET_DIR is process-global
//! state; parallel tests would race on it.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use deployment::Deployment;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid json body")
}

fn post_command(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/command")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "text": text }).to_string(),
        ))
        .expect("request")
}

#[tokio::test]
async fn health_crud_and_command_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::env::set_var("ARGUS_ASSET_DIR", tmp.path());
    // Point the model fallback at a dead port so the slow path degrades
    // deterministically even on machines that run a local Ollama.
    std::env::set_var("OLLAMA_BASE_URL", "http://127.0.0.1:9");

    let deployment = server::DeploymentImpl::new().await.expect("deployment");
    let app = server::routes::app(deployment.clone());

    // Health check on both mounts.
    for uri in ["/", "/api/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
    }

    // Empty text is rejected in-band, not as an HTTP error.
    let response = app
        .clone()
        .oneshot(post_command("   "))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No text provided");

    // Voice-style add place runs entirely on the keyword fast path.
    let response = app
        .clone()
        .oneshot(post_command("add a new place test zone"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["spoken_text"], "add a new place test zone");
    assert_eq!(body["command"]["action"], "add_place");
    assert_eq!(body["execution"]["success"], true);
    assert_eq!(body["execution"]["type"], "place_created");
    let place_id = body["execution"]["data"]["id"]
        .as_str()
        .expect("place id")
        .to_string();

    // Round trip: showing the place returns the created id and no cameras.
    let response = app
        .clone()
        .oneshot(post_command("show place test zone"))
        .await
        .expect("response");
    let body = json_body(response).await;
    assert_eq!(body["execution"]["type"], "place_cameras");
    assert_eq!(body["execution"]["place"]["id"], place_id.as_str());
    assert_eq!(
        body["execution"]["cameras"].as_array().map(Vec::len),
        Some(0)
    );

    // CRUD surface: create a camera attached to the place, list, patch,
    // delete.
    let create = Request::builder()
        .method("POST")
        .uri("/api/cameras")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "name": "Zone Cam",
                "stream_url": "rtsp://zone",
                "camera_type": null,
                "status": null,
                "place_id": place_id,
            })
            .to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(create).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    let camera_id = body["data"]["id"].as_str().expect("camera id").to_string();
    assert_eq!(body["data"]["camera_type"], "CCTV");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/cameras?place_id={}", place_id))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let patch = Request::builder()
        .method("PATCH")
        .uri(format!("/api/cameras/{}", camera_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "status": "online" }).to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(patch).await.expect("response");
    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "online");
    assert_eq!(body["data"]["name"], "Zone Cam");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/cameras/{}", camera_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(delete).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a 404 through the error envelope.
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/cameras/{}", camera_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(delete).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);

    // Unmatched transcripts fall through to the model; with no Ollama
    // running in tests the pipeline degrades to the unknown action.
    let response = app
        .clone()
        .oneshot(post_command("sing me a sea shanty"))
        .await
        .expect("response");
    let body = json_body(response).await;
    assert_eq!(body["command"]["action"], "unknown");
    assert_eq!(body["execution"]["success"], false);

    drop(deployment);
}
