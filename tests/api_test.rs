// Integration tests for the transcript API HTTP surface.
//
// The transcription service is replaced with stubs so the pipeline can be
// exercised without network access or external tools.

use std::path::Path;
use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::Value;

use transcript_api::config::AppConfig;
use transcript_api::error::ApiError;
use transcript_api::handlers::{process_media, serve_frontend, serve_index, serve_media};
use transcript_api::media::SUPPORTED_AUDIO_EXTS;
use transcript_api::transcription::Transcriber;

const BOUNDARY: &str = "X-TRANSCRIPT-API-TEST-BOUNDARY";

/// Stub returning a fixed transcript for any input
struct StubTranscriber;

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String, ApiError> {
        Ok("hello world".to_string())
    }
}

/// Stub reporting a service-side failure
struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String, ApiError> {
        Err(ApiError::Transcription(
            "transcription failed: audio unintelligible".to_string(),
        ))
    }
}

fn test_config(temp_dir: &Path, frontend_dir: &Path) -> AppConfig {
    AppConfig {
        temp_dir: temp_dir.to_string_lossy().into_owned(),
        frontend_dir: frontend_dir.to_string_lossy().into_owned(),
        max_file_size: 1024 * 1024,
        ytdlp_command: "yt-dlp".to_string(),
        ffmpeg_command: "ffmpeg".to_string(),
    }
}

fn configure(
    config: AppConfig,
    transcriber: Arc<dyn Transcriber>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(config))
            .app_data(web::Data::from(transcriber))
            .service(process_media)
            .service(serve_media)
            .service(serve_index)
            .service(web::resource("/{path:.*}").route(web::get().to(serve_frontend)));
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Build a raw multipart/form-data body from the given parts
fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                        name, value
                    )
                    .as_bytes(),
                );
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn build_request(parts: &[Part<'_>]) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri("/api/process-media")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(parts))
}

#[actix_web::test]
async fn upload_supported_audio_extensions_return_transcript() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    for ext in SUPPORTED_AUDIO_EXTS {
        let filename = format!("clip.{}", ext);
        let req = build_request(&[Part::File("file_input", &filename, b"fake-audio-bytes")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "ext: {}", ext);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["transcript"], "hello world");
        assert_eq!(body["video_path"], format!("/media/{}", filename));
        assert!(tmp.path().join(&filename).exists());
    }
}

#[actix_web::test]
async fn uploaded_file_round_trips_via_media_endpoint() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let payload = b"\x00\x01binary audio payload\xff";
    let req = build_request(&[Part::File("file_input", "take one.mp3", payload)]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Whitespace in the filename is collapsed to an underscore on save
    let req = test::TestRequest::get()
        .uri("/media/take_one.mp3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], payload);
}

#[actix_web::test]
async fn unsupported_extension_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let req = build_request(&[Part::File("file_input", "notes.txt", b"plain text")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Unsupported file format"), "got: {}", error);
}

#[actix_web::test]
async fn url_mode_requires_valid_url() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let req = build_request(&[Part::Text("is_url", "true"), Part::Text("url_input", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("valid URL"), "got: {}", error);
}

#[actix_web::test]
async fn missing_file_part_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let req = build_request(&[Part::Text("is_url", "false")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("No file part"), "got: {}", error);
}

#[actix_web::test]
async fn oversized_upload_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let mut config = test_config(tmp.path(), front.path());
    config.max_file_size = 16;
    let app = test::init_service(
        App::new().configure(configure(config, Arc::new(StubTranscriber))),
    )
    .await;

    let req = build_request(&[Part::File(
        "file_input",
        "big.mp3",
        b"this payload is longer than sixteen bytes",
    )])
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 413);
}

#[actix_web::test]
async fn transcription_failure_keeps_media_servable() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(FailingTranscriber),
    )))
    .await;

    let req = build_request(&[Part::File("file_input", "voice.mp3", b"audio")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("audio unintelligible"), "got: {}", error);

    // The acquired media file survives the failed request
    assert!(tmp.path().join("voice.mp3").exists());
}

#[actix_web::test]
async fn media_endpoint_discards_directory_components() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    // Only the basename is looked up, so this resolves to <tmp>/passwd
    let req = test::TestRequest::get()
        .uri("/media/..%2F..%2Fetc%2Fpasswd")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn missing_media_file_returns_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let req = test::TestRequest::get()
        .uri("/media/nothing-here.mp4")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[actix_web::test]
async fn frontend_traversal_is_forbidden() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let req = test::TestRequest::get()
        .uri("/..%2f..%2fsecret")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Forbidden");
}

#[actix_web::test]
async fn frontend_serves_index_and_assets() {
    let tmp = tempfile::tempdir().unwrap();
    let front = tempfile::tempdir().unwrap();
    std::fs::write(front.path().join("index.html"), "<html>home</html>").unwrap();
    std::fs::write(front.path().join("script.js"), "console.log('hi');").unwrap();
    let app = test::init_service(App::new().configure(configure(
        test_config(tmp.path(), front.path()),
        Arc::new(StubTranscriber),
    )))
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"<html>home</html>");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/script.js").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"console.log('hi');");
}
