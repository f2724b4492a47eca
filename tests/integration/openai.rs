//! OpenAI-style provider (raw audio body) against a mock server.

use mockito::Matcher;
use serde_json::json;
use tts_gateway::{AudioFormat, ErrorCode, ProviderKind, SynthesisRequest};

use super::mock_server::{MockServerFixture, OPENAI_KEY, OPENAI_PATH};

const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-frames";

#[tokio::test]
async fn test_openai_synthesis_returns_audio_and_mime() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", OPENAI_PATH)
            .match_header("authorization", format!("Bearer {}", OPENAI_KEY).as_str())
            .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
            .match_body(Matcher::PartialJson(json!({
                "model": "tts-1",
                "voice": "nova",
                "input": "test narration",
                "response_format": "mp3"
            })))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(FAKE_MP3)
            .expect(1)
            .create_async()
            .await
    };

    let client = fixture.client(ProviderKind::OpenAi);
    let request = SynthesisRequest::new("test narration")
        .with_voice("nova")
        .with_format(AudioFormat::Mp3);
    let result = client.generate_speech(&request).await.expect("synthesis");

    assert_eq!(result.content_type, "audio/mpeg");
    assert!(!result.audio_buffer.is_empty());
    assert_eq!(result.audio_buffer, FAKE_MP3.to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_defaults_voice_and_format() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", OPENAI_PATH)
            .match_body(Matcher::PartialJson(json!({
                "voice": "alloy",
                "response_format": "mp3"
            })))
            .with_status(200)
            .with_body(FAKE_MP3)
            .expect(1)
            .create_async()
            .await
    };

    let result = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&SynthesisRequest::new("defaults please"))
        .await
        .expect("synthesis");
    assert_eq!(result.content_type, "audio/mpeg");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_mime_follows_requested_format() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(b"RIFF....WAVE", 1).await;

    let request = SynthesisRequest::new("wave it").with_format(AudioFormat::Wav);
    let result = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&request)
        .await
        .expect("synthesis");
    // The server says audio/mpeg; the requested format decides.
    assert_eq!(result.content_type, "audio/wav");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_error_status_is_provider_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            OPENAI_PATH,
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;

    let err = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    assert_eq!(err.status(), Some(401));
    assert!(err.message().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_openai_empty_success_body_is_provider_error() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(b"", 1).await;

    let err = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_repeated_calls_are_identical() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(FAKE_MP3, 2).await;
    let client = fixture.client(ProviderKind::OpenAi);
    let request = SynthesisRequest::new("same input").with_voice("echo");

    let first = client.generate_speech(&request).await.expect("first");
    let second = client.generate_speech(&request).await.expect("second");
    assert_eq!(first, second);
    mock.assert_async().await;
}
