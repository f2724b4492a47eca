//! Gemini-style provider (base64 inline audio in JSON) against a mock server.

use base64::Engine as _;
use mockito::Matcher;
use serde_json::json;
use tts_gateway::{ErrorCode, ProviderKind, SynthesisRequest};

use super::mock_server::{MockServerFixture, GEMINI_KEY, GEMINI_PATH};

const KNOWN_AUDIO: &[u8] = b"\xff\xfb\x90\x44known mpeg frame bytes";

fn inline_audio_response(mime: &str, audio: &[u8]) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "inlineData": {
                        "mimeType": mime,
                        "data": base64::engine::general_purpose::STANDARD.encode(audio)
                    }
                }]
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_gemini_decodes_inline_audio() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_gemini_json(200, &inline_audio_response("audio/mpeg", KNOWN_AUDIO), 1)
        .await;

    let result = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("test narration").with_voice("Kore"))
        .await
        .expect("synthesis");

    assert_eq!(result.audio_buffer, KNOWN_AUDIO.to_vec());
    assert_eq!(result.content_type, "audio/mpeg");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_uses_declared_mime_type() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_gemini_json(
            200,
            &inline_audio_response("audio/L16;codec=pcm;rate=24000", &[0, 1, 2, 3]),
            1,
        )
        .await;

    let request = SynthesisRequest::new("pcm please").with_format(tts_gateway::AudioFormat::Mp3);
    let result = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&request)
        .await
        .expect("synthesis");
    assert_eq!(result.content_type, "audio/L16;codec=pcm;rate=24000");
    assert_eq!(result.audio_buffer, vec![0, 1, 2, 3]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_request_shape_and_default_voice() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", GEMINI_PATH)
            .match_query(Matcher::UrlEncoded("key".into(), GEMINI_KEY.into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "default voice" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                    }
                }
            })))
            .with_status(200)
            .with_body(inline_audio_response("audio/mpeg", KNOWN_AUDIO).to_string())
            .expect(1)
            .create_async()
            .await
    };

    fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("default voice"))
        .await
        .expect("synthesis");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_zero_candidates_is_provider_error() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_gemini_json(200, &json!({ "candidates": [] }), 1)
        .await;

    let err = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_candidate_without_parts_is_provider_error() {
    let fixture = MockServerFixture::new().await;
    let body = json!({ "candidates": [{ "content": { "parts": [] }, "finishReason": "STOP" }] });
    let mock = fixture.mock_gemini_json(200, &body, 1).await;

    let err = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    assert_eq!(err.status(), Some(200));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_error_status_is_provider_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            GEMINI_PATH,
            400,
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;

    let err = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    assert_eq!(err.status(), Some(400));
    assert!(err.message().contains("API key not valid"));
    // The key travels in the query string and must not leak into the message.
    assert!(!err.to_string().contains(GEMINI_KEY));
}

#[tokio::test]
async fn test_gemini_catalog_starts_with_kore() {
    let fixture = MockServerFixture::new().await;
    let voices = fixture.client(ProviderKind::Gemini).available_voices();
    assert!(!voices.is_empty());
    assert_eq!(voices[0].id, "Kore");
}
