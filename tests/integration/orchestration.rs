//! End-to-end orchestration: validation ordering, provider switching,
//! transport failures and the JSON entry point.

use std::sync::Arc;

use serde_json::json;
use tts_gateway::{
    ErrorCode, ProviderConfig, ProviderKind, SpeechClient, SpeechClientBuilder, SynthesisRequest,
};

use super::mock_server::{MockServerFixture, GEMINI_PATH, OPENAI_PATH};

#[tokio::test]
async fn test_text_too_long_makes_no_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched(OPENAI_PATH).await;

    let err = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&SynthesisRequest::new("x".repeat(4097)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::TextTooLong);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_at_limit_is_accepted() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(b"audio", 1).await;

    // Multi-byte characters count once each.
    let text = "é".repeat(4096);
    fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&SynthesisRequest::new(text))
        .await
        .expect("4096 characters are within the limit");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_text_makes_no_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched(GEMINI_PATH).await;

    for text in ["", "   \n\t"] {
        let err = fixture
            .client(ProviderKind::Gemini)
            .generate_speech(&SynthesisRequest::new(text))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingInput);
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched(OPENAI_PATH).await;

    let client = SpeechClientBuilder::new()
        .provider(ProviderKind::OpenAi)
        .base_url_override(&fixture.base_url)
        .build()
        .unwrap();
    let err = client
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Configuration);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_voice_makes_no_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched(GEMINI_PATH).await;

    let err = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&SynthesisRequest::new("hello").with_voice("nova"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Configuration);
    assert!(err.to_string().contains("Kore"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_provider_is_provider_error() {
    let config = ProviderConfig::new(ProviderKind::OpenAi)
        .with_api_key("sk-test")
        .with_base_url("http://127.0.0.1:1");
    let client = SpeechClient::new(config).unwrap();

    let err = client
        .generate_speech(&SynthesisRequest::new("hello"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Provider);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_switching_configuration_switches_provider() {
    let fixture = MockServerFixture::new().await;
    let openai = fixture.mock_openai_audio(b"openai-bytes", 1).await;
    let gemini_body = json!({
        "candidates": [{
            "content": { "parts": [{ "inlineData": { "mimeType": "audio/mpeg", "data": "AAEC" } }] }
        }]
    });
    let gemini = fixture.mock_gemini_json(200, &gemini_body, 1).await;

    let request = SynthesisRequest::new("same text");
    let from_openai = fixture
        .client(ProviderKind::OpenAi)
        .generate_speech(&request)
        .await
        .unwrap();
    let from_gemini = fixture
        .client(ProviderKind::Gemini)
        .generate_speech(&request)
        .await
        .unwrap();

    assert_eq!(from_openai.audio_buffer, b"openai-bytes".to_vec());
    assert_eq!(from_gemini.audio_buffer, vec![0, 1, 2]);
    assert_ne!(
        fixture.client(ProviderKind::OpenAi).available_voices()[0],
        fixture.client(ProviderKind::Gemini).available_voices()[0]
    );
    openai.assert_async().await;
    gemini.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(b"shared-audio", 5).await;
    let client = Arc::new(fixture.client(ProviderKind::OpenAi));

    let calls = (0..5).map(|i| {
        let client = Arc::clone(&client);
        async move {
            client
                .generate_speech(&SynthesisRequest::new(format!("line {i}")))
                .await
        }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_handle_json_success_shape() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_openai_audio(&[1, 2, 3], 1).await;

    let out = fixture
        .client(ProviderKind::OpenAi)
        .handle_json(&json!({ "text": "hello", "voice": "onyx", "format": "mp3" }))
        .await;
    assert_eq!(out["audioBuffer"], "AQID");
    assert_eq!(out["contentType"], "audio/mpeg");
    assert!(out.get("error").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_handle_json_error_shape() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(OPENAI_PATH, 500, r#"{"error":{"message":"upstream exploded"}}"#)
        .await;

    let out = fixture
        .client(ProviderKind::OpenAi)
        .handle_json(&json!({ "text": "hello" }))
        .await;
    assert_eq!(out["error"], true);
    assert_eq!(out["code"], "PROVIDER_ERROR");
    assert!(out["message"].as_str().unwrap().contains("upstream exploded"));
}

#[tokio::test]
async fn test_handle_json_unknown_format_is_invalid_input() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_untouched(OPENAI_PATH).await;

    let out = fixture
        .client(ProviderKind::OpenAi)
        .handle_json(&json!({ "text": "hello", "format": "midi" }))
        .await;
    assert_eq!(out["code"], "MISSING_INPUT");
    mock.assert_async().await;
}
