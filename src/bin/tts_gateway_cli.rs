//! tts-gateway CLI — 调用当前配置的 TTS Provider 合成语音、列出音色的命令行工具
//!
//! Usage:
//!   tts-gateway-cli speak <text|-> [--voice V] [--format F] [--speed S] [--out PATH]
//!   tts-gateway-cli voices [--provider P]
//!   tts-gateway-cli providers

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use tts_gateway::registry;
use tts_gateway::{AudioFormat, ProviderKind, SpeechClient, SynthesisRequest};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "speak" => cmd_speak(&args[2..]).await,
        "voices" => cmd_voices(&args[2..]),
        "providers" => cmd_providers(),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"tts-gateway-cli — text-to-speech gateway

USAGE:
    tts-gateway-cli <COMMAND> [OPTIONS]

COMMANDS:
    speak <text|->              Synthesize text ("-" reads stdin)
        --voice <id>            Voice id from the provider catalog
        --format <fmt>          mp3, opus, aac, flac, wav, pcm (default mp3)
        --speed <x>             Playback speed, 0.25 to 4.0
        --out <path>            Output file (default: speech.<ext>)
    voices [--provider <id>]    List the voice catalog
    providers                   List supported providers
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    TTS_PROVIDER                openai | gemini (default openai)
    OPENAI_API_KEY              API key for openai
    GEMINI_API_KEY              API key for gemini
    TTS_MODEL                   Model override
    TTS_BASE_URL                Endpoint base override
    TTS_HTTP_TIMEOUT_SECS       Request timeout
    TTS_PROXY_URL               HTTP(S) proxy
    RUST_LOG                    Log filter (default warn)"#
    );
}

fn cmd_version() {
    println!("tts-gateway-cli {}", env!("CARGO_PKG_VERSION"));
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

async fn cmd_speak(args: &[String]) -> anyhow::Result<()> {
    let Some(text_arg) = args.first().filter(|a| !a.starts_with("--")) else {
        bail!("speak requires a text argument (or '-' for stdin)");
    };
    let text = if text_arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read text from stdin")?;
        buf
    } else {
        text_arg.clone()
    };

    let mut request = SynthesisRequest::new(text);
    if let Some(voice) = flag_value(args, "--voice") {
        request = request.with_voice(voice);
    }
    if let Some(format) = flag_value(args, "--format") {
        request = request.with_format(format.parse::<AudioFormat>()?);
    }
    if let Some(speed) = flag_value(args, "--speed") {
        let speed: f32 = speed
            .parse()
            .with_context(|| format!("invalid --speed value: {speed}"))?;
        request = request.with_speed(speed);
    }

    let client = SpeechClient::from_env()?;
    match client.generate_speech(&request).await {
        Ok(audio) => {
            let out = flag_value(args, "--out")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    PathBuf::from(format!("speech.{}", extension_for(&audio.content_type)))
                });
            std::fs::write(&out, &audio.audio_buffer)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Wrote {} bytes ({}) to {}",
                audio.audio_buffer.len(),
                audio.content_type,
                out.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_payload())?);
            std::process::exit(1);
        }
    }
}

fn cmd_voices(args: &[String]) -> anyhow::Result<()> {
    let provider = match flag_value(args, "--provider") {
        Some(id) => id.parse::<ProviderKind>()?,
        None => std::env::var("TTS_PROVIDER")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<ProviderKind>())
            .transpose()?
            .unwrap_or(ProviderKind::OpenAi),
    };
    println!("Voices for {provider}:");
    for voice in registry::catalog_for(provider) {
        println!("  {:<10} {}", voice.id, voice.label);
    }
    Ok(())
}

fn cmd_providers() -> anyhow::Result<()> {
    for provider in registry::supported_providers() {
        println!(
            "  {:<8} model={} key={}",
            provider.id(),
            provider.default_model(),
            provider.api_key_env()
        );
    }
    Ok(())
}

fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/opus" | "audio/ogg" => "opus",
        "audio/aac" => "aac",
        "audio/flac" => "flac",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/pcm" | "audio/l16" => "pcm",
        _ => "bin",
    }
}
