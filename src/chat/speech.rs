//! Text-to-speech via the ElevenLabs REST API.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Serialize;

use crate::chat::playback::AudioPlayer;
use crate::chat::session::Speaker;
use crate::config::{ELEVENLABS_API_KEY_VAR, VoiceConfig, api_key_from_env};
use crate::error::{ChattuneError, Result};

#[derive(Debug, Serialize)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
}

/// Converts text to encoded audio bytes.
pub struct SpeechClient {
    http: Client,
    api_key: String,
    config: VoiceConfig,
}

impl SpeechClient {
    pub fn new(config: VoiceConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: super::http_client()?,
            api_key: api_key.into(),
            config,
        })
    }

    /// Creates a client using `ELEVENLABS_API_KEY`.
    pub fn from_env(config: VoiceConfig) -> Result<Self> {
        let key = api_key_from_env(ELEVENLABS_API_KEY_VAR)?;
        Self::new(config, key)
    }

    /// `{base}/v1/text-to-speech/{voice_id}?output_format=...`, with the
    /// voice id encoded as one path segment.
    pub fn endpoint(&self) -> Result<Url> {
        let invalid = |message: String| ChattuneError::invalid_format("speech base URL", message);

        let mut url = Url::parse(&self.config.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("'{}' cannot be a base", self.config.base_url)))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", self.config.voice_id.as_str()]);
        url.query_pairs_mut()
            .append_pair("output_format", &self.config.output_format);
        Ok(url)
    }

    pub fn build_request<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            text,
            model_id: &self.config.model_id,
        }
    }

    /// Synthesizes `text` and returns the audio in the configured format.
    pub fn convert(&self, text: &str) -> Result<Vec<u8>> {
        let endpoint = self.endpoint()?;
        tracing::debug!(voice = %self.config.voice_id, model = %self.config.model_id, "requesting speech");

        let resp = self
            .http
            .post(endpoint)
            .header("xi-api-key", &self.api_key)
            .json(&self.build_request(text))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ChattuneError::api("speech", status.as_u16(), body));
        }

        let audio = resp.bytes()?;
        tracing::debug!(bytes = audio.len(), "speech audio received");
        Ok(audio.to_vec())
    }
}

/// Synthesizes a reply and plays it before returning.
pub struct VoiceSpeaker {
    client: SpeechClient,
    player: AudioPlayer,
}

impl VoiceSpeaker {
    pub fn new(client: SpeechClient, player: AudioPlayer) -> Self {
        Self { client, player }
    }
}

impl Speaker for VoiceSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        let audio = self.client.convert(text)?;
        self.player.play(&audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = SpeechClient::new(
            VoiceConfig::new("R3EDLzLRtYcjlNh3Fe2a").with_base_url("https://tts.local/"),
            "key",
        )
        .unwrap();
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://tts.local/v1/text-to-speech/R3EDLzLRtYcjlNh3Fe2a?output_format=mp3_44100_128"
        );
    }

    #[test]
    fn test_endpoint_encodes_voice_and_format() {
        let client = SpeechClient::new(
            VoiceConfig::new("a b/c?d")
                .with_output_format("mp3&x=1")
                .with_base_url("https://tts.local"),
            "key",
        )
        .unwrap();
        let url = client.endpoint().unwrap();
        assert_eq!(url.path(), "/v1/text-to-speech/a%20b%2Fc%3Fd");
        assert_eq!(url.query(), Some("output_format=mp3%26x%3D1"));

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, "mp3&x=1");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = SpeechClient::new(VoiceConfig::new("v1").with_base_url("http://proxy.local/eleven/"), "key").unwrap();
        assert_eq!(
            client.endpoint().unwrap().path(),
            "/eleven/v1/text-to-speech/v1"
        );
    }

    #[test]
    fn test_endpoint_rejects_bad_base() {
        let client = SpeechClient::new(VoiceConfig::new("v").with_base_url("not a url"), "key").unwrap();
        assert!(client.endpoint().unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_request_body() {
        let client = SpeechClient::new(VoiceConfig::new("v").with_model_id("eleven_turbo_v2"), "key").unwrap();
        let json = serde_json::to_value(client.build_request("hello there")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello there", "model_id": "eleven_turbo_v2"}));
    }
}
