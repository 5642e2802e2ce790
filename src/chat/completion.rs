//! Blocking client for an OpenAI-compatible chat completions endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::chat::session::Responder;
use crate::config::{ChatConfig, OPENAI_API_KEY_VAR, api_key_from_env};
use crate::error::{ChattuneError, Result};

const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Body of a completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<RequestMessage<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The part of a completion response we read.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Text of the first choice.
    pub fn into_reply(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChattuneError::invalid_format("completion response", "no message content"))
    }
}

/// Sends one stateless request per input line.
pub struct CompletionClient {
    http: Client,
    api_key: String,
    config: ChatConfig,
}

impl CompletionClient {
    pub fn new(config: ChatConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: super::http_client()?,
            api_key: api_key.into(),
            config,
        })
    }

    /// Creates a client using `OPENAI_API_KEY`.
    pub fn from_env(config: ChatConfig) -> Result<Self> {
        let key = api_key_from_env(OPENAI_API_KEY_VAR)?;
        Self::new(config, key)
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), COMPLETIONS_PATH)
    }

    /// The persona prompt as a developer message, then the input as a user message.
    pub fn build_request<'a>(&'a self, input: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.config.model,
            messages: vec![
                RequestMessage {
                    role: "developer",
                    content: &self.config.system_prompt,
                },
                RequestMessage {
                    role: "user",
                    content: input,
                },
            ],
            temperature: self.config.temperature,
        }
    }

    pub fn complete(&self, input: &str) -> Result<String> {
        let endpoint = self.endpoint();
        tracing::debug!(%endpoint, model = %self.config.model, "requesting completion");

        let resp = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(input))
            .send()?;

        let status = resp.status();
        tracing::debug!(%status, "completion response");
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ChattuneError::api("completion", status.as_u16(), body));
        }

        resp.json::<CompletionResponse>()?.into_reply()
    }
}

impl Responder for CompletionClient {
    fn respond(&self, input: &str) -> Result<String> {
        self.complete(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CompletionClient {
        let config = ChatConfig::new("ft:gpt-4o:personal:test", "Lydia")
            .with_base_url("http://localhost:9/v1/");
        CompletionClient::new(config, "sk-test").unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(client().endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn test_request_shape() {
        let client = client();
        let json = serde_json::to_value(client.build_request("hey")).unwrap();

        assert_eq!(json["model"], "ft:gpt-4o:personal:test");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "developer");
        assert!(messages[0]["content"].as_str().unwrap().starts_with("Your name is Lydia"));
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hey");
        assert!((json["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_request_is_stateless() {
        let client = client();
        let first = client.build_request("one");
        let second = client.build_request("two");
        assert_eq!(first.messages.len(), second.messages.len());
        assert_eq!(second.messages[1].content, "two");
    }

    #[test]
    fn test_slow_service_is_awaited() {
        use std::io::{Read, Write};
        use std::net::TcpListener;
        use std::time::{Duration, Instant};

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            std::thread::sleep(Duration::from_secs(35));

            // drain the request before answering
            let mut buf = [0u8; 4096];
            stream.set_read_timeout(Some(Duration::from_millis(200))).unwrap();
            while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}

            let body = r#"{"choices":[{"message":{"content":"still here"}}]}"#;
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        });

        let config = ChatConfig::new("m", "Lydia").with_base_url(format!("http://{addr}/v1"));
        let client = CompletionClient::new(config, "sk-test").unwrap();

        let start = Instant::now();
        let reply = client.complete("hi").unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));
        assert_eq!(reply, "still here");
        server.join().unwrap();
    }

    #[test]
    fn test_into_reply() {
        let resp: CompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hi!"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_reply().unwrap(), "hi!");
    }

    #[test]
    fn test_into_reply_without_content() {
        let resp: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(resp.into_reply().unwrap_err().is_invalid_format());

        let empty: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.into_reply().is_err());
    }
}
