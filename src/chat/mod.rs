//! Terminal chatbot backed by the fine-tuned model.
//!
//! - [`ChatSession`] - the read–respond–print loop, generic over
//!   [`Responder`] and [`Speaker`]
//! - [`CompletionClient`] - hosted completion API (`chat` feature)
//! - [`SpeechClient`] / [`VoiceSpeaker`] - hosted text-to-speech (`chat` feature)
//! - [`AudioPlayer`] - local playback through `ffplay`
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "chat")]
//! # fn main() -> chattune::Result<()> {
//! use chattune::chat::{ChatSession, CompletionClient, load_env};
//! use chattune::config::ChatConfig;
//!
//! load_env();
//! let client = CompletionClient::from_env(ChatConfig::new("ft:gpt-4o-2024-08-06:personal:x", "Lydia"))?;
//! ChatSession::new(client).run(std::io::stdin().lock(), std::io::stdout())?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "chat"))]
//! # fn main() {}
//! ```

#[cfg(feature = "chat")]
mod completion;
mod playback;
mod session;
#[cfg(feature = "chat")]
mod speech;

#[cfg(feature = "chat")]
pub use completion::{CompletionClient, CompletionRequest, CompletionResponse};
pub use playback::AudioPlayer;
pub use session::{ChatSession, Responder, Speaker};
#[cfg(feature = "chat")]
pub use speech::{SpeechClient, VoiceSpeaker};

/// Blocking HTTP client shared by the completion and speech clients.
///
/// Requests have no overall timeout: a turn waits as long as the service
/// takes to answer.
#[cfg(feature = "chat")]
fn http_client() -> crate::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder().timeout(None).build()?)
}

/// Loads `.env` from the current directory (or a parent), if present.
///
/// Returns the path that was loaded.
#[cfg(feature = "chat")]
pub fn load_env() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            Some(path)
        }
        Err(_) => None,
    }
}
