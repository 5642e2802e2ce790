//! Local audio playback through an external player process.
//!
//! Audio is piped to the player's stdin, so nothing is written to disk.
//! The default player is `ffplay` from ffmpeg.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::error::{ChattuneError, Result};

/// A command that reads audio from stdin and plays it to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPlayer {
    program: String,
    args: Vec<String>,
}

impl AudioPlayer {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `ffplay -autoexit -nodisp -loglevel quiet -`
    pub fn ffplay() -> Self {
        Self::new("ffplay", ["-autoexit", "-nodisp", "-loglevel", "quiet", "-"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Plays `audio` and blocks until the player exits.
    pub fn play(&self, audio: &[u8]) -> Result<()> {
        tracing::debug!(program = %self.program, bytes = audio.len(), "starting playback");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ChattuneError::playback(format!(
                    "'{}' not found; install it or run without --voice",
                    self.program
                )),
                _ => ChattuneError::playback(format!("failed to start '{}': {e}", self.program)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A player that exits early closes the pipe; its exit status says more.
            if let Err(e) = stdin.write_all(audio) {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(ChattuneError::playback(format!("'{}' exited with {status}", self.program)));
        }
        Ok(())
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::ffplay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ffplay() {
        let player = AudioPlayer::default();
        assert_eq!(player.program(), "ffplay");
        assert_eq!(player, AudioPlayer::ffplay());
    }

    #[test]
    fn test_missing_program() {
        let player = AudioPlayer::new("chattune-no-such-player", Vec::<String>::new());
        let err = player.play(b"abc").unwrap_err();
        assert!(matches!(err, ChattuneError::Playback(ref m) if m.contains("not found")));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipes_audio_to_player() {
        // `cat` consumes stdin and exits 0
        let player = AudioPlayer::new("cat", Vec::<String>::new());
        player.play(b"fake mp3 bytes").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_player_failure_is_reported() {
        let player = AudioPlayer::new("false", Vec::<String>::new());
        let err = player.play(b"").unwrap_err();
        assert!(matches!(err, ChattuneError::Playback(ref m) if m.contains("exited")));
    }
}
