//! The terminal chat loop.
//!
//! Each turn is independent: the responder sees only the line just typed
//! (plus whatever fixed prompt it carries itself). Nothing from earlier
//! turns is sent again.

use std::io::{BufRead, Write};

use crate::error::Result;

/// Produces a reply for one line of operator input.
pub trait Responder {
    fn respond(&self, input: &str) -> Result<String>;
}

/// Speaks a reply aloud, returning once playback has finished.
pub trait Speaker {
    fn speak(&self, text: &str) -> Result<()>;
}

impl<T: Responder + ?Sized> Responder for &T {
    fn respond(&self, input: &str) -> Result<String> {
        (**self).respond(input)
    }
}

impl<T: Speaker + ?Sized> Speaker for &T {
    fn speak(&self, text: &str) -> Result<()> {
        (**self).speak(text)
    }
}

/// Read–respond–print loop over any line source.
///
/// ```
/// use std::io::Cursor;
/// use chattune::chat::{ChatSession, Responder};
///
/// struct Echo;
/// impl Responder for Echo {
///     fn respond(&self, input: &str) -> chattune::Result<String> {
///         Ok(input.to_uppercase())
///     }
/// }
///
/// let mut out = Vec::new();
/// let turns = ChatSession::new(Echo).run(Cursor::new("hi\n"), &mut out)?;
/// assert_eq!(turns, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "You: Assistant: HI\nYou: ");
/// # Ok::<(), chattune::ChattuneError>(())
/// ```
pub struct ChatSession<'a, R> {
    responder: R,
    speaker: Option<Box<dyn Speaker + 'a>>,
}

impl<'a, R: Responder> ChatSession<'a, R> {
    /// Creates a text-only session.
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            speaker: None,
        }
    }

    /// Speaks every reply after printing it.
    #[must_use]
    pub fn with_speaker(mut self, speaker: impl Speaker + 'a) -> Self {
        self.speaker = Some(Box::new(speaker));
        self
    }

    pub fn has_voice(&self) -> bool {
        self.speaker.is_some()
    }

    /// Runs until `input` reaches end of file.
    ///
    /// Blank lines are skipped without calling the responder. Any responder
    /// or speaker error ends the session and is returned as is.
    ///
    /// Returns the number of completed turns.
    pub fn run<I: BufRead, O: Write>(&self, mut input: I, mut output: O) -> Result<usize> {
        let mut turns = 0;
        let mut line = String::new();

        loop {
            write!(output, "You: ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let text = line.trim_end_matches(['\r', '\n']);
            if text.trim().is_empty() {
                continue;
            }

            let reply = self.responder.respond(text)?;
            writeln!(output, "Assistant: {reply}")?;
            output.flush()?;

            if let Some(speaker) = &self.speaker {
                speaker.speak(&reply)?;
            }
            turns += 1;
        }

        Ok(turns)
    }
}
