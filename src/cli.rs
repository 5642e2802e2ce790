//! Command-line interface definition using clap.
//!
//! Three subcommands, one per pipeline step:
//!
//! - `hinge` - clean a raw Hinge export into `<name>_hinge_data.json`
//! - `extract` - build the JSONL fine-tuning dataset
//! - `chat` - talk to the fine-tuned model, optionally out loud

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{ChatConfig, DEFAULT_OUTPUT, ExtractConfig, HingeConfig, VoiceConfig};
use crate::core::filter::BoilerplateFilter;
use crate::error::Result;

/// Turn Instagram and Hinge chat exports into fine-tuning data,
/// then chat with the tuned model.
#[derive(Parser, Debug, Clone)]
#[command(name = "chattune")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chattune hinge --dir Data/hinge --output-dir Clean_data
    chattune extract --inbox messages/inbox --self-name \"Lydia Graveline\" \\
        --hinge-data Clean_data/lydia_hinge_data.json
    chattune chat --model ft:gpt-4o-2024-08-06:personal:dms:abc --bot-name \"Lydia Graveline\"
    chattune chat --model ft:... --bot-name Lydia --voice --voice-id R3EDLzLRtYcjlNh3Fe2a")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the JSONL fine-tuning dataset from an Instagram inbox
    Extract(ExtractArgs),
    /// Clean a raw Hinge export (matches.json, prompts.json, user.json)
    Hinge(HingeArgs),
    /// Chat with the fine-tuned model in the terminal
    Chat(ChatArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExtractArgs {
    /// Instagram messages/inbox directory
    #[arg(long, value_name = "DIR")]
    pub inbox: PathBuf,

    /// Your sender name exactly as it appears in the export
    #[arg(long, value_name = "NAME")]
    pub self_name: String,

    /// Cleaned Hinge document from `chattune hinge`
    #[arg(long, value_name = "FILE")]
    pub hinge_data: Option<PathBuf>,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Keep text exactly as exported (skip the mojibake fix)
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Extra message to drop, matched whole and ignoring case (repeatable)
    #[arg(long = "skip", value_name = "TEXT")]
    pub skip: Vec<String>,

    /// Extra regex; messages it matches are dropped (repeatable)
    #[arg(long = "skip-pattern", value_name = "REGEX")]
    pub skip_pattern: Vec<String>,
}

impl ExtractArgs {
    /// Default boilerplate rules plus any given on the command line.
    pub fn filter(&self) -> Result<BoilerplateFilter> {
        let filter = self
            .skip
            .iter()
            .fold(BoilerplateFilter::default(), |f, s| f.with_literal(s));
        self.skip_pattern
            .iter()
            .try_fold(filter, |f, p| f.with_pattern(p))
    }
}

impl From<&ExtractArgs> for ExtractConfig {
    fn from(args: &ExtractArgs) -> Self {
        let config = ExtractConfig::new(&args.inbox, &args.self_name)
            .with_output(&args.output)
            .with_fix_encoding(!args.no_fix_encoding);
        match &args.hinge_data {
            Some(path) => config.with_hinge_data(path),
            None => config,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HingeArgs {
    /// Directory holding the raw Hinge export
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Where to write <name>_hinge_data.json
    #[arg(long, value_name = "DIR", default_value = "Clean_data")]
    pub output_dir: PathBuf,
}

impl From<&HingeArgs> for HingeConfig {
    fn from(args: &HingeArgs) -> Self {
        HingeConfig::new(&args.dir, &args.output_dir)
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ChatArgs {
    /// Fine-tuned model id
    #[arg(long, value_name = "ID")]
    pub model: String,

    /// Persona name used in the system prompt
    #[arg(long, value_name = "NAME")]
    pub bot_name: String,

    /// Replace the default persona prompt
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.9)]
    pub temperature: f32,

    /// Speak each reply aloud
    #[arg(long)]
    pub voice: bool,

    /// Speech voice id (required with --voice)
    #[arg(long, value_name = "ID", required_if_eq("voice", "true"))]
    pub voice_id: Option<String>,

    /// Speech model id
    #[arg(long, value_name = "ID", default_value = "eleven_flash_v2_5")]
    pub voice_model: String,

    /// Speech audio format
    #[arg(long, value_name = "FORMAT", default_value = "mp3_44100_128")]
    pub output_format: String,
}

impl From<&ChatArgs> for ChatConfig {
    fn from(args: &ChatArgs) -> Self {
        let config = ChatConfig::new(&args.model, &args.bot_name).with_temperature(args.temperature);
        match &args.system_prompt {
            Some(prompt) => config.with_system_prompt(prompt),
            None => config,
        }
    }
}

impl ChatArgs {
    /// Voice settings, when `--voice` was given.
    pub fn voice_config(&self) -> Option<VoiceConfig> {
        if !self.voice {
            return None;
        }
        let voice_id = self.voice_id.as_deref()?;
        Some(
            VoiceConfig::new(voice_id)
                .with_model_id(&self.voice_model)
                .with_output_format(&self.output_format),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("chattune").chain(args.iter().copied()))
    }

    #[test]
    fn test_extract_defaults() {
        let args = parse(&["extract", "--inbox", "inbox", "--self-name", "Me"]).unwrap();
        let Command::Extract(extract) = args.command else {
            panic!("expected extract");
        };
        let config = ExtractConfig::from(&extract);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.fix_encoding);
        assert!(config.hinge_data.is_none());
    }

    #[test]
    fn test_extract_requires_self_name() {
        assert!(parse(&["extract", "--inbox", "inbox"]).is_err());
    }

    #[test]
    fn test_extract_extra_rules() {
        let args = parse(&[
            "extract",
            "--inbox",
            "i",
            "--self-name",
            "Me",
            "--skip",
            "lol",
            "--skip-pattern",
            "^ok+$",
            "--no-fix-encoding",
        ])
        .unwrap();
        let Command::Extract(extract) = args.command else {
            panic!("expected extract");
        };
        assert!(!ExtractConfig::from(&extract).fix_encoding);

        let filter = extract.filter().unwrap();
        assert!(filter.is_boilerplate("LOL"));
        assert!(filter.is_boilerplate("okkk"));
        assert!(filter.is_boilerplate("You sent an attachment."));
        assert!(!filter.is_boilerplate("ok then"));
    }

    #[test]
    fn test_extract_bad_pattern() {
        let args = parse(&["extract", "--inbox", "i", "--self-name", "Me", "--skip-pattern", "("]).unwrap();
        let Command::Extract(extract) = args.command else {
            panic!("expected extract");
        };
        assert!(extract.filter().is_err());
    }

    #[test]
    fn test_hinge_default_output_dir() {
        let args = parse(&["hinge", "--dir", "export"]).unwrap();
        let Command::Hinge(hinge) = args.command else {
            panic!("expected hinge");
        };
        let config = HingeConfig::from(&hinge);
        assert_eq!(config.output_dir, PathBuf::from("Clean_data"));
    }

    #[test]
    fn test_chat_text_only() {
        let args = parse(&["chat", "--model", "ft:x", "--bot-name", "Lydia"]).unwrap();
        let Command::Chat(chat) = args.command else {
            panic!("expected chat");
        };
        assert!(chat.voice_config().is_none());
        let config = ChatConfig::from(&chat);
        assert_eq!(config.model, "ft:x");
        assert!((config.temperature - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_chat_voice_requires_voice_id() {
        assert!(parse(&["chat", "--model", "m", "--bot-name", "b", "--voice"]).is_err());

        let args = parse(&["chat", "--model", "m", "--bot-name", "b", "--voice", "--voice-id", "v1"]).unwrap();
        let Command::Chat(chat) = args.command else {
            panic!("expected chat");
        };
        let voice = chat.voice_config().unwrap();
        assert_eq!(voice.voice_id, "v1");
        assert_eq!(voice.model_id, "eleven_flash_v2_5");
        assert_eq!(voice.output_format, "mp3_44100_128");
    }

    #[test]
    fn test_chat_custom_prompt() {
        let args = parse(&[
            "chat",
            "--model",
            "m",
            "--bot-name",
            "b",
            "--system-prompt",
            "Be brief.",
            "--temperature",
            "0.3",
        ])
        .unwrap();
        let Command::Chat(chat) = args.command else {
            panic!("expected chat");
        };
        let config = ChatConfig::from(&chat);
        assert_eq!(config.system_prompt, "Be brief.");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    }
}
