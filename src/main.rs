//! # chattune CLI
//!
//! Command-line interface for the chattune library.

use std::io;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chattune::ChattuneError;
use chattune::chat::{AudioPlayer, ChatSession, CompletionClient, SpeechClient, VoiceSpeaker, load_env};
use chattune::cli::{Args, ChatArgs, Command, ExtractArgs, HingeArgs};
use chattune::config::{ChatConfig, ExtractConfig, HingeConfig};
use chattune::core::{build_dataset, write_jsonl};
use chattune::parsers::{HingeParser, write_hinge_data};

fn main() {
    init_tracing();
    let args = <Args as ClapParser>::parse();

    let result = match &args.command {
        Command::Extract(extract) => run_extract(extract),
        Command::Hinge(hinge) => {
            run_hinge(hinge);
            Ok(())
        }
        Command::Chat(chat) => run_chat(chat),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn run_extract(args: &ExtractArgs) -> Result<(), ChattuneError> {
    let total_start = Instant::now();
    let config = ExtractConfig::from(args);
    let filter = args.filter()?;

    println!("📦 chattune v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Inbox:   {}", config.inbox_dir.display());
    if let Some(hinge) = &config.hinge_data {
        println!("💘 Hinge:   {}", hinge.display());
    }
    println!("👤 Self:    {}", config.self_name);
    println!("💾 Output:  {}", config.output.display());
    println!();

    println!("⏳ Building dataset...");
    let dataset = build_dataset(&config, &filter)?;
    let stats = dataset.stats;
    println!(
        "   {} conversations, {} messages ({:.1}% dropped as noise)",
        stats.conversations,
        stats.messages_read,
        stats.filtered_ratio()
    );

    println!("💾 Writing JSONL...");
    let written = write_jsonl(&dataset.records, &config.output)?;

    println!();
    println!("✅ Done! Output saved to {}", config.output.display());
    println!();
    println!("📊 Summary:");
    println!("   Pairs:       {}", stats.pairs);
    println!("   Standalone:  {}", stats.singletons);
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());
    println!("Processed {} conversations for fine-tuning.", written);

    Ok(())
}

/// Hinge cleaning reports failures and still exits successfully.
fn run_hinge(args: &HingeArgs) {
    let config = HingeConfig::from(args);
    println!("Processing data from Hinge files...");

    match clean_hinge(&config) {
        Ok(()) => {}
        Err(e) if e.is_not_found() => println!("Error: Could not find file: {}", e),
        Err(e) if e.is_parse() => println!("Error: Invalid JSON format: {}", e),
        Err(e) => println!("Unexpected error occurred: {}", e),
    }
}

fn clean_hinge(config: &HingeConfig) -> Result<(), ChattuneError> {
    let data = HingeParser::new().parse_dir(config)?;
    let path = write_hinge_data(&data, &config.output_dir)?;
    println!("Successfully processed data and saved to {}", path.display());
    println!(
        "Processed {} messages and {} prompts",
        data.messages.len(),
        data.prompts.len()
    );
    Ok(())
}

fn run_chat(args: &ChatArgs) -> Result<(), ChattuneError> {
    load_env();

    let mut chat_config = ChatConfig::from(args);
    if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
        chat_config = chat_config.with_base_url(url);
    }
    let client = CompletionClient::from_env(chat_config)?;
    let session = ChatSession::new(client);

    let session = match args.voice_config() {
        Some(mut voice) => {
            if let Ok(url) = std::env::var("ELEVENLABS_BASE_URL") {
                voice = voice.with_base_url(url);
            }
            let speech = SpeechClient::from_env(voice)?;
            session.with_speaker(VoiceSpeaker::new(speech, AudioPlayer::ffplay()))
        }
        None => session,
    };

    session.run(io::stdin().lock(), io::stdout())?;
    Ok(())
}
