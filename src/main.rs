use anyhow::Context;
use clap::{CommandFactory, Parser};

use ytchapters::cli::{Cli, Commands};
use ytchapters::config::{Config, Credentials};
use ytchapters::summarize::llm::OpenAiClient;
use ytchapters::video::VideoId;
use ytchapters::{commands, pipeline, storage};

fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ytchapters=info".parse()?),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let command = match cli.command {
        Some(command) => command,
        None => match std::env::var("YTCHAPTERS_VIDEO_ID") {
            Ok(video) => Commands::Run {
                video: video.parse::<VideoId>()?,
            },
            Err(_) => {
                Cli::command().print_help()?;
                anyhow::bail!("No video given. Pass one to `ytchapters run` or set YTCHAPTERS_VIDEO_ID");
            }
        },
    };

    match command {
        Commands::Run { video } => run(&config, &video),
        Commands::Transcript { video } => {
            storage::ensure_directories(&config.storage)?;
            let service = pipeline::build_transcript_service(&config)?;
            let transcript = service.get_transcript(video.as_str());
            if transcript.is_empty() {
                anyhow::bail!("No transcript available for video {}", video);
            }
            print!("{}", transcript.text);
            Ok(())
        }
        Commands::Status => commands::show_status(&config.storage),
        Commands::InitConfig { force, path } => {
            let path = match path.or_else(Config::platform_config_path) {
                Some(path) => path,
                None => anyhow::bail!("Could not determine the platform config directory; pass --path"),
            };
            commands::init_config(&path, force)
        }
    }
}

fn run(config: &Config, video: &VideoId) -> anyhow::Result<()> {
    let credentials = Credentials::resolve(&config.openai)?;
    storage::ensure_directories(&config.storage)?;

    let transcripts = pipeline::build_transcript_service(config)?;
    let llm = OpenAiClient::new(&config.openai, credentials)
        .context("Failed to initialize LLM client")?;
    let summarizer = pipeline::build_summarizer(config, &llm);

    tracing::info!("Generating chapters for video {}", video);
    match pipeline::run(&transcripts, &summarizer, video.as_str()) {
        Some(summary) => match summary.record.chapters_text() {
            Some(chapters) => println!("{}", chapters.trim_end()),
            None => println!("Completion saved to {}", summary.path.display()),
        },
        None => tracing::warn!("No chapters generated for video {}", video),
    }
    Ok(())
}
