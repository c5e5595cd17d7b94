use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use vocora_types::{AppEvent, Language, StoryLength};

mod commands;
mod controller;
mod events;
mod io;
mod profile;
mod state;
mod view;

#[cfg(test)]
mod tests;

use self::commands::VocabCommand;
use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "vocora", about = "Read practice stories with context-aware definitions")]
struct Cli {
    /// Keep definitions and vocabulary in memory only
    #[arg(long, global = true)]
    offline: bool,

    /// Profile under $VOCORA_HOME/profiles
    #[arg(long, global = true, default_value = "main")]
    profile: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tokens of a story
    Segment {
        #[arg(long)]
        story: PathBuf,
    },
    /// Define a word as it is used in a story
    Lookup {
        word: String,
        #[arg(long)]
        story: PathBuf,
        /// Language of the definition, defaults to the user language
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Mark words in a story
    Highlight {
        #[arg(long, value_delimiter = ',', required = true)]
        words: Vec<String>,
        #[arg(long)]
        story: PathBuf,
    },
    /// Generate a practice story and its translation
    Story {
        /// Defaults to the vocabulary list
        #[arg(long, value_delimiter = ',')]
        words: Vec<String>,
        #[arg(long, default_value = "medium")]
        length: StoryLength,
    },
    /// Manage the vocabulary list for the practice language
    Vocab {
        #[command(subcommand)]
        action: VocabAction,
    },
    /// Read a story interactively
    Read {
        #[arg(long)]
        story: PathBuf,
    },
    /// Copy the main profile under a new name
    AddProfile { name: String },
}

#[derive(Subcommand)]
enum VocabAction {
    List,
    Add { word: String },
    Remove { word: String },
    Clear,
}

impl From<VocabAction> for VocabCommand {
    fn from(action: VocabAction) -> Self {
        match action {
            VocabAction::List => VocabCommand::List,
            VocabAction::Add { word } => VocabCommand::Add(word),
            VocabAction::Remove { word } => VocabCommand::Remove(word),
            VocabAction::Clear => VocabCommand::Clear,
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocora=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(atty::is(atty::Stream::Stderr))
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let home = profile::vocora_home();
    profile::init_user_config(&home)?;
    let config = profile::load_user_profile(&home, &cli.profile)?;
    init_logging(config.log_json);

    if let Command::AddProfile { name } = &cli.command {
        let path = profile::add_profile_from_default(&home, name)?;
        println!("{}", path.display());
        return Ok(());
    }

    let user_lang = config.session.user_lang;
    let state = Arc::new(AppState::new(config, cli.offline)?);

    match cli.command {
        Command::Segment { story } => {
            println!("{}", commands::segment_story(&commands::read_story(&story)?));
        }
        Command::Lookup { word, story, lang } => {
            let story = commands::read_story(&story)?;
            let language = lang.unwrap_or(user_lang);
            println!("{}", commands::lookup(&state, &word, &story, language).await?);
        }
        Command::Highlight { words, story } => {
            let story = commands::read_story(&story)?;
            println!("{}", commands::highlight(&state, &words, &story).await);
        }
        Command::Story { words, length } => {
            println!("{}", commands::story(&state, &words, length).await?);
        }
        Command::Vocab { action } => {
            println!("{}", commands::vocab(&state, action.into()).await?);
        }
        Command::Read { story } => {
            let story = commands::read_story(&story)?;
            run_reader(state, story).await?;
        }
        Command::AddProfile { .. } => {}
    }

    Ok(())
}

async fn run_reader(state: Arc<AppState>, story: String) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    controller.events().send(AppEvent::LoadStory(story)).await?;
    controller.spawn_stdin();
    println!("{}", io::USAGE);

    let cancel = controller.cancel_token();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
        _ = cancel.cancelled() => {}
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task exited: {e}"),
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }

    Ok(())
}
