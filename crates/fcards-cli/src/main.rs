use anyhow::Context;
use clap::Parser;
use fcards_core::{Config, Error, QuestionSource};
use fcards_store::Store;
use fcards_tui::{App, SyntectHighlighter};
use rand::RngCore;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "fcards.log";

#[derive(Parser, Debug)]
#[command(name = "fcards")]
#[command(version, about = "Flashcards in the terminal", long_about = None)]
struct Cli {
    /// Only review questions of this type
    #[arg(long = "type", value_name = "CATEGORY")]
    category: Option<String>,

    /// Browse questions grouped by KIND first (supported: type)
    #[arg(long, value_name = "KIND")]
    group: Option<String>,

    /// Database file to use instead of the configured one
    #[arg(long, value_name = "PATH", env = "FCARDS_DB")]
    db: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Category filter for the review set; blank means everything
    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    let data_dir = config.data_dir().context("failed to prepare data directory")?;
    init_logging(&data_dir, &config.log.filter)?;

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.db_path()?,
    };
    tracing::info!("Using database {}", db_path.display());

    let mut store = Store::open(&db_path).context("failed to open db")?;
    if store.seed_if_empty().context("failed to seed")? {
        tracing::info!("Seeded sample deck");
    }

    let app = startup_app(&cli, &store, &mut rand::thread_rng())?;
    let highlighter = SyntectHighlighter::new(&config.ui.code_theme);

    fcards_tui::run_tui(app, &store, &highlighter).context("ui error")
}

/// Log to a file in the data directory; the UI owns the terminal
fn init_logging(data_dir: &Path, default_filter: &str) -> anyhow::Result<()> {
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Pick the starting mode from the flags
fn startup_app(
    cli: &Cli,
    source: &dyn QuestionSource,
    rng: &mut dyn RngCore,
) -> anyhow::Result<App> {
    if let Some(kind) = &cli.group {
        if !kind.trim().eq_ignore_ascii_case("type") {
            return Err(Error::UnsupportedGroup(kind.clone()).into());
        }
        let groups = source
            .load_category_groups()
            .context("failed to load categories")?;
        tracing::info!("Browsing {} categories", groups.len());
        return Ok(App::browse(groups));
    }

    let questions = source
        .load_questions(cli.category_filter())
        .context("failed to load questions")?;
    if questions.is_empty() {
        return Err(Error::NoQuestions.into());
    }
    tracing::info!("Reviewing {} questions", questions.len());
    Ok(App::review(questions, rng))
}
