use std::{error::Error, io, path::PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use tempotype::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    engine::SessionEngine,
    logging,
    paragraph::{build_source, SourceKind},
    runtime::{CrosstermEventSource, Runner, SystemClock},
    ui::ui,
};

/// typing speed trainer where every finished word buys or costs you time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed trainer. Each correctly typed word adds seconds to the clock and each wrong word takes seconds away; the run ends when the paragraph is typed exactly or the time runs out."
)]
pub struct Cli {
    /// base time budget in seconds
    #[clap(short = 'd', long)]
    duration: Option<u32>,

    /// seconds added for each correct word
    #[clap(short = 'b', long)]
    bonus: Option<u32>,

    /// seconds taken away for each wrong word
    #[clap(short = 'P', long)]
    penalty: Option<u32>,

    /// custom paragraph to type
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// where paragraphs come from
    #[clap(short = 's', long, value_enum)]
    source: Option<SourceKind>,

    /// number of sentences per generated paragraph
    #[clap(short = 'n', long)]
    sentences: Option<usize>,

    /// write logs to this file (TEMPOTYPE_LOG sets the filter)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// read and write settings at this path instead of the user config dir
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line override the stored config.
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(d) = self.duration {
            cfg.base_duration_secs = d;
        }
        if let Some(b) = self.bonus {
            cfg.word_bonus_secs = b;
        }
        if let Some(p) = self.penalty {
            cfg.word_penalty_secs = p;
        }
        if let Some(s) = self.source {
            cfg.source = s;
        }
        if let Some(n) = self.sentences {
            cfg.sentences = n;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = match logging::resolve_log_path(cli.log_file.clone()) {
        Some(path) => Some(logging::init(&path)?),
        None => None,
    };

    let store = cli.config_store();
    let config = cli.apply_to(store.load());
    if let Err(err) = config.validate() {
        Cli::command().error(ErrorKind::InvalidValue, err).exit();
    }
    if cli.save_config {
        store.save(&config)?;
        tracing::info!(target: "config", path = %store.path().display(), "saved config");
    }

    let source = match build_source(config.source, config.sentences, cli.prompt.clone()) {
        Ok(source) => source,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };

    if !io::stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let engine = SessionEngine::new(config.session_config(), source);
    let mut app = App::new(engine, Box::new(SystemClock), config.tick_interval());
    tracing::info!(target: "app", ?config, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit() {
        let Some(event) = runner.step(app.next_tick_due()) else {
            break;
        };
        app.handle_event(event);
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}
