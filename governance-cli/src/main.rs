mod command;
mod console;
mod error;
mod paths;
mod seed;

use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::Write;

use governance_lib::dto::ParentDto;
use governance_lib::paging::Pager;
use governance_lib::paging::PagingConfig;
use governance_lib::paging::QueryingSource;
use governance_lib::session::MemoryBackend;
use governance_lib::session::SessionStore;
use governance_lib::session::SqliteBackend;
use log::error;
use log::info;
use log::warn;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::command::Command;
use crate::console::Console;
use crate::console::Flow;
use crate::error::ConsoleError;
use crate::seed::Identity;

/// Overrides the identity list page size.
const PAGE_SIZE_VAR: &str = "GOVERNANCE_PAGE_SIZE";

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("Console failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

fn page_size(config: &PagingConfig) -> usize {
    let requested = match std::env::var(PAGE_SIZE_VAR) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}, not a number", PAGE_SIZE_VAR, value);
            0
        }),
        Err(_) => 0,
    };
    config.result_limit(requested)
}

fn open_session() -> SessionStore {
    let Some(path) = paths::session_db() else {
        warn!("No data directory, session state will not persist");
        return SessionStore::new(MemoryBackend::new());
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match SqliteBackend::open(&path) {
        Ok(backend) => {
            info!("Session database at {}", path.display());
            SessionStore::new(backend)
        }
        Err(e) => {
            warn!("Could not open {}: {}, using memory", path.display(), e);
            SessionStore::new(MemoryBackend::new())
        }
    }
}

fn run() -> Result<(), ConsoleError> {
    let config = PagingConfig::new();
    let source = QueryingSource::new(seed::identities()?, seed::identity_query(), Identity::from_row)?;
    let pager = Pager::new(page_size(&config), source)?;
    let bands = ParentDto::with_children(seed::score_bands());

    let mut console = Console::new(pager, bands, open_session(), config);
    if let Err(e) = console.restore() {
        warn!("Discarding saved list position: {}", e);
        console.execute(Command::Reset, &mut std::io::sink())?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Type `help` for commands.")?;
    console.print_page(&mut out)?;
    writeln!(out, "Score bands: {}", console.bands().child_summary())?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let result = line
            .parse::<Command>()
            .and_then(|command| console.execute(command, &mut out));
        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    console.save()?;
    info!("Saved identity list at offset {}", console.pager().offset());
    Ok(())
}
