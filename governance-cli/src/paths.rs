//! Where the console keeps its session database and logs.
//!
//! Follows XDG on Linux and the usual per-user locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "governance";
const APPLICATION: &str = "governance-cli";

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides `latest.log`.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for data that must survive restarts.
///
/// - Linux: `$XDG_DATA_HOME/governance-cli` or `~/.local/share/governance-cli`
/// - macOS: `~/Library/Application Support/org.governance.governance-cli`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for logs and other throwaway files.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// SQLite file holding saved view state.
pub fn session_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous `latest.log` under a timestamped name and prunes
/// old archives. Call before opening the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join(LATEST_LOG);

    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, cache.join(format!("{}.log", stamp)));
    }

    prune_logs(&cache, MAX_OLD_LOGS);
}

fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // oldest first
    archived.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    let excess = archived.len().saturating_sub(keep);
    for entry in archived.iter().take(excess) {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_keeps_latest_and_newest() {
        let dir = std::env::temp_dir().join(format!("governance-cli-prune-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["a.log", "b.log", "c.log", LATEST_LOG, "notes.txt"] {
            fs::write(dir.join(name), name).unwrap();
        }

        prune_logs(&dir, 1);

        let mut left: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left.len(), 3);
        assert!(left.contains(&LATEST_LOG.to_string()));
        assert!(left.contains(&"notes.txt".to_string()));

        fs::remove_dir_all(&dir).unwrap();
    }
}
