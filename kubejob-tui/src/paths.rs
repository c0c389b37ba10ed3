//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "kubejob";
const APPLICATION: &str = "kubejob";

/// Name of the log file written by the running process.
pub const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for persistent data (the settings database).
///
/// - Linux: `$XDG_DATA_HOME/kubejob` or `~/.local/share/kubejob`
/// - macOS: `~/Library/Application Support/dev.kubejob.kubejob`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/kubejob` or `~/.cache/kubejob`
/// - macOS: `~/Library/Caches/dev.kubejob.kubejob`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives `latest.log` under a timestamped name and prunes old logs.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

pub(crate) fn rotate_logs_in(cache: &Path) {
    let latest = cache.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{}.log", timestamp));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(cache);
}

/// Removes the oldest archived logs beyond [`MAX_OLD_LOGS`].
fn cleanup_old_logs(cache: &Path) {
    let Ok(entries) = fs::read_dir(cache) else {
        return;
    };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; ties broken by name, which embeds the timestamp.
    logs.sort_by_key(|e| (e.metadata().and_then(|m| m.modified()).ok(), e.file_name()));

    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kubejob-paths-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = scratch_dir("rotate");
        fs::write(dir.join(LATEST_LOG), "previous run").unwrap();

        rotate_logs_in(&dir);

        assert!(!dir.join(LATEST_LOG).exists());
        let archived: Vec<_> = fs::read_dir(&dir).unwrap().filter_map(|e| e.ok()).collect();
        assert_eq!(archived.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = scratch_dir("cleanup");
        for i in 0..(MAX_OLD_LOGS + 3) {
            fs::write(dir.join(format!("20240101_0000{:02}.log", i)), "").unwrap();
        }
        fs::write(dir.join("notes.txt"), "").unwrap();

        cleanup_old_logs(&dir);

        let logs = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".log"))
            .count();
        assert_eq!(logs, MAX_OLD_LOGS);
        assert!(dir.join("notes.txt").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
