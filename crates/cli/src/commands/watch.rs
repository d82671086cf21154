//! Watch command implementation.
//!
//! Watches the metadata file and resources, and regenerates widgets when they change.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use console::style;
use miette::{Result, miette};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::commands::generate;
use crate::config::Settings;
use crate::output;

/// Minimum interval between regenerations (debounce).
const DEBOUNCE_MS: u64 = 300;

/// Executes watch mode.
pub async fn execute(
    settings: &Settings,
    config_path: Option<PathBuf>,
    clear_screen: bool,
) -> Result<()> {
    let watch_paths = collect_watch_paths(settings, config_path);
    if watch_paths.is_empty() {
        return Err(miette!(
            "Nothing to watch: {} does not exist",
            settings.metadata.display()
        ));
    }

    println!("\n{} Watching for changes...\n", style("👁").cyan());

    for path in &watch_paths {
        output::list_item(&path.display().to_string());
    }
    println!();

    // Create channel for file events
    let (tx, mut rx) = mpsc::channel::<PathBuf>(100);

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.blocking_send(path);
                }
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(200)),
    )
    .map_err(|e| miette!("Failed to create file watcher: {}", e))?;

    for path in &watch_paths {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        watcher
            .watch(path, mode)
            .map_err(|e| miette!("Failed to watch {}: {}", path.display(), e))?;
    }

    // Initial generation
    run_generation(settings).await;

    let spinner = output::create_spinner("Waiting for changes...");
    let mut last_run = Instant::now();

    while let Some(changed_path) = rx.recv().await {
        // Debounce rapid changes: wait out the window, then fold pending events into one run
        let delay = settle_delay(last_run.elapsed());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        while rx.try_recv().is_ok() {}

        spinner.finish_and_clear();

        if clear_screen {
            print!("\x1B[2J\x1B[1;1H");
        }

        println!(
            "\n{} File changed: {}\n",
            style("↻").yellow().bold(),
            style(changed_path.display()).yellow()
        );

        run_generation(settings).await;
        last_run = Instant::now();

        spinner.set_message("Waiting for changes...");
        spinner.enable_steady_tick(Duration::from_millis(100));
    }

    Ok(())
}

/// Time left in the debounce window that started at the last regeneration.
fn settle_delay(since_last_run: Duration) -> Duration {
    Duration::from_millis(DEBOUNCE_MS).saturating_sub(since_last_run)
}

/// Collects the metadata file, the resources directory and the config file, when present.
fn collect_watch_paths(settings: &Settings, config_path: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = vec![settings.metadata.clone()];
    paths.extend(settings.resources.clone());
    paths.extend(config_path);
    paths.retain(|p| p.exists());
    paths.dedup();
    paths
}

/// Runs one generation, reporting instead of propagating errors.
async fn run_generation(settings: &Settings) {
    match generate::generate(settings, false).await {
        Ok(report) => {
            output::success(&format!(
                "{} widgets generated in {}ms",
                report.written.len(),
                report.duration_ms
            ));
        }
        Err(e) => output::error(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_watch_paths() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = dir.path().join("update-center.properties");
        fs::write(&metadata, "plugins=\n").unwrap();
        let resources = dir.path().join("res");
        fs::create_dir(&resources).unwrap();

        let settings = Settings {
            metadata: metadata.clone(),
            output: dir.path().join("out"),
            resources: Some(resources.clone()),
            parallel: 0,
        };

        let paths = collect_watch_paths(&settings, Some(dir.path().join("missing.toml")));
        assert_eq!(paths, vec![metadata, resources]);
    }

    #[test]
    fn test_collect_watch_paths_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            metadata: dir.path().join("missing.properties"),
            output: dir.path().join("out"),
            resources: None,
            parallel: 0,
        };

        assert!(collect_watch_paths(&settings, None).is_empty());
    }

    #[test]
    fn test_settle_delay() {
        let window = Duration::from_millis(DEBOUNCE_MS);
        assert_eq!(settle_delay(Duration::ZERO), window);
        assert_eq!(
            settle_delay(Duration::from_millis(100)),
            window - Duration::from_millis(100)
        );
        assert_eq!(settle_delay(window), Duration::ZERO);
        assert_eq!(settle_delay(Duration::from_secs(5)), Duration::ZERO);
    }
}
