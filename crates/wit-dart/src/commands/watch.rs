//! Watch mode
//!
//! Regenerates whenever a `.wit` file next to the input (or under its
//! `deps/` directory) changes. Events arriving together trigger a single
//! regeneration and regenerations never overlap. Failures are reported and
//! watching continues.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::args::CliArgs;
use crate::commands::generate::generate_once;
use crate::error::CliError;

/// How long to wait for more events before regenerating
const SETTLE_TIME: Duration = Duration::from_millis(100);

/// Watch the inputs of `args` until the process is stopped.
pub async fn watch(args: &CliArgs) -> Result<(), CliError> {
    let dir = watch_dir(Path::new(&args.wit_input_path));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
        // The receiver only goes away on shutdown
        let _ = tx.send(event);
    })
    .map_err(|source| watch_error(&dir, source))?;
    watcher
        .watch(&dir, RecursiveMode::Recursive)
        .map_err(|source| watch_error(&dir, source))?;
    info!(path = %dir.display(), "Watching for changes");

    regenerate(args);
    while let Some(event) = rx.recv().await {
        let mut changed = is_wit_change(&event);
        tokio::time::sleep(SETTLE_TIME).await;
        while let Ok(event) = rx.try_recv() {
            changed |= is_wit_change(&event);
        }
        if changed {
            regenerate(args);
        }
    }
    Ok(())
}

fn regenerate(args: &CliArgs) {
    match generate_once(args) {
        Ok(file) => info!(path = %file.path, "Regenerated"),
        Err(err) => error!("{err}"),
    }
}

/// Directory containing the input file and its `deps/`
fn watch_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn watch_error(dir: &Path, source: notify::Error) -> CliError {
    CliError::Watch {
        path: dir.display().to_string(),
        source,
    }
}

/// Whether `event` created, modified or removed a `.wit` file.
pub fn is_wit_change(event: &notify::Result<Event>) -> bool {
    match event {
        Ok(event) => {
            let relevant = matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) && event
                .paths
                .iter()
                .any(|path| path.extension().is_some_and(|ext| ext == "wit"));
            if relevant {
                debug!(paths = ?event.paths, "WIT input changed");
            }
            relevant
        }
        Err(err) => {
            warn!("Watch error: {err}");
            false
        }
    }
}
