use crate::{
    diagnostics,
    language::{errors::LoadError, program::Program},
    runtime::blocks,
    translate,
};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{path::Path, sync::mpsc, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{count} structural error(s) in {path}")]
    Structural { path: String, count: usize },
    #[error("could not watch {path}: {error}")]
    Watch {
        path: String,
        #[source]
        error: notify::Error,
    },
}

/// Loads and validates one program, printing every structural error.
pub fn check_file(path: &Path) -> Result<(), CheckError> {
    let program = Program::load(path)?;
    let errors = blocks::validate(translate::normalize_program(&program).lines());
    if errors.is_empty() {
        println!("{}: no diagnostics", path.display());
        return Ok(());
    }
    diagnostics::emit_structural_errors(&program, &errors);
    Err(CheckError::Structural {
        path: path.display().to_string(),
        count: errors.len(),
    })
}

pub fn run_check(path: &Path, watch: bool) -> Result<(), CheckError> {
    let first = check_file(path);
    if !watch {
        return first;
    }
    if let Err(err) = first {
        eprintln!("{err}");
    }

    let (tx, rx) = mpsc::channel();
    let watch_error = |error| CheckError::Watch {
        path: path.display().to_string(),
        error,
    };
    let mut watcher = build_watcher(tx).map_err(watch_error)?;
    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(watch_error)?;

    println!(
        "Watching {} for changes. Press Ctrl+C to stop…",
        path.display()
    );

    for event in rx {
        match event {
            Ok(evt) => {
                if matches!(
                    evt.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) {
                    tracing::debug!(kind = ?evt.kind, "source changed");
                    if let Err(err) = check_file(path) {
                        eprintln!("{err}");
                    }
                }
            }
            Err(err) => tracing::warn!(error = %err, "watch error"),
        }
    }

    Ok(())
}

fn build_watcher(
    tx: mpsc::Sender<Result<notify::Event, notify::Error>>,
) -> notify::Result<RecommendedWatcher> {
    notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .map(|mut watcher| {
        watcher
            .configure(Config::default().with_poll_interval(Duration::from_millis(200)))
            .ok();
        watcher
    })
}
