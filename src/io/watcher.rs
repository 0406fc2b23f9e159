use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// One or more plan blobs changed on disk.
    Changed(Vec<PathBuf>),
}

/// A file system watcher for the dayplan/ directory, so the TUI picks up
/// edits made by a concurrent `dp` invocation.
pub struct PlanWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl PlanWatcher {
    /// Start watching the given plan directory.
    /// `poll()` should be called each tick of the event loop.
    pub fn start(plan_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let plan_dir_owned = plan_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant: Vec<PathBuf> = event
                    .paths
                    .into_iter()
                    .filter(|p| {
                        if !p.starts_with(&plan_dir_owned) {
                            return false;
                        }
                        // Our own bookkeeping files are not plan state
                        if let Some(name) = p.file_name().and_then(|n| n.to_str())
                            && (name == ".lock"
                                || name == ".state.json"
                                || name == super::recovery::RECOVERY_LOG)
                        {
                            return false;
                        }
                        matches!(
                            p.extension().and_then(|e| e.to_str()),
                            Some("json") | Some("toml")
                        )
                    })
                    .collect();

                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(plan_dir, RecursiveMode::NonRecursive)?;
        Ok(PlanWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
