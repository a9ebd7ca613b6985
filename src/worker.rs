use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::data::loader::{self, LoadError, Source};
use crate::data::model::Dataset;
use crate::state::LoadTicket;

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// A finished load, tagged with the ticket it was started under.
#[derive(Debug)]
pub struct LoadResult {
    pub ticket: LoadTicket,
    pub source: Source,
    pub result: Result<Dataset, LoadError>,
}

/// Runs loads on background threads and hands results back to the UI thread.
///
/// Results arrive in completion order; sorting out which one still counts is
/// left to [`AppState::complete_load`](crate::state::AppState::complete_load).
pub struct LoadWorker {
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl Default for LoadWorker {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl LoadWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `source` on its own thread. `on_done` runs after the
    /// result has been queued (the UI uses it to request a repaint).
    pub fn spawn<F>(&self, ticket: LoadTicket, source: Source, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        log::debug!("Load #{} of {source} started", ticket.sequence());
        thread::spawn(move || {
            let result = loader::load(&source);
            // Receiver gone means the app is shutting down.
            let _ = tx.send(LoadResult {
                ticket,
                source,
                result,
            });
            on_done();
        });
    }

    /// Drain every result that has arrived so far without blocking.
    pub fn poll(&self) -> Vec<LoadResult> {
        self.rx.try_iter().collect()
    }

    /// Block until the next result arrives or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<LoadResult> {
        self.rx.recv_timeout(timeout).ok()
    }
}
