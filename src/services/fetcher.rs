//! Background dataset fetching
//!
//! Each fetch reads a dataset file on its own thread and reports back over
//! a channel, so the UI loop keeps drawing while records load.

use super::dataset::load_rows;
use crate::model::navigation::Module;
use crate::table::Row;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

/// Result of one finished fetch
#[derive(Debug)]
pub struct FetchResult {
    pub module: Module,
    pub rows: Result<Vec<Row>, String>,
    pub elapsed_ms: u128,
}

/// An in-flight fetch
struct FetchJob {
    module: Module,
    receiver: Receiver<Result<Vec<Row>, String>>,
    start_instant: Instant,
}

/// Runs dataset loads off the UI thread
#[derive(Default)]
pub struct DatasetFetcher {
    jobs: Vec<FetchJob>,
}

impl DatasetFetcher {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Start loading `path` for `module`. A fetch already running for the
    /// same module is superseded.
    pub fn spawn(&mut self, module: Module, path: PathBuf) {
        self.jobs.retain(|job| job.module != module);

        let (tx, rx) = mpsc::channel();
        log::info!("fetching {} from {}", module, path.display());

        thread::spawn(move || {
            let result = load_rows(&path).map_err(|e| format!("{:#}", e));
            let _ = tx.send(result);
        });

        self.jobs.push(FetchJob {
            module,
            receiver: rx,
            start_instant: Instant::now(),
        });
    }

    /// Whether a fetch for `module` is still running
    pub fn is_fetching(&self, module: Module) -> bool {
        self.jobs.iter().any(|job| job.module == module)
    }

    /// Collect every fetch that has finished since the last poll
    pub fn poll(&mut self) -> Vec<FetchResult> {
        let mut finished = Vec::new();

        self.jobs.retain(|job| {
            let rows = match job.receiver.try_recv() {
                Ok(rows) => rows,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    Err("loader thread stopped unexpectedly".to_string())
                }
            };

            finished.push(FetchResult {
                module: job.module,
                rows,
                elapsed_ms: job.start_instant.elapsed().as_millis(),
            });
            false
        });

        finished
    }
}
