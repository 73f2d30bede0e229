//! Background model loading.
//!
//! Parsing and warming up a model takes far too long for the audio
//! thread, so load requests are handed to a dedicated worker thread and
//! the result is collected later with [`ModelLoader::poll`]. The
//! loading gate goes up per request and comes down only when the
//! request's outcome is collected, so the engine keeps passing the dry
//! signal until the new network is actually installed.

use amperio_model::{ModelError, Network};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::JoinHandle;
use tracing::debug;

/// Result of one load request.
pub struct LoadOutcome {
    /// Path the request named.
    pub path: PathBuf,
    /// Loaded model, or why loading failed.
    pub result: Result<Network, ModelError>,
}

/// Worker-thread model loader.
///
/// Requests are processed in order; each produces exactly one
/// [`LoadOutcome`]. The worker exits when the loader is dropped.
pub struct ModelLoader {
    requests: Option<Sender<PathBuf>>,
    outcomes: Receiver<LoadOutcome>,
    pending: Arc<AtomicUsize>,
    worker: Option<JoinHandle<()>>,
}

impl ModelLoader {
    /// Spawn the worker thread.
    pub fn new() -> Self {
        let (requests, request_rx) = channel::<PathBuf>();
        let (outcome_tx, outcomes) = channel::<LoadOutcome>();

        let worker = std::thread::spawn(move || {
            for path in request_rx {
                debug!(path = %path.display(), "loading model");
                let result = Network::load(&path).map(|mut net| {
                    net.warm_up();
                    net
                });
                if outcome_tx.send(LoadOutcome { path, result }).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(requests),
            outcomes,
            pending: Arc::new(AtomicUsize::new(0)),
            worker: Some(worker),
        }
    }

    /// Queue a load. Returns `false` if the worker is gone.
    pub fn request(&self, path: PathBuf) -> bool {
        self.pending.fetch_add(1, Ordering::AcqRel);
        let accepted = self
            .requests
            .as_ref()
            .is_some_and(|tx| tx.send(path).is_ok());
        if !accepted {
            self.pending.fetch_sub(1, Ordering::AcqRel);
        }
        accepted
    }

    /// Whether any request has not yet had its outcome collected.
    ///
    /// The gate counts per request and comes down in [`ModelLoader::poll`]
    /// / [`ModelLoader::wait`], not when the worker finishes, so it holds
    /// until the caller has had the chance to install the result.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::Acquire) > 0
    }

    /// Collect a finished load, if any. Never blocks.
    pub fn poll(&self) -> Option<LoadOutcome> {
        match self.outcomes.try_recv() {
            Ok(outcome) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                Some(outcome)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next outcome arrives.
    ///
    /// Returns `None` if the worker has exited.
    pub fn wait(&self) -> Option<LoadOutcome> {
        let outcome = self.outcomes.recv().ok()?;
        self.pending.fetch_sub(1, Ordering::AcqRel);
        Some(outcome)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModelLoader {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        drop(self.requests.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT_MODEL: &str = r#"{
        "in_shape": [null, 1, 1],
        "in_skip": 1,
        "layers": [
            { "type": "lstm", "shape": [null, 1, 2],
              "weights": [
                  [[0,0,0,0,0,0,0,0]],
                  [[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]],
                  [0,0,0,0,0,0,0,0]
              ] },
            { "type": "dense", "shape": [null, 1, 1],
              "weights": [[[1],[1]], [0]] }
        ]
    }"#;

    #[test]
    fn loads_a_model_off_thread() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_MODEL.as_bytes()).unwrap();

        let loader = ModelLoader::new();
        assert!(loader.request(file.path().to_path_buf()));

        let outcome = loader.wait().expect("worker should answer");
        assert_eq!(outcome.path, file.path());
        let net = outcome.result.unwrap();
        assert_eq!(net.info().input_size, 1);
        assert!(!loader.is_loading());
    }

    #[test]
    fn missing_file_reports_an_error() {
        let loader = ModelLoader::new();
        assert!(loader.request(PathBuf::from("/nonexistent/amp.json")));

        let outcome = loader.wait().expect("worker should answer");
        assert!(matches!(outcome.result, Err(ModelError::ReadFile { .. })));
        assert!(!loader.is_loading());
    }

    #[test]
    fn requests_are_answered_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_MODEL.as_bytes()).unwrap();

        let loader = ModelLoader::new();
        loader.request(PathBuf::from("/nonexistent/first.json"));
        loader.request(file.path().to_path_buf());

        let first = loader.wait().unwrap();
        assert!(first.result.is_err());
        // One outcome down, one still outstanding: the gate stays up.
        assert!(loader.is_loading());
        let second = loader.wait().unwrap();
        assert!(second.result.is_ok());
        assert!(!loader.is_loading());
    }

    #[test]
    fn gate_holds_until_the_outcome_is_collected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_MODEL.as_bytes()).unwrap();

        let loader = ModelLoader::new();
        loader.request(file.path().to_path_buf());
        // Regardless of how fast the worker finishes, the gate only
        // drops when the outcome is taken.
        assert!(loader.is_loading());
        loader.wait().unwrap();
        assert!(!loader.is_loading());
    }

    #[test]
    fn poll_is_non_blocking() {
        let loader = ModelLoader::new();
        assert!(loader.poll().is_none());
    }
}
