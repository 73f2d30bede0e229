//! Engine facade: controls by symbol, model lifecycle, persistence.

use crate::loader::ModelLoader;
use crate::ports::{self, BYPASS, MASTER, MODEL_IN_SIZE, PARAM1, PARAM2, PORTS};
use crate::processor::Processor;
use amperio_core::PortDescriptor;
use amperio_model::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Persistable engine state.
///
/// Parameter values travel through the host's own automation state;
/// the engine only has to remember which capture was loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Path of the loaded model file, if any.
    pub model: Option<PathBuf>,
}

/// The amp engine a host embeds: a [`Processor`] plus the model loader
/// and symbol-addressed control access.
///
/// Controls are read and written by port symbol (see [`ports`]); values
/// are clamped to the port's declared range and writes to engine-reported
/// ports are refused.
pub struct Engine {
    processor: Processor,
    loader: ModelLoader,
    model_path: Option<PathBuf>,
}

impl Engine {
    /// Create an engine with no model loaded.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            processor: Processor::new(sample_rate),
            loader: ModelLoader::new(),
            model_path: None,
        }
    }

    /// The engine's control-port table.
    pub fn ports() -> &'static [PortDescriptor] {
        PORTS
    }

    /// Write a control by symbol.
    ///
    /// The value is clamped to the port's range. Returns `false` (and
    /// changes nothing) for unknown symbols and engine-reported ports.
    pub fn set_control(&mut self, symbol: &str, value: f32) -> bool {
        let Some(port) = ports::port(symbol) else {
            warn!(symbol, "ignoring write to unknown control");
            return false;
        };
        if port.read_only {
            warn!(symbol, "ignoring write to engine-reported control");
            return false;
        }
        let value = port.clamp(value);
        match symbol {
            PARAM1 => self.processor.set_param1(value),
            PARAM2 => self.processor.set_param2(value),
            MASTER => self.processor.set_master_db(value),
            BYPASS => {
                let bypassed = value >= 0.5;
                if bypassed != self.processor.is_bypassed() {
                    info!(bypassed, "bypass changed");
                }
                self.processor.set_bypassed(bypassed);
            }
            _ => return false,
        }
        true
    }

    /// Read a control by symbol.
    pub fn control(&self, symbol: &str) -> Option<f32> {
        match symbol {
            PARAM1 => Some(self.processor.param1()),
            PARAM2 => Some(self.processor.param2()),
            MASTER => Some(self.processor.master_db()),
            BYPASS => Some(f32::from(u8::from(self.processor.is_bypassed()))),
            MODEL_IN_SIZE => Some(self.processor.model_input_size() as f32),
            _ => None,
        }
    }

    /// Input size of the loaded model; 0 when none is loaded.
    pub fn model_input_size(&self) -> i64 {
        self.processor.model_input_size()
    }

    /// Path of the loaded model, if any.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// Whether a background load is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Queue a model load on the worker thread.
    ///
    /// The engine keeps processing with the previous model (or dry
    /// passthrough) until [`Engine::pump`] picks up the outcome.
    pub fn load_model(&mut self, path: impl Into<PathBuf>) {
        self.loader.request(path.into());
    }

    /// Load a model synchronously on the calling thread.
    ///
    /// Offline tools prefer this over the worker round trip. On error
    /// the previously loaded model stays installed.
    pub fn load_model_blocking(&mut self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let mut network = amperio_model::Network::load(path)?;
        network.warm_up();
        self.processor.set_network(Some(network));
        self.model_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Remove the loaded model; the engine becomes a dry passthrough.
    pub fn unload_model(&mut self) {
        self.processor.set_network(None);
        self.model_path = None;
    }

    /// Collect finished background loads and install the result.
    ///
    /// Call this from a non-audio context (main thread tick, or between
    /// offline blocks). A failed load is logged and the previous model
    /// stays in place.
    pub fn pump(&mut self) {
        while let Some(outcome) = self.loader.poll() {
            match outcome.result {
                Ok(network) => {
                    info!(path = %outcome.path.display(), "model installed");
                    self.processor.set_network(Some(network));
                    self.model_path = Some(outcome.path);
                }
                Err(err) => {
                    warn!(path = %outcome.path.display(), error = %err, "model load failed");
                }
            }
        }
    }

    /// Process one mono block in place.
    ///
    /// While a model load is in flight the dry signal passes through
    /// untouched, as if bypassed, until [`Engine::pump`] installs the
    /// outcome.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        if self.loader.is_loading() {
            return;
        }
        self.processor.process_block(buffer);
    }

    /// Clear all processing state without touching controls or the model.
    pub fn reset(&mut self) {
        self.processor.reset();
    }

    /// Snapshot the persistable state.
    pub fn state(&self) -> SessionState {
        SessionState {
            model: self.model_path.clone(),
        }
    }

    /// Restore a saved state, reloading the model it names.
    ///
    /// The load goes through the worker thread; a vanished model file
    /// surfaces as a logged warning on the next [`Engine::pump`].
    pub fn restore(&mut self, state: &SessionState) {
        match &state.model {
            Some(path) => self.load_model(path.clone()),
            None => self.unload_model(),
        }
    }
}
