//! Loaded model: recurrent layer plus dense head.

use crate::dense::Dense;
use crate::error::ModelError;
use crate::gru::Gru;
use crate::lstm::Lstm;
use crate::schema::{LayerKind, ModelFile, ModelInfo, as_matrix, as_vector};
use std::path::Path;
use tracing::info;

/// Samples of silence fed through a freshly loaded model so the
/// recurrent state settles before real audio arrives (avoids a click on
/// the first block).
pub const WARM_UP_SAMPLES: usize = 2048;

/// The recurrent layer of a loaded model.
#[derive(Debug, Clone)]
pub enum Recurrent {
    /// LSTM cell.
    Lstm(Lstm),
    /// GRU cell.
    Gru(Gru),
}

impl Recurrent {
    fn step(&mut self, x: &[f32]) -> &[f32] {
        match self {
            Recurrent::Lstm(cell) => cell.step(x),
            Recurrent::Gru(cell) => cell.step(x),
        }
    }

    fn reset(&mut self) {
        match self {
            Recurrent::Lstm(cell) => cell.reset(),
            Recurrent::Gru(cell) => cell.reset(),
        }
    }
}

/// An executable amp model.
///
/// Owns the recurrent cell and the dense head, plus the metadata the
/// engine reports to hosts. `forward` consumes one sample (and up to two
/// conditioning values) and produces one sample; the dry input is summed
/// in when the capture was trained with `in_skip`.
#[derive(Debug, Clone)]
pub struct Network {
    recurrent: Recurrent,
    head: Dense,
    info: ModelInfo,
}

impl Network {
    /// Load a model from a JSON file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).map_err(|source| ModelError::read_file(path, source))?;
        let network = Self::from_slice(&bytes)?;
        info!(
            path = %path.display(),
            input_size = network.info.input_size,
            hidden_size = network.info.hidden_size,
            kind = %network.info.kind,
            "loaded model"
        );
        Ok(network)
    }

    /// Build a model from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Self::from_model_file(&ModelFile::from_slice(bytes)?)
    }

    /// Build a model from a parsed document.
    pub fn from_model_file(file: &ModelFile) -> Result<Self, ModelError> {
        let input_size = file.input_size()?;
        let input_skip = file.input_skip()?;
        let (layer, kind) = file.recurrent_layer()?;
        let hidden_size = layer.width()?;

        if layer.weights.len() != 3 {
            return Err(ModelError::bad_weights(
                kind.tag(),
                format!("expected 3 weight arrays, got {}", layer.weights.len()),
            ));
        }
        let w = as_matrix(&layer.weights[0], kind.tag())?;
        let u = as_matrix(&layer.weights[1], kind.tag())?;
        let recurrent = match kind {
            LayerKind::Lstm => {
                let b = as_vector(&layer.weights[2], "lstm")?;
                Recurrent::Lstm(Lstm::new(input_size, hidden_size, &w, &u, &b)?)
            }
            LayerKind::Gru => {
                let b = as_matrix(&layer.weights[2], "gru")?;
                Recurrent::Gru(Gru::new(input_size, hidden_size, &w, &u, &b)?)
            }
        };

        let dense = file.dense_layer()?;
        if dense.weights.len() != 2 {
            return Err(ModelError::bad_weights(
                "dense",
                format!("expected 2 weight arrays, got {}", dense.weights.len()),
            ));
        }
        let dw = as_matrix(&dense.weights[0], "dense")?;
        let db = as_vector(&dense.weights[1], "dense")?;
        let activation = Dense::parse_activation(dense.activation.as_deref())?;
        let head = Dense::new(hidden_size, &dw, &db, activation)?;

        Ok(Self {
            recurrent,
            head,
            info: ModelInfo {
                input_size,
                hidden_size,
                kind,
                input_skip,
            },
        })
    }

    /// Metadata extracted at load time.
    pub fn info(&self) -> ModelInfo {
        self.info
    }

    /// Run one sample through the model.
    ///
    /// `input[0]` is the dry sample; `input[1..]` are conditioning
    /// values for input sizes 2 and 3. The dry sample is summed into
    /// the output when the capture uses `in_skip`.
    #[inline]
    pub fn forward(&mut self, input: &[f32]) -> f32 {
        debug_assert_eq!(input.len(), self.info.input_size);
        let h = self.recurrent.step(input);
        let out = self.head.forward(h);
        if self.info.input_skip {
            out + input[0]
        } else {
            out
        }
    }

    /// Zero the recurrent state.
    pub fn reset(&mut self) {
        self.recurrent.reset();
    }

    /// Reset, then run [`WARM_UP_SAMPLES`] of silence through the model.
    pub fn warm_up(&mut self) {
        self.reset();
        let zeros = [0.0f32; 3];
        let input = &zeros[..self.info.input_size];
        for _ in 0..WARM_UP_SAMPLES {
            self.forward(input);
        }
        self.reset();
    }
}
