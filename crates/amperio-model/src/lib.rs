//! Neural amp model runtime.
//!
//! Loads keras-style JSON amp captures (single recurrent layer followed
//! by a `Dense(1)` head) and runs sample-by-sample inference. Models
//! come in two flavours:
//!
//! - **Snapshot** models take one input: the dry sample. Their input
//!   size is 1.
//! - **Conditioned** models take one or two extra inputs (typically
//!   gain/tone knobs baked into the capture). Their input size is 2
//!   or 3, and the extra inputs are fed from the engine's `PARAM1`/
//!   `PARAM2` control ports.
//!
//! The loaded input size is what the engine reports through its
//! `ModelInSize` port, which in turn drives which parameter controls
//! the GUI shows.
//!
//! # Example
//!
//! ```rust,no_run
//! use amperio_model::Network;
//!
//! let mut network = Network::load("model.json")?;
//! println!("inputs: {}", network.info().input_size);
//! let out = network.forward(&[0.1]);
//! # Ok::<(), amperio_model::ModelError>(())
//! ```

mod dense;
mod error;
mod gru;
mod lstm;
mod network;
mod schema;

pub use dense::{Activation, Dense};
pub use error::ModelError;
pub use gru::Gru;
pub use lstm::Lstm;
pub use network::{Network, Recurrent, WARM_UP_SAMPLES};
pub use schema::{LayerDef, LayerKind, ModelFile, ModelInfo};
