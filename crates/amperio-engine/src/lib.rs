//! Amperio Engine - neural amp processing around a loaded capture.
//!
//! Ties the pieces together for a host: the control-port table
//! ([`ports`]), the real-time [`Processor`] (inference, smoothing, DC
//! blocking, master ramp), the worker-thread [`ModelLoader`], and the
//! [`Engine`] facade with symbol-addressed controls and session
//! persistence.
//!
//! # Example
//!
//! ```rust,no_run
//! use amperio_engine::Engine;
//!
//! let mut engine = Engine::new(48000.0);
//! engine.load_model_blocking("capture.json")?;
//! engine.set_control("MASTER", -6.0);
//!
//! let mut block = vec![0.0f32; 512];
//! engine.process_block(&mut block);
//! # Ok::<(), amperio_model::ModelError>(())
//! ```

pub mod engine;
pub mod loader;
pub mod ports;
pub mod processor;

pub use engine::{Engine, SessionState};
pub use loader::{LoadOutcome, ModelLoader};
pub use processor::Processor;
