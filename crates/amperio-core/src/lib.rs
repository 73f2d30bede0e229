//! Amperio Core - DSP primitives for the amperio neural amp engine
//!
//! Foundational building blocks shared by the engine and the offline
//! tools, designed for real-time processing with zero allocation in the
//! audio path.
//!
//! # Contents
//!
//! - [`ExpSmoother`] / [`LinearSmoother`] - zipper-free control changes
//! - [`GainRamp`] - per-block linear gain ramp for master volume
//! - [`DcBlocker`] - first-order highpass removing the DC offset that
//!   recurrent amp models tend to introduce
//! - [`PortDescriptor`] - control-port metadata with stable unique symbols
//! - dB conversion helpers: [`db_to_linear`], [`linear_to_db`]
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! amperio-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod db;
pub mod dc_blocker;
pub mod gain_ramp;
pub mod port;
pub mod smooth;

pub use db::{db_to_linear, linear_to_db};
pub use dc_blocker::DcBlocker;
pub use gain_ramp::GainRamp;
pub use port::{PortDescriptor, find_port};
pub use smooth::{ExpSmoother, LinearSmoother};
