//! Host-facing GUI control logic for amperio.
//!
//! The plugin's control surface is rendered by the host (a web-style
//! widget tree the host owns); this crate holds the logic the host's
//! GUI callback delegates to. It does not draw anything — the host
//! exposes show/hide operations through the [`ControlSurface`] trait
//! and delivers events as JSON.
//!
//! # Flow
//!
//! 1. The host invokes the GUI callback with an event object: either
//!    the initial `start` event carrying a snapshot of every port, or a
//!    live single-port change.
//! 2. The event is decoded once at the boundary into a [`GuiEvent`].
//! 3. [`ModelSizePanel`] watches the `ModelInSize` port and applies a
//!    [`VisibilityMap`] — a configuration table mapping the reported
//!    model input size to the set of controls that should be visible
//!    (conditioned captures expose one or two extra knobs; snapshot
//!    captures expose none).
//!
//! Malformed events, unknown symbols, non-numeric values, and sizes
//! without a configured rule are all silent no-ops: nothing ever
//! propagates back to the host.

pub mod event;
pub mod panel;
pub mod surface;
pub mod visibility;

pub use event::{ControlValue, GuiEvent, PortState};
pub use panel::{MODEL_IN_SIZE, ModelSizePanel};
pub use surface::{ControlSurface, NullSurface};
pub use visibility::{VisibilityError, VisibilityMap};
