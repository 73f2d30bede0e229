//! The model-size GUI callback.
//!
//! Watches the engine-reported `ModelInSize` port and keeps the
//! conditioning-parameter controls' visibility in sync with the loaded
//! model, both at widget initialization (the `start` snapshot) and on
//! live changes.

use crate::event::{ControlValue, GuiEvent};
use crate::surface::ControlSurface;
use crate::visibility::VisibilityMap;
use serde_json::Value;

/// Symbol of the port reporting the loaded model's input size.
pub const MODEL_IN_SIZE: &str = "ModelInSize";

/// GUI callback state: one watched port symbol and the visibility table
/// applied when it changes.
///
/// The panel is stateless across invocations beyond this configuration;
/// every call derives its effect entirely from the event it is handed.
///
/// # Example
///
/// ```rust
/// use amperio_gui_core::{ModelSizePanel, NullSurface, VisibilityMap};
/// use serde_json::json;
///
/// let panel = ModelSizePanel::new(VisibilityMap::conditioned(
///     "conditioned-param-1",
///     "conditioned-param-2",
/// ));
/// let mut surface = NullSurface;
/// panel.handle_json(&json!({ "symbol": "ModelInSize", "value": "2" }), &mut surface);
/// ```
#[derive(Debug, Clone)]
pub struct ModelSizePanel {
    symbol: String,
    map: VisibilityMap,
}

impl ModelSizePanel {
    /// Create a panel watching [`MODEL_IN_SIZE`].
    pub fn new(map: VisibilityMap) -> Self {
        Self::with_symbol(MODEL_IN_SIZE, map)
    }

    /// Create a panel watching a custom port symbol.
    pub fn with_symbol(symbol: impl Into<String>, map: VisibilityMap) -> Self {
        Self {
            symbol: symbol.into(),
            map,
        }
    }

    /// Symbol the panel reacts to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The configured visibility table.
    pub fn visibility(&self) -> &VisibilityMap {
        &self.map
    }

    /// React to a decoded event.
    ///
    /// - `Start`: the first port whose symbol matches is applied; later
    ///   ports are not examined (symbols are unique keys).
    /// - `ParamChanged` on the watched symbol: applied directly.
    /// - Anything else: no action.
    pub fn handle(&self, event: &GuiEvent, surface: &mut dyn ControlSurface) {
        match event {
            GuiEvent::Start { ports } => {
                if let Some(port) = ports.iter().find(|p| p.symbol == self.symbol) {
                    self.apply(&port.value, surface);
                }
            }
            GuiEvent::ParamChanged { symbol, value } if *symbol == self.symbol => {
                self.apply(value, surface);
            }
            GuiEvent::ParamChanged { .. } => {}
        }
    }

    /// Decode a raw host event and react to it.
    ///
    /// Undecodable events are ignored; nothing is reported back to the
    /// host.
    pub fn handle_json(&self, event: &Value, surface: &mut dyn ControlSurface) {
        if let Some(event) = GuiEvent::from_json(event) {
            self.handle(&event, surface);
        }
    }

    fn apply(&self, value: &ControlValue, surface: &mut dyn ControlSurface) {
        if let Some(size) = value.as_int() {
            self.map.apply(size, surface);
        }
    }
}
