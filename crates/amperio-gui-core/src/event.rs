//! Host event decoding.
//!
//! The host delivers GUI events as loosely-shaped JSON objects and
//! discriminates them with string fields. Decoding happens exactly once
//! at the boundary, turning the object into a tagged [`GuiEvent`];
//! everything downstream matches on the enum instead of re-comparing
//! strings.

use serde::Deserialize;
use serde_json::Value;

/// `type` tag of the widget-initialization event.
pub const START_EVENT_TYPE: &str = "start";

/// A decoded host GUI event.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// Widget initialization: the host sends the current value of every
    /// port so the GUI can render its initial state.
    Start {
        /// Snapshot of all ports, in host order.
        ports: Vec<PortState>,
    },
    /// A single port changed while the GUI is live.
    ParamChanged {
        /// Symbol of the changed port.
        symbol: String,
        /// New value.
        value: ControlValue,
    },
}

/// One entry of the `start` event's port list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortState {
    /// Stable symbolic name of the port.
    pub symbol: String,
    /// Current value.
    pub value: ControlValue,
}

/// A port value as delivered by the host: numeric or stringly.
///
/// Hosts are inconsistent about whether port values arrive as JSON
/// numbers or as strings, so both are accepted and integer conversion
/// is deferred to [`ControlValue::as_int`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    /// Numeric value.
    Number(f64),
    /// String value, possibly numeric text.
    Text(String),
}

impl ControlValue {
    /// Interpret the value as an integer, truncating any fraction.
    ///
    /// Non-numeric text and non-finite numbers yield `None`; callers
    /// treat that as "no action", so malformed values never surface as
    /// errors.
    pub fn as_int(&self) -> Option<i64> {
        let number = match self {
            ControlValue::Number(n) => *n,
            ControlValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        number.is_finite().then(|| number.trunc() as i64)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(ControlValue::Number),
            Value::String(s) => Some(ControlValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl GuiEvent {
    /// Decode a raw host event object.
    ///
    /// Returns `None` for objects matching neither known shape; the
    /// caller simply ignores such events.
    pub fn from_json(event: &Value) -> Option<Self> {
        let obj = event.as_object()?;

        if obj.get("type").and_then(Value::as_str) == Some(START_EVENT_TYPE) {
            let ports = obj
                .get("ports")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|entry| {
                            let port = entry.as_object()?;
                            Some(PortState {
                                symbol: port.get("symbol")?.as_str()?.to_string(),
                                value: ControlValue::from_json(port.get("value")?)?,
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            return Some(GuiEvent::Start { ports });
        }

        let symbol = obj.get("symbol")?.as_str()?.to_string();
        let value = ControlValue::from_json(obj.get("value")?)?;
        Some(GuiEvent::ParamChanged { symbol, value })
    }
}
