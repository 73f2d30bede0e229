//! On-disk model format.
//!
//! Amp captures are keras-style JSON documents:
//!
//! ```json
//! {
//!   "in_shape": [null, 1, 1],
//!   "in_skip": 1,
//!   "layers": [
//!     { "type": "lstm", "shape": [null, 1, 12], "weights": [W, U, b] },
//!     { "type": "dense", "shape": [null, 1, 1], "activation": "",
//!       "weights": [W, b] }
//!   ]
//! }
//! ```
//!
//! The trailing `in_shape` dimension is the model's input size: 1 for a
//! snapshot capture, 2 or 3 for a conditioned one. `in_skip` of 1 means
//! the capture was trained with the dry input added to the output.

use crate::error::ModelError;
use serde::Deserialize;

/// Raw deserialized model document.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    /// Input tensor shape; the last concrete dimension is the input size.
    pub in_shape: Vec<Option<i64>>,
    /// Whether the dry input is summed into the output (0 or 1).
    #[serde(default)]
    pub in_skip: Option<i64>,
    /// Layer stack, outermost first.
    pub layers: Vec<LayerDef>,
}

/// One layer of the model document.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDef {
    /// Layer type tag (`"lstm"`, `"gru"`, `"dense"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Output tensor shape; the last concrete dimension is the width.
    pub shape: Vec<Option<i64>>,
    /// Optional activation name; empty means linear.
    #[serde(default)]
    pub activation: Option<String>,
    /// Weight arrays, layout depending on the layer type.
    pub weights: Vec<serde_json::Value>,
}

/// Kind of the recurrent layer driving the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Long short-term memory cell.
    Lstm,
    /// Gated recurrent unit (keras `reset_after` layout).
    Gru,
}

impl LayerKind {
    /// Lowercase tag as used in model files.
    pub const fn tag(self) -> &'static str {
        match self {
            LayerKind::Lstm => "lstm",
            LayerKind::Gru => "gru",
        }
    }
}

impl core::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Metadata extracted from a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    /// Number of model inputs: 1 snapshot, 2 or 3 conditioned.
    pub input_size: usize,
    /// Hidden width of the recurrent layer.
    pub hidden_size: usize,
    /// Recurrent layer kind.
    pub kind: LayerKind,
    /// Whether the dry input is summed into the output.
    pub input_skip: bool,
}

impl ModelFile {
    /// Parse a model document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Input size: the last concrete dimension of `in_shape`.
    pub fn input_size(&self) -> Result<usize, ModelError> {
        let last = self
            .in_shape
            .iter()
            .rev()
            .find_map(|d| *d)
            .ok_or(ModelError::MissingInputShape)?;
        if (1..=3).contains(&last) {
            Ok(last as usize)
        } else {
            Err(ModelError::UnsupportedInputSize(last))
        }
    }

    /// Input-skip flag, validated to 0 or 1.
    pub fn input_skip(&self) -> Result<bool, ModelError> {
        match self.in_skip {
            None | Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(other) => Err(ModelError::UnsupportedInputSkip(other)),
        }
    }

    /// The recurrent layer of the stack.
    ///
    /// The dense head is the final array entry, so the recurrent layer
    /// is located by its type tag rather than by position.
    pub fn recurrent_layer(&self) -> Result<(&LayerDef, LayerKind), ModelError> {
        for layer in &self.layers {
            match layer.kind.as_str() {
                "lstm" => return Ok((layer, LayerKind::Lstm)),
                "gru" => return Ok((layer, LayerKind::Gru)),
                _ => {}
            }
        }
        Err(ModelError::NoRecurrentLayer)
    }

    /// The dense head of the stack.
    pub fn dense_layer(&self) -> Result<&LayerDef, ModelError> {
        self.layers
            .iter()
            .rev()
            .find(|l| l.kind == "dense")
            .ok_or_else(|| ModelError::UnsupportedLayer("missing dense head".to_string()))
    }
}

impl LayerDef {
    /// Layer width: the last concrete dimension of `shape`.
    pub fn width(&self) -> Result<usize, ModelError> {
        self.shape
            .iter()
            .rev()
            .find_map(|d| *d)
            .filter(|&d| d > 0)
            .map(|d| d as usize)
            .ok_or(ModelError::MissingInputShape)
    }
}

/// Interpret a weight entry as a 2-D matrix of f32.
pub(crate) fn as_matrix(
    value: &serde_json::Value,
    layer: &'static str,
) -> Result<Vec<Vec<f32>>, ModelError> {
    let rows = value
        .as_array()
        .ok_or_else(|| ModelError::bad_weights(layer, "expected a matrix"))?;
    rows.iter()
        .map(|row| as_vector(row, layer))
        .collect::<Result<Vec<_>, _>>()
}

/// Interpret a weight entry as a 1-D vector of f32.
pub(crate) fn as_vector(
    value: &serde_json::Value,
    layer: &'static str,
) -> Result<Vec<f32>, ModelError> {
    let entries = value
        .as_array()
        .ok_or_else(|| ModelError::bad_weights(layer, "expected a vector"))?;
    entries
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| ModelError::bad_weights(layer, "non-numeric weight"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(in_shape: &str, in_skip: &str) -> String {
        format!(
            r#"{{
                "in_shape": {in_shape},
                {in_skip}
                "layers": [
                    {{ "type": "lstm", "shape": [null, 1, 2], "weights": [[[0,0,0,0,0,0,0,0]], [[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]], [0,0,0,0,0,0,0,0]] }},
                    {{ "type": "dense", "shape": [null, 1, 1], "activation": "", "weights": [[[1],[1]], [0]] }}
                ]
            }}"#
        )
    }

    #[test]
    fn input_size_from_trailing_dimension() {
        let file = ModelFile::from_slice(minimal("[null, 1, 2]", "").as_bytes()).unwrap();
        assert_eq!(file.input_size().unwrap(), 2);
    }

    #[test]
    fn input_size_skips_trailing_nulls() {
        let file = ModelFile::from_slice(minimal("[null, 3, null]", "").as_bytes()).unwrap();
        assert_eq!(file.input_size().unwrap(), 3);
    }

    #[test]
    fn all_null_shape_is_an_error() {
        let file = ModelFile::from_slice(minimal("[null, null]", "").as_bytes()).unwrap();
        assert!(matches!(
            file.input_size(),
            Err(ModelError::MissingInputShape)
        ));
    }

    #[test]
    fn oversized_input_rejected() {
        let file = ModelFile::from_slice(minimal("[null, 1, 4]", "").as_bytes()).unwrap();
        assert!(matches!(
            file.input_size(),
            Err(ModelError::UnsupportedInputSize(4))
        ));
    }

    #[test]
    fn in_skip_defaults_to_off() {
        let file = ModelFile::from_slice(minimal("[null, 1, 1]", "").as_bytes()).unwrap();
        assert!(!file.input_skip().unwrap());
    }

    #[test]
    fn in_skip_one_is_on() {
        let file =
            ModelFile::from_slice(minimal("[null, 1, 1]", r#""in_skip": 1,"#).as_bytes()).unwrap();
        assert!(file.input_skip().unwrap());
    }

    #[test]
    fn in_skip_above_one_rejected() {
        let file =
            ModelFile::from_slice(minimal("[null, 1, 1]", r#""in_skip": 2,"#).as_bytes()).unwrap();
        assert!(matches!(
            file.input_skip(),
            Err(ModelError::UnsupportedInputSkip(2))
        ));
    }

    #[test]
    fn recurrent_layer_found_by_tag_not_position() {
        let file = ModelFile::from_slice(minimal("[null, 1, 1]", "").as_bytes()).unwrap();
        let (layer, kind) = file.recurrent_layer().unwrap();
        assert_eq!(kind, LayerKind::Lstm);
        assert_eq!(layer.width().unwrap(), 2);
    }

    #[test]
    fn missing_recurrent_layer_is_an_error() {
        let json = r#"{
            "in_shape": [null, 1, 1],
            "layers": [
                { "type": "dense", "shape": [null, 1, 1], "weights": [[[1]], [0]] }
            ]
        }"#;
        let file = ModelFile::from_slice(json.as_bytes()).unwrap();
        assert!(matches!(
            file.recurrent_layer(),
            Err(ModelError::NoRecurrentLayer)
        ));
    }

    #[test]
    fn matrix_and_vector_helpers_reject_garbage() {
        let bad = serde_json::json!("not numbers");
        assert!(as_matrix(&bad, "lstm").is_err());
        assert!(as_vector(&bad, "lstm").is_err());

        let mixed = serde_json::json!([1.0, "two"]);
        assert!(as_vector(&mixed, "lstm").is_err());
    }
}
