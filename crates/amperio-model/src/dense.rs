//! Dense output head.

use crate::error::ModelError;
use crate::lstm::check_matrix;

/// Activation applied by the dense head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// No activation.
    #[default]
    Linear,
    /// Hyperbolic tangent.
    Tanh,
}

/// Single-output dense layer mapping the recurrent hidden state to one
/// sample.
///
/// Keras layout: kernel of shape `[hidden][1]`, bias of length 1.
#[derive(Debug, Clone)]
pub struct Dense {
    /// Kernel column, length `hidden`.
    w: Vec<f32>,
    b: f32,
    activation: Activation,
}

impl Dense {
    /// Build the head from keras-layout weights, validating shapes.
    pub fn new(hidden: usize, w: &[Vec<f32>], b: &[f32], activation: Activation) -> Result<Self, ModelError> {
        check_matrix("dense", "kernel", w, hidden, 1)?;
        if b.len() != 1 {
            return Err(ModelError::bad_weights(
                "dense",
                format!("bias has {} entries, expected 1", b.len()),
            ));
        }
        Ok(Self {
            w: w.iter().map(|row| row[0]).collect(),
            b: b[0],
            activation,
        })
    }

    /// Parse an activation name from a model file.
    ///
    /// Empty or missing means linear.
    pub fn parse_activation(name: Option<&str>) -> Result<Activation, ModelError> {
        match name {
            None | Some("") => Ok(Activation::Linear),
            Some("tanh") => Ok(Activation::Tanh),
            Some(other) => Err(ModelError::UnsupportedActivation(other.to_string())),
        }
    }

    /// Project the hidden state to one output sample.
    #[inline]
    pub fn forward(&self, h: &[f32]) -> f32 {
        debug_assert_eq!(h.len(), self.w.len());
        let sum = self
            .w
            .iter()
            .zip(h)
            .fold(self.b, |acc, (&w, &h)| acc + w * h);
        match self.activation {
            Activation::Linear => sum,
            Activation::Tanh => sum.tanh(),
        }
    }
}
