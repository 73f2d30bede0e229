//! Runtime-sized GRU cell with keras `reset_after` weight layout.

use crate::error::ModelError;
use crate::lstm::{check_matrix, sigmoid};

/// GRU cell.
///
/// Weights follow the keras `reset_after` layout: kernel `W` of shape
/// `[input_size][3 * hidden]`, recurrent kernel `U` of shape
/// `[hidden][3 * hidden]`, and two bias rows of length `3 * hidden`
/// (input bias and recurrent bias). The three gate blocks are ordered
/// `update, reset, candidate`.
#[derive(Debug, Clone)]
pub struct Gru {
    input_size: usize,
    hidden: usize,
    /// Kernel, flattened row-major: `w[i * 3H + j]`.
    w: Vec<f32>,
    /// Recurrent kernel, flattened row-major: `u[k * 3H + j]`.
    u: Vec<f32>,
    /// Input bias, length `3H`.
    b_in: Vec<f32>,
    /// Recurrent bias, length `3H`.
    b_rec: Vec<f32>,
    /// Hidden state.
    h: Vec<f32>,
    /// Input-side pre-activations, length `3H`.
    zx: Vec<f32>,
    /// Recurrent-side pre-activations, length `3H`.
    zh: Vec<f32>,
}

impl Gru {
    /// Build a cell from keras-layout weight matrices, validating shapes.
    pub fn new(
        input_size: usize,
        hidden: usize,
        w: &[Vec<f32>],
        u: &[Vec<f32>],
        bias: &[Vec<f32>],
    ) -> Result<Self, ModelError> {
        let cols = 3 * hidden;
        check_matrix("gru", "kernel", w, input_size, cols)?;
        check_matrix("gru", "recurrent kernel", u, hidden, cols)?;
        check_matrix("gru", "bias", bias, 2, cols)?;
        Ok(Self {
            input_size,
            hidden,
            w: w.iter().flatten().copied().collect(),
            u: u.iter().flatten().copied().collect(),
            b_in: bias[0].clone(),
            b_rec: bias[1].clone(),
            h: vec![0.0; hidden],
            zx: vec![0.0; cols],
            zh: vec![0.0; cols],
        })
    }

    /// Hidden width of the cell.
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Number of inputs per step.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Zero the hidden state.
    pub fn reset(&mut self) {
        self.h.fill(0.0);
    }

    /// Advance one step, returning the hidden state.
    pub fn step(&mut self, x: &[f32]) -> &[f32] {
        debug_assert_eq!(x.len(), self.input_size);
        let hd = self.hidden;
        let cols = 3 * hd;

        self.zx.copy_from_slice(&self.b_in);
        for (i, &xi) in x.iter().enumerate() {
            let row = &self.w[i * cols..(i + 1) * cols];
            for (g, &wj) in self.zx.iter_mut().zip(row) {
                *g += xi * wj;
            }
        }
        self.zh.copy_from_slice(&self.b_rec);
        for (k, &hk) in self.h.iter().enumerate() {
            let row = &self.u[k * cols..(k + 1) * cols];
            for (g, &uj) in self.zh.iter_mut().zip(row) {
                *g += hk * uj;
            }
        }

        for j in 0..hd {
            let z = sigmoid(self.zx[j] + self.zh[j]);
            let r = sigmoid(self.zx[hd + j] + self.zh[hd + j]);
            let cand = (self.zx[2 * hd + j] + r * self.zh[2 * hd + j]).tanh();
            self.h[j] = z * self.h[j] + (1.0 - z) * cand;
        }
        &self.h
    }
}
