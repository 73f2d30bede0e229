//! Runtime-sized LSTM cell with keras weight layout.

use crate::error::ModelError;

/// LSTM cell.
///
/// Weights follow the keras layout: kernel `W` of shape
/// `[input_size][4 * hidden]`, recurrent kernel `U` of shape
/// `[hidden][4 * hidden]`, bias of length `4 * hidden`. The four gate
/// blocks are ordered `input, forget, cell, output`.
#[derive(Debug, Clone)]
pub struct Lstm {
    input_size: usize,
    hidden: usize,
    /// Kernel, flattened row-major: `w[i * 4H + j]`.
    w: Vec<f32>,
    /// Recurrent kernel, flattened row-major: `u[k * 4H + j]`.
    u: Vec<f32>,
    /// Bias, length `4H`.
    b: Vec<f32>,
    /// Hidden state.
    h: Vec<f32>,
    /// Cell state.
    c: Vec<f32>,
    /// Pre-activation scratch, length `4H`.
    gates: Vec<f32>,
}

impl Lstm {
    /// Build a cell from keras-layout weight matrices, validating shapes.
    pub fn new(
        input_size: usize,
        hidden: usize,
        w: &[Vec<f32>],
        u: &[Vec<f32>],
        b: &[f32],
    ) -> Result<Self, ModelError> {
        let cols = 4 * hidden;
        check_matrix("lstm", "kernel", w, input_size, cols)?;
        check_matrix("lstm", "recurrent kernel", u, hidden, cols)?;
        if b.len() != cols {
            return Err(ModelError::bad_weights(
                "lstm",
                format!("bias has {} entries, expected {cols}", b.len()),
            ));
        }
        Ok(Self {
            input_size,
            hidden,
            w: w.iter().flatten().copied().collect(),
            u: u.iter().flatten().copied().collect(),
            b: b.to_vec(),
            h: vec![0.0; hidden],
            c: vec![0.0; hidden],
            gates: vec![0.0; cols],
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

    /// Zero the hidden and cell state.
    pub fn reset(&mut self) {
        self.h.fill(0.0);
        self.c.fill(0.0);
    }

    /// Advance one step, returning the hidden state.
    pub fn step(&mut self, x: &[f32]) -> &[f32] {
        debug_assert_eq!(x.len(), self.input_size);
        let hd = self.hidden;
        let cols = 4 * hd;

        self.gates.copy_from_slice(&self.b);
        for (i, &xi) in x.iter().enumerate() {
            let row = &self.w[i * cols..(i + 1) * cols];
            for (g, &wj) in self.gates.iter_mut().zip(row) {
                *g += xi * wj;
            }
        }
        for (k, &hk) in self.h.iter().enumerate() {
            let row = &self.u[k * cols..(k + 1) * cols];
            for (g, &uj) in self.gates.iter_mut().zip(row) {
                *g += hk * uj;
            }
        }

        for j in 0..hd {
            let i_gate = sigmoid(self.gates[j]);
            let f_gate = sigmoid(self.gates[hd + j]);
            let c_cand = self.gates[2 * hd + j].tanh();
            let o_gate = sigmoid(self.gates[3 * hd + j]);
            self.c[j] = f_gate * self.c[j] + i_gate * c_cand;
            self.h[j] = o_gate * self.c[j].tanh();
        }
        &self.h
    }
}

#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

pub(crate) fn check_matrix(
    layer: &'static str,
    name: &str,
    m: &[Vec<f32>],
    rows: usize,
    cols: usize,
) -> Result<(), ModelError> {
    if m.len() != rows {
        return Err(ModelError::bad_weights(
            layer,
            format!("{name} has {} rows, expected {rows}", m.len()),
        ));
    }
    if let Some(row) = m.iter().find(|r| r.len() != cols) {
        return Err(ModelError::bad_weights(
            layer,
            format!("{name} row has {} columns, expected {cols}", row.len()),
        ));
    }
    Ok(())
}
