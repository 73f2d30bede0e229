//! DC blocking highpass filter.
//!
//! Recurrent amp models sit the output on a small DC offset that varies
//! with the conditioning inputs. A first-order RC highpass well below
//! the audible range removes it. The default cutoff is 35 Hz, matching
//! the corner used on the plugin's output stage.

use core::f32::consts::PI;

/// First-order RC highpass used as a DC blocker.
///
/// Difference equation (bilinear mapping of `H(s) = s / (s + wc)`):
///
/// ```text
/// y[n] = alpha * (y[n-1] + x[n] - x[n-1]),  alpha = RC / (RC + 1/fs)
/// ```
///
/// # Example
///
/// ```rust
/// use amperio_core::DcBlocker;
///
/// let mut blocker = DcBlocker::new(48000.0);
/// let mut block = [0.25f32; 512];
/// blocker.process_block(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct DcBlocker {
    alpha: f32,
    x_prev: f32,
    y_prev: f32,
    cutoff_hz: f32,
}

impl DcBlocker {
    /// Default highpass corner frequency in Hz.
    pub const DEFAULT_CUTOFF_HZ: f32 = 35.0;

    /// Create a DC blocker with the default 35 Hz corner.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_cutoff(Self::DEFAULT_CUTOFF_HZ, sample_rate)
    }

    /// Create a DC blocker with a specific corner frequency.
    pub fn with_cutoff(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self {
            alpha: Self::calculate_alpha(cutoff_hz, sample_rate),
            x_prev: 0.0,
            y_prev: 0.0,
            cutoff_hz,
        }
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.alpha * (self.y_prev + input - self.x_prev);
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Filter a block in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer {
            *sample = self.process(*sample);
        }
    }

    /// Clear the filter memory.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }

    /// Recompute the coefficient for a new sample rate, keeping the
    /// configured corner frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.alpha = Self::calculate_alpha(self.cutoff_hz, sample_rate);
    }

    /// Corner frequency in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    fn calculate_alpha(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        let dt = 1.0 / sample_rate;
        rc / (rc + dt)
    }
}
