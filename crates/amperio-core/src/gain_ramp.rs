//! Per-block linear gain ramp.
//!
//! The master volume is applied once per audio block. Multiplying the
//! whole block by the new gain would step the amplitude at the block
//! boundary, so the gain is interpolated linearly from the previous
//! block's value to the current one across the block.

/// Block-rate gain with linear interpolation across each block.
///
/// Remembers the gain used at the end of the previous block and ramps
/// from there to the newly requested gain over the next block.
///
/// # Example
///
/// ```rust
/// use amperio_core::GainRamp;
///
/// let mut ramp = GainRamp::new(1.0);
/// let mut block = [1.0f32; 4];
/// ramp.apply(&mut block, 0.0);
/// // Interpolates from 1.0 towards 0.0 across the block.
/// assert!(block[0] > block[3]);
/// ```
#[derive(Debug, Clone)]
pub struct GainRamp {
    previous: f32,
}

impl GainRamp {
    /// Create a ramp starting at the given gain.
    pub fn new(initial: f32) -> Self {
        Self { previous: initial }
    }

    /// Multiply `buffer` in place, interpolating from the previous
    /// block's gain to `gain`.
    pub fn apply(&mut self, buffer: &mut [f32], gain: f32) {
        let n = buffer.len();
        if n == 0 {
            self.previous = gain;
            return;
        }
        let start = self.previous;
        let slope = (gain - start) / n as f32;
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= start + slope * i as f32;
        }
        self.previous = gain;
    }

    /// Reset the remembered gain, e.g. after a transport restart.
    pub fn reset(&mut self, gain: f32) {
        self.previous = gain;
    }

    /// Gain the next block will ramp from.
    pub fn previous(&self) -> f32 {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_gain_is_flat() {
        let mut ramp = GainRamp::new(0.5);
        let mut block = [1.0f32; 8];
        ramp.apply(&mut block, 0.5);
        for &s in &block {
            assert!((s - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn ramp_interpolates_between_blocks() {
        let mut ramp = GainRamp::new(0.0);
        let mut block = [1.0f32; 100];
        ramp.apply(&mut block, 1.0);

        // First sample near the old gain, last near the new one.
        assert!(block[0] < 0.02);
        assert!(block[99] > 0.97);
        // Monotonic in between.
        for w in block.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn second_block_starts_where_first_ended() {
        let mut ramp = GainRamp::new(0.0);
        let mut a = [1.0f32; 16];
        ramp.apply(&mut a, 1.0);
        assert_eq!(ramp.previous(), 1.0);

        let mut b = [1.0f32; 16];
        ramp.apply(&mut b, 1.0);
        for &s in &b {
            assert!((s - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_block_still_advances() {
        let mut ramp = GainRamp::new(0.0);
        ramp.apply(&mut [], 0.7);
        assert_eq!(ramp.previous(), 0.7);
    }
}
