//! Value smoothers for click-free control changes.
//!
//! Control values (conditioning params, output gain) must not jump
//! between samples or the discontinuity is audible as zipper noise.
//! Two smoothers are provided:
//!
//! - [`ExpSmoother`] - one-pole lowpass response, natural-sounding decay
//! - [`LinearSmoother`] - constant-rate ramp, reaches the target in a
//!   fixed time
//!
//! Both are configured with a time constant in seconds and advance one
//! sample at a time via `next()`.

use libm::expf;

/// Exponentially smoothed control value (one-pole lowpass).
///
/// The time constant is the time to reach ~63% of a new target; after
/// five time constants the value is settled for audio purposes.
///
/// # Example
///
/// ```rust
/// use amperio_core::ExpSmoother;
///
/// let mut gain = ExpSmoother::new(1.0);
/// gain.set_sample_rate(48000.0);
/// gain.set_time_constant(0.01);
/// gain.set_target(0.5);
/// for _ in 0..4800 {
///     let _ = gain.next();
/// }
/// assert!((gain.current() - 0.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct ExpSmoother {
    current: f32,
    target: f32,
    coeff: f32,
    sample_rate: f32,
    time_constant: f32,
}

impl ExpSmoother {
    /// Create a smoother resting at `initial`.
    ///
    /// Smoothing is instant until [`set_time_constant`](Self::set_time_constant)
    /// is called with a positive value.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 48000.0,
            time_constant: 0.0,
        }
    }

    /// Set the sample rate in Hz and update the filter coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coeff();
    }

    /// Set the time constant in seconds.
    ///
    /// Zero disables smoothing (instant changes).
    pub fn set_time_constant(&mut self, seconds: f32) {
        self.time_constant = seconds;
        self.update_coeff();
    }

    /// Set the value the smoother approaches.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to the current target without smoothing.
    #[inline]
    pub fn clear_to_target(&mut self) {
        self.current = self.target;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Smoothed value as of the last `next()` call.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Target the smoother is approaching.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    // coeff = 1 - exp(-1 / (tau * fs)); tau = 0 means instant.
    fn update_coeff(&mut self) {
        if self.time_constant <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            self.coeff = 1.0 - expf(-1.0 / (self.time_constant * self.sample_rate));
        }
    }
}

/// Linearly smoothed control value (constant rate of change).
///
/// Reaches any new target in exactly the configured time, which makes
/// transition length predictable regardless of distance.
#[derive(Debug, Clone)]
pub struct LinearSmoother {
    current: f32,
    target: f32,
    step: f32,
    remaining: u32,
    sample_rate: f32,
    time_constant: f32,
}

impl LinearSmoother {
    /// Create a smoother resting at `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            sample_rate: 48000.0,
            time_constant: 0.0,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Set the ramp time in seconds.
    pub fn set_time_constant(&mut self, seconds: f32) {
        self.time_constant = seconds;
    }

    /// Set a new target, starting a ramp from the current value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return;
        }
        self.target = target;
        let samples = (self.time_constant * self.sample_rate) as u32;
        if samples == 0 {
            self.current = target;
            self.step = 0.0;
            self.remaining = 0;
        } else {
            self.step = (target - self.current) / samples as f32;
            self.remaining = samples;
        }
    }

    /// Jump to the current target, cancelling any ramp in progress.
    pub fn clear_to_target(&mut self) {
        self.current = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        if self.remaining > 0 {
            self.current += self.step;
            self.remaining -= 1;
            if self.remaining == 0 {
                // Land exactly on the target, no float drift.
                self.current = self.target;
            }
        }
        self.current
    }

    /// Smoothed value as of the last `next()` call.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Whether the ramp has finished.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }
}
