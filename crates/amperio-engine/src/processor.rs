//! Real-time block processor.
//!
//! Runs the loaded model sample by sample, feeding the conditioning
//! parameters through smoothers so knob moves never step between
//! samples, then DC-blocks the output and applies the master gain as a
//! per-block ramp. No allocation happens in [`Processor::process_block`].

use amperio_core::{DcBlocker, ExpSmoother, GainRamp, db_to_linear};
use amperio_model::Network;

/// Smoothing time constant for the conditioning parameters, in seconds.
const PARAM_SMOOTH_SECONDS: f32 = 0.05;

/// Mono block processor around an optional loaded model.
///
/// Without a model (or while bypassed) the dry signal passes through
/// untouched. With a model, each sample is run through inference with
/// the smoothed conditioning values appended according to the model's
/// input size, then DC-blocked and scaled by the master gain.
pub struct Processor {
    network: Option<Network>,
    dc_blocker: DcBlocker,
    master_ramp: GainRamp,
    param1: ExpSmoother,
    param2: ExpSmoother,
    master_db: f32,
    bypassed: bool,
    sample_rate: f32,
}

impl Processor {
    /// Create a processor with no model loaded.
    pub fn new(sample_rate: f32) -> Self {
        let mut param1 = ExpSmoother::new(0.5);
        let mut param2 = ExpSmoother::new(0.5);
        for p in [&mut param1, &mut param2] {
            p.set_sample_rate(sample_rate);
            p.set_time_constant(PARAM_SMOOTH_SECONDS);
        }
        Self {
            network: None,
            dc_blocker: DcBlocker::new(sample_rate),
            master_ramp: GainRamp::new(1.0),
            param1,
            param2,
            master_db: 0.0,
            bypassed: false,
            sample_rate,
        }
    }

    /// Sample rate the processor runs at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the sample rate, updating all dependent coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.dc_blocker.set_sample_rate(sample_rate);
        self.param1.set_sample_rate(sample_rate);
        self.param2.set_sample_rate(sample_rate);
    }

    /// Install a model (or remove it with `None`).
    ///
    /// The network is installed as handed over; the load paths warm it
    /// up beforehand so installation stays cheap on the caller's
    /// thread.
    pub fn set_network(&mut self, network: Option<Network>) {
        self.network = network;
        self.dc_blocker.reset();
    }

    /// Whether a model is currently installed.
    pub fn has_network(&self) -> bool {
        self.network.is_some()
    }

    /// Input size of the loaded model; 0 when none is loaded.
    pub fn model_input_size(&self) -> i64 {
        self.network
            .as_ref()
            .map_or(0, |net| net.info().input_size as i64)
    }

    /// Set the first conditioning parameter (smoothed).
    pub fn set_param1(&mut self, value: f32) {
        self.param1.set_target(value);
    }

    /// Set the second conditioning parameter (smoothed).
    pub fn set_param2(&mut self, value: f32) {
        self.param2.set_target(value);
    }

    /// First conditioning parameter's target value.
    pub fn param1(&self) -> f32 {
        self.param1.target()
    }

    /// Second conditioning parameter's target value.
    pub fn param2(&self) -> f32 {
        self.param2.target()
    }

    /// Set the master volume in dB (ramped per block).
    pub fn set_master_db(&mut self, db: f32) {
        self.master_db = db;
    }

    /// Master volume in dB.
    pub fn master_db(&self) -> f32 {
        self.master_db
    }

    /// Set the bypass switch.
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    /// Whether the dry signal passes through untouched.
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Clear all processing state: model recurrence, filter memory,
    /// smoother and ramp positions.
    pub fn reset(&mut self) {
        if let Some(net) = &mut self.network {
            net.reset();
        }
        self.dc_blocker.reset();
        self.master_ramp.reset(db_to_linear(self.master_db));
        self.param1.clear_to_target();
        self.param2.clear_to_target();
    }

    /// Process one mono block in place.
    ///
    /// Bypassed or model-less blocks are left untouched, including the
    /// master gain, so toggling bypass compares the dry signal directly
    /// against the processed one.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        if self.bypassed {
            return;
        }
        let Some(net) = &mut self.network else {
            return;
        };

        let input_size = net.info().input_size;
        for sample in buffer.iter_mut() {
            let p1 = self.param1.next();
            let p2 = self.param2.next();
            let frame = [*sample, p1, p2];
            *sample = net.forward(&frame[..input_size]);
        }

        self.dc_blocker.process_block(buffer);
        self.master_ramp.apply(buffer, db_to_linear(self.master_db));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Conditioned model (input size 2) with zero recurrent weights,
    /// identity dense head, and `in_skip`: output == dry input, ignoring
    /// the conditioning value.
    const CONDITIONED_PASSTHROUGH: &str = r#"{
        "in_shape": [null, 1, 2],
        "in_skip": 1,
        "layers": [
            { "type": "lstm", "shape": [null, 1, 2],
              "weights": [
                  [[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]],
                  [[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]],
                  [0,0,0,0,0,0,0,0]
              ] },
            { "type": "dense", "shape": [null, 1, 1], "activation": "",
              "weights": [[[1],[1]], [0]] }
        ]
    }"#;

    fn passthrough_network() -> Network {
        Network::from_slice(CONDITIONED_PASSTHROUGH.as_bytes()).unwrap()
    }

    /// A zero-mean test signal the DC blocker barely touches.
    fn square_wave(len: usize) -> Vec<f32> {
        (0..len).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect()
    }

    #[test]
    fn no_model_is_a_passthrough() {
        let mut proc = Processor::new(48000.0);
        assert!(!proc.has_network());
        assert_eq!(proc.model_input_size(), 0);

        let mut block = square_wave(64);
        let dry = block.clone();
        proc.process_block(&mut block);
        assert_eq!(block, dry);
    }

    #[test]
    fn bypass_is_a_passthrough_even_with_a_model() {
        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(passthrough_network()));
        proc.set_master_db(-12.0);
        proc.set_bypassed(true);

        let mut block = square_wave(64);
        let dry = block.clone();
        proc.process_block(&mut block);
        assert_eq!(block, dry);
    }

    #[test]
    fn reports_loaded_model_input_size() {
        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(passthrough_network()));
        assert_eq!(proc.model_input_size(), 2);

        proc.set_network(None);
        assert_eq!(proc.model_input_size(), 0);
    }

    #[test]
    fn passthrough_model_preserves_ac_signal() {
        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(passthrough_network()));
        proc.reset();

        let mut block = square_wave(256);
        let dry = block.clone();
        proc.process_block(&mut block);

        // Identity inference, unity master; only the 35 Hz DC blocker
        // touches the signal, which is negligible on a Nyquist square.
        for (wet, dry) in block.iter().zip(&dry) {
            assert!((wet - dry).abs() < 0.02, "wet {wet} vs dry {dry}");
        }
    }

    #[test]
    fn master_gain_scales_the_output() {
        let mut quiet = Processor::new(48000.0);
        quiet.set_network(Some(passthrough_network()));
        quiet.set_master_db(-20.0);
        quiet.reset();

        let mut block = square_wave(512);
        quiet.process_block(&mut block);

        // -20 dB is a factor of 10; check the block tail where the ramp
        // has settled.
        let tail_peak = block[256..]
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(
            (tail_peak - 0.05).abs() < 0.01,
            "expected ~0.05 peak, got {tail_peak}"
        );
    }

    #[test]
    fn process_is_deterministic_after_reset() {
        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(passthrough_network()));

        let mut a = square_wave(128);
        proc.reset();
        proc.process_block(&mut a);

        let mut b = square_wave(128);
        proc.reset();
        proc.process_block(&mut b);

        assert_eq!(a, b);
    }

    /// Stateful conditioned GRU model (input size 2).
    const GRU_MODEL: &str = r#"{
        "in_shape": [null, 1, 2],
        "layers": [
            { "type": "gru", "shape": [null, 1, 2],
              "weights": [
                  [[0.1,0.2,0.3,0.4,0.5,0.6],[0.0,0.1,0.0,0.1,0.0,0.1]],
                  [[0.1,0.0,0.1,0.0,0.1,0.0],[0.0,0.2,0.0,0.2,0.0,0.2]],
                  [[0.01,0.02,0.03,0.04,0.05,0.06],[0.0,0.0,0.0,0.0,0.0,0.0]]
              ] },
            { "type": "dense", "shape": [null, 1, 1],
              "weights": [[[0.5],[-0.5]], [0.1]] }
        ]
    }"#;

    #[test]
    fn network_is_installed_as_handed_over() {
        // The worker warms networks up before handing them over, so
        // installation must not run its own warm-up (or any other state
        // manipulation) behind the caller's back.
        let mut net = Network::from_slice(GRU_MODEL.as_bytes()).unwrap();
        net.forward(&[0.3, 0.5]);
        let mut reference = net.clone();

        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(net));

        let mut block = [0.25f32; 8];
        proc.process_block(&mut block);

        // Param smoothers rest at 0.5 and the master ramp at unity, so
        // the block must bitwise-match inference continued from the
        // handed-over state plus the DC blocker.
        let mut dc = amperio_core::DcBlocker::new(48000.0);
        for &got in &block {
            let expected = dc.process(reference.forward(&[0.25, 0.5]));
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn empty_block_is_fine() {
        let mut proc = Processor::new(48000.0);
        proc.set_network(Some(passthrough_network()));
        proc.process_block(&mut []);
    }
}
