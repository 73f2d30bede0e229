//! The engine's control-port table.
//!
//! Symbols are the stable names hosts and the GUI layer use to address
//! controls; they never change between releases. `ModelInSize` is
//! engine-reported: it carries the input size of the currently loaded
//! model (0 while none is loaded) and hosts must not write it.

use amperio_core::{PortDescriptor, find_port};

/// First conditioning parameter, fed to models with input size >= 2.
pub const PARAM1: &str = "PARAM1";
/// Second conditioning parameter, fed to models with input size 3.
pub const PARAM2: &str = "PARAM2";
/// Output volume in dB.
pub const MASTER: &str = "MASTER";
/// Bypass switch; nonzero means the dry signal passes through.
pub const BYPASS: &str = "BYPASS";
/// Engine-reported input size of the loaded model.
pub const MODEL_IN_SIZE: &str = "ModelInSize";

/// All control ports, in host declaration order.
pub const PORTS: &[PortDescriptor] = &[
    PortDescriptor::new(PARAM1, "Param 1", 0.0, 1.0, 0.5),
    PortDescriptor::new(PARAM2, "Param 2", 0.0, 1.0, 0.5),
    PortDescriptor::new(MASTER, "Master", -60.0, 12.0, 0.0),
    PortDescriptor::new(BYPASS, "Bypass", 0.0, 1.0, 0.0).stepped(),
    PortDescriptor::new(MODEL_IN_SIZE, "Model Input Size", 0.0, 3.0, 0.0)
        .stepped()
        .read_only(),
];

/// Look up one of the engine's ports by symbol.
pub fn port(symbol: &str) -> Option<&'static PortDescriptor> {
    find_port(PORTS, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_unique() {
        for (i, a) in PORTS.iter().enumerate() {
            for b in &PORTS[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn model_in_size_is_engine_reported() {
        let p = port(MODEL_IN_SIZE).unwrap();
        assert!(p.read_only);
        assert!(p.stepped);
        assert_eq!(p.min, 0.0);
        assert_eq!(p.max, 3.0);
    }

    #[test]
    fn conditioning_params_are_normalized() {
        for symbol in [PARAM1, PARAM2] {
            let p = port(symbol).unwrap();
            assert_eq!((p.min, p.max), (0.0, 1.0));
            assert!(!p.read_only);
        }
    }

    #[test]
    fn unknown_symbol_finds_nothing() {
        assert!(port("GAIN").is_none());
    }
}
