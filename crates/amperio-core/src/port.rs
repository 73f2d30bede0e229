//! Control-port descriptors.
//!
//! Every control the engine exposes to a host is a port with a stable
//! symbolic name, a value range, and a default. Symbols are the lookup
//! key used by hosts and by the GUI layer; they must be unique within a
//! port table, and lookup is first-match-wins so a well-formed table
//! behaves like a map.

/// Metadata for one control port.
///
/// # Example
///
/// ```rust
/// use amperio_core::PortDescriptor;
///
/// let master = PortDescriptor::new("MASTER", "Master", -60.0, 12.0, 0.0);
/// assert_eq!(master.clamp(40.0), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortDescriptor {
    /// Stable symbolic name, unique within a port table.
    pub symbol: &'static str,
    /// Human-readable name for display.
    pub name: &'static str,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value on instantiation.
    pub default: f32,
    /// Whether the port takes discrete integer steps (switches, sizes).
    pub stepped: bool,
    /// Whether the engine reports this value rather than accepting it.
    pub read_only: bool,
}

impl PortDescriptor {
    /// Create a continuous, writable port.
    pub const fn new(
        symbol: &'static str,
        name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            symbol,
            name,
            min,
            max,
            default,
            stepped: false,
            read_only: false,
        }
    }

    /// Mark the port as stepped (discrete integer values).
    pub const fn stepped(mut self) -> Self {
        self.stepped = true;
        self
    }

    /// Mark the port as engine-reported (hosts must not write it).
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Clamp a value to this port's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Look up a port by symbol, first match wins.
///
/// Symbols are expected to be unique; duplicate entries after the first
/// are never reached, mirroring map semantics over an ordered table.
pub fn find_port<'a>(ports: &'a [PortDescriptor], symbol: &str) -> Option<&'a PortDescriptor> {
    ports.iter().find(|p| p.symbol == symbol)
}
