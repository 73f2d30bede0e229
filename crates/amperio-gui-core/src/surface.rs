//! Abstraction over the host's widget operations.

/// Show/hide operations on the host-rendered control surface.
///
/// The host owns the widget tree; a GUI callback adapter implements
/// this by resolving `control` (a class-style identifier) against its
/// widget lookup and toggling visibility on every match.
pub trait ControlSurface {
    /// Show or hide every widget tagged with `control`.
    fn set_visible(&mut self, control: &str, visible: bool);
}

/// Surface that drops every operation.
///
/// Useful when the logic runs without a rendered GUI (headless hosts,
/// tests of unrelated paths).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl ControlSurface for NullSurface {
    fn set_visible(&mut self, _control: &str, _visible: bool) {}
}
