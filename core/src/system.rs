use crate::Theme;

/// Media query that matches when the environment prefers a dark scheme.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// The operating environment's color-scheme preference.
pub trait SystemSignal {
    /// `None` when the platform cannot report a preference.
    fn current(&self) -> Option<Theme>;
}

/// A fixed reading, for hosts without a live signal.
impl SystemSignal for Option<Theme> {
    fn current(&self) -> Option<Theme> {
        *self
    }
}

impl<D: SystemSignal + ?Sized> SystemSignal for &D {
    fn current(&self) -> Option<Theme> {
        (**self).current()
    }
}
