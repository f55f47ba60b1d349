use alloc::string::String;

use crate::*;

/// The document root, as far as theming is concerned.
pub trait RootMarker {
    fn add_class(&self, name: &str) -> Result<(), MarkerError>;
    fn remove_class(&self, name: &str) -> Result<(), MarkerError>;
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), MarkerError>;
    fn remove_attribute(&self, name: &str) -> Result<(), MarkerError>;
    fn set_color_scheme(&self, scheme: &str) -> Result<(), MarkerError>;
}

/// Puts the theming marker on the document root: present for dark, absent
/// for light.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootApplier {
    strategy: MarkerStrategy,
    name: String,
}

impl RootApplier {
    /// Stylesheet that disables transitions while the marker flips.
    pub const NO_TRANSITIONS_CSS: &'static str =
        "*,*::before,*::after{-webkit-transition:none!important;transition:none!important}";

    pub fn new(strategy: MarkerStrategy, name: impl Into<String>) -> Self {
        Self {
            strategy,
            name: name.into(),
        }
    }

    pub fn from_config(config: &ThemeConfig) -> Self {
        let name = match config.marker {
            MarkerStrategy::Class => &config.class_name,
            MarkerStrategy::Attribute => &config.attribute_name,
        };
        Self::new(config.marker, name.as_str())
    }

    /// Class or attribute name, depending on the strategy.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply<R: RootMarker + ?Sized>(&self, theme: Theme, root: &R) -> Result<(), MarkerError> {
        use MarkerStrategy::*;
        match (self.strategy, theme) {
            (Class, Theme::Dark) => root.add_class(&self.name)?,
            (Class, Theme::Light) => root.remove_class(&self.name)?,
            (Attribute, Theme::Dark) => root.set_attribute(&self.name, theme.scheme())?,
            (Attribute, Theme::Light) => root.remove_attribute(&self.name)?,
        }
        root.set_color_scheme(theme.scheme())?;
        log::debug!("root marker applied: {} ({:?} {:?})", theme, self.strategy, self.name);
        Ok(())
    }
}
