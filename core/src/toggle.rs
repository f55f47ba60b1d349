use crate::Theme;

/// Whether the first client-side mount has completed.
///
/// Flips from `Pending` to `Ready` exactly once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MountGate {
    #[default]
    Pending,
    Ready,
}

/// Per-instance state of a theme toggle.
///
/// `Unmounted -> Mounted(Light) <-> Mounted(Dark)`, with no terminal state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Unmounted,
    Mounted(Theme),
}

/// What a mounted toggle shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToggleFace {
    /// Theme currently in effect.
    pub theme: Theme,
    /// Decorative glyph for the theme a press switches to.
    pub icon: &'static str,
    /// Tooltip describing what a press does.
    pub hint: &'static str,
}

impl ToggleState {
    pub const ACCESSIBLE_NAME: &'static str = "Toggle theme";

    pub const fn new(gate: MountGate, theme: Theme) -> Self {
        match gate {
            MountGate::Pending => Self::Unmounted,
            MountGate::Ready => Self::Mounted(theme),
        }
    }

    /// `None` means only the neutral placeholder may be shown.
    pub const fn face(self) -> Option<ToggleFace> {
        match self {
            Self::Unmounted => None,
            Self::Mounted(Theme::Dark) => Some(ToggleFace {
                theme: Theme::Dark,
                icon: "☀",
                hint: "Switch to light theme",
            }),
            Self::Mounted(Theme::Light) => Some(ToggleFace {
                theme: Theme::Light,
                icon: "☾",
                hint: "Switch to dark theme",
            }),
        }
    }

    /// The theme an activation requests. Inert until mounted.
    pub const fn activate(self) -> Option<Theme> {
        match self {
            Self::Unmounted => None,
            Self::Mounted(theme) => Some(theme.opposite()),
        }
    }
}
