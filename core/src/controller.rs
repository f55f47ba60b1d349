use core::cell::Cell;

use crate::*;

/// Snapshot of everything the effective theme was derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThemeState {
    /// Explicit choice found in (or written to) the store.
    pub stored: Option<Theme>,
    /// Last system reading, if system mode is enabled and it was needed.
    pub system: Option<Theme>,
    pub effective: Theme,
}

/// Single source of truth for the effective theme of a page session.
///
/// Precedence: an explicit stored choice, then the system signal (when
/// enabled), then the configured default.
#[derive(Debug)]
pub struct ThemeController<S, D> {
    config: ThemeConfig,
    store: S,
    system: D,
    state: Cell<Option<ThemeState>>,
}

impl<S: PreferenceStore, D: SystemSignal> ThemeController<S, D> {
    pub fn new(config: ThemeConfig, store: S, system: D) -> Self {
        Self {
            config,
            store,
            system,
            state: Cell::new(None),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn system(&self) -> &D {
        &self.system
    }

    /// Resolves the effective theme once; later calls return the cached result.
    pub fn initialize(&self) -> Theme {
        self.current_state().effective
    }

    pub fn get(&self) -> Theme {
        self.initialize()
    }

    pub fn state(&self) -> ThemeState {
        self.current_state()
    }

    pub fn preference(&self) -> ThemePreference {
        let state = self.current_state();
        match state.stored {
            Some(theme) => theme.into(),
            None if self.config.system_enabled => ThemePreference::System,
            None => self.config.default_theme.into(),
        }
    }

    /// Makes `theme` effective immediately and writes it through to the store.
    ///
    /// A failed write only costs persistence across reloads.
    pub fn set(&self, theme: Theme) {
        let mut state = self.current_state();
        state.stored = Some(theme);
        state.effective = theme;
        self.state.set(Some(state));
        log::debug!("theme set: {}", theme);

        if let Err(err) = self.store.set(&self.config.storage_key, theme.scheme()) {
            log::warn!("theme {} applies to this session only: {}", theme, err);
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().opposite();
        self.set(next);
        next
    }

    /// Feeds a new system reading. Returns the new effective theme if it changed.
    pub fn system_changed(&self, system: Option<Theme>) -> Option<Theme> {
        if !self.config.system_enabled {
            return None;
        }
        let mut state = self.current_state();
        state.system = system;
        self.update(state)
    }

    /// Feeds a stored value written elsewhere (another tab), without writing
    /// it back. Returns the new effective theme if it changed.
    pub fn storage_changed(&self, value: Option<&str>) -> Option<Theme> {
        let mut state = self.current_state();
        state.stored = value.and_then(|value| self.parse_stored(value));
        if state.stored.is_none() && state.system.is_none() {
            state.system = self.read_system();
        }
        self.update(state)
    }

    fn update(&self, mut state: ThemeState) -> Option<Theme> {
        let previous = state.effective;
        state.effective = self.resolve(state.stored, state.system);
        self.state.set(Some(state));
        (state.effective != previous).then_some(state.effective)
    }

    fn current_state(&self) -> ThemeState {
        if let Some(state) = self.state.get() {
            return state;
        }
        let stored = self.read_stored();
        let system = match stored {
            Some(_) => None,
            None => self.read_system(),
        };
        let state = ThemeState {
            stored,
            system,
            effective: self.resolve(stored, system),
        };
        log::debug!(
            "theme initialized: {} (stored: {:?}, system: {:?})",
            state.effective,
            stored,
            system
        );
        self.state.set(Some(state));
        state
    }

    fn resolve(&self, stored: Option<Theme>, system: Option<Theme>) -> Theme {
        stored
            .or(system.filter(|_| self.config.system_enabled))
            .unwrap_or(self.config.default_theme)
    }

    fn read_stored(&self) -> Option<Theme> {
        match self.store.get(&self.config.storage_key) {
            Ok(value) => value.and_then(|value| self.parse_stored(&value)),
            Err(err) => {
                log::warn!("no stored theme preference: {}", err);
                None
            }
        }
    }

    fn read_system(&self) -> Option<Theme> {
        if self.config.system_enabled {
            self.system.current()
        } else {
            None
        }
    }

    fn parse_stored(&self, value: &str) -> Option<Theme> {
        match value.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                log::warn!("ignoring stored theme: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use core::cell::Cell;

    const KEY: &str = ThemeConfig::DEFAULT_STORAGE_KEY;
    const NO_SIGNAL: Option<Theme> = None;

    fn config(default_theme: Theme, system_enabled: bool) -> ThemeConfig {
        ThemeConfig {
            default_theme,
            system_enabled,
            ..Default::default()
        }
    }

    /// Storage that is blocked entirely, as in some private browsing modes.
    struct BlockedStore;

    impl PreferenceStore for BlockedStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Write("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable)
        }
    }

    /// Counts how often it is queried.
    struct CountingSignal {
        reading: Option<Theme>,
        reads: Cell<usize>,
    }

    impl SystemSignal for CountingSignal {
        fn current(&self) -> Option<Theme> {
            self.reads.set(self.reads.get() + 1);
            self.reading
        }
    }

    #[test]
    fn stored_choice_wins_over_system() {
        let store = MemoryStore::with_entry(KEY, "dark");
        let controller = ThemeController::new(config(Theme::Light, true), &store, Some(Theme::Light));

        assert_eq!(controller.initialize(), Theme::Dark);
        assert_eq!(controller.preference(), ThemePreference::Dark);
    }

    #[test]
    fn system_is_used_when_nothing_is_stored() {
        let controller = ThemeController::new(
            config(Theme::Dark, true),
            MemoryStore::new(),
            Some(Theme::Light),
        );

        assert_eq!(controller.initialize(), Theme::Light);
        assert_eq!(controller.preference(), ThemePreference::System);
    }

    #[test]
    fn default_is_used_when_system_mode_is_disabled() {
        let controller = ThemeController::new(
            config(Theme::Dark, false),
            MemoryStore::new(),
            Some(Theme::Light),
        );

        assert_eq!(controller.initialize(), Theme::Dark);
        assert_eq!(controller.preference(), ThemePreference::Dark);
    }

    #[test]
    fn default_is_used_when_system_signal_is_unavailable() {
        let controller =
            ThemeController::new(config(Theme::Light, true), MemoryStore::new(), NO_SIGNAL);

        assert_eq!(controller.initialize(), Theme::Light);
    }

    #[test]
    fn unreadable_stored_value_counts_as_unset() {
        for garbage in ["system", "DARK", "", "blue"] {
            let store = MemoryStore::with_entry(KEY, garbage);
            let controller =
                ThemeController::new(config(Theme::Dark, true), &store, Some(Theme::Light));
            assert_eq!(controller.initialize(), Theme::Light, "stored {:?}", garbage);
        }
    }

    #[test]
    fn blocked_storage_degrades_to_session_only() {
        let controller = ThemeController::new(config(Theme::Dark, false), BlockedStore, NO_SIGNAL);

        assert_eq!(controller.initialize(), Theme::Dark);
        controller.set(Theme::Light);
        assert_eq!(controller.get(), Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);
    }

    #[test]
    fn initialize_is_idempotent() {
        let store = MemoryStore::new();
        let signal = CountingSignal {
            reading: Some(Theme::Light),
            reads: Cell::new(0),
        };
        let controller = ThemeController::new(config(Theme::Dark, true), &store, &signal);

        assert_eq!(controller.initialize(), Theme::Light);
        store.set(KEY, "dark").unwrap();
        assert_eq!(controller.initialize(), Theme::Light);
        assert_eq!(controller.get(), Theme::Light);
        assert_eq!(signal.reads.get(), 1);
    }

    #[test]
    fn system_is_not_queried_when_a_choice_is_stored() {
        let store = MemoryStore::with_entry(KEY, "light");
        let signal = CountingSignal {
            reading: Some(Theme::Dark),
            reads: Cell::new(0),
        };
        let controller = ThemeController::new(config(Theme::Dark, true), &store, &signal);

        assert_eq!(controller.initialize(), Theme::Light);
        assert_eq!(signal.reads.get(), 0);
    }

    #[test]
    fn set_writes_through_to_the_store() {
        let store = MemoryStore::new();
        let controller = ThemeController::new(config(Theme::Light, false), &store, NO_SIGNAL);

        controller.set(Theme::Dark);

        assert_eq!(controller.get(), Theme::Dark);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("dark"));
        let reloaded = ThemeController::new(config(Theme::Light, false), &store, NO_SIGNAL);
        assert_eq!(reloaded.initialize(), Theme::Dark);
    }

    #[test]
    fn toggling_is_its_own_inverse() {
        for start in [Theme::Light, Theme::Dark] {
            let controller = ThemeController::new(config(start, false), MemoryStore::new(), NO_SIGNAL);
            assert_eq!(controller.initialize(), start);

            for activations in 1..=7 {
                let theme = controller.toggle();
                let expected = if activations % 2 == 1 {
                    start.opposite()
                } else {
                    start
                };
                assert_eq!(theme, expected);
                assert_eq!(controller.get(), expected);
            }
        }
    }

    #[test]
    fn toggle_never_writes_system() {
        let store = MemoryStore::new();
        let controller = ThemeController::new(config(Theme::Dark, true), &store, Some(Theme::Dark));
        assert_eq!(controller.preference(), ThemePreference::System);

        controller.toggle();
        controller.toggle();

        assert_eq!(controller.preference(), ThemePreference::Dark);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn reload_round_trip_from_an_empty_store() {
        let store = MemoryStore::new();
        let config = config(Theme::Dark, false);

        let first = ThemeController::new(config.clone(), &store, NO_SIGNAL);
        assert_eq!(first.initialize(), Theme::Dark);
        assert_eq!(first.toggle(), Theme::Light);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("light"));
        drop(first);

        let reloaded = ThemeController::new(config.clone(), &store, NO_SIGNAL);
        assert_eq!(reloaded.initialize(), Theme::Light);
        drop(reloaded);

        store.clear();
        let cleared = ThemeController::new(config, &store, NO_SIGNAL);
        assert_eq!(cleared.initialize(), Theme::Dark);
    }

    #[test]
    fn live_system_changes_only_apply_without_a_stored_choice() {
        let controller = ThemeController::new(
            config(Theme::Dark, true),
            MemoryStore::new(),
            Some(Theme::Light),
        );
        assert_eq!(controller.initialize(), Theme::Light);

        assert_eq!(controller.system_changed(Some(Theme::Dark)), Some(Theme::Dark));
        assert_eq!(controller.system_changed(Some(Theme::Dark)), None);
        assert_eq!(controller.system_changed(None), None);
        assert_eq!(controller.get(), Theme::Dark);

        controller.set(Theme::Light);
        assert_eq!(controller.system_changed(Some(Theme::Dark)), None);
        assert_eq!(controller.get(), Theme::Light);
    }

    #[test]
    fn system_changes_are_ignored_when_disabled() {
        let controller =
            ThemeController::new(config(Theme::Light, false), MemoryStore::new(), NO_SIGNAL);

        assert_eq!(controller.system_changed(Some(Theme::Dark)), None);
        assert_eq!(controller.get(), Theme::Light);
    }

    #[test]
    fn storage_changes_from_other_tabs_are_adopted_without_writing_back() {
        let store = MemoryStore::new();
        let controller = ThemeController::new(config(Theme::Dark, true), &store, Some(Theme::Light));
        assert_eq!(controller.initialize(), Theme::Light);

        assert_eq!(controller.storage_changed(Some("dark")), Some(Theme::Dark));
        assert_eq!(controller.preference(), ThemePreference::Dark);
        assert_eq!(store.get(KEY).unwrap(), None);

        assert_eq!(controller.storage_changed(None), Some(Theme::Light));
        assert_eq!(controller.preference(), ThemePreference::System);
        assert_eq!(controller.storage_changed(Some("nonsense")), None);
    }

    #[test]
    fn cleared_storage_consults_the_system_signal() {
        let store = MemoryStore::with_entry(KEY, "light");
        let controller = ThemeController::new(config(Theme::Light, true), &store, Some(Theme::Dark));
        assert_eq!(controller.initialize(), Theme::Light);
        assert_eq!(controller.state().system, None);

        assert_eq!(controller.storage_changed(None), Some(Theme::Dark));
        assert_eq!(controller.state().system, Some(Theme::Dark));
    }
}
