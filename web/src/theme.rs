use gloo::events::EventListener;
use std::ops::Deref;
use std::rc::Rc;
use twilight_core::*;
use yew::prelude::*;

use crate::browser::{self, BrowserStore, MediaQuerySignal, TransitionGuard};

pub type BrowserController = ThemeController<BrowserStore, MediaQuerySignal>;

/// The page's one controller, shared by reference across the component tree.
#[derive(Clone, Debug)]
pub struct SharedController(Rc<BrowserController>);

impl PartialEq for SharedController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedController {
    type Target = BrowserController;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BrowserController> for SharedController {
    fn from(controller: BrowserController) -> Self {
        Self(Rc::new(controller))
    }
}

/// What consumers of the theme context see.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeHandle {
    pub theme: Theme,
    pub set: Callback<Theme>,
}

#[hook]
pub fn use_theme() -> ThemeHandle {
    use_context::<ThemeHandle>().expect("use_theme must be called below a ThemeProvider")
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub controller: SharedController,
    #[prop_or_default]
    pub children: Html,
}

/// Mounted once around every page.
#[function_component]
pub fn ThemeProvider(props: &ThemeProviderProps) -> Html {
    let controller = props.controller.clone();
    let theme = use_state_eq({
        let controller = controller.clone();
        move || controller.get()
    });

    let set = {
        let controller = controller.clone();
        let theme = theme.clone();
        Callback::from(move |next: Theme| {
            controller.set(next);
            theme.set(controller.get());
        })
    };

    {
        let theme = theme.clone();
        use_effect_with(controller.clone(), move |controller| {
            let listeners = subscribe(controller, theme);
            move || drop(listeners)
        });
    }

    let applier = RootApplier::from_config(controller.config());
    let suppress_transitions = controller.config().suppress_transitions;
    let context = ThemeHandle { theme: *theme, set };

    html! {
        <ContextProvider<ThemeHandle> {context}>
            <RootClassApplier {applier} theme={*theme} {suppress_transitions}/>
            {props.children.clone()}
        </ContextProvider<ThemeHandle>>
    }
}

fn subscribe(controller: &SharedController, theme: UseStateHandle<Theme>) -> Vec<EventListener> {
    let config = controller.config();
    let mut listeners = Vec::new();

    if config.system_enabled {
        let theme = theme.clone();
        let shared = controller.clone();
        listeners.extend(controller.system().subscribe(move |system| {
            if let Some(next) = shared.system_changed(system) {
                theme.set(next);
            }
        }));
    }

    if config.sync_across_tabs {
        let shared = controller.clone();
        listeners.push(BrowserStore::subscribe(&config.storage_key, move |value| {
            if let Some(next) = shared.storage_changed(value.as_deref()) {
                log::debug!("theme changed in another tab: {}", next);
                theme.set(next);
            }
        }));
    }

    listeners
}

#[derive(Properties, PartialEq)]
pub struct RootClassApplierProps {
    pub applier: RootApplier,
    pub theme: Theme,
    #[prop_or_default]
    pub suppress_transitions: bool,
}

/// Keeps the `<html>` marker in line with the effective theme.
///
/// The initial marker is already in place before mount (bootstrap script and
/// [`crate::run_app`]), so transitions are only suppressed for later changes.
#[function_component]
pub fn RootClassApplier(props: &RootClassApplierProps) -> Html {
    let applied = use_mut_ref(|| None::<Theme>);
    let suppress_transitions = props.suppress_transitions;

    use_effect_with(
        (props.applier.clone(), props.theme),
        move |(applier, theme)| {
            let previous = applied.replace(Some(*theme));
            if previous != Some(*theme) {
                let _guard = (suppress_transitions && previous.is_some())
                    .then(TransitionGuard::install)
                    .flatten();
                browser::apply_to_document(applier, *theme);
            }
        },
    );

    html! {}
}
