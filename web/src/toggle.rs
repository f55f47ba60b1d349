use twilight_core::{MountGate, Theme, ToggleState};
use yew::prelude::*;

use crate::theme::use_theme;

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
    /// Visible text next to the icon, for roomier layouts like the mobile menu.
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
}

/// Light/dark switch.
///
/// Until the first client-side mount has completed this only renders an
/// inert placeholder of the same size, so it never shows an icon the
/// bootstrap render could not have known.
#[function_component]
pub fn ThemeToggle(props: &ThemeToggleProps) -> Html {
    let handle = use_theme();
    let gate = use_state_eq(MountGate::default);
    {
        let gate = gate.clone();
        use_effect_with((), move |_| gate.set(MountGate::Ready));
    }

    html! {
        <ToggleView
            state={ToggleState::new(*gate, handle.theme)}
            label={props.label.clone()}
            class={props.class.clone()}
            onactivate={handle.set.clone()}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct ToggleViewProps {
    pub state: ToggleState,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    /// Receives the requested theme on every press.
    #[prop_or_default]
    pub onactivate: Callback<Theme>,
}

/// Markup for one [`ToggleState`].
#[function_component]
pub fn ToggleView(props: &ToggleViewProps) -> Html {
    let state = props.state;
    let class = classes!("theme-toggle", props.class.clone());
    let label = props.label.clone().map(|label| {
        html! { <span class="theme-toggle-label">{label}</span> }
    });

    // same children as the button, minus the glyph
    let Some(face) = state.face() else {
        return html! {
            <span class={classes!(class, "theme-toggle-placeholder")} aria-hidden="true">
                <span class="theme-toggle-slot"></span>
                {label}
            </span>
        };
    };

    let onclick = {
        let onactivate = props.onactivate.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(next) = state.activate() {
                log::debug!("theme toggled: {}", next);
                onactivate.emit(next);
            }
        })
    };

    html! {
        <button
            type="button"
            {class}
            {onclick}
            aria-label={ToggleState::ACCESSIBLE_NAME}
            title={face.hint}
        >
            <span class="theme-toggle-icon" aria-hidden="true">{face.icon}</span>
            {label}
        </button>
    }
}
