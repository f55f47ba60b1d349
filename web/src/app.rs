use yew::prelude::*;

use crate::theme::{SharedController, ThemeProvider};
use crate::toggle::ThemeToggle;

const NAV_LINKS: &[(&str, &str)] = &[
    ("Features", "#features"),
    ("Pricing", "#pricing"),
    ("Docs", "#docs"),
];

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub controller: SharedController,
}

#[function_component]
pub fn App(props: &AppProps) -> Html {
    html! {
        <ThemeProvider controller={props.controller.clone()}>
            <SiteHeader/>
            <main id="content">
                <section class="hero">
                    <h1>{"Twilight"}</h1>
                    <p>{"Looks right in the dark, and in the light."}</p>
                </section>
            </main>
        </ThemeProvider>
    }
}

fn nav_links() -> Html {
    html! {
        <ul>
            { for NAV_LINKS.iter().map(|&(title, href)| html! {
                <li><a {href}>{title}</a></li>
            }) }
        </ul>
    }
}

/// Desktop and mobile navigation, each with exactly one theme toggle.
#[function_component]
pub fn SiteHeader() -> Html {
    html! {
        <header class="site-header">
            <nav class="nav-desktop" aria-label="Main">
                <a class="brand" href="/">{"Twilight"}</a>
                {nav_links()}
                <ThemeToggle/>
            </nav>
            <nav class="nav-mobile" aria-label="Mobile">
                {nav_links()}
                <ThemeToggle label="Theme"/>
            </nav>
        </header>
    }
}
