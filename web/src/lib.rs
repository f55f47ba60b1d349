use clap::Parser;
use twilight_core::{PreferenceStore, RootApplier, ThemeConfig, bootstrap};
use wasm_bindgen::prelude::*;

mod app;
mod browser;
mod theme;
mod toggle;

pub use app::*;
pub use browser::*;
pub use theme::*;
pub use toggle::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Forget the stored theme preference before starting
    #[arg(long)]
    reset: bool,
}

/// Reads the configuration the page template embedded next to the
/// bootstrap script, so both resolve the theme the same way.
fn load_config() -> ThemeConfig {
    use gloo::utils::document;

    let Some(element) = document().get_element_by_id(bootstrap::CONFIG_ELEMENT_ID) else {
        log::warn!("no embedded theme config, using defaults");
        return ThemeConfig::default();
    };
    let text = element.text_content().unwrap_or_default();
    let config = match serde_json::from_str::<ThemeConfig>(&text) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("unreadable theme config, using defaults: {}", err);
            return ThemeConfig::default();
        }
    };
    if let Err(err) = config.validate() {
        log::warn!("invalid theme config, using defaults: {}", err);
        return ThemeConfig::default();
    }
    config
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{body, document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = Args::try_parse_from(location_hash.split(['#', '&']))
        .unwrap_or_else(|_| Args::parse_from([""]));
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let config = load_config();
    let controller = BrowserController::new(config, BrowserStore, MediaQuerySignal::new());
    if args.reset {
        log::info!("forgetting stored theme preference");
        if let Err(err) = controller.store().remove(&controller.config().storage_key) {
            log::warn!("could not reset theme preference: {}", err);
        }
    }

    // Synchronous, before anything is mounted; matches what the bootstrap
    // script did unless it was missing from the page.
    let theme = controller.initialize();
    log::debug!("theme preference: {}", controller.preference());
    apply_to_document(&RootApplier::from_config(controller.config()), theme);

    let root = document()
        .get_element_by_id("app")
        .unwrap_or_else(|| body().into());

    log::debug!("App started");
    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            controller: controller.into(),
        },
    )
    .render();
}
