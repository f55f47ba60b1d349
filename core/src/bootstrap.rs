//! Pre-paint bootstrap.
//!
//! The wasm module loads asynchronously, so the theme has to be resolved by a
//! small synchronous script in `<head>` before the first paint. The script
//! follows the same precedence as [`ThemeController`](crate::ThemeController)
//! and marks the root the way [`RootApplier`](crate::RootApplier) does.

use alloc::format;
use alloc::string::String;
use alloc::string::ToString;

use crate::{MarkerStrategy, PREFERS_DARK_QUERY, ThemeConfig};

pub const SCRIPT_ELEMENT_ID: &str = "twilight-bootstrap";
pub const CONFIG_ELEMENT_ID: &str = "twilight-config";

/// Placeholder in a page template that [`head_snippet`] replaces.
pub const HEAD_PLACEHOLDER: &str = "<!-- twilight:head -->";

/// JavaScript that applies the stored, system or default theme to `<html>`.
///
/// Every step is wrapped so a blocked storage or missing `matchMedia` falls
/// through to the configured default instead of throwing.
pub fn script(config: &ThemeConfig) -> String {
    let key = js_string(&config.storage_key);
    let fallback = js_string(config.default_theme.scheme());
    let name = js_string(match config.marker {
        MarkerStrategy::Class => &config.class_name,
        MarkerStrategy::Attribute => &config.attribute_name,
    });

    let system = if config.system_enabled {
        format!(
            "if(t===null){{try{{var m=window.matchMedia({});if(m.media!==\"not all\")t=m.matches?\"dark\":\"light\"}}catch(e){{}}}}",
            js_string(PREFERS_DARK_QUERY)
        )
    } else {
        String::new()
    };

    let mark = match config.marker {
        MarkerStrategy::Class => format!("d.classList[t===\"dark\"?\"add\":\"remove\"]({name});"),
        MarkerStrategy::Attribute => format!(
            "if(t===\"dark\")d.setAttribute({name},\"dark\");else d.removeAttribute({name});"
        ),
    };

    format!(
        "(function(){{var d=document.documentElement,t=null;\
try{{t=window.localStorage.getItem({key})}}catch(e){{}}\
if(t!==\"light\"&&t!==\"dark\")t=null;\
{system}\
if(t===null)t={fallback};\
try{{{mark}d.style.colorScheme=t}}catch(e){{}}}})();"
    )
}

/// The `<head>` markup: the bootstrap script followed by the configuration
/// the wasm module reads back on start.
pub fn head_snippet(config: &ThemeConfig) -> serde_json::Result<String> {
    let json = serde_json::to_string(config)?.replace('<', "\\u003c");
    Ok(format!(
        "<script id=\"{SCRIPT_ELEMENT_ID}\">{}</script>\n\
<script type=\"application/json\" id=\"{CONFIG_ELEMENT_ID}\">{json}</script>",
        script(config)
    ))
}

/// A JavaScript string literal that cannot close the surrounding `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.into())
        .to_string()
        .replace('<', "\\u003c")
}
