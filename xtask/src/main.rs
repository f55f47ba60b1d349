use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use twilight_core::{ThemeConfig, bootstrap};

#[derive(Parser, Debug)]
#[command(version, about = "Site build helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the host page with the pre-paint theme bootstrap embedded
    Page {
        /// Theme configuration (TOML)
        #[arg(long, default_value = "site/theme.toml")]
        config: PathBuf,

        /// Page template containing the head placeholder
        #[arg(long, default_value = "site/index.template.html")]
        template: PathBuf,

        /// Where to write the rendered page
        #[arg(long, default_value = "site/index.html")]
        out: PathBuf,
    },
    /// Print the bootstrap script for a configuration
    Script {
        #[arg(long, default_value = "site/theme.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Page {
            config,
            template,
            out,
        } => {
            let config = read_config(&config)?;
            let template = fs::read_to_string(&template)
                .with_context(|| format!("reading {}", template.display()))?;
            let page = render_page(&template, &config)?;
            if let Some(dir) = out.parent() {
                fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            }
            fs::write(&out, page).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
        Command::Script { config } => {
            println!("{}", bootstrap::script(&read_config(&config)?));
        }
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<ThemeConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ThemeConfig =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(config)
}

fn render_page(template: &str, config: &ThemeConfig) -> Result<String> {
    match template.matches(bootstrap::HEAD_PLACEHOLDER).count() {
        1 => {}
        0 => bail!("template has no {} placeholder", bootstrap::HEAD_PLACEHOLDER),
        n => bail!("template has {} {} placeholders, expected one", n, bootstrap::HEAD_PLACEHOLDER),
    }
    let head = bootstrap::head_snippet(config).context("serializing theme config")?;
    Ok(template.replace(bootstrap::HEAD_PLACEHOLDER, &head))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<html><head>\n<!-- twilight:head -->\n</head><body></body></html>";

    #[test]
    fn page_gets_script_before_the_body() {
        let page = render_page(TEMPLATE, &ThemeConfig::default()).unwrap();

        let script = page.find("id=\"twilight-bootstrap\"").unwrap();
        let config = page.find("id=\"twilight-config\"").unwrap();
        let body = page.find("<body>").unwrap();
        assert!(script < config && config < body);
        assert!(!page.contains(bootstrap::HEAD_PLACEHOLDER));
    }

    #[test]
    fn template_needs_exactly_one_placeholder() {
        assert!(render_page("<html></html>", &ThemeConfig::default()).is_err());

        let doubled = format!("{TEMPLATE}{}", bootstrap::HEAD_PLACEHOLDER);
        assert!(render_page(&doubled, &ThemeConfig::default()).is_err());
    }

    #[test]
    fn shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../site/theme.toml");
        let config = read_config(&path).unwrap();
        assert_eq!(config, ThemeConfig::default());
    }
}
