// SPDX-License-Identifier: MIT
//
// prism — design-token theming with WCAG contrast checks.
//
// The binary wires the crates together against a file-backed store:
//
//   p-color → hex tokens, sRGB, HSL
//   p-theme → palette, CSS properties, contrast engine, rule validation
//   p-sync  → synchronizer (hydrate, project, persist, validate)
//
// Each invocation is one "page session":
//
//   load config → FileStorage(<data-dir>) → Synchronizer::attach
//     → command (mutate / validate / print) → snapshot saved on mutation
//
// The style root is an in-memory Document, so `validate` checks exactly the
// properties a page would carry after projection.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use p_color::Rgb;
use p_sync::{Document, FileStorage, SyncConfig, Synchronizer};
use p_theme::contrast::{self, Level};
use p_theme::css::{css_custom_properties, stylesheet};
use p_theme::generate::{generate_scale, validate_scale};
use p_theme::validate::Severity;
use p_theme::{ColorPath, PalettePatch, ValidationResult, ValidationSummary};

/// Default light and dark backgrounds for scale reports.
const LIGHT_BG: &str = "#FFFFFF";
const DARK_BG: &str = "#0A0E27";

// ─── Command line ───────────────────────────────────────────────────────────

/// Design-token theming with WCAG contrast validation.
#[derive(Parser)]
#[command(name = "prism", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the stored theme (default: <data dir>/prism)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON config file (storageKey, defaultMode, rules)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Contrast ratio and WCAG level for one color pair
    Check {
        foreground: String,
        background: String,
        /// Judge as large text (18pt, or 14pt bold)
        #[arg(long)]
        large: bool,
    },

    /// Run the rule set against the stored theme
    Validate {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one palette color (e.g. primary.900, accent.cyan)
    Get { path: String },

    /// Set one palette color and persist it
    Set { path: String, color: String },

    /// Switch between light and dark
    Toggle,

    /// Restore the default palette
    Reset {
        /// Also delete the stored snapshot
        #[arg(long)]
        clear: bool,
    },

    /// Print the theme as a stylesheet
    Css {
        #[arg(long, default_value = ":root")]
        selector: String,
    },

    /// Generate an 11-step scale from one color and report its contrast
    Scale {
        base: String,
        #[arg(long, default_value = LIGHT_BG)]
        light_bg: String,
        #[arg(long, default_value = DARK_BG)]
        dark_bg: String,
    },

    /// Nearest color of the same hue that reaches AA (or AAA) on a background
    Suggest {
        color: String,
        background: String,
        #[arg(long)]
        aaa: bool,
    },
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// `<platform data dir>/prism`, or `./prism` if the platform has none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("prism")
}

fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// Reject anything that is not a hex color before it reaches the palette.
fn parse_color(s: &str) -> Result<Rgb> {
    Rgb::from_hex(s).with_context(|| format!("'{s}' is not a color (expected #RRGGBB)"))
}

// ─── Output ─────────────────────────────────────────────────────────────────

const fn mark(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}

fn print_results(results: &[ValidationResult]) {
    let width = results.iter().map(|r| r.rule.id.len()).max().unwrap_or(0);
    for r in results {
        let badge = match r.severity {
            Severity::Success => "ok  ",
            Severity::Warning => "warn",
            Severity::Error => "FAIL",
        };
        println!(
            "{badge} {id:<width$}  {ratio:>5.2}:1  {level:<4}  {fg} on {bg}",
            id = r.rule.id,
            ratio = r.ratio,
            level = r.level.as_str(),
            fg = r.foreground,
            bg = r.background,
        );
    }
    let summary = ValidationSummary::from_results(results);
    println!();
    println!(
        "{}/{} passed ({}%), {} failed",
        summary.passed, summary.total, summary.percentage, summary.failed
    );
}

// ─── Main ───────────────────────────────────────────────────────────────────

type Session = Synchronizer<FileStorage, Document>;

fn main() -> Result<ExitCode> {
    let Cli { verbose, data_dir, config, command } = Cli::parse();
    setup_logging(verbose);

    // Only commands that read or change the stored theme open a session.
    let open = move || -> Result<Session> {
        let config = load_config(config.as_deref())?;
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let mut sync = Synchronizer::with_config(config, FileStorage::new(&data_dir), Document::new());
        sync.attach();
        Ok(sync)
    };

    match command {
        Commands::Check { foreground, background, large } => {
            parse_color(&foreground)?;
            parse_color(&background)?;
            let check = contrast::check(&foreground, &background, large);
            println!("ratio:  {:.2}:1", check.ratio);
            println!("level:  {}", check.level);
            println!("AA:     {}", mark(check.meets_aa));
            println!("AAA:    {}", mark(check.meets_aaa));
            if !check.passes {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Validate { json } => {
            let sync = open()?;
            let results = sync.validate_accessibility();
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
            if results.iter().any(|r| !r.passes) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Get { path } => {
            let path: ColorPath = path.parse()?;
            let sync = open()?;
            println!("{}", sync.palette().get(path));
        }
        Commands::Set { path, color } => {
            let path: ColorPath = path.parse()?;
            let rgb = parse_color(&color)?;
            let mut sync = open()?;
            sync.update_colors(&PalettePatch::new().with(path, rgb));
            sync.save().context("failed to save theme")?;
            println!("{path} = {}", sync.palette().get(path));
        }
        Commands::Toggle => {
            let mut sync = open()?;
            sync.toggle_theme();
            sync.save().context("failed to save theme")?;
            println!("{}", sync.mode());
        }
        Commands::Reset { clear } => {
            let mut sync = open()?;
            sync.reset_colors();
            if clear {
                sync.clear_storage().context("failed to clear stored theme")?;
            } else {
                sync.save().context("failed to save theme")?;
            }
            println!("palette reset ({} mode)", sync.mode());
        }
        Commands::Css { selector } => {
            let sync = open()?;
            let properties = css_custom_properties(sync.palette());
            print!("{}", stylesheet(&properties, &selector));
            let mode = sync.mode();
            println!("/* mode: {mode} (class \"{}\") */", mode.class());
        }
        Commands::Scale { base, light_bg, dark_bg } => {
            let scale =
                generate_scale(&base).with_context(|| format!("cannot build a scale from '{base}'"))?;
            let report = validate_scale(&scale, &light_bg, &dark_bg).context("invalid background")?;
            println!("step  color     on {light_bg}   on {dark_bg}");
            for step in report {
                println!(
                    "{:>4}  {}  {:>6.2} {:<4}  {:>6.2} {}",
                    step.step.as_str(),
                    step.color,
                    step.light_bg_contrast,
                    if step.light_bg_passes { "AA" } else { "-" },
                    step.dark_bg_contrast,
                    if step.dark_bg_passes { "AA" } else { "-" },
                );
            }
        }
        Commands::Suggest { color, background, aaa } => {
            parse_color(&color)?;
            parse_color(&background)?;
            let target = if aaa { Level::Aaa } else { Level::Aa };
            let suggestion = contrast::suggest_accessible(&color, &background, target);
            let ratio = contrast::contrast_ratio(suggestion.as_str(), &background);
            println!("{suggestion}  ({ratio:.2}:1 on {background})");
            if contrast::classify_ratio(ratio, false) < target {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["prism", "validate", "-vv", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Commands::Validate { json: false }));
    }

    #[test]
    fn missing_config_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.storage_key, "portfolio-theme");
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prism.json");
        fs::write(&path, r#"{ "storageKey": "site", "rules": [] }"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.storage_key, "site");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn bad_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("broken.json"), "{err}");
    }

    #[test]
    fn colors_are_checked_before_use() {
        assert!(parse_color("#0A0E27").is_ok());
        assert!(parse_color("navy").is_err());
    }

    #[test]
    fn session_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            let mut sync: Session =
                Synchronizer::new(FileStorage::new(dir.path()), Document::new());
            sync.attach();
            sync
        };

        let mut first = open();
        first.update_colors(&PalettePatch::new().with("accent.cyan".parse().unwrap(), "#22D3EE"));
        first.save().unwrap();

        let second = open();
        assert_eq!(second.palette().get("accent.cyan".parse().unwrap()).as_str(), "#22D3EE");
    }
}
