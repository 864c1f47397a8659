//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::Password;
use owo_colors::OwoColorize;
use tikly_config::{ConfigError, KEYRING_SERVICE};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Mask every stored password.
fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
}

fn render_config(cfg: &Config, format: &OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(cfg).map_err(ConfigError::from)?
        }
        OutputFormat::Json => serde_json::to_string_pretty(cfg)?,
        OutputFormat::JsonCompact => serde_json::to_string(cfg)?,
        OutputFormat::Yaml => serde_yaml::to_string(cfg)?,
    })
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            redact(&mut cfg);
            let out = render_config(&cfg, &global.output)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let color = output::should_color(&global.color);
            let mut names: Vec<_> = cfg.profiles.iter().collect();
            names.sort_by(|a, b| a.0.cmp(b.0));

            let mut out = String::new();
            for (name, profile) in names {
                let is_default = cfg.default_profile.as_deref() == Some(name.as_str());
                let marker = if is_default { "*" } else { " " };
                let _ = if color && is_default {
                    writeln!(out, "{marker} {}  {}", name.green(), profile.host)
                } else {
                    writeln!(out, "{marker} {name}  {}", profile.host)
                };
            }
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let password = Password::new()
                .with_prompt(format!("Password for profile '{profile_name}'"))
                .interact()
                .map_err(prompt_err)?;

            let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
                .map_err(|e| CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to access keyring: {e}"),
                })?;
            entry
                .set_password(&password)
                .map_err(|e| CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to store password in keyring: {e}"),
                })?;

            if !global.quiet {
                eprintln!("Password stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
