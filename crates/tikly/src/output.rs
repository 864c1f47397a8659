//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Tables are built from
//! a record's field descriptors, so every resource gets one without a
//! hand-written row type. Structured formats use serde, plain emits one key
//! per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};
use tikly_core::{Resource, Value};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of resources in the chosen format.
pub fn render_list<R>(format: &OutputFormat, data: &[R]) -> Result<String, CliError>
where
    R: Resource + Serialize,
{
    Ok(match format {
        OutputFormat::Table => record_table(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.iter().map(R::key).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single resource in the chosen format.
pub fn render_single<R>(format: &OutputFormat, data: &R, color: bool) -> Result<String, CliError>
where
    R: Resource + Serialize,
{
    Ok(match format {
        OutputFormat::Table => record_detail(data, color),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.key().to_owned(),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Record renderers ─────────────────────────────────────────────────

/// Wire text for a table cell. Unset scalars stay blank; booleans always
/// show.
fn cell(value: Option<Value>) -> String {
    match value {
        Some(v @ Value::Bool(_)) => v.encode(),
        Some(v) if !v.is_zero() => v.encode(),
        _ => String::new(),
    }
}

/// Table with one column per field that is set on at least one row. The
/// key column is always present.
fn record_table<R: Resource>(rows: &[R]) -> String {
    let key_index = R::field(R::KEY).map(|(i, _)| i);
    let columns: Vec<usize> = (0..R::FIELDS.len())
        .filter(|&i| {
            Some(i) == key_index
                || rows
                    .iter()
                    .any(|row| row.get(i).is_some_and(|v| !v.is_zero()))
        })
        .collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|&i| R::FIELDS[i].wire_name));
    for row in rows {
        builder.push_record(columns.iter().map(|&i| cell(row.get(i))));
    }
    builder.build().with(Style::rounded()).to_string()
}

/// `name: value` lines for every set field and every boolean.
fn record_detail<R: Resource>(record: &R, color: bool) -> String {
    let lines: Vec<(&str, String)> = R::FIELDS
        .iter()
        .enumerate()
        .filter_map(|(i, field)| {
            let value = record.get(i)?;
            let shown = matches!(value, Value::Bool(_)) || !value.is_zero();
            shown.then(|| (field.wire_name, value.encode()))
        })
        .collect();

    let width = lines.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(name, value)| {
            let label = format!("{name:>width$}");
            if color {
                format!("{}  {value}", label.cyan())
            } else {
                format!("{label}  {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tikly_core::{BridgeInterface, Scheduler};

    use super::*;

    fn bridges() -> Vec<BridgeInterface> {
        vec![
            BridgeInterface {
                id: "*1".into(),
                name: "br-lan".into(),
                mtu: 1500,
                ..BridgeInterface::default()
            },
            BridgeInterface {
                id: "*2".into(),
                name: "br-guest".into(),
                auto_mac: true,
                ..BridgeInterface::default()
            },
        ]
    }

    #[test]
    fn table_hides_columns_unset_on_every_row() {
        let table = record_table(&bridges());
        assert!(table.contains("mtu"));
        assert!(table.contains("auto-mac"));
        assert!(table.contains("br-guest"));
        assert!(!table.contains("admin-mac"));
        assert!(!table.contains("comment"));
    }

    #[test]
    fn empty_table_still_has_key_column() {
        let table = record_table::<BridgeInterface>(&[]);
        assert!(table.contains("name"));
    }

    #[test]
    fn detail_lists_set_fields_and_booleans() {
        let scheduler = Scheduler {
            name: "backup".into(),
            interval: 3600,
            ..Scheduler::default()
        };
        let detail = record_detail(&scheduler, false);
        assert!(detail.contains("name  backup"));
        assert!(detail.contains("interval  3600"));
        assert!(detail.contains("disabled  no"));
        assert!(!detail.contains("comment"));
    }

    #[test]
    fn plain_output_is_one_key_per_line() {
        let out = render_list(&OutputFormat::Plain, &bridges()).unwrap();
        assert_eq!(out, "br-lan\nbr-guest");
    }

    #[test]
    fn json_output_uses_serde_names() {
        let out = render_single(&OutputFormat::JsonCompact, &bridges()[0], false).unwrap();
        assert!(out.contains("\"name\":\"br-lan\""));
        assert!(out.contains("\"mtu\":1500"));
    }
}
