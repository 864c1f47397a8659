//! Renders the `tikly` man pages into `$OUT_DIR/man`.
//!
//! Produces `tikly.1` plus one page per resource menu and verb, e.g.
//! `tikly-firewall-filter.1` and `tikly-firewall-filter-list.1`, so
//! packagers can install the whole set from one directory.

use std::fs;
use std::path::Path;

use clap::CommandFactory;

// The argument tree needs only clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    render_tree(&cli::Cli::command(), &man_dir);
}

/// Write the page for `cmd`, then recurse into its visible subcommands
/// with the parent name as prefix (`tikly-bridge-port-add`).
fn render_tree(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();
    let page = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
    fs::write(&page, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", page.display()));

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        render_tree(&sub.clone().name(format!("{name}-{}", sub.get_name())), dir);
    }
}
