//! Top-level CLI wrapper that delegates to the folio helper binaries.
//!
//! The binary keeps the public `folio --filter/--browse/--validate` interface
//! stable while resolving the real helper paths. It also injects `FOLIO_ROOT`
//! when possible so helpers can locate the content manifests even when
//! invoked from an installed location.

use anyhow::{Context, Result, bail};
use showfolio::{
    find_content_root, resolve_helper_binary,
    runtime::{find_on_path, helper_is_executable},
};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let content_root = find_content_root().ok();

    run_helper(&cli, content_root.as_deref())
}

struct Cli {
    command: CommandTarget,
    trailing_args: Vec<OsString>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CommandTarget {
    Filter,
    Browse,
    Validate,
}

impl CommandTarget {
    fn helper_name(self) -> &'static str {
        match self {
            CommandTarget::Filter => "folio-filter",
            CommandTarget::Browse => "folio-browse",
            CommandTarget::Validate => "folio-validate",
        }
    }
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let Some(flag) = args.next() else {
            usage(1);
        };

        let flag_str = flag
            .to_str()
            .with_context(|| "Invalid UTF-8 in command flag")?;

        let command = match flag_str {
            "--filter" | "-f" => CommandTarget::Filter,
            "--browse" | "-b" => CommandTarget::Browse,
            "--validate" | "-v" => CommandTarget::Validate,
            "--help" | "-h" => usage(0),
            _ => usage(1),
        };

        let trailing_args = args.collect();
        Ok(Self {
            command,
            trailing_args,
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: folio (--filter | --browse | --validate) [args]\n\nCommands:\n  --filter, -f     Filter a catalog and emit feed NDJSON (see folio-filter --help).\n  --browse, -b     Read feed NDJSON from stdin and print a card list.\n  --validate, -v   Check catalog manifests and report findings.\n\nExamples:\n  folio --filter --catalog projects | folio --browse\n  folio --filter --catalog resources --search python | folio --browse --open python-data-analytics"
    );
    std::process::exit(code);
}

/// Locate the requested helper.
///
/// The search order matches direct invocations: the content root's build
/// outputs (via the library resolver, which also checks next to the current
/// executable), then a sibling of this wrapper, then PATH.
fn resolve_helper(name: &str, content_root: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = content_root {
        if let Ok(path) = resolve_helper_binary(root, name) {
            return Ok(path);
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            let candidate = dir.join(name);
            if helper_is_executable(&candidate) {
                return Ok(candidate);
            }
        }
    }

    if let Some(path) = find_on_path(name) {
        return Ok(path);
    }

    bail!("Unable to locate helper '{name}'. Build the binaries with 'cargo build' or set FOLIO_ROOT.")
}

/// Execute the resolved helper, wiring FOLIO_ROOT when available.
fn run_helper(cli: &Cli, content_root: Option<&Path>) -> Result<()> {
    let helper_path = resolve_helper(cli.command.helper_name(), content_root)?;
    let mut command = Command::new(&helper_path);
    command.args(&cli.trailing_args);

    if let Some(root) = content_root {
        if env::var_os("FOLIO_ROOT").is_none() {
            command.env("FOLIO_ROOT", root);
        }
    }

    let status = command
        .status()
        .with_context(|| format!("Failed to execute {}", helper_path.display()))?;

    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        std::process::exit(code);
    }

    bail!("Helper terminated by signal")
}
