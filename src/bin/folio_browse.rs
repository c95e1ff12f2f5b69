//! Plain-text browser that turns feed NDJSON into a readable card list.
//!
//! This binary intentionally stays text-only so it can sit in pipelines like
//! `folio-filter --catalog projects | folio-browse`. It leans on the shared
//! feed reader and renderer, so the card layout is defined (and tested) in
//! the library rather than here.

use anyhow::{Result, anyhow, bail};
use showfolio::{BrowseOptions, ItemId, read_feed_entries, render_browse_output};
use std::env;
use std::io::{self, BufReader, IsTerminal};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_options()?;
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!(
            "folio-browse expects feed NDJSON on stdin (e.g. folio-filter --catalog projects | folio-browse)"
        );
    }

    let reader = BufReader::new(stdin.lock());
    let entries = read_feed_entries(reader)?;

    let mut output = String::new();
    render_browse_output(&entries, &options, &mut output)?;
    print!("{}", output);
    Ok(())
}

fn parse_options() -> Result<BrowseOptions> {
    let mut args = env::args_os();
    let _program = args.next();
    let mut options = BrowseOptions::default();

    while let Some(arg) = args.next() {
        let arg_str = arg
            .to_str()
            .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
        match arg_str {
            "--open" => {
                let value = next_value(&mut args, "--open")?;
                options.open = Some(ItemId(value));
            }
            "--downloaded" => {
                let value = next_value(&mut args, "--downloaded")?;
                // Set semantics: repeating an id changes nothing.
                options.downloads.record(ItemId(value));
            }
            "--help" | "-h" => usage(0),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(options)
}

fn next_value(args: &mut env::ArgsOs, flag: &str) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    value
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: folio-browse [--open ITEM_ID] [--downloaded ITEM_ID]...\n\nOptions:\n  --open ITEM_ID        Expand one feed item with a detail block.\n  --downloaded ITEM_ID  Mark an item as already downloaded (repeatable).\n  --help                Show this help text.\n\nExamples:\n  folio-filter --catalog resources | folio-browse\n  folio-filter --catalog resources --category templates | folio-browse --open cv-template"
    );
    std::process::exit(code);
}
