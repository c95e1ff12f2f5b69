//! Filter a catalog and emit matching items as feed NDJSON.
//!
//! This is the producer half of the pipeline: it loads one catalog (builtin
//! or an explicit manifest file), applies the category/search query or the
//! featured view, and prints one feed entry per line for `folio-browse` to
//! consume. Zero matches are a valid outcome and exit 0 with no output.

use anyhow::{Context, Result, anyhow, bail};
use showfolio::{
    BuiltinCatalog, CatalogIndex, CatalogQuery, CategorySelector, FeedEntry,
    ensure_selector_declared, featured_items, filter_items,
};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let index = match &cli.source {
        Source::Builtin(catalog) => catalog.index()?,
        Source::Manifest(path) => CatalogIndex::load(path)?,
    };

    let items = if cli.featured {
        featured_items(&index)
    } else {
        ensure_selector_declared(&index, &cli.category)?;
        let query = CatalogQuery {
            category: cli.category,
            search: cli.search,
        };
        filter_items(&index, &query)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for item in items {
        let entry = FeedEntry::from_index(&index, item);
        let line = serde_json::to_string(&entry).context("serializing feed entry")?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

enum Source {
    Builtin(BuiltinCatalog),
    Manifest(PathBuf),
}

struct Cli {
    source: Source,
    category: CategorySelector,
    search: String,
    featured: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let mut catalog = None;
        let mut manifest = None;
        let mut category = None;
        let mut search = None;
        let mut featured = false;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => {
                    let value = next_value(&mut args, "--catalog")?;
                    catalog = Some(BuiltinCatalog::try_from(value.as_str())?);
                }
                "--manifest" => {
                    manifest = Some(PathBuf::from(next_value(&mut args, "--manifest")?));
                }
                "--category" => category = Some(next_value(&mut args, "--category")?),
                "--search" => search = Some(next_value(&mut args, "--search")?),
                "--featured" => featured = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        let source = match (catalog, manifest) {
            (Some(catalog), None) => Source::Builtin(catalog),
            (None, Some(path)) => Source::Manifest(path),
            (Some(_), Some(_)) => bail!("--catalog and --manifest are mutually exclusive"),
            (None, None) => bail!("one of --catalog or --manifest is required"),
        };

        if featured && (category.is_some() || search.is_some()) {
            bail!("--featured cannot be combined with --category or --search");
        }

        Ok(Self {
            source,
            category: CategorySelector::parse(category.as_deref().unwrap_or("all")),
            search: search.unwrap_or_default(),
            featured,
        })
    }
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
        "Usage: folio-filter (--catalog NAME | --manifest PATH) [--category ID] [--search TEXT] [--featured]\n\nOptions:\n  --catalog NAME    Builtin catalog to filter (projects|resources).\n  --manifest PATH   Filter an explicit manifest file instead.\n  --category ID     Keep items in one declared category (default: all).\n  --search TEXT     Case-insensitive match over title, description, and tags.\n  --featured        Emit the featured shelf instead of a filtered view.\n  --help            Show this help text.\n\nExamples:\n  folio-filter --catalog projects --category healthcare_ai\n  folio-filter --catalog resources --search python | folio-browse"
    );
    std::process::exit(code);
}
