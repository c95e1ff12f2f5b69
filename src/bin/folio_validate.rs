//! Validate catalog manifests before they ship.
//!
//! With no arguments the tool discovers the content root and checks both
//! builtin manifest files; explicit `--manifest` paths override that. Each
//! manifest goes through schema validation and index construction, then the
//! advisory cross-checks. The exit code is 0 only when every manifest is
//! clean, so the tool can gate a commit hook or CI job.

use anyhow::{Result, anyhow, bail};
use showfolio::{
    BuiltinCatalog, CatalogIndex, cross_catalog_findings, find_content_root, manifest_path,
    summarize_catalog, validate_catalog,
};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let manifests = parse_manifests()?;
    let paths = if manifests.is_empty() {
        let root = find_content_root()?;
        BuiltinCatalog::ALL
            .iter()
            .map(|catalog| manifest_path(&root, *catalog))
            .collect()
    } else {
        manifests
    };

    let mut clean = true;
    let mut indexes = Vec::new();
    for path in &paths {
        match CatalogIndex::load(path) {
            Ok(index) => {
                let findings = validate_catalog(&index);
                if findings.is_empty() {
                    let summary = summarize_catalog(&index);
                    println!(
                        "ok: {} ({} items, {} categories)",
                        path.display(),
                        summary.availability.total,
                        summary.categories.len()
                    );
                } else {
                    clean = false;
                    for finding in findings {
                        println!("finding: {}: {}", path.display(), finding);
                    }
                }
                indexes.push(index);
            }
            Err(err) => {
                clean = false;
                eprintln!("error: {}: {err:#}", path.display());
            }
        }
    }

    if indexes.len() > 1 {
        let refs: Vec<&CatalogIndex> = indexes.iter().collect();
        for finding in cross_catalog_findings(&refs) {
            clean = false;
            println!("finding: {}", finding);
        }
    }

    if !clean {
        bail!("catalog validation failed");
    }
    Ok(())
}

fn parse_manifests() -> Result<Vec<PathBuf>> {
    let mut args = env::args_os();
    let _program = args.next();
    let mut manifests = Vec::new();

    while let Some(arg) = args.next() {
        let arg_str = arg
            .to_str()
            .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
        match arg_str {
            "--manifest" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--manifest requires a value"))?;
                manifests.push(PathBuf::from(
                    value
                        .into_string()
                        .map_err(|_| anyhow!("--manifest must be valid UTF-8"))?,
                ));
            }
            "--help" | "-h" => usage(0),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(manifests)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: folio-validate [--manifest PATH]...\n\nOptions:\n  --manifest PATH   Validate an explicit manifest (repeatable). Without it,\n                    both builtin manifests under the content root are checked.\n  --help            Show this help text.\n\nExamples:\n  folio-validate\n  folio-validate --manifest content/projects.json --manifest drafts/new.json"
    );
    std::process::exit(code);
}
