//! Rendering logic behind `folio-browse`.
//!
//! Lives in the library so the card and header layout stays testable; the
//! binary only wires stdin, argument parsing, and stdout around
//! [`render_browse_output`]. Input is a parsed feed, not a catalog: browse
//! renders whatever `folio-filter` matched without reloading manifests.

use crate::catalog::ItemId;
use crate::feed::FeedEntry;
use crate::filter::AvailabilitySummary;
use crate::session::DownloadLog;
use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

const MAX_ABOUT_CHARS: usize = 160;

/// Presentation state seeded from the command line.
#[derive(Debug, Default)]
pub struct BrowseOptions {
    /// Item to expand with a detail block. Must exist in the feed.
    pub open: Option<ItemId>,
    /// Ids to mark as already downloaded.
    pub downloads: DownloadLog,
}

/// Render the summary header and one card per feed entry into `writer`.
pub fn render_browse_output<W: fmt::Write>(
    entries: &[FeedEntry],
    options: &BrowseOptions,
    writer: &mut W,
) -> Result<()> {
    if let Some(open) = &options.open {
        if !entries.iter().any(|entry| &entry.item.id == open) {
            bail!("no item {} in the feed (check the id against the filter output)", open.0);
        }
    }

    render_header(entries, writer)?;
    writeln!(writer)?;

    if entries.is_empty() {
        writeln!(writer, "no items matched; relax the category or search and rerun folio-filter")?;
        return Ok(());
    }

    for (idx, entry) in entries.iter().enumerate() {
        render_card(idx + 1, entry, options, writer)?;
    }
    Ok(())
}

fn render_header(entries: &[FeedEntry], writer: &mut impl fmt::Write) -> fmt::Result {
    let availability = AvailabilitySummary::tally(entries.iter().map(|entry| &entry.item));
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        *categories.entry(entry.category_label.clone()).or_insert(0) += 1;
    }

    writeln!(writer, "folio browse summary")?;
    writeln!(writer, "====================")?;
    writeln!(writer, "total items : {}", availability.total)?;
    writeln!(writer, "available   : {}", availability.available)?;
    writeln!(writer, "coming soon : {}", availability.coming_soon)?;
    writeln!(writer, "categories  : {}", format_counts(&categories, "none"))?;
    Ok(())
}

fn render_card(
    idx: usize,
    entry: &FeedEntry,
    options: &BrowseOptions,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    let item = &entry.item;
    let mut headline = format!("[#{}] {} ({})", idx, item.title, entry.category_label);
    if item.availability.is_coming_soon() {
        headline.push_str(" [coming soon]");
    }
    if options.downloads.contains(&item.id) {
        headline.push_str(" [downloaded]");
    }
    writeln!(writer, "{}", headline)?;
    writeln!(writer, "  id:    {}", item.id.0)?;

    let about = item
        .blurb
        .as_deref()
        .filter(|blurb| !blurb.is_empty())
        .unwrap_or(item.description.as_str());
    writeln!(writer, "  about: {}", truncate_line(about))?;

    if !item.tags.is_empty() {
        writeln!(writer, "  tags:  {}", item.tags.join(", "))?;
    }
    if let Some(note) = file_note(&item.metadata) {
        writeln!(writer, "  file:  {}", note)?;
    }

    let link_names = present_link_names(entry);
    if !link_names.is_empty() {
        writeln!(writer, "  links: {}", link_names.join(", "))?;
    }

    if options.open.as_ref() == Some(&item.id) {
        render_detail(entry, writer)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn render_detail(entry: &FeedEntry, writer: &mut impl fmt::Write) -> fmt::Result {
    let item = &entry.item;
    writeln!(writer, "  description:")?;
    for line in item.description.lines() {
        writeln!(writer, "    {}", line.trim_end())?;
    }

    let links = &item.links;
    for (label, target) in [
        ("demo:    ", links.demo.as_deref()),
        ("source:  ", links.source.as_deref()),
        ("dataset: ", links.dataset.as_deref()),
        ("download:", links.download.as_deref()),
    ] {
        if let Some(target) = target {
            writeln!(writer, "  {} {}", label, target)?;
        }
    }

    if let Some(fields) = item.metadata.as_object() {
        if !fields.is_empty() {
            let rendered = fields
                .iter()
                .map(|(key, value)| format!("{}={}", key, metadata_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(writer, "  metadata: {}", rendered)?;
        }
    }
    Ok(())
}

/// Compact file descriptor from the conventional `file_type`/`file_size`
/// metadata fields, `None` when the item carries neither.
fn file_note(metadata: &Value) -> Option<String> {
    let file_type = metadata.get("file_type").and_then(Value::as_str);
    let file_size = metadata.get("file_size").and_then(Value::as_str);
    let parts: Vec<&str> = [file_type, file_size].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn present_link_names(entry: &FeedEntry) -> Vec<&'static str> {
    let links = &entry.item.links;
    let mut names = Vec::new();
    if links.demo.is_some() {
        names.push("demo");
    }
    if links.source.is_some() {
        names.push("source");
    }
    if links.dataset.is_some() {
        names.push("dataset");
    }
    if links.download.is_some() {
        names.push("download");
    }
    names
}

fn metadata_value(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

fn truncate_line(line: &str) -> String {
    let clean = line.trim_end();
    if clean.chars().count() <= MAX_ABOUT_CHARS {
        return clean.to_string();
    }
    let mut shortened = String::with_capacity(MAX_ABOUT_CHARS + 1);
    for (idx, ch) in clean.chars().enumerate() {
        if idx >= MAX_ABOUT_CHARS - 1 {
            shortened.push('…');
            break;
        }
        shortened.push(ch);
    }
    shortened
}

fn format_counts(map: &BTreeMap<String, usize>, empty_label: &str) -> String {
    if map.is_empty() {
        return empty_label.to_string();
    }
    map.iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}
