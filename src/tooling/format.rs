//! Format reconcile, sync and registry results as text.

use crate::links::LinkEntry;
use crate::reconcile::ReconciliationStats;
use crate::sync::{AddLinkOutcome, EntryOutcome, SyncReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the outcome of a file-to-file transfer.
pub fn format_transfer_text(stats: &ReconciliationStats, output: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Endpoint Transfer")));
    out.push_str(&format!(
        "  Extracted {} endpoints from the old collection.\n",
        stats.old_endpoint_count
    ));
    out.push_str(&format!(
        "  Updated {} endpoints in the new collection.\n",
        stats.updated_count()
    ));
    out.push_str(&format!(
        "  Total events updated: {}\n",
        stats.updated_events_count
    ));
    if stats.skipped_nodes > 0 {
        out.push_str(&format!("  Skipped nodes: {}\n", stats.skipped_nodes));
    }
    out.push_str(&format!("  Output: {}\n", output.display()));

    if !stats.updated_endpoints.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n\n", format_section_heading("Updated endpoints")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["#", "Endpoint"]);
        for (i, key) in stats.updated_endpoints.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), key.to_string()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// Format a sync run, one row per registry entry.
pub fn format_sync_report_text(report: &SyncReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Sync")));
    if report.results.is_empty() {
        out.push_str("No links registered.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Link", "Status", "Collection UID", "Detail"]);
    for result in &report.results {
        let (status, uid, detail) = match &result.outcome {
            EntryOutcome::Unchanged => ("unchanged", result.previous_uid.clone(), String::new()),
            EntryOutcome::Updated {
                collection_uid,
                stats,
            } => (
                "updated",
                collection_uid.clone(),
                format!(
                    "{} endpoints, {} events carried over",
                    stats.updated_count(),
                    stats.updated_events_count
                ),
            ),
            EntryOutcome::Failed { reason } => {
                ("failed", result.previous_uid.clone(), reason.clone())
            }
        };
        table.add_row(vec![result.link.clone(), status.to_string(), uid, detail]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Unchanged: {}  Updated: {}  Failed: {}\n",
        report.unchanged_count(),
        report.updated_count(),
        report.failed_count()
    ));
    out
}

/// Format the registry contents.
pub fn format_links_text(entries: &[LinkEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Links")));
    if entries.is_empty() {
        out.push_str("No links registered.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Link", "Collection UID", "Hash", "Last Updated"]);
    for entry in entries {
        table.add_row(vec![
            entry.link.clone(),
            entry.collection_uid.clone(),
            short_hash(&entry.hash),
            entry.last_updated.clone(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_add_link_text(link: &str, outcome: &AddLinkOutcome) -> String {
    match outcome {
        AddLinkOutcome::AlreadyRegistered => {
            format!("Link already registered, nothing to do: {}", link)
        }
        AddLinkOutcome::Registered {
            collection_uid,
            stats,
        } => {
            let mut out = format!("Registered {} as collection {}", link, collection_uid);
            if let Some(stats) = stats {
                out.push_str(&format!(
                    " ({} endpoints, {} events carried over)",
                    stats.updated_count(),
                    stats.updated_events_count
                ));
            }
            out
        }
    }
}

fn short_hash(hash: &str) -> String {
    if hash.chars().count() > 12 {
        format!("{}...", hash.chars().take(12).collect::<String>())
    } else {
        hash.to_string()
    }
}
