//! Shared output for the page-producing commands.

use color_eyre::eyre::{Result, WrapErr};
use planbook_core::compose::{Document, PageKind};
use planbook_core::config::ResolvedConfig;
use planbook_core::layout::PageSide;
use planbook_core::render::{HtmlSurface, render};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled, settings::Style};
use tracing::info;

use crate::OutputArgs;

/// Row of the dry-run page table.
#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Side")]
    side: &'static str,
    #[tabled(rename = "Page")]
    kind: String,
    #[tabled(rename = "Marks")]
    marks: &'static str,
    #[tabled(rename = "Ops")]
    ops: usize,
}

pub fn print_pages(doc: &Document) {
    if doc.pages.is_empty() {
        println!("(no pages)");
        return;
    }

    let rows: Vec<PageRow> = doc
        .pages
        .iter()
        .map(|p| PageRow {
            number: p.number,
            side: match p.side {
                PageSide::Left => "left",
                PageSide::Right => "right",
            },
            kind: p.kind.to_string(),
            marks: if p.registration_marks { "yes" } else { "" },
            ops: p.ops.len(),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);

    let fillers = doc.pages.iter().filter(|p| matches!(p.kind, PageKind::Filler)).count();
    println!("\nTotal: {} pages ({} blank)", doc.pages.len(), fillers);
}

pub fn print_json(doc: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).wrap_err("failed to serialize layout")?;
    println!("{json}");
    Ok(())
}

/// Where to write: the explicit path, or `default_name` inside `output.dir`.
pub fn destination(config: &ResolvedConfig, explicit: Option<&Path>, default_name: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config.output_dir.join(default_name),
    }
}

/// Render `doc` to HTML and write it in one go.
pub fn write_document(doc: &Document, config: &ResolvedConfig, path: &Path) -> Result<()> {
    let mut surface = HtmlSurface::new(&doc.title, config.palette, &config.page.font_family);
    render(doc, &mut surface).wrap_err("failed to render document")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, surface.into_string())
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), pages = doc.pages.len(), "wrote document");
    Ok(())
}

/// Print the page table for a dry run, otherwise write the document.
pub fn emit(doc: &Document, config: &ResolvedConfig, out: &OutputArgs, default_name: &str) -> Result<()> {
    if out.dry_run {
        print_pages(doc);
        return Ok(());
    }
    let path = destination(config, out.output.as_deref(), default_name);
    println!("Will save to {}", path.display());
    write_document(doc, config, &path)?;
    println!("Wrote {} pages to {}", doc.pages.len(), path.display());
    Ok(())
}
