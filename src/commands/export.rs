//! Static export

use anyhow::{bail, Result};
use chrono::Utc;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::render::{render_document, render_not_found};
use crate::resolver::{ContentKey, ResolutionOutcome, RoutePath};
use crate::server::{ai_txt_body, devtools_body, AI_TXT_PATH, DEVTOOLS_PATH};
use crate::Site;

/// What an export wrote
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub skipped: usize,
    pub assets: usize,
}

/// Export the whole site as static files into `output`, or the configured output directory
pub async fn run(site: &Site, output: Option<&Path>) -> Result<ExportSummary> {
    let start = std::time::Instant::now();
    let out_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| site.output_dir.clone());

    check_output_dir(site, &out_dir)?;

    if out_dir.exists() {
        fs::remove_dir_all(&out_dir)?;
        tracing::debug!("Deleted: {:?}", out_dir);
    }
    fs::create_dir_all(&out_dir)?;

    let mut summary = ExportSummary {
        assets: copy_public(&site.public_dir, &out_dir)?,
        ..Default::default()
    };

    let config = &site.config;
    let resolver = site.resolver();
    let nav = resolver.store().page_map().await?;

    for entry in &nav {
        let route = RoutePath::new(entry.key.segments());
        let resolution = resolver.resolve(&route).await;

        match resolution.outcome {
            ResolutionOutcome::Found {
                document,
                toc,
                metadata,
            } => {
                let html = render_document(config, &document, &toc, &metadata, &nav);
                write_file(&out_dir.join(page_file(&entry.key, config.trailing_slash)), &html)?;
                summary.pages += 1;
            }
            ResolutionOutcome::NotFound { .. } => {
                tracing::warn!("Skipping {} ({}), it did not resolve", entry.key, entry.source);
                summary.skipped += 1;
            }
        }
    }

    let not_found = resolver.synthesizer().not_found();
    write_file(&out_dir.join("404.html"), &render_not_found(config, &not_found))?;

    write_file(
        &out_dir.join(AI_TXT_PATH.trim_start_matches('/')),
        &ai_txt_body(&config.policy, Utc::now().date_naive()),
    )?;
    write_file(
        &out_dir.join(DEVTOOLS_PATH.trim_start_matches('/')),
        devtools_body(),
    )?;

    tracing::info!(
        "Exported {} pages and {} assets to {:?} in {:.2}s",
        summary.pages,
        summary.assets,
        out_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Refuse an output directory that would clear site sources
///
/// The output may live inside the site root but must not be the root or
/// one of its ancestors. It must not overlap the content or public
/// directories at all.
fn check_output_dir(site: &Site, out_dir: &Path) -> Result<()> {
    let target = resolve_path(out_dir)?;

    let root = resolve_path(&site.base_dir)?;
    if root.starts_with(&target) {
        bail!("Refusing to export into {:?}, it contains the site", out_dir);
    }

    for dir in [&site.content_dir, &site.public_dir] {
        let dir = resolve_path(dir)?;
        if dir.starts_with(&target) || target.starts_with(&dir) {
            bail!("Refusing to export into {:?}, it overlaps {:?}", out_dir, dir);
        }
    }
    Ok(())
}

/// Absolute form of `path` with `..` and symlinks resolved, even if its tail does not exist yet
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    while !existing.exists() {
        let mut components = existing.components();
        match components.next_back() {
            Some(component) => tail.push(component),
            None => break,
        }
        existing = components.as_path();
    }

    let mut resolved = fs::canonicalize(existing)?;
    for component in tail.into_iter().rev() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// Output file of a page relative to the export root
fn page_file(key: &ContentKey, trailing_slash: bool) -> PathBuf {
    let mut segments: Vec<&str> = key.segments().collect();
    let Some(last) = segments.pop() else {
        return PathBuf::from("index.html");
    };

    let mut path: PathBuf = segments.into_iter().collect();
    if trailing_slash {
        path.push(last);
        path.push("index.html");
    } else {
        path.push(format!("{}.html", last));
    }
    path
}

/// Copy public assets verbatim, returning how many files were copied
fn copy_public(public_dir: &Path, out_dir: &Path) -> Result<usize> {
    if !public_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(public_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(public_dir)?;
        let dest = out_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
