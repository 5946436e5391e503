use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comic_core::SelectedFile;
use comic_engine::{decode_text, EngineEvent, EngineHandle, GenreFetch, PreviewPage};
use comic_logging::{comic_info, comic_warn};

use super::config::AppConfig;
use super::effects;

/// Fetches genres on the engine thread and prints one `id<TAB>name` line each.
///
/// Returns the tagged outcome so the caller can pick an exit status.
pub fn genres(config: &AppConfig, out: &mut impl Write) -> Result<GenreFetch> {
    let engine =
        EngineHandle::new(config.fetch_settings()).context("failed to start fetch engine")?;
    engine.request_genres(1);

    let result = match engine.recv() {
        Some(EngineEvent::GenresLoaded { result, .. }) => result,
        None => anyhow::bail!("fetch engine stopped before answering"),
    };

    for genre in result.genres() {
        writeln!(out, "{}\t{}", genre.id, genre.name)?;
    }
    Ok(result)
}

/// Attaches the preview to `page`, selects `files` and writes the rendered page.
///
/// Returns `false` when the page has nothing to attach to.
pub fn preview(
    config: &AppConfig,
    page: &Path,
    files: &[PathBuf],
    origin: Option<&str>,
    out: Option<&Path>,
) -> Result<bool> {
    let bytes = fs::read(page).with_context(|| format!("failed to read page {page:?}"))?;
    let decoded =
        decode_text(&bytes, None).with_context(|| format!("failed to decode page {page:?}"))?;

    let origin = origin.unwrap_or(&config.preview_origin);
    let Some(mut preview) = PreviewPage::attach(&decoded.text, origin) else {
        comic_warn!("Nothing to preview in {:?}", page);
        return Ok(false);
    };

    let selection = files
        .iter()
        .map(|path| read_selected_file(path))
        .collect::<Result<Vec<_>>>()?;
    effects::apply(&preview.on_selection_changed(selection));

    let html = preview.render();
    match out {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("failed to write {path:?}"))?;
            comic_info!("Wrote preview page to {:?}", path);
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(true)
}

fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let content = fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = SelectedFile::new(name, content);
    Ok(match media_type_for(path) {
        Some(media_type) => file.with_media_type(media_type),
        None => file,
    })
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "avif" => Some("image/avif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
