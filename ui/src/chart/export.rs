//! Saving a rendered chart outside the app.
//!
//! Desktop rasterises the SVG to PNG and writes it under the platform data
//! directory; the web build hands the SVG to the browser as a download.

use thiserror::Error;

use crate::core::format::slug;
use crate::core::profile::DisplayMeta;

use super::renderer::VisualArtifact;

#[derive(Debug, Error)]
pub enum ExportError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("chart markup could not be parsed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} image")]
    Pixmap { width: u32, height: u32 },
    #[cfg(not(target_arch = "wasm32"))]
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unable to determine export directory")]
    ExportDir,
    #[error("{0}")]
    Browser(&'static str),
}

pub fn export_file_name(meta: &DisplayMeta, extension: &str) -> String {
    format!(
        "profil-{}-{}.{extension}",
        slug(&meta.case_number),
        timestamp_slug()
    )
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Saves the artifact and returns a status line for the user.
pub fn export_artifact(artifact: &VisualArtifact, meta: &DisplayMeta) -> Result<String, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        let filename = export_file_name(meta, "svg");
        download_svg(&filename, artifact.svg())?;
        Ok("SVG download started".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = save_png(artifact, meta)?;
        Ok(format!("PNG saved to {}", path.display()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize(artifact: &VisualArtifact, system_fonts: bool) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut options = usvg::Options::default();
    if system_fonts {
        options.fontdb_mut().load_system_fonts();
    }
    let tree = usvg::Tree::from_str(artifact.svg(), &options)?;

    let (width, height) = (artifact.width(), artifact.height());
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.write_header()?.write_image_data(&rgba)?;
    }
    Ok(buffer)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(artifact: &VisualArtifact, meta: &DisplayMeta) -> Result<std::path::PathBuf, ExportError> {
    use std::fs;

    let pixmap = rasterize(artifact, true)?;
    let bytes = encode_png(&pixmap)?;

    let dir = desktop_export_dir()?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(export_file_name(meta, "png"));
    fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), "saved chart export");
    Ok(path)
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("org", "Cogprofile", "Cogprofile")
        .ok_or(ExportError::ExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(target_arch = "wasm32")]
fn download_svg(filename: &str, svg: &str) -> Result<(), ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Browser("Unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ExportError::Browser("Unable to create download"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Browser("Document unavailable"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ExportError::Browser("Unable to create anchor"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("Anchor cast failed"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or(ExportError::Browser("Missing body"))?;
    body.append_child(&anchor).ok();
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();
    Ok(())
}
