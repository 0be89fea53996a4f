use std::path::Path;

use anyhow::Context as _;

use crate::{foundation::error::MondrianResult, render::surface::FrameRgba};

/// Export file name for a composition id.
pub fn export_file_name(id: u32) -> String {
    format!("Mondrian-{id}.png")
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> MondrianResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode a frame as PNG at `path`.
pub fn save_png(frame: &FrameRgba, path: &Path) -> MondrianResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
