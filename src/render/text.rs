use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{MondrianError, MondrianResult},
};

/// Raw font bytes shared between the layout engine and the rasterizer.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    bytes: Arc<Vec<u8>>,
}

impl LoadedFont {
    /// Load a font file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> MondrianResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self {
            bytes: Arc::new(bytes),
        })
    }

    /// The raw font bytes.
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parley-backed text layout engine bound to one font.
///
/// The font is registered once at construction; every layout resolves to
/// its primary family.
pub struct Typography {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    font: LoadedFont,
    family: String,
}

impl Typography {
    /// Register `font` with fresh Parley contexts.
    pub fn new(font: LoadedFont) -> MondrianResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let layout_ctx = parley::LayoutContext::new();

        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.data().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MondrianError::render("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MondrianError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx,
            font,
            family,
        })
    }

    /// Bind an explicit font path, or scan conventional font directories
    /// for the first usable face. `Ok(None)` means text overlays should be
    /// skipped.
    pub fn discover(explicit: Option<&Path>) -> MondrianResult<Option<Self>> {
        if let Some(path) = explicit {
            return Ok(Some(Self::new(LoadedFont::from_path(path)?)?));
        }

        for candidate in candidate_font_files() {
            match LoadedFont::from_path(&candidate).and_then(Self::new) {
                Ok(typography) => {
                    tracing::debug!(font = %candidate.display(), "discovered title font");
                    return Ok(Some(typography));
                }
                Err(err) => {
                    tracing::warn!(font = %candidate.display(), %err, "skipping unusable font");
                }
            }
        }
        Ok(None)
    }

    /// The bound font.
    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Primary family name of the bound font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Shape and lay out a single-style text block.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> MondrianResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MondrianError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Laid-out block extent: maximum line advance by total line height.
pub fn measure(layout: &parley::Layout<Rgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

fn candidate_font_files() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("fonts"), PathBuf::from("assets")];
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    dirs.push(PathBuf::from("/System/Library/Fonts"));
    dirs.push(PathBuf::from("/Library/Fonts"));
    dirs.push(PathBuf::from("C:\\Windows\\Fonts"));

    let mut found = Vec::new();
    for dir in dirs {
        // System font trees nest; two extra levels cover the common layouts.
        collect_font_files(&dir, 2, &mut found);
        if !found.is_empty() {
            break;
        }
    }
    found
}

fn collect_font_files(dir: &Path, depth: u32, out: &mut Vec<PathBuf>) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if depth > 0 {
                collect_font_files(&path, depth - 1, out);
            }
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext == "ttf" || ext == "otf" || ext == "ttc" {
            out.push(path);
        }
    }
}
