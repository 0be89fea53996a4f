use crate::{
    foundation::core::{Affine, CanvasSize, Rect, Rgba8},
    foundation::error::{MondrianError, MondrianResult},
    render::text::LoadedFont,
};

/// One rendered frame as straight row-major RGBA8.
///
/// The surface composites over an opaque background, so the premultiplied
/// pixmap bytes and straight RGBA coincide by the time a frame is read
/// back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    /// Whether the bytes are premultiplied.
    pub premultiplied: bool,
}

/// CPU raster target for one composition.
///
/// Wraps a `vello_cpu` render context and pixmap pair; drawing operations
/// accumulate until [`Surface::render`] flushes them into pixels.
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a surface for the canvas extent.
    pub fn new(canvas: CanvasSize) -> MondrianResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MondrianError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MondrianError::render("canvas height exceeds u16"))?;

        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Set the transform applied to subsequent drawing operations.
    pub fn set_transform(&mut self, transform: Affine) {
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    /// Restore the identity transform.
    pub fn reset_transform(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Fill a rectangle under the current transform.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill the whole surface, ignoring the current transform.
    pub fn fill_canvas(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.fill_rect(
            Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)),
            color,
        );
    }

    /// Draw a laid-out text block with its top-left corner at `origin`.
    pub fn draw_text(
        &mut self,
        layout: &parley::Layout<Rgba8>,
        font: &LoadedFont,
        origin: kurbo::Point,
    ) -> MondrianResult<()> {
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.data().to_vec()),
            0,
        );
        let (dx, dy) = (origin.x as f32, origin.y as f32);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: dx + g.x,
                    y: dy + g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        Ok(())
    }

    /// Flush accumulated operations into the pixmap.
    pub fn render(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Read the current pixels back as a frame.
    pub fn frame(&self) -> FrameRgba {
        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
