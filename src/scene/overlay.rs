use kurbo::Point;

use crate::{
    foundation::core::{CanvasSize, Rect, Rgba8},
    foundation::error::MondrianResult,
    foundation::math::map_range,
    foundation::random::RandomSource,
    render::surface::Surface,
    render::text::{Typography, measure},
};

/// Border backdrop filling the canvas extent.
///
/// The visible black lattice between cells is this frame showing through
/// the inset cell fills, so its shade is the composition's line color. The
/// shade is jittered once at construction and fixed for the generation.
#[derive(Clone, Debug)]
pub struct Frame {
    canvas: CanvasSize,
    color: Rgba8,
}

impl Frame {
    /// Frame sized to the canvas with a near-black jittered shade.
    pub fn new(canvas: CanvasSize, rng: &mut dyn RandomSource) -> Self {
        let v = rng.range(0.0, 12.0).round() as u8;
        Self {
            canvas,
            color: Rgba8::opaque(v, v, v),
        }
    }

    /// The jittered border color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Fill the canvas extent under the current transform.
    pub fn show(&self, surface: &mut Surface) {
        surface.fill_rect(self.canvas.rect(), self.color);
    }
}

/// Stochastic grain overlay.
///
/// Per-pixel Bernoulli sampling: each one-pixel cell carries a dot with a
/// probability that scales linearly with canvas width, each dot with its
/// own alpha drawn from the configured range.
#[derive(Clone, Debug)]
pub struct Texture {
    canvas: CanvasSize,
    coverage: f64,
    alpha: [f64; 2],
}

impl Texture {
    /// Grain sized to the canvas.
    ///
    /// `coverage_at_1000` is the dot probability at a 1000 px wide canvas;
    /// smaller canvases get proportionally sparser grain.
    pub fn new(canvas: CanvasSize, coverage_at_1000: f64, alpha: [f64; 2]) -> Self {
        let coverage = map_range(
            f64::from(canvas.width),
            0.0,
            1000.0,
            0.0,
            coverage_at_1000,
        )
        .clamp(0.0, 1.0);
        Self {
            canvas,
            coverage,
            alpha,
        }
    }

    /// Effective per-cell dot probability.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Scatter the grain dots under the current transform.
    pub fn show(&self, surface: &mut Surface, rng: &mut dyn RandomSource) {
        for x in 0..self.canvas.width {
            for y in 0..self.canvas.height {
                if !rng.chance(self.coverage) {
                    continue;
                }
                let alpha = rng.range(self.alpha[0], self.alpha[1]);
                let dot = Rect::new(
                    f64::from(x),
                    f64::from(y),
                    f64::from(x) + 1.0,
                    f64::from(y) + 1.0,
                );
                surface.fill_rect(dot, Rgba8::black_with_alpha(alpha));
            }
        }
    }
}

/// Static text block naming the composition.
#[derive(Clone, Debug)]
pub struct Title {
    headline: String,
    caption: String,
    credit: String,
    text_height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    color: Rgba8,
}

impl Title {
    /// Caption shown at the bottom-right margin.
    pub const CAPTION: &'static str = "Random Mondrian";

    /// Title block for composition `id`, with margins derived from the
    /// scale-down factor applied to the framed composition.
    pub fn new(id: u32, canvas: CanvasSize, scale: f64, credit: &str) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let text_height = (1.0 - scale) / 2.0 * h * 0.5;
        let left = (1.0 - scale) / 2.0 * w;

        Self {
            headline: format!("Composition N° {id}"),
            caption: Self::CAPTION.to_string(),
            credit: credit.to_string(),
            text_height,
            left,
            right: w - left,
            top: text_height * 0.5,
            bottom: h - text_height,
            color: Rgba8::BLACK,
        }
    }

    /// Headline text, `Composition N° <id>`.
    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Headline text size in pixels; captions use half of it.
    pub fn text_height(&self) -> f64 {
        self.text_height
    }

    /// Left margin of the text block.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Typeset and draw the three text lines.
    ///
    /// Headline top-left, caption bottom-right, credit bottom-left; an
    /// empty credit line is omitted. Degenerate margins (sub-pixel text)
    /// draw nothing.
    pub fn show(&self, surface: &mut Surface, typography: &mut Typography) -> MondrianResult<()> {
        if self.text_height < 1.0 {
            return Ok(());
        }

        let headline = typography.layout(&self.headline, self.text_height as f32, self.color)?;
        surface.draw_text(&headline, typography.font(), Point::new(self.left, self.top))?;

        let small = (self.text_height / 2.0) as f32;

        let caption = typography.layout(&self.caption, small, self.color)?;
        let (cw, ch) = measure(&caption);
        surface.draw_text(
            &caption,
            typography.font(),
            Point::new(self.right - cw, self.bottom - ch),
        )?;

        if !self.credit.is_empty() {
            let credit = typography.layout(&self.credit, small, self.color)?;
            let (_, crh) = measure(&credit);
            surface.draw_text(
                &credit,
                typography.font(),
                Point::new(self.left, self.bottom - crh),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
