use std::time::Instant;

use crate::{
    composition::clock::FrameClock,
    composition::model::{Palette, SketchConfig},
    foundation::core::{Affine, CanvasSize, Rgba8, hsl_to_rgba8},
    foundation::error::MondrianResult,
    foundation::random::RandomSource,
    render::surface::Surface,
    render::text::Typography,
    scene::overlay::{Frame, Texture, Title},
    subdivide::cell::Cell,
    subdivide::engine::{self, ColorBudget},
};

/// Where a generation sits in its draw-once lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Setup has run; nothing has been painted yet.
    Built,
    /// The composition has been painted; only corrective coloring may
    /// still run.
    Drawn,
}

/// Everything one generation owns.
struct Generation {
    palette: Palette,
    budget: ColorBudget,
    id: u32,
    cells: Vec<Cell>,
    frame: Frame,
    texture: Texture,
    title: Title,
}

impl Generation {
    fn fresh(
        canvas: CanvasSize,
        config: &SketchConfig,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<Self> {
        let palette = Palette::jittered(&config.base_hues, config.hue_jitter, rng)?;
        let budget = config.color_policy.resolve(rng);
        budget.validate()?;
        let id = rng.int_range(10_000, 99_999) as u32;

        // Clamped to one pixel so degenerate canvases yield an immediate
        // leaf instead of a zero threshold.
        let min_size = config.min_cell_size(canvas).max(1.0);
        let root = Cell::root(canvas, min_size, rng)?;

        Ok(Self {
            palette,
            budget,
            id,
            cells: vec![root],
            frame: Frame::new(canvas, rng),
            texture: Texture::new(canvas, config.grain_coverage, config.grain_alpha),
            title: Title::new(id, canvas, config.scale, &config.credit),
        })
    }
}

/// Orchestrator for one composition lifecycle.
///
/// `setup` (also run by `new`, `reset`, and `resize`) discards all prior
/// state and builds a fresh generation; `draw` subdivides, colors, and
/// paints it exactly once. The corrective coloring budget is the one step
/// allowed to re-run after the paint.
pub struct Sketch {
    config: SketchConfig,
    canvas: CanvasSize,
    clock: FrameClock,
    generation: Generation,
    phase: Phase,
}

impl Sketch {
    /// Validate `config` and set up a first generation.
    pub fn new(
        canvas: CanvasSize,
        config: SketchConfig,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<Self> {
        config.validate()?;
        let clock = FrameClock::new(config.fps)?;
        let generation = Generation::fresh(canvas, &config, rng)?;
        Ok(Self {
            config,
            canvas,
            clock,
            generation,
            phase: Phase::Built,
        })
    }

    /// Discard the current generation and build a fresh one.
    pub fn setup(&mut self, rng: &mut dyn RandomSource) -> MondrianResult<()> {
        self.generation = Generation::fresh(self.canvas, &self.config, rng)?;
        self.phase = Phase::Built;
        self.clock.restart();
        Ok(())
    }

    /// Regenerate at the current canvas extent.
    pub fn reset(&mut self, rng: &mut dyn RandomSource) -> MondrianResult<()> {
        self.setup(rng)
    }

    /// Swap in a new square canvas extent and regenerate.
    pub fn resize(&mut self, size: u32, rng: &mut dyn RandomSource) -> MondrianResult<()> {
        self.canvas = CanvasSize::square(size);
        self.setup(rng)
    }

    /// Canvas extent of the current generation.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Composition id of the current generation.
    pub fn id(&self) -> u32 {
        self.generation.id
    }

    /// The active cell collection.
    pub fn cells(&self) -> &[Cell] {
        &self.generation.cells
    }

    /// The generation's jittered palette.
    pub fn palette(&self) -> &Palette {
        &self.generation.palette
    }

    /// The generation's resolved color budget.
    pub fn budget(&self) -> ColorBudget {
        self.generation.budget
    }

    /// File name the current generation exports under.
    pub fn export_file_name(&self) -> String {
        crate::encode::png::export_file_name(self.generation.id)
    }

    /// Run one full generation pass and paint it.
    ///
    /// On the first call after setup this subdivides to exhaustion, applies
    /// the color budget, paints everything, and returns `true`. Later calls
    /// paint nothing and return `false`; a corrective budget still re-runs
    /// its (idempotent) pass over the cells.
    #[tracing::instrument(skip(self, surface, typography, rng))]
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        typography: Option<&mut Typography>,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<bool> {
        let generation = &mut self.generation;

        if self.phase == Phase::Drawn {
            if generation.budget.is_corrective() {
                generation
                    .budget
                    .apply(&mut generation.cells, &generation.palette, rng)?;
            }
            return Ok(false);
        }

        engine::subdivide(&mut generation.cells, rng)?;
        generation
            .budget
            .apply(&mut generation.cells, &generation.palette, rng)?;

        self.paint(surface, typography, rng)?;
        self.phase = Phase::Drawn;
        Ok(true)
    }

    /// Throttled entry point for refresh-driven hosts; forwards to
    /// [`Sketch::draw`] only when the frame interval has elapsed.
    pub fn tick(
        &mut self,
        now: Instant,
        surface: &mut Surface,
        typography: Option<&mut Typography>,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<bool> {
        if !self.clock.should_render(now) {
            return Ok(false);
        }
        self.draw(surface, typography, rng)
    }

    fn paint(
        &self,
        surface: &mut Surface,
        typography: Option<&mut Typography>,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<()> {
        let generation = &self.generation;

        surface.fill_canvas(Rgba8::WHITE);

        match typography {
            Some(typography) => generation.title.show(surface, typography)?,
            None => tracing::warn!("no usable font; skipping the title overlay"),
        }

        let cx = f64::from(self.canvas.width) / 2.0;
        let cy = f64::from(self.canvas.height) / 2.0;
        surface.set_transform(
            Affine::translate((cx, cy))
                * Affine::scale(self.config.scale)
                * Affine::translate((-cx, -cy)),
        );

        generation.frame.show(surface);
        for cell in &generation.cells {
            let color = cell
                .hue()
                .map(|h| hsl_to_rgba8(h, 1.0, 0.5))
                .unwrap_or(Rgba8::WHITE);
            surface.fill_rect(cell.paint_rect(self.config.stroke_weight), color);
        }
        generation.texture.show(surface, rng);

        surface.reset_transform();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/sketch.rs"]
mod tests;
