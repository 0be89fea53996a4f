//! Mondrian is a procedural generator for Mondrian-style compositions.
//!
//! A composition is a recursively subdivided rectangular grid, selectively
//! colored under a global budget, framed, overlaid with grain texture and
//! title text, rendered once per reset to a CPU raster surface, and
//! exported as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Setup**: [`Sketch::new`] / [`Sketch::setup`] build a fresh
//!    generation: jittered [`Palette`], resolved [`ColorBudget`], root
//!    [`Cell`] sized to the canvas, and the overlay set.
//! 2. **Subdivide**: [`subdivide`] drives the cell collection to a
//!    leaf-only state, one uniformly random split at a time.
//! 3. **Color**: the budget assigns hues to a bounded subset of leaves.
//! 4. **Paint**: background, title, then the scaled frame, cells, and
//!    grain onto a [`Surface`]; exactly once per setup.
//! 5. **Export** (optional): [`save_png`] writes the readback frame as
//!    `Mondrian-<id>.png`.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injectable randomness**: every random draw flows through a
//!   [`RandomSource`], so tests substitute deterministic sequences while
//!   shipped generations stay fresh on every run.
//! - **Draw-once lifecycle**: a generation paints exactly once; only a
//!   corrective color budget may keep running afterwards.
//! - **No IO in the core**: fonts and PNG encoding sit at the crate
//!   boundary; subdivision and coloring are pure geometry over the
//!   injected randomness.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composition;
mod encode;
mod foundation;
mod render;
mod scene;
mod subdivide;

pub use composition::clock::FrameClock;
pub use composition::model::{ColorPolicyConfig, Palette, SketchConfig, fit_square_extent};
pub use composition::sketch::{Phase, Sketch};
pub use encode::png::{ensure_parent_dir, export_file_name, save_png};
pub use foundation::core::{Affine, CanvasSize, Point, Rect, Rgba8, Vec2, hsl_to_rgba8};
pub use foundation::error::{MondrianError, MondrianResult};
pub use foundation::math::{map_range, wrap};
pub use foundation::random::{RandomSource, ThreadRandom, shuffle};
pub use render::surface::{FrameRgba, Surface};
pub use render::text::{LoadedFont, Typography, measure};
pub use scene::overlay::{Frame, Texture, Title};
pub use subdivide::cell::{Axis, Cell};
pub use subdivide::engine::{ColorBudget, colored_count, subdivide};
