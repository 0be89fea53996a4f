use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::CanvasSize,
    foundation::error::{MondrianError, MondrianResult},
    foundation::math::wrap,
    foundation::random::RandomSource,
    subdivide::engine::ColorBudget,
};

/// Ordered hue set used by the coloring passes.
///
/// Hues are degrees in `[0, 360)`. A generation perturbs the configured
/// base hues once and keeps the result for its whole lifetime.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    hues: Vec<f64>,
}

impl Palette {
    /// Build a palette from explicit hues.
    pub fn new(hues: Vec<f64>) -> MondrianResult<Self> {
        if hues.is_empty() {
            return Err(MondrianError::validation("palette must not be empty"));
        }
        if hues.iter().any(|h| !h.is_finite()) {
            return Err(MondrianError::validation("palette hues must be finite"));
        }
        Ok(Self {
            hues: hues.iter().map(|&h| wrap(h, 0.0, 360.0)).collect(),
        })
    }

    /// Perturb each base hue by a uniform draw in `[-amount, amount)` and
    /// wrap back into `[0, 360)`.
    pub fn jittered(
        base: &[f64],
        amount: f64,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<Self> {
        Self::new(
            base.iter()
                .map(|&h| h + rng.range(-amount, amount))
                .collect(),
        )
    }

    /// Hue at `index`, cycling past the end.
    pub fn hue(&self, index: usize) -> f64 {
        self.hues[index % self.hues.len()]
    }

    /// Uniformly random hue from the palette.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> f64 {
        self.hues[rng.index(self.hues.len())]
    }

    /// Number of hues.
    pub fn len(&self) -> usize {
        self.hues.len()
    }

    /// Always false for a validated palette.
    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }
}

/// Coloring policy selected in configuration and resolved per generation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorPolicyConfig {
    /// One-shot budget: the colored fraction is sampled once per setup from
    /// `[min_fraction, max_fraction)`.
    Fraction {
        /// Lower bound of the sampled fraction.
        #[serde(default = "default_min_fraction")]
        min_fraction: f64,
        /// Upper bound of the sampled fraction.
        #[serde(default = "default_max_fraction")]
        max_fraction: f64,
    },
    /// Corrective band applied on every tick.
    RatioBand {
        /// Lower bound on the colored count.
        #[serde(default = "default_min_colored")]
        min_colored: usize,
        /// Upper bound on the colored fraction.
        #[serde(default = "default_max_fraction")]
        max_fraction: f64,
    },
}

impl Default for ColorPolicyConfig {
    fn default() -> Self {
        ColorPolicyConfig::Fraction {
            min_fraction: default_min_fraction(),
            max_fraction: default_max_fraction(),
        }
    }
}

impl ColorPolicyConfig {
    /// Reject out-of-range policy parameters.
    pub fn validate(&self) -> MondrianResult<()> {
        match *self {
            ColorPolicyConfig::Fraction {
                min_fraction,
                max_fraction,
            } => {
                for f in [min_fraction, max_fraction] {
                    if !f.is_finite() || f <= 0.0 || f > 1.0 {
                        return Err(MondrianError::validation(
                            "color fractions must be in (0, 1]",
                        ));
                    }
                }
                if min_fraction > max_fraction {
                    return Err(MondrianError::validation(
                        "min_fraction must be <= max_fraction",
                    ));
                }
            }
            ColorPolicyConfig::RatioBand { max_fraction, .. } => {
                if !max_fraction.is_finite() || max_fraction <= 0.0 || max_fraction > 1.0 {
                    return Err(MondrianError::validation(
                        "max colored fraction must be in (0, 1]",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolve the policy into the budget one generation will run under.
    pub fn resolve(&self, rng: &mut dyn RandomSource) -> ColorBudget {
        match *self {
            ColorPolicyConfig::Fraction {
                min_fraction,
                max_fraction,
            } => ColorBudget::Fraction {
                fraction: rng.range(min_fraction, max_fraction),
            },
            ColorPolicyConfig::RatioBand {
                min_colored,
                max_fraction,
            } => ColorBudget::RatioBand {
                min_colored,
                max_fraction,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tunable parameters of one sketch.
///
/// A config is a pure data model: it can be built programmatically (every
/// field has a default) or deserialized from JSON via Serde, and it is
/// validated once when a [`crate::Sketch`] is constructed.
pub struct SketchConfig {
    /// Base palette hues in degrees, jittered once per generation.
    #[serde(default = "default_base_hues")]
    pub base_hues: Vec<f64>,
    /// Maximum per-hue jitter in degrees.
    #[serde(default = "default_hue_jitter")]
    pub hue_jitter: f64,
    /// Scale-down factor applied to the framed composition.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Gap width between cells, in pixels before scaling.
    #[serde(default = "default_stroke_weight")]
    pub stroke_weight: f64,
    /// Minimum splittable cell size as a fraction of the canvas width.
    #[serde(default = "default_min_cell_ratio")]
    pub min_cell_ratio: f64,
    /// Coloring policy.
    #[serde(default)]
    pub color_policy: ColorPolicyConfig,
    /// Target refresh rate for tick-driven hosts.
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Grain coverage probability at a 1000 px canvas; scales linearly
    /// with the actual width.
    #[serde(default = "default_grain_coverage")]
    pub grain_coverage: f64,
    /// Per-dot grain alpha range.
    #[serde(default = "default_grain_alpha")]
    pub grain_alpha: [f64; 2],
    /// Credit line shown at the bottom-left margin; empty hides it.
    #[serde(default = "default_credit")]
    pub credit: String,
}

fn default_base_hues() -> Vec<f64> {
    vec![0.0, 55.0, 220.0]
}

fn default_hue_jitter() -> f64 {
    5.0
}

fn default_scale() -> f64 {
    0.8
}

fn default_stroke_weight() -> f64 {
    8.0
}

fn default_min_cell_ratio() -> f64 {
    0.35
}

fn default_fps() -> f64 {
    60.0
}

fn default_grain_coverage() -> f64 {
    0.05
}

fn default_grain_alpha() -> [f64; 2] {
    [0.1, 0.2]
}

fn default_credit() -> String {
    "random mondrian generator".to_string()
}

fn default_min_fraction() -> f64 {
    0.1
}

fn default_max_fraction() -> f64 {
    0.6
}

fn default_min_colored() -> usize {
    4
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            base_hues: default_base_hues(),
            hue_jitter: default_hue_jitter(),
            scale: default_scale(),
            stroke_weight: default_stroke_weight(),
            min_cell_ratio: default_min_cell_ratio(),
            color_policy: ColorPolicyConfig::default(),
            fps: default_fps(),
            grain_coverage: default_grain_coverage(),
            grain_alpha: default_grain_alpha(),
            credit: default_credit(),
        }
    }
}

impl SketchConfig {
    /// Load a config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> MondrianResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| MondrianError::serde(format!("parse config '{}': {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range parameters.
    pub fn validate(&self) -> MondrianResult<()> {
        if self.base_hues.is_empty() {
            return Err(MondrianError::validation("base_hues must not be empty"));
        }
        if self.base_hues.iter().any(|h| !h.is_finite()) {
            return Err(MondrianError::validation("base_hues must be finite"));
        }
        if !self.hue_jitter.is_finite() || self.hue_jitter < 0.0 {
            return Err(MondrianError::validation("hue_jitter must be >= 0"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(MondrianError::validation("scale must be in (0, 1]"));
        }
        if !self.stroke_weight.is_finite() || self.stroke_weight < 0.0 {
            return Err(MondrianError::validation("stroke_weight must be >= 0"));
        }
        if !self.min_cell_ratio.is_finite() || self.min_cell_ratio <= 0.0 || self.min_cell_ratio > 1.0
        {
            return Err(MondrianError::validation("min_cell_ratio must be in (0, 1]"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(MondrianError::validation("fps must be > 0"));
        }
        if !self.grain_coverage.is_finite() || !(0.0..=1.0).contains(&self.grain_coverage) {
            return Err(MondrianError::validation("grain_coverage must be in [0, 1]"));
        }
        let [a0, a1] = self.grain_alpha;
        if !a0.is_finite() || !a1.is_finite() || a0 < 0.0 || a1 > 1.0 || a0 > a1 {
            return Err(MondrianError::validation(
                "grain_alpha must be an ordered range inside [0, 1]",
            ));
        }
        self.color_policy.validate()
    }

    /// Minimum splittable cell size for a canvas.
    pub fn min_cell_size(&self, canvas: CanvasSize) -> f64 {
        self.min_cell_ratio * f64::from(canvas.width)
    }
}

/// Square canvas extent fitted to a viewport: 1000 px stepped down by 50
/// until it fits the smaller viewport dimension (saturating at zero).
pub fn fit_square_extent(viewport_width: u32, viewport_height: u32) -> u32 {
    const START: u32 = 1000;
    const STEP: u32 = 50;

    let limit = viewport_width.min(viewport_height);
    let mut size = START;
    while size > limit {
        size = size.saturating_sub(STEP);
        if size == 0 {
            break;
        }
    }
    size
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
