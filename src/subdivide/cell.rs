use crate::foundation::{
    core::{CanvasSize, Rect},
    error::{MondrianError, MondrianResult},
    random::RandomSource,
};

/// Orientation of the cuts applied when a cell splits.
///
/// `Horizontal` cuts run left-right and stack the children top-to-bottom;
/// `Vertical` cuts run top-bottom and place the children left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal cuts; the split partitions the cell's height.
    Horizontal,
    /// Vertical cuts; the split partitions the cell's width.
    Vertical,
}

impl Axis {
    /// The orthogonal axis.
    pub fn flipped(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn pick(rng: &mut dyn RandomSource) -> Self {
        if rng.chance(0.5) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// One rectangle of the partition.
///
/// A cell is either splittable or a leaf; the distinction is a pure query
/// over its current geometry, never a cached flag. A splittable cell is
/// replaced by its children exactly once and the caller drops it from the
/// active collection.
#[derive(Clone, Debug)]
pub struct Cell {
    rect: Rect,
    axis: Axis,
    fan_out: usize,
    min_size: f64,
    hue: Option<f64>,
}

impl Cell {
    /// Construct a cell with an explicit geometry and axis.
    ///
    /// The fan-out (2 or 3 children on split) is drawn here and fixed for
    /// the cell's lifetime. `min_size` must be positive and finite or the
    /// split loop could not terminate.
    pub fn new(
        rect: Rect,
        axis: Axis,
        min_size: f64,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<Self> {
        if !min_size.is_finite() || min_size <= 0.0 {
            return Err(MondrianError::validation(
                "cell min_size must be finite and > 0",
            ));
        }
        if !rect.width().is_finite() || !rect.height().is_finite() {
            return Err(MondrianError::validation("cell extent must be finite"));
        }
        Ok(Self::child(rect, axis, min_size, rng))
    }

    /// The lone root cell covering the whole canvas, with a random axis.
    pub fn root(canvas: CanvasSize, min_size: f64, rng: &mut dyn RandomSource) -> MondrianResult<Self> {
        let axis = Axis::pick(rng);
        Self::new(canvas.rect(), axis, min_size, rng)
    }

    fn child(rect: Rect, axis: Axis, min_size: f64, rng: &mut dyn RandomSource) -> Self {
        let fan_out = rng.int_range(2, 3) as usize;
        Self {
            rect,
            axis,
            fan_out,
            min_size,
            hue: None,
        }
    }

    /// Cell geometry.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of children a split produces (2 or 3).
    pub fn fan_out(&self) -> usize {
        self.fan_out
    }

    /// Assigned hue in degrees, `None` while uncolored.
    pub fn hue(&self) -> Option<f64> {
        self.hue
    }

    /// Assign a hue.
    pub fn set_hue(&mut self, hue: f64) {
        self.hue = Some(hue);
    }

    /// Return the cell to the uncolored state.
    pub fn clear_hue(&mut self) {
        self.hue = None;
    }

    /// True once a hue has been assigned.
    pub fn is_colored(&self) -> bool {
        self.hue.is_some()
    }

    /// The axis an actual split would cut along, preferring the cell's own
    /// axis and falling back to the orthogonal one; `None` when both
    /// dimensions are at or below the minimum size (leaf).
    pub fn split_axis(&self) -> Option<Axis> {
        let splittable = |axis: Axis| match axis {
            Axis::Horizontal => self.rect.height() > self.min_size,
            Axis::Vertical => self.rect.width() > self.min_size,
        };

        if splittable(self.axis) {
            Some(self.axis)
        } else if splittable(self.axis.flipped()) {
            Some(self.axis.flipped())
        } else {
            None
        }
    }

    /// True while the cell can still be subdivided.
    pub fn can_split(&self) -> bool {
        self.split_axis().is_some()
    }

    /// Split into `fan_out` children that exactly tile this cell.
    ///
    /// Child extents come from fan-out i.i.d. weights uniform in `[1, 2)`,
    /// normalized to sum to 1; boundaries are cumulative fractions of the
    /// parent extent and the last child ends on the parent edge itself, so
    /// no area is lost to rounding. Children take the orthogonal axis.
    pub fn split(&self, rng: &mut dyn RandomSource) -> MondrianResult<Vec<Cell>> {
        let axis = self
            .split_axis()
            .ok_or_else(|| MondrianError::generation("split invoked on a leaf cell"))?;

        let weights: Vec<f64> = (0..self.fan_out).map(|_| rng.range(1.0, 2.0)).collect();
        let total: f64 = weights.iter().sum();

        let mut children = Vec::with_capacity(self.fan_out);
        let mut cum = 0.0;
        for (i, w) in weights.iter().enumerate() {
            let t0 = cum / total;
            cum += w;
            let t1 = cum / total;
            let last = i == self.fan_out - 1;

            let rect = match axis {
                Axis::Horizontal => {
                    let y0 = self.rect.y0 + t0 * self.rect.height();
                    let y1 = if last {
                        self.rect.y1
                    } else {
                        self.rect.y0 + t1 * self.rect.height()
                    };
                    Rect::new(self.rect.x0, y0, self.rect.x1, y1)
                }
                Axis::Vertical => {
                    let x0 = self.rect.x0 + t0 * self.rect.width();
                    let x1 = if last {
                        self.rect.x1
                    } else {
                        self.rect.x0 + t1 * self.rect.width()
                    };
                    Rect::new(x0, self.rect.y0, x1, self.rect.y1)
                }
            };

            children.push(Self::child(rect, axis.flipped(), self.min_size, rng));
        }

        Ok(children)
    }

    /// Interior paint rectangle, inset by half the stroke weight per side.
    ///
    /// Cells narrower than the stroke weight collapse to a zero-area rect
    /// at their center instead of inverting.
    pub fn paint_rect(&self, stroke_weight: f64) -> Rect {
        if self.rect.width() <= stroke_weight || self.rect.height() <= stroke_weight {
            return Rect::from_origin_size(self.rect.center(), (0.0, 0.0));
        }
        self.rect.inset(-stroke_weight / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/subdivide/cell.rs"]
mod tests;
