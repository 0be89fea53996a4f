use crate::{
    composition::model::Palette,
    foundation::error::{MondrianError, MondrianResult},
    foundation::random::RandomSource,
    subdivide::cell::Cell,
};

/// Drive the active collection to a leaf-only state.
///
/// Each step picks one cell uniformly at random among all currently
/// splittable cells, removes it, and appends its children. The largest
/// normalized child weight is 2/3, so the cut dimension strictly shrinks on
/// every split and the loop terminates for any positive minimum size.
/// Returns the number of splits performed.
#[tracing::instrument(skip(cells, rng))]
pub fn subdivide(cells: &mut Vec<Cell>, rng: &mut dyn RandomSource) -> MondrianResult<usize> {
    let mut splits = 0usize;
    loop {
        let splittable: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_split())
            .map(|(i, _)| i)
            .collect();
        if splittable.is_empty() {
            break;
        }

        let picked = splittable[rng.index(splittable.len())];
        let cell = cells.swap_remove(picked);
        cells.extend(cell.split(rng)?);
        splits += 1;
    }

    tracing::debug!(leaves = cells.len(), splits, "subdivision exhausted");
    Ok(splits)
}

/// Number of colored cells in the collection.
pub fn colored_count(cells: &[Cell]) -> usize {
    cells.iter().filter(|c| c.is_colored()).count()
}

/// Global color budget applied to the leaf collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorBudget {
    /// One-shot pass: exactly `ceil(n * fraction)` leaves end up colored,
    /// hues drawn from a pool built by cycling the palette.
    Fraction {
        /// Colored fraction target in `(0, 1]`.
        fraction: f64,
    },
    /// Corrective pass: colors random uncolored leaves up to the lower
    /// bound, then uncolors random colored leaves down to the upper bound.
    /// Idempotent once inside the band, so it may run on every tick.
    RatioBand {
        /// Lower bound on the colored count. When it exceeds the upper
        /// bound for small collections, the upper bound wins.
        min_colored: usize,
        /// Upper bound on the colored fraction, applied as
        /// `floor(max_fraction * n)`.
        max_fraction: f64,
    },
}

impl ColorBudget {
    /// Reject out-of-range budget parameters.
    pub fn validate(&self) -> MondrianResult<()> {
        match *self {
            ColorBudget::Fraction { fraction } => {
                if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
                    return Err(MondrianError::validation(
                        "color fraction must be in (0, 1]",
                    ));
                }
            }
            ColorBudget::RatioBand { max_fraction, .. } => {
                if !max_fraction.is_finite() || max_fraction <= 0.0 || max_fraction > 1.0 {
                    return Err(MondrianError::validation(
                        "max colored fraction must be in (0, 1]",
                    ));
                }
            }
        }
        Ok(())
    }

    /// True for budgets whose pass re-runs after the composition is drawn.
    pub fn is_corrective(&self) -> bool {
        matches!(self, ColorBudget::RatioBand { .. })
    }

    /// Apply the budget to the leaf collection.
    ///
    /// Collections of zero or one cells are left untouched by both
    /// policies.
    #[tracing::instrument(skip(self, cells, palette, rng))]
    pub fn apply(
        &self,
        cells: &mut [Cell],
        palette: &Palette,
        rng: &mut dyn RandomSource,
    ) -> MondrianResult<()> {
        if cells.len() <= 1 {
            return Ok(());
        }
        match *self {
            ColorBudget::Fraction { fraction } => color_by_fraction(cells, palette, fraction, rng),
            ColorBudget::RatioBand {
                min_colored,
                max_fraction,
            } => correct_ratio_band(cells, palette, min_colored, max_fraction, rng),
        }
    }
}

fn color_by_fraction(
    cells: &mut [Cell],
    palette: &Palette,
    fraction: f64,
    rng: &mut dyn RandomSource,
) -> MondrianResult<()> {
    let n = cells.len();
    let target = (n as f64 * fraction).ceil() as usize;
    if target > n {
        return Err(MondrianError::generation(
            "color target exceeds the leaf count",
        ));
    }

    // Hue pool of exactly the target size, cycling the palette.
    let mut hues: Vec<f64> = (0..target).map(|i| palette.hue(i)).collect();

    while let Some(hue) = hues.pop() {
        let uncolored: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_colored())
            .map(|(i, _)| i)
            .collect();
        // target <= n keeps the pool smaller than the uncolored set.
        let picked = uncolored[rng.index(uncolored.len())];
        cells[picked].set_hue(hue);
    }

    tracing::debug!(colored = colored_count(cells), total = n, "fraction budget applied");
    Ok(())
}

fn correct_ratio_band(
    cells: &mut [Cell],
    palette: &Palette,
    min_colored: usize,
    max_fraction: f64,
    rng: &mut dyn RandomSource,
) -> MondrianResult<()> {
    let n = cells.len();
    let max_count = (max_fraction * n as f64).floor() as usize;
    let min_count = min_colored.min(max_count);

    let mut colored = colored_count(cells);

    while colored < min_count {
        let uncolored: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_colored())
            .map(|(i, _)| i)
            .collect();
        let picked = uncolored[rng.index(uncolored.len())];
        cells[picked].set_hue(palette.pick(rng));
        colored += 1;
    }

    while colored > max_count {
        let colored_idx: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_colored())
            .map(|(i, _)| i)
            .collect();
        let picked = colored_idx[rng.index(colored_idx.len())];
        cells[picked].clear_hue();
        colored -= 1;
    }

    tracing::debug!(colored, total = n, "ratio band satisfied");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/subdivide/engine.rs"]
mod tests;
