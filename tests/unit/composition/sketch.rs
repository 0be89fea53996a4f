use super::*;

use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};

use crate::{CanvasSize, ColorPolicyConfig, colored_count};

struct PcgRandom(rand_pcg::Pcg32);

impl PcgRandom {
    fn new(seed: u64) -> Self {
        Self(rand_pcg::Pcg32::seed_from_u64(seed))
    }
}

impl crate::RandomSource for PcgRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.random()
    }
}

fn ratio_band_config() -> SketchConfig {
    SketchConfig {
        color_policy: ColorPolicyConfig::RatioBand {
            min_colored: 4,
            max_fraction: 0.6,
        },
        ..SketchConfig::default()
    }
}

#[test]
fn new_rejects_invalid_configs() {
    let mut rng = PcgRandom::new(1);
    let config = SketchConfig {
        scale: 0.0,
        ..SketchConfig::default()
    };
    assert!(Sketch::new(CanvasSize::square(400), config, &mut rng).is_err());
}

#[test]
fn setup_builds_a_fresh_generation() {
    let mut rng = PcgRandom::new(2);
    let sketch = Sketch::new(CanvasSize::square(400), SketchConfig::default(), &mut rng).unwrap();

    assert_eq!(sketch.phase(), Phase::Built);
    assert_eq!(sketch.cells().len(), 1);
    assert!((10_000..=99_999).contains(&sketch.id()));
    assert_eq!(
        sketch.export_file_name(),
        format!("Mondrian-{}.png", sketch.id())
    );
}

#[test]
fn draw_paints_exactly_once() {
    let mut rng = PcgRandom::new(3);
    let mut sketch =
        Sketch::new(CanvasSize::square(400), SketchConfig::default(), &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();

    assert!(sketch.draw(&mut surface, None, &mut rng).unwrap());
    assert_eq!(sketch.phase(), Phase::Drawn);
    assert!(sketch.cells().len() >= 2);
    assert!(sketch.cells().iter().all(|c| !c.can_split()));

    assert!(!sketch.draw(&mut surface, None, &mut rng).unwrap());
    assert_eq!(sketch.phase(), Phase::Drawn);
}

#[test]
fn fraction_budget_is_exact_after_draw() {
    for seed in 0..5 {
        let mut rng = PcgRandom::new(10 + seed);
        let mut sketch =
            Sketch::new(CanvasSize::square(400), SketchConfig::default(), &mut rng).unwrap();
        let mut surface = Surface::new(sketch.canvas()).unwrap();
        sketch.draw(&mut surface, None, &mut rng).unwrap();

        let ColorBudget::Fraction { fraction } = sketch.budget() else {
            panic!("default policy resolves to a fraction budget");
        };
        let n = sketch.cells().len();
        let expected = if n <= 1 {
            0
        } else {
            (n as f64 * fraction).ceil() as usize
        };
        assert_eq!(colored_count(sketch.cells()), expected);
    }
}

#[test]
fn ratio_band_correction_reruns_after_the_paint() {
    let mut rng = PcgRandom::new(4);
    let mut sketch = Sketch::new(CanvasSize::square(400), ratio_band_config(), &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();

    sketch.draw(&mut surface, None, &mut rng).unwrap();
    let n = sketch.cells().len();
    let max_count = (0.6 * n as f64).floor() as usize;
    let min_count = 4.min(max_count);
    assert!((min_count..=max_count).contains(&colored_count(sketch.cells())));

    // Perturb the coloring; the next (non-painting) draw corrects it.
    for cell in &mut sketch.generation.cells {
        cell.set_hue(55.0);
    }
    assert!(!sketch.draw(&mut surface, None, &mut rng).unwrap());
    assert!((min_count..=max_count).contains(&colored_count(sketch.cells())));
}

#[test]
fn reset_and_resize_rebuild_from_scratch() {
    let mut rng = PcgRandom::new(5);
    let mut sketch =
        Sketch::new(CanvasSize::square(400), SketchConfig::default(), &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();
    sketch.draw(&mut surface, None, &mut rng).unwrap();

    sketch.reset(&mut rng).unwrap();
    assert_eq!(sketch.phase(), Phase::Built);
    assert_eq!(sketch.cells().len(), 1);

    sketch.resize(500, &mut rng).unwrap();
    assert_eq!(sketch.canvas(), CanvasSize::square(500));
    assert_eq!(sketch.phase(), Phase::Built);
    assert_eq!(sketch.cells().len(), 1);
}

#[test]
fn tick_throttles_against_the_frame_clock() {
    let mut rng = PcgRandom::new(6);
    let config = SketchConfig {
        fps: 10.0,
        ..SketchConfig::default()
    };
    let mut sketch = Sketch::new(CanvasSize::square(400), config, &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();

    let t0 = std::time::Instant::now();
    assert!(sketch.tick(t0, &mut surface, None, &mut rng).unwrap());

    // Inside the frame interval nothing runs, not even correction.
    assert!(
        !sketch
            .tick(t0 + Duration::from_millis(10), &mut surface, None, &mut rng)
            .unwrap()
    );

    // Past the interval the tick is admitted, but the generation is
    // already drawn.
    assert!(
        !sketch
            .tick(t0 + Duration::from_millis(150), &mut surface, None, &mut rng)
            .unwrap()
    );
    assert_eq!(sketch.phase(), Phase::Drawn);
}

#[test]
fn degenerate_canvas_stays_a_single_uncolored_leaf() {
    // One pixel: the clamped minimum size makes the root an immediate leaf.
    let mut rng = PcgRandom::new(7);
    let mut sketch =
        Sketch::new(CanvasSize::square(1), SketchConfig::default(), &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();

    assert!(sketch.draw(&mut surface, None, &mut rng).unwrap());
    assert_eq!(sketch.cells().len(), 1);
    assert_eq!(colored_count(sketch.cells()), 0);
}

#[test]
fn two_setups_both_satisfy_the_invariants() {
    let mut rng = PcgRandom::new(8);
    let mut sketch =
        Sketch::new(CanvasSize::square(600), SketchConfig::default(), &mut rng).unwrap();
    let mut surface = Surface::new(sketch.canvas()).unwrap();

    for _ in 0..2 {
        sketch.draw(&mut surface, None, &mut rng).unwrap();

        let total: f64 = sketch.cells().iter().map(|c| c.rect().area()).sum();
        assert!((total - 600.0 * 600.0).abs() / (600.0 * 600.0) < 1e-9);
        assert!(sketch.cells().iter().all(|c| !c.can_split()));

        sketch.reset(&mut rng).unwrap();
    }
}
