use super::*;

use rand::{Rng as _, SeedableRng as _};

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

#[test]
fn frame_shade_is_near_black_and_fixed() {
    let mut rng = PcgRandom::new(1);
    for _ in 0..50 {
        let frame = Frame::new(CanvasSize::square(400), &mut rng);
        let c = frame.color();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert!(c.r <= 12);
        assert_eq!(c.a, 255);
        assert_eq!(frame.color(), c);
    }
}

#[test]
fn texture_coverage_scales_with_canvas_width() {
    let alpha = [0.1, 0.2];
    assert_eq!(
        Texture::new(CanvasSize::square(1000), 0.05, alpha).coverage(),
        0.05
    );
    assert_eq!(
        Texture::new(CanvasSize::square(500), 0.05, alpha).coverage(),
        0.025
    );
    assert_eq!(
        Texture::new(CanvasSize::square(0), 0.05, alpha).coverage(),
        0.0
    );
    // Oversized canvases saturate instead of exceeding certainty.
    assert_eq!(
        Texture::new(CanvasSize::square(30_000), 0.05, alpha).coverage(),
        1.0
    );
}

#[test]
fn texture_grain_darkens_a_white_surface() {
    let canvas = CanvasSize::square(50);
    let mut rng = PcgRandom::new(2);
    let mut surface = Surface::new(canvas).unwrap();
    surface.fill_canvas(Rgba8::WHITE);

    let texture = Texture::new(canvas, 1.0, [0.5, 0.9]);
    texture.show(&mut surface, &mut rng);
    surface.render();

    let frame = surface.frame();
    assert!(frame.data.chunks_exact(4).any(|px| px[0] < 255));
}

#[test]
fn title_margins_derive_from_the_scale_factor() {
    let title = Title::new(12_345, CanvasSize::square(1000), 0.8, "credit");
    assert_eq!(title.headline(), "Composition N° 12345");
    assert_eq!(title.text_height(), 50.0);
    assert_eq!(title.left(), 100.0);
    assert_eq!(Title::CAPTION, "Random Mondrian");
}
