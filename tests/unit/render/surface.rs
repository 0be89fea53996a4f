use super::*;

fn pixel(frame: &FrameRgba, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * frame.width + x) * 4) as usize;
    frame.data[idx..idx + 4].try_into().unwrap()
}

#[test]
fn rejects_canvases_beyond_the_raster_target() {
    assert!(
        Surface::new(CanvasSize {
            width: 70_000,
            height: 16,
        })
        .is_err()
    );
    assert!(Surface::new(CanvasSize::square(16)).is_ok());
}

#[test]
fn background_fill_reads_back_solid() {
    let mut surface = Surface::new(CanvasSize::square(4)).unwrap();
    surface.fill_canvas(Rgba8::WHITE);
    surface.render();

    let frame = surface.frame();
    assert_eq!(frame.width, 4);
    assert_eq!(frame.height, 4);
    assert_eq!(frame.data.len(), 4 * 4 * 4);
    assert!(frame.data.iter().all(|&b| b == 255));
}

#[test]
fn rect_fill_lands_on_the_expected_pixels() {
    let mut surface = Surface::new(CanvasSize::square(4)).unwrap();
    surface.fill_canvas(Rgba8::WHITE);
    surface.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba8::BLACK);
    surface.render();

    let frame = surface.frame();
    assert_eq!(pixel(&frame, 0, 0), [0, 0, 0, 255]);
    assert_eq!(pixel(&frame, 1, 1), [0, 0, 0, 255]);
    assert_eq!(pixel(&frame, 3, 3), [255, 255, 255, 255]);
}

#[test]
fn transform_scales_subsequent_fills() {
    let mut surface = Surface::new(CanvasSize::square(4)).unwrap();
    surface.fill_canvas(Rgba8::WHITE);
    surface.set_transform(Affine::scale(0.5));
    surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::BLACK);
    surface.reset_transform();
    surface.render();

    let frame = surface.frame();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
