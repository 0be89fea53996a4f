use super::*;

use std::path::PathBuf;

fn white_frame(size: u32) -> FrameRgba {
    FrameRgba {
        width: size,
        height: size,
        data: vec![255; (size * size * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn export_names_embed_the_composition_id() {
    assert_eq!(export_file_name(12_345), "Mondrian-12345.png");
    assert_eq!(export_file_name(99_999), "Mondrian-99999.png");
}

#[test]
fn save_png_writes_a_decodable_file() {
    let dir = PathBuf::from("target").join("png_unit");
    let path = dir.join("nested").join(export_file_name(10_000));
    let _ = std::fs::remove_file(&path);

    save_png(&white_frame(4), &path).unwrap();

    assert!(path.exists());
    let img = image::open(&path).unwrap();
    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 4);
}

#[test]
fn ensure_parent_dir_tolerates_bare_names() {
    ensure_parent_dir(std::path::Path::new("bare-name.png")).unwrap();
}
