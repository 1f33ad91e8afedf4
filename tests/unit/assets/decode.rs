use std::io::Cursor;

use super::*;

fn png_1x1(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_1x1([100, 50, 200, 128]);
    let tex = decode_image(&buf, AlphaMode::Premultiplied).unwrap();
    assert_eq!(tex.size().width, 1);
    assert_eq!(tex.size().height, 1);
    assert!(tex.is_premultiplied());
    assert_eq!(
        tex.as_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn straight_mode_keeps_channels() {
    let buf = png_1x1([100, 50, 200, 128]);
    let tex = decode_image(&buf, AlphaMode::Straight).unwrap();
    assert!(!tex.is_premultiplied());
    assert_eq!(tex.as_bytes(), &[100, 50, 200, 128]);
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_image(b"not an image", AlphaMode::Straight).is_err());
}
