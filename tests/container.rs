use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;
use webicons::{build_favicon, ContainerEntry, IconContainer, SourceImage};

//===========================================================================//

#[test]
fn favicon_from_wide_source() {
    // A 4:3 source still yields square frames, since resampling is exact.
    let source = gradient_source(160, 120);
    let container = build_favicon(&source).unwrap();
    let mut file = Vec::<u8>::new();
    container.write(&mut file).unwrap();
    assert_eq!(&file[..6], b"\x00\x00\x01\x00\x03\x00");

    let container = IconContainer::read(Cursor::new(&file)).unwrap();
    assert_eq!(container.sizes(), vec![(16, 16), (32, 32), (48, 48)]);
    for entry in container.entries() {
        assert!(entry.is_png());
        assert_eq!(entry.bits_per_pixel(), 24);
        let frame = entry.decode().unwrap();
        let expected_len = 3 * entry.width() * entry.height();
        assert_eq!(frame.rgb_data().len(), expected_len as usize);
    }
}

#[test]
fn large_frame_size_comes_from_png_header() {
    // The directory can only say "256 or more"; reading recovers 300x260
    // from the embedded PNG.
    let source = gradient_source(64, 64);
    let frame = source.resize(300, 260);
    let mut container = IconContainer::new();
    container.add_entry(ContainerEntry::encode(&frame).unwrap());
    let mut file = Vec::<u8>::new();
    container.write(&mut file).unwrap();
    assert_eq!(&file[6..8], b"\x00\x00");

    let container = IconContainer::read(Cursor::new(&file)).unwrap();
    let entry = container.primary().unwrap();
    assert_eq!(entry.size(), (300, 260));
    assert_eq!(entry.decode().unwrap(), frame);
}

#[test]
fn truncated_file_is_an_error() {
    let source = gradient_source(32, 32);
    let mut file = Vec::<u8>::new();
    build_favicon(&source).unwrap().write(&mut file).unwrap();
    file.truncate(file.len() - 10);
    assert!(IconContainer::read(Cursor::new(&file)).is_err());
}

//===========================================================================//

fn gradient_source(width: u32, height: u32) -> SourceImage {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 0x80])
    });
    SourceImage::from_dynamic(DynamicImage::ImageRgb8(image))
}

//===========================================================================//
