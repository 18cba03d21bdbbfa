use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use spritesheet_core::{Item, SheetConfig, build_sheet};

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

#[test]
fn single_item_is_an_identity_composite() {
    let mut src = RgbaImage::new(100, 50);
    for (x, y, px) in src.enumerate_pixels_mut() {
        *px = Rgba([(x * 2) as u8, (y * 5) as u8, 7, ((x + y) % 256) as u8]);
    }
    let items = vec![Item::from_rgba("only", src.clone())];

    let sheet = build_sheet(&items, &SheetConfig::default()).expect("build");
    assert_eq!((sheet.width(), sheet.height()), (100, 50));
    assert_eq!((sheet.frames[0].x, sheet.frames[0].y), (0, 0));
    assert_eq!(sheet.image, src);
}

#[test]
fn border_and_gap_stay_transparent() {
    let red = solid(4, 2, [255, 0, 0, 255]);
    let green = solid(3, 6, [0, 255, 0, 255]);
    let items = vec![Item::from_rgba("red", red), Item::from_rgba("green", green)];
    let cfg = SheetConfig::builder().border(1).build();

    let sheet = build_sheet(&items, &cfg).expect("build");
    // (4 + 2) + (3 + 2) by 6 + 2
    assert_eq!((sheet.width(), sheet.height()), (11, 8));
    let clear = Rgba([0, 0, 0, 0]);

    for x in 0..sheet.width() {
        assert_eq!(*sheet.image.get_pixel(x, 0), clear, "top border at x={}", x);
        assert_eq!(*sheet.image.get_pixel(x, 7), clear, "bottom border at x={}", x);
    }
    // red occupies x 1..5, y 1..3; below it is the gap left by top alignment
    assert_eq!(*sheet.image.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
    assert_eq!(*sheet.image.get_pixel(4, 2), Rgba([255, 0, 0, 255]));
    assert_eq!(*sheet.image.get_pixel(1, 3), clear);
    assert_eq!(*sheet.image.get_pixel(4, 6), clear);
    // borders between the two items
    assert_eq!(*sheet.image.get_pixel(5, 2), clear);
    assert_eq!(*sheet.image.get_pixel(6, 2), clear);
    // green occupies x 7..10, y 1..7
    assert_eq!(sheet.frames[1].x, 7);
    assert_eq!(*sheet.image.get_pixel(7, 1), Rgba([0, 255, 0, 255]));
    assert_eq!(*sheet.image.get_pixel(9, 6), Rgba([0, 255, 0, 255]));
    assert_eq!(*sheet.image.get_pixel(10, 3), clear);
}

#[test]
fn opaque_rgb_and_rgba_sources_compose_uniformly() {
    let rgb = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
    let rgba = solid(2, 2, [40, 50, 60, 128]);
    let items = vec![
        Item::new("photo", DynamicImage::ImageRgb8(rgb)),
        Item::new("icon", DynamicImage::ImageRgba8(rgba)),
    ];

    let sheet = build_sheet(&items, &SheetConfig::default()).expect("build");
    assert_eq!(*sheet.image.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    assert_eq!(*sheet.image.get_pixel(3, 1), Rgba([40, 50, 60, 128]));
}

#[test]
fn sixteen_bit_sources_are_normalised() {
    let deep = image::ImageBuffer::<Rgba<u16>, Vec<u16>>::from_pixel(3, 3, Rgba([65535, 0, 0, 65535]));
    let items = vec![Item::new("deep", DynamicImage::ImageRgba16(deep))];

    let sheet = build_sheet(&items, &SheetConfig::default()).expect("build");
    assert_eq!(*sheet.image.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
}

#[test]
fn source_items_are_left_untouched() {
    let items = vec![Item::from_rgba("a", solid(2, 2, [1, 2, 3, 4]))];
    let before = items[0].image().clone();
    let _ = build_sheet(&items, &SheetConfig::builder().border(2).build()).expect("build");
    assert_eq!(items[0].image(), &before);
}
