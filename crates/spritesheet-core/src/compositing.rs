use image::{Pixel, Rgba, RgbaImage};

use crate::error::{Result, SheetError};
use crate::layout::Layout;
use crate::model::Item;

/// Largest canvas `compose` will allocate, in pixels (1 GiB of RGBA8).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Allocates a transparent `layout.width x layout.height` canvas and draws
/// every item at its placement, in order.
///
/// Sources of any pixel format are normalised to RGBA8 first. A placement
/// that does not match its item or leaves the canvas is reported as a
/// `ContractViolation`; nothing is clipped and no canvas is returned. A
/// canvas above [`MAX_CANVAS_PIXELS`] is refused with `InvalidDimensions`
/// before anything is allocated.
pub fn compose(items: &[Item], layout: &Layout) -> Result<RgbaImage> {
    if items.len() != layout.placements.len() {
        return Err(SheetError::ContractViolation(format!(
            "{} items but {} placements",
            items.len(),
            layout.placements.len()
        )));
    }
    if layout.width as u64 * layout.height as u64 > MAX_CANVAS_PIXELS {
        return Err(SheetError::InvalidDimensions {
            width: layout.width,
            height: layout.height,
        });
    }
    let mut canvas = RgbaImage::new(layout.width, layout.height);
    for (item, rect) in items.iter().zip(&layout.placements) {
        if item.dimensions() != (rect.w, rect.h) {
            return Err(SheetError::ContractViolation(format!(
                "item '{}' is {}x{} but its placement is {}x{}",
                item.name(),
                item.width(),
                item.height(),
                rect.w,
                rect.h
            )));
        }
        if !rect.fits_within(layout.width, layout.height) {
            return Err(SheetError::ContractViolation(format!(
                "item '{}' placed at {:?} outside the {}x{} canvas",
                item.name(),
                rect,
                layout.width,
                layout.height
            )));
        }
        let converted;
        let src = match item.image().as_rgba8() {
            Some(rgba) => rgba,
            None => {
                converted = item.image().to_rgba8();
                &converted
            }
        };
        blit_over(src, &mut canvas, rect.x, rect.y);
    }
    Ok(canvas)
}

/// Draw all of `src` onto `canvas` with its top-left at (dx, dy) using
/// source-over compositing.
///
/// Callers must ensure the destination rectangle lies inside `canvas`.
pub fn blit_over(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    for (sx, sy, px) in src.enumerate_pixels() {
        over(canvas.get_pixel_mut(dx + sx, dy + sy), px);
    }
}

fn over(dst: &mut Rgba<u8>, src: &Rgba<u8>) {
    // untouched canvas takes the source verbatim, keeping an exact copy
    if dst[3] == 0 {
        *dst = *src;
        return;
    }
    match src[3] {
        0 => {}
        255 => *dst = *src,
        _ => dst.blend(src),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    #[test]
    fn opaque_source_replaces_destination() {
        let mut dst = Rgba([10, 20, 30, 255]);
        over(&mut dst, &Rgba([1, 2, 3, 255]));
        assert_eq!(dst, Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let mut dst = Rgba([10, 20, 30, 255]);
        over(&mut dst, &Rgba([1, 2, 3, 0]));
        assert_eq!(dst, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn empty_destination_copies_translucent_source() {
        let mut dst = Rgba([0, 0, 0, 0]);
        over(&mut dst, &Rgba([200, 100, 50, 128]));
        assert_eq!(dst, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn out_of_bounds_placement_is_rejected() {
        let items = vec![Item::from_rgba("a", RgbaImage::new(4, 4))];
        let layout = Layout {
            width: 4,
            height: 4,
            placements: vec![Rect::new(2, 0, 4, 4)],
        };
        assert!(matches!(
            compose(&items, &layout),
            Err(SheetError::ContractViolation(_))
        ));
    }

    #[test]
    fn oversized_canvas_is_refused_before_allocation() {
        let layout = Layout {
            width: 1 << 16,
            height: 1 << 16,
            placements: vec![],
        };
        assert!(matches!(
            compose(&[], &layout),
            Err(SheetError::InvalidDimensions {
                width: 65536,
                height: 65536
            })
        ));
    }

    #[test]
    fn placement_count_mismatch_is_rejected() {
        let items = vec![Item::from_rgba("a", RgbaImage::new(4, 4))];
        let layout = Layout {
            width: 4,
            height: 4,
            placements: vec![],
        };
        assert!(matches!(
            compose(&items, &layout),
            Err(SheetError::ContractViolation(_))
        ));
    }
}
