use crate::config::SheetConfig;
use crate::error::{Axis, Result, SheetError};
use crate::model::{Item, Rect};
use tracing::{debug, trace};

/// Canvas size plus one placement per input, index-aligned with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Rect>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lays `sizes` out left to right in a single row.
///
/// Every item gets `border` pixels on its left and right, so neighbours are
/// `2 * border` apart. All items share `y = border`; the row is as tall as the
/// tallest item plus `2 * border` and shorter items are top-aligned, leaving a
/// gap below them.
///
/// Fails on the first zero-sized item, then if the row is wider than
/// `max_width`, then if it is taller than `max_height`. An empty input yields
/// a 0x0 canvas.
pub fn layout<I>(sizes: I, cfg: &SheetConfig) -> Result<Layout>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let sizes: Vec<(u32, u32)> = sizes.into_iter().collect();
    if sizes.is_empty() {
        return Ok(Layout {
            width: 0,
            height: 0,
            placements: Vec::new(),
        });
    }

    let border = cfg.border as u64;
    let mut total_w = 0u64;
    let mut max_h = 0u64;
    for (index, &(w, h)) in sizes.iter().enumerate() {
        if w == 0 || h == 0 {
            return Err(SheetError::DegenerateItem {
                index,
                width: w,
                height: h,
            });
        }
        total_w += w as u64 + 2 * border;
        max_h = max_h.max(h as u64);
    }
    let total_h = max_h + 2 * border;

    if total_w > cfg.max_width as u64 {
        return Err(SheetError::CapacityExceeded {
            axis: Axis::Width,
            limit: cfg.max_width,
            computed: total_w,
        });
    }
    if total_h > cfg.max_height as u64 {
        return Err(SheetError::CapacityExceeded {
            axis: Axis::Height,
            limit: cfg.max_height,
            computed: total_h,
        });
    }
    // Both totals now fit the u32 limits, so the cursor arithmetic cannot overflow.
    let border = cfg.border;
    let (width, height) = (total_w as u32, total_h as u32);
    debug!(width, height, items = sizes.len(), "computed sheet size");

    let mut placements = Vec::with_capacity(sizes.len());
    let mut cx = 0u32;
    for (w, h) in sizes {
        let x = cx + border;
        let rect = Rect::new(x, border, w, h);
        trace!(x = rect.x, y = rect.y, w, h, "placed");
        placements.push(rect);
        cx = x + w + border;
    }

    Ok(Layout {
        width,
        height,
        placements,
    })
}

/// Lays out decoded items; see [`layout`].
pub fn layout_items(items: &[Item], cfg: &SheetConfig) -> Result<Layout> {
    layout(items.iter().map(Item::dimensions), cfg)
}
