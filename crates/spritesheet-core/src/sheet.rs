use crate::compositing::compose;
use crate::config::SheetConfig;
use crate::error::Result;
use crate::layout::{layout, layout_items};
use crate::model::{Frame, Item, Meta, SheetLayout, SheetStats};
use image::RgbaImage;
use tracing::{debug, instrument};

/// Output of a build: the composite RGBA canvas and the frames placed on it.
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub frames: Vec<Frame>,
    pub meta: Meta,
}

impl SpriteSheet {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Geometry-only view handed to the exporters.
    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            width: self.width(),
            height: self.height(),
            frames: self.frames.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Coverage statistics; delegates to [`SheetLayout::stats`].
    pub fn stats(&self) -> SheetStats {
        self.layout().stats()
    }
}

/// Lays out `items` and composites them into one sheet.
///
/// Items keep their input order left to right. Nothing is returned unless
/// both layout and compositing succeed. An empty slice gives an empty 0x0
/// sheet.
#[instrument(skip_all, fields(items = items.len()))]
pub fn build_sheet(items: &[Item], cfg: &SheetConfig) -> Result<SpriteSheet> {
    cfg.validate()?;

    let placed = layout_items(items, cfg)?;
    let image = compose(items, &placed)?;
    debug!(width = image.width(), height = image.height(), "sheet composited");

    let frames = items
        .iter()
        .zip(&placed.placements)
        .map(|(item, rect)| Frame::new(item.name(), *rect))
        .collect();
    Ok(SpriteSheet {
        image,
        frames,
        meta: meta_for(cfg),
    })
}

/// Computes sheet geometry from `(name, width, height)` triples without
/// touching any pixel data. Placements match [`build_sheet`] exactly.
#[instrument(skip_all, fields(items = inputs.len()))]
pub fn plan_sheet<K: AsRef<str>>(
    inputs: &[(K, u32, u32)],
    cfg: &SheetConfig,
) -> Result<SheetLayout> {
    cfg.validate()?;

    let placed = layout(inputs.iter().map(|(_, w, h)| (*w, *h)), cfg)?;
    let frames = inputs
        .iter()
        .zip(&placed.placements)
        .map(|((name, _, _), rect)| {
            let name: &str = name.as_ref();
            Frame::new(name, *rect)
        })
        .collect();
    Ok(SheetLayout {
        width: placed.width,
        height: placed.height,
        frames,
        meta: meta_for(cfg),
    })
}

fn meta_for(cfg: &SheetConfig) -> Meta {
    Meta {
        schema_version: "1".into(),
        app: "spritesheet".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        format: "RGBA8888".into(),
        border: cfg.border,
        max_dim: (cfg.max_width, cfg.max_height),
    }
}
