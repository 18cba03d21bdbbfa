//! Core library for building CSS sprite sheets.
//!
//! - Layout: items are concatenated left to right in input order, each padded
//!   by `border` on both sides; the row is top-aligned
//! - Compositing: one RGBA8 canvas, source-over drawing, no clipping
//! - Exporters: default CSS stylesheet and JSON metadata over the placed frames
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use spritesheet_core::{Item, SheetConfig, build_sheet};
//! # fn main() -> anyhow::Result<()> {
//! let items = vec![
//!   Item::new("a", ImageReader::open("a.png")?.decode()?),
//!   Item::new("b", ImageReader::open("b.png")?.decode()?),
//! ];
//! let cfg = SheetConfig { border: 2, ..Default::default() };
//! let sheet = build_sheet(&items, &cfg)?;
//! println!("{}x{}", sheet.width(), sheet.height());
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod encode;
pub mod error;
pub mod export;
pub mod export_css;
pub mod layout;
pub mod model;
pub mod sheet;

pub use config::*;
pub use encode::*;
pub use error::*;
pub use export::*;
pub use export_css::*;
pub use layout::*;
pub use model::*;
pub use sheet::*;

/// Convenience prelude for common types and functions.
/// Importing `spritesheet_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{OutputFormat, SheetConfig, SheetConfigBuilder};
    pub use crate::error::{Axis, SheetError};
    pub use crate::export_css::CssOptions;
    pub use crate::layout::Layout;
    pub use crate::model::{Frame, Item, Meta, Rect, SheetLayout, SheetStats};
    pub use crate::{SpriteSheet, build_sheet, layout, layout_items, plan_sheet};
}
