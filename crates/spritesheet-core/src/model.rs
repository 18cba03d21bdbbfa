use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }
    /// True if the half-open areas of `self` and `other` intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.x as u64) < other.right()
            && (other.x as u64) < self.right()
            && (self.y as u64) < other.bottom()
            && (other.y as u64) < self.bottom()
    }
    /// True if `self` lies entirely inside a `width x height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

/// One source image waiting to be placed on a sheet.
///
/// The pixel source is owned by the item and only ever read. Dimensions are
/// taken from the image and cannot change afterwards.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    image: DynamicImage,
}

impl Item {
    pub fn new(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    pub fn from_rgba(name: impl Into<String>, rgba: RgbaImage) -> Self {
        Self::new(name, DynamicImage::ImageRgba8(rgba))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// A placed item: its name and rectangle within the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Frame {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Sheet-level metadata carried into exported JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version of the JSON metadata; current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub format: String,
    pub border: u32,
    pub max_dim: (u32, u32),
}

/// Geometry of a finished sheet: canvas size and frames in placement order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
    pub meta: Meta,
}

/// Statistics about how much of the canvas is covered by sprites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetStats {
    pub num_frames: usize,
    /// `width * height` of the canvas.
    pub canvas_area: u64,
    /// Sum of frame areas.
    pub used_area: u64,
    /// `used_area / canvas_area` (0.0 to 1.0); 0.0 for an empty canvas.
    pub occupancy: f64,
    pub width: u32,
    pub height: u32,
}

impl SheetLayout {
    /// Computes coverage statistics for this sheet.
    pub fn stats(&self) -> SheetStats {
        let canvas_area = (self.width as u64) * (self.height as u64);
        let used_area: u64 = self
            .frames
            .iter()
            .map(|f| (f.w as u64) * (f.h as u64))
            .sum();
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        SheetStats {
            num_frames: self.frames.len(),
            canvas_area,
            used_area,
            occupancy,
            width: self.width,
            height: self.height,
        }
    }
}

impl SheetStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Frames: {}, Size: {}x{}, Occupancy: {:.2}%, Canvas Area: {} px², Used Area: {} px²",
            self.num_frames,
            self.width,
            self.height,
            self.occupancy * 100.0,
            self.canvas_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.canvas_area > 0 {
            (self.wasted_area() as f64 / self.canvas_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
