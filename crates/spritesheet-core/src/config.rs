use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raster container written for the composite sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    Png,
    /// Lossy JPEG; alpha is dropped and `quality` applies.
    #[serde(alias = "jpg")]
    Jpeg,
    /// Lossy WebP with alpha; `quality` applies.
    #[default]
    WebP,
}

impl OutputFormat {
    /// File extension (and stylesheet url suffix) for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            _ => Err(()),
        }
    }
}

/// Sizing constraints for a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Pixels of padding inserted before and after every item horizontally,
    /// and above/below the row vertically.
    #[serde(default)]
    pub border: u32,
    /// Maximum canvas width in pixels.
    #[serde(default = "default_max_dim")]
    pub max_width: u32,
    /// Maximum canvas height in pixels.
    #[serde(default = "default_max_dim")]
    pub max_height: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            border: 0,
            max_width: default_max_dim(),
            max_height: default_max_dim(),
        }
    }
}

impl SheetConfig {
    /// Validates the configuration parameters.
    ///
    /// Both maximum dimensions must be non-zero. The border is not checked
    /// against the limits here; an oversized border surfaces as a capacity
    /// error once items are laid out.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SheetError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(SheetError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `SheetConfig`.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder::new()
    }
}

fn default_max_dim() -> u32 {
    2000
}

/// Builder for `SheetConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SheetConfigBuilder {
    cfg: SheetConfig,
}

impl SheetConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SheetConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn max_width(mut self, v: u32) -> Self {
        self.cfg.max_width = v;
        self
    }
    pub fn max_height(mut self, v: u32) -> Self {
        self.cfg.max_height = v;
        self
    }
    pub fn border(mut self, v: u32) -> Self {
        self.cfg.border = v;
        self
    }
    pub fn build(self) -> SheetConfig {
        self.cfg
    }
}
