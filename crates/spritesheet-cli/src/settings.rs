use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spritesheet_core::{OutputFormat, SheetConfig};

/// Final option values after merging flags and the YAML config file.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub prefix: String,
    pub quality: u8,
    #[serde(flatten)]
    pub sheet: SheetConfig,
}

impl Settings {
    /// `<output>.<format extension>`
    pub fn image_path(&self) -> PathBuf {
        with_suffix(&self.output, self.format.extension())
    }

    pub fn css_path(&self) -> PathBuf {
        with_suffix(&self.output, "css")
    }

    pub fn scss_path(&self) -> PathBuf {
        with_suffix(&self.output, "scss")
    }

    pub fn json_path(&self) -> PathBuf {
        with_suffix(&self.output, "json")
    }

    /// Image url as seen from the stylesheet, which sits next to it.
    pub fn image_url(&self) -> String {
        self.image_path()
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Appends `.ext` without replacing an existing extension (`a.v2` -> `a.v2.css`).
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Config file keys. Present keys override the command-line values.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct YamlConfig {
    output: Option<PathBuf>,
    #[serde(alias = "format")]
    outtype: Option<String>,
    prefix: Option<String>,
    quality: Option<u8>,
    border: Option<u32>,
    #[serde(alias = "max_width")]
    width: Option<u32>,
    #[serde(alias = "max_height")]
    height: Option<u32>,
}

impl YamlConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn apply(self, mut s: Settings) -> anyhow::Result<Settings> {
        if let Some(v) = self.output {
            s.output = v;
        }
        if let Some(v) = self.outtype {
            s.format = parse_format(&v)?;
        }
        if let Some(v) = self.prefix {
            s.prefix = v;
        }
        if let Some(v) = self.quality {
            if !(1..=100).contains(&v) {
                anyhow::bail!("quality must be within 1..=100, got {}", v);
            }
            s.quality = v;
        }
        if let Some(v) = self.border {
            s.sheet.border = v;
        }
        if let Some(v) = self.width {
            s.sheet.max_width = v;
        }
        if let Some(v) = self.height {
            s.sheet.max_height = v;
        }
        Ok(s)
    }
}

pub fn parse_format(s: &str) -> anyhow::Result<OutputFormat> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown output format: {} (expected png, jpg or webp)", s))
}
