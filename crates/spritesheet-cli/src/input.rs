use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::ImageReader;
use indicatif::{ProgressBar, ProgressStyle};
use spritesheet_core::Item;
use tracing::debug;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Collect candidate image files under `path` (or `path` itself), sorted by
/// file name within each directory so sheet order is reproducible.
pub fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globs(include)?;
    let exc_set = build_globs(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
        return Ok(list);
    }
    if !path.is_dir() {
        anyhow::bail!("input {} does not exist", path.display());
    }
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", path.display()))?;
        let p = entry.path();
        if entry.file_type().is_file()
            && !should_skip(p, inc_set.as_ref(), exc_set.as_ref())
            && is_image(p)
        {
            list.push(p.to_path_buf());
        }
    }
    Ok(list)
}

fn build_globs(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("invalid glob {}", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Sprite name for a file: base name with directory and last extension removed.
pub fn sprite_name(p: &Path) -> String {
    p.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decode every path into an [`Item`], keeping the order of `paths`.
/// The first file that fails to decode aborts the whole load.
pub fn load_items(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<Item>> {
    let bar = progress_bar(paths.len(), progress)?;
    let load = |p: &PathBuf| {
        let item = load_item(p);
        if let Some(b) = &bar {
            b.set_message(sprite_name(p));
            b.inc(1);
        }
        item
    };

    #[cfg(feature = "parallel")]
    let results: Vec<anyhow::Result<Item>> = paths.par_iter().map(load).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<anyhow::Result<Item>> = paths.iter().map(load).collect();

    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    results.into_iter().collect()
}

fn load_item(p: &Path) -> anyhow::Result<Item> {
    let img = ImageReader::open(p)
        .with_context(|| format!("open {}", p.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff {}", p.display()))?
        .decode()
        .with_context(|| format!("decode {}", p.display()))?;
    debug!(path = %p.display(), w = img.width(), h = img.height(), "loaded");
    Ok(Item::new(sprite_name(p), img))
}

/// Read only the dimensions of every path, as `(name, width, height)`.
pub fn read_sizes(paths: &[PathBuf]) -> anyhow::Result<Vec<(String, u32, u32)>> {
    paths
        .iter()
        .map(|p| -> anyhow::Result<(String, u32, u32)> {
            let (w, h) = ImageReader::open(p)
                .with_context(|| format!("open {}", p.display()))?
                .with_guessed_format()
                .with_context(|| format!("sniff {}", p.display()))?
                .into_dimensions()
                .with_context(|| format!("read size of {}", p.display()))?;
            Ok((sprite_name(p), w, h))
        })
        .collect()
}

fn progress_bar(len: usize, enabled: bool) -> anyhow::Result<Option<ProgressBar>> {
    if !enabled {
        return Ok(None);
    }
    let b = ProgressBar::new(len as u64);
    b.set_style(ProgressStyle::with_template(
        "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
    )?);
    Ok(Some(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn sprite_name_strips_directory_and_last_extension() {
        assert_eq!(sprite_name(Path::new("icons/arrow.png")), "arrow");
        assert_eq!(sprite_name(Path::new("a/b/logo.v2.jpg")), "logo.v2");
    }

    #[test]
    fn gathers_images_recursively_in_name_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write_png(&dir.path().join("b.png"), 2, 2);
        write_png(&dir.path().join("a.PNG"), 2, 2);
        write_png(&dir.path().join("sub").join("c.png"), 2, 2);
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let paths = gather_paths(dir.path(), &[], &[]).unwrap();
        let names: Vec<String> = paths.iter().map(|p| sprite_name(p)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn exclude_globs_filter_paths() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("keep.png"), 2, 2);
        write_png(&dir.path().join("skip_me.png"), 2, 2);

        let paths = gather_paths(dir.path(), &[], &["**/skip_*".to_string()]).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(sprite_name(&paths[0]), "keep");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(gather_paths(&dir.path().join("nope"), &[], &[]).is_err());
    }

    #[test]
    fn load_items_keeps_order_and_sizes() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 4, 3);
        write_png(&dir.path().join("b.png"), 1, 7);
        let paths = gather_paths(dir.path(), &[], &[]).unwrap();

        let items = load_items(&paths, false).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].name(), items[0].dimensions()), ("a", (4, 3)));
        assert_eq!((items[1].name(), items[1].dimensions()), ("b", (1, 7)));

        let sizes = read_sizes(&paths).unwrap();
        assert_eq!(sizes[1], ("b".to_string(), 1, 7));
    }

    #[test]
    fn undecodable_file_aborts_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let paths = gather_paths(dir.path(), &[], &[]).unwrap();
        assert!(load_items(&paths, false).is_err());
    }

    #[test]
    fn read_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("gone.png");
        let err = format!("{:#}", load_item(&gone).unwrap_err());
        assert!(err.contains("gone.png"), "{}", err);

        fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let err = format!("{:#}", read_sizes(&[dir.path().join("broken.png")]).unwrap_err());
        assert!(err.contains("broken.png"), "{}", err);
    }
}
