use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use spritesheet_core::{CssOptions, SheetConfig, SheetLayout, build_sheet, plan_sheet};
use tracing::{info, warn};

mod input;
mod settings;
mod template;

use settings::{Settings, YamlConfig, parse_format};

#[derive(Parser, Debug)]
#[command(
    name = "spritesheet",
    about = "Combine a folder of images into one sprite sheet and a CSS stylesheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the sheet image and its stylesheet
    Build(BuildArgs),
    /// Layout-only export (no image): compute placements and write JSON metadata
    Layout(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
struct BuildArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output base path: writes <OUTPUT>.css and <OUTPUT>.<format>
    #[arg(short, long, default_value = "output", help_heading = "Input/Output")]
    output: PathBuf,
    /// YAML config file (keys: output, outtype, prefix, quality, border, width, height)
    #[arg(short, long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Padding around every sprite, in pixels
    #[arg(short, long, default_value_t = 0, help_heading = "Layout")]
    border: u32,
    /// Max sheet width
    #[arg(long, default_value_t = 2000, help_heading = "Layout")]
    max_width: u32,
    /// Max sheet height
    #[arg(long, default_value_t = 2000, help_heading = "Layout")]
    max_height: u32,

    // Export
    /// Image format: webp | png | jpg
    #[arg(short = 't', long, default_value = "webp", help_heading = "Export")]
    format: String,
    /// Encoder quality (1..=100), used by jpg
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100), help_heading = "Export")]
    quality: u8,
    /// Class name prefix for every sprite
    #[arg(short, long, default_value = "tp-", help_heading = "Export")]
    prefix: String,
    /// Built-in stylesheet: css | scss
    #[arg(long, value_parser = ["css", "scss"], default_value = "css", help_heading = "Export")]
    style: String,
    /// External handlebars stylesheet template (overrides --style)
    #[arg(long, help_heading = "Export")]
    template: Option<PathBuf>,
    /// Also write JSON metadata: json-hash | json-array (layout defaults to json-hash)
    #[arg(long, value_parser = ["json-hash", "json-array"], help_heading = "Export")]
    metadata: Option<String>,
    /// Export sheet stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Build(args) => run_build(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => run_layout(args),
    }
}

fn resolve_settings(args: &BuildArgs) -> anyhow::Result<Settings> {
    let flags = Settings {
        output: args.output.clone(),
        format: parse_format(&args.format)?,
        prefix: args.prefix.clone(),
        quality: args.quality,
        sheet: SheetConfig {
            border: args.border,
            max_width: args.max_width,
            max_height: args.max_height,
        },
    };
    // Config file values win over flags
    let settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let y = YamlConfig::from_yaml(&text)
                .with_context(|| format!("parse config {}", path.display()))?;
            y.apply(flags)?
        }
        None => flags,
    };
    settings.sheet.validate()?;
    Ok(settings)
}

/// Returns true when the config was printed and the command should stop.
fn maybe_print_config(args: &BuildArgs, settings: &Settings) -> anyhow::Result<bool> {
    if !args.print_config {
        return Ok(false);
    }
    match args.print_config_format.as_str() {
        "yaml" => println!("{}", serde_yaml::to_string(settings)?),
        _ => println!("{}", serde_json::to_string_pretty(settings)?),
    }
    Ok(true)
}

fn run_build(args: &BuildArgs, show_progress: bool) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;
    if maybe_print_config(args, &settings)? {
        return Ok(());
    }

    let paths = input::gather_paths(&args.input, &args.include, &args.exclude)?;
    let items = input::load_items(&paths, show_progress)?;
    info!(count = items.len(), "loaded input images");

    let sheet = build_sheet(&items, &settings.sheet)?;
    let layout = sheet.layout();
    let stats = layout.stats();
    info!(
        width = stats.width,
        height = stats.height,
        frames = stats.num_frames,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );

    if !args.dry_run {
        let mut outputs = Vec::new();
        if sheet.frames.is_empty() {
            warn!("no images found, skipping the sheet image");
        } else {
            let mut buf = Vec::new();
            spritesheet_core::encode_image(
                &sheet.image,
                settings.format,
                settings.quality,
                &mut buf,
            )
            .context("encode sheet image")?;
            outputs.push((settings.image_path(), buf));
        }
        outputs.push(render_stylesheet(args, &settings, &layout)?);
        if let Some(kind) = &args.metadata {
            outputs.push((settings.json_path(), render_metadata(kind, &layout)?));
        }
        create_parent_dir(&settings.output)?;
        write_outputs(&outputs)?;
    }
    export_stats(args, &layout)
}

fn run_layout(args: &BuildArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;
    if maybe_print_config(args, &settings)? {
        return Ok(());
    }

    let paths = input::gather_paths(&args.input, &args.include, &args.exclude)?;
    let sizes = input::read_sizes(&paths)?;
    info!(count = sizes.len(), "read input sizes");
    let layout = plan_sheet(&sizes, &settings.sheet)?;

    if !args.dry_run {
        let kind = args.metadata.as_deref().unwrap_or("json-hash");
        let outputs = [(settings.json_path(), render_metadata(kind, &layout)?)];
        create_parent_dir(&settings.output)?;
        write_outputs(&outputs)?;
    }
    export_stats(args, &layout)
}

/// Stylesheet bytes and the path they belong at.
fn render_stylesheet(
    args: &BuildArgs,
    settings: &Settings,
    layout: &SheetLayout,
) -> anyhow::Result<(PathBuf, Vec<u8>)> {
    let image_url = settings.image_url();
    let format = settings.format.extension();
    let (text, path) = if let Some(tpl_path) = &args.template {
        let tpl = fs::read_to_string(tpl_path)
            .with_context(|| format!("read template {}", tpl_path.display()))?;
        let text = template::render_template(&tpl, layout, &image_url, format, &settings.prefix)?;
        (text, settings.css_path())
    } else if args.style == "scss" {
        let tpl = include_str!("../templates/sprites.scss.hbs");
        let text = template::render_template(tpl, layout, &image_url, format, &settings.prefix)?;
        (text, settings.scss_path())
    } else {
        let opts = CssOptions {
            prefix: settings.prefix.clone(),
            image_url,
        };
        (spritesheet_core::to_css(layout, &opts), settings.css_path())
    };
    Ok((path, text.into_bytes()))
}

fn render_metadata(kind: &str, layout: &SheetLayout) -> anyhow::Result<Vec<u8>> {
    let value = match kind {
        "json-array" => spritesheet_core::to_json_array(layout),
        "json-hash" => spritesheet_core::to_json_hash(layout),
        other => anyhow::bail!("unknown metadata format: {}", other),
    };
    Ok(serde_json::to_vec_pretty(&value)?)
}

/// Writes every rendered output in order. If one write fails, the files
/// already written by this call are removed again.
fn write_outputs(outputs: &[(PathBuf, Vec<u8>)]) -> anyhow::Result<()> {
    for (i, (path, data)) in outputs.iter().enumerate() {
        if let Err(e) = fs::write(path, data) {
            for (done, _) in &outputs[..i] {
                if let Err(rm) = fs::remove_file(done) {
                    warn!(path = %done.display(), error = %rm, "could not remove partial output");
                }
            }
            return Err(e).with_context(|| format!("write {}", path.display()));
        }
        info!(?path, bytes = data.len(), "written");
    }
    Ok(())
}

fn export_stats(args: &BuildArgs, layout: &SheetLayout) -> anyhow::Result<()> {
    let Some(stats_path) = &args.export_stats else {
        return Ok(());
    };
    let stats = layout.stats();
    if args.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }
    fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("write {}", stats_path.display()))?;
    info!(?stats_path, "stats exported");
    Ok(())
}

fn create_parent_dir(output: &Path) -> anyhow::Result<()> {
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
