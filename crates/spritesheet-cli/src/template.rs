use handlebars::Handlebars;
use serde::Serialize;
use spritesheet_core::{SheetLayout, css_class};

#[derive(Serialize)]
struct TemplateSprite {
    name: String,
    /// Escaped `prefix + name`, ready to use as a class selector.
    class: String,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TemplateContext {
    image: String,
    format: String,
    prefix: String,
    width: u32,
    height: u32,
    sprites: Vec<TemplateSprite>,
    meta: serde_json::Value,
}

fn build_context(sheet: &SheetLayout, image: &str, format: &str, prefix: &str) -> TemplateContext {
    let sprites = sheet
        .frames
        .iter()
        .map(|fr| TemplateSprite {
            name: fr.name.clone(),
            class: css_class(prefix, &fr.name),
            x: fr.x,
            y: fr.y,
            w: fr.w,
            h: fr.h,
        })
        .collect();
    TemplateContext {
        image: image.to_string(),
        format: format.to_string(),
        prefix: prefix.to_string(),
        width: sheet.width,
        height: sheet.height,
        sprites,
        meta: serde_json::json!({
            "app": sheet.meta.app,
            "version": sheet.meta.version,
            "border": sheet.meta.border,
        }),
    }
}

/// Render a user-supplied handlebars stylesheet template over the sheet.
/// Output is not HTML-escaped; unknown fields are an error (strict mode).
pub fn render_template(
    tpl: &str,
    sheet: &SheetLayout,
    image: &str,
    format: &str,
    prefix: &str,
) -> anyhow::Result<String> {
    let mut reg = Handlebars::new();
    reg.set_strict_mode(true);
    reg.register_escape_fn(handlebars::no_escape);
    reg.register_template_string("tpl", tpl)?;
    let ctx = build_context(sheet, image, format, prefix);
    Ok(reg.render("tpl", &ctx)?)
}
