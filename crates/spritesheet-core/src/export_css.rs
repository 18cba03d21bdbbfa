use crate::model::SheetLayout;

/// Options for the built-in stylesheet renderer.
#[derive(Debug, Clone)]
pub struct CssOptions {
    /// Prepended to every sprite name to form its class selector.
    pub prefix: String,
    /// `background-image` url of the sheet, relative to the stylesheet.
    pub image_url: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: "tp-".into(),
            image_url: "output.webp".into(),
        }
    }
}

/// Render the stylesheet: a shared `.sprite` rule pointing at the sheet image
/// followed by one `.<prefix><name>` rule per frame, in frame order.
pub fn to_css(sheet: &SheetLayout, opts: &CssOptions) -> String {
    let mut s = String::new();
    s.push_str(
        r#"/* ----------------------------------------------------
   generated by spritesheet
   ----------------------------------------------------

   usage: <span class="{-spritename-} sprite"></span>

   replace {-spritename-} with the sprite you like to use

   ----------------------------------------------------
*/

"#,
    );
    s.push_str(&format!(
        ".sprite {{display:inline-block; overflow:hidden; background-repeat: no-repeat;background-image:url(./{});}}\n",
        css_url_escape(&opts.image_url)
    ));
    for fr in &sheet.frames {
        s.push_str(&format!(
            "\n.{} {{width:{}px; height:{}px; background-position: -{}px -{}px}}\n",
            css_class(&opts.prefix, &fr.name),
            fr.w,
            fr.h,
            fr.x,
            fr.y,
        ));
    }
    s
}

/// Escaped class selector body for `prefix + name`.
pub fn css_class(prefix: &str, name: &str) -> String {
    let ident = format!("{}{}", prefix, name);
    let mut out = String::with_capacity(ident.len());
    for (i, c) in ident.chars().enumerate() {
        if c.is_ascii_digit() && i == 0 {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

fn css_url_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace(' ', "\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(css_class("tp-", "arrow_left"), "tp-arrow_left");
    }

    #[test]
    fn punctuation_is_escaped() {
        assert_eq!(css_class("tp-", "icon.big"), "tp-icon\\.big");
        assert_eq!(css_class("", "a b"), "a\\ b");
    }

    #[test]
    fn leading_digit_without_prefix_is_hex_escaped() {
        assert_eq!(css_class("", "1up"), "\\31 up");
    }
}
