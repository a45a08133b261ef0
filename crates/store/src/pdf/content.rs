//! PDF Content Stream Generation
//!
//! Builder for the page content streams of a raster export. Only the
//! operators a paginated image needs are provided:
//!
//! - q/Q: save/restore graphics state
//! - cm: concatenate transformation matrix
//! - re, W, n: rectangle clip without painting
//! - Do: paint an XObject
//! - BT/ET, Tf, Td, Tj: a single line of text
//! - g: fill gray level

use std::fmt::Write as _;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: String,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data.into_bytes()
    }

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.line("q")
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.line("Q")
    }

    /// Concatenate a transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let _ = writeln!(
            self.data,
            "{} {} {} {} {} {} cm",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f)
        );
        self
    }

    /// Uniform scale of user space
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.transform(factor, 0.0, 0.0, factor, 0.0, 0.0)
    }

    /// Append a rectangle to the current path (re)
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let _ = writeln!(
            self.data,
            "{} {} {} {} re",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        );
        self
    }

    /// Intersect the clipping path with the current path (W)
    pub fn clip(&mut self) -> &mut Self {
        self.line("W")
    }

    /// End the path without filling or stroking (n)
    pub fn end_path(&mut self) -> &mut Self {
        self.line("n")
    }

    /// Paint a named XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{} Do", name);
        self
    }

    /// Set the fill color to a gray level in 0..=1 (g)
    pub fn set_fill_gray(&mut self, gray: f64) -> &mut Self {
        let _ = writeln!(self.data, "{} g", fmt_num(gray.clamp(0.0, 1.0)));
        self
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.line("BT")
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.line("ET")
    }

    /// Select a font resource and size (Tf)
    pub fn set_font(&mut self, font_name: &str, size: f64) -> &mut Self {
        let _ = writeln!(self.data, "/{} {} Tf", font_name, fmt_num(size));
        self
    }

    /// Move to the start of the next line (Td)
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        let _ = writeln!(self.data, "{} {} Td", fmt_num(tx), fmt_num(ty));
        self
    }

    /// Show a text string (Tj). Characters outside Latin-1 become `?`.
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.data.push('(');
        for c in text.chars() {
            match c {
                '(' | ')' | '\\' => {
                    self.data.push('\\');
                    self.data.push(c);
                }
                ' '..='~' => self.data.push(c),
                c if (c as u32) < 256 => {
                    let _ = write!(self.data, "\\{:03o}", c as u32);
                }
                _ => self.data.push('?'),
            }
        }
        self.data.push_str(") Tj\n");
        self
    }

    fn line(&mut self, op: &str) -> &mut Self {
        self.data.push_str(op);
        self.data.push('\n');
        self
    }
}

/// Format a number for a content stream, integers without a decimal point
fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
impl ContentStream {
    pub fn as_str(&self) -> &str {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_and_draw() {
        let mut content = ContentStream::new();
        content
            .save_state()
            .rect(20.0, 20.0, 170.0, 257.0)
            .clip()
            .end_path()
            .transform(170.0, 0.0, 0.0, 100.5, 20.0, 176.5)
            .draw_xobject("Im1")
            .restore_state();
        assert_eq!(
            content.as_str(),
            "q\n20 20 170 257 re\nW\nn\n170 0 0 100.5 20 176.5 cm\n/Im1 Do\nQ\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut content = ContentStream::new();
        content.begin_text().set_font("F1", 3.5278).move_text(170.0, 10.0).show_text("Page (1)").end_text();
        assert_eq!(content.as_str(), "BT\n/F1 3.5278 Tf\n170 10 Td\n(Page \\(1\\)) Tj\nET\n");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(2.83464567), "2.8346");
        assert_eq!(fmt_num(-0.00001), "0");
    }
}
