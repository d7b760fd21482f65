//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer for in-memory previews
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        std::io::Result::Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { std::io::Result::Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Get the SVG string
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

/// Write the XML declaration, opening <svg> tag, and background.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, bounds: &geo::Rect) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width:.0}" height="{height:.0}"
        viewBox="0 0 {width:.0} {height:.0}"
        data-x-min="{x_min}" data-x-max="{x_max}"
        data-y-min="{y_min}" data-y-max="{y_max}">"##,
        x_min = bounds.min().x,
        x_max = bounds.max().x,
        y_min = bounds.min().y,
        y_max = bounds.max().y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write styles for district outlines and street strokes.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .district {{ fill: #808080; fill-opacity: 0.1; stroke: #808080; stroke-width: 0.5; }}
    .district.selected {{ fill-opacity: 0.2; stroke: #111827; stroke-width: 1.0; }}
    .street {{ fill: none; stroke-width: 2; stroke-opacity: 0.9; stroke-linecap: round; vector-effect: non-scaling-stroke; }}
    .legend {{ font: 12px sans-serif; fill: #111827; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text for use inside SVG elements and attributes.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
