//! SVG serialization of a [`RenderModel`].

use std::fmt::{self, Write};

use super::{RenderModel, TextAnchor};

pub fn render_svg(model: &RenderModel) -> String {
    let mut svg = String::new();
    // fmt::Write for String never fails
    if write_svg(&mut svg, model).is_err() {
        svg.clear();
    }
    svg
}

/// Stream the SVG document for `model` into any text sink
pub fn write_svg<W: Write>(out: &mut W, model: &RenderModel) -> fmt::Result {
    writeln!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='100%' viewBox='{}' role='img'>",
        model.view_box()
    )?;
    writeln!(out, "  <title>{}</title>", escape_text(&model.caption))?;

    for line in &model.gridlines {
        writeln!(
            out,
            "  <line x1='{}' x2='{}' y1='{}' y2='{}' stroke='{}' stroke-width='{}'/>",
            line.x1, line.x2, line.y, line.y, line.stroke, line.stroke_width
        )?;
    }

    for label in model.x_labels.iter().chain(&model.y_labels) {
        let anchor = match label.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        writeln!(
            out,
            "  <text x='{}' y='{}' font-size='{}' text-anchor='{}' fill='{}'>{}</text>",
            label.x,
            label.y,
            label.font_size,
            anchor,
            label.fill,
            escape_text(&label.text)
        )?;
    }

    for path in &model.series {
        writeln!(out, "  <g data-style='{}'>", escape_text(path.category.label()))?;
        writeln!(
            out,
            "    <path d='{}' fill='none' stroke='{}' stroke-width='{}' stroke-opacity='{}' stroke-linecap='round' stroke-linejoin='round'/>",
            path.d, path.color, path.stroke_width, path.stroke_opacity
        )?;
        for m in &path.markers {
            writeln!(
                out,
                "    <circle cx='{:.2}' cy='{:.2}' r='{}' fill='{}' stroke='{}' stroke-width='{}'/>",
                m.cx, m.cy, m.r, m.fill, m.stroke, m.stroke_width
            )?;
        }
        writeln!(out, "  </g>")?;
    }

    writeln!(out, "</svg>")
}

fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
