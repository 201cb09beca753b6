//! SVG output for surface scenes
//!
//! Writes a scene as a standalone SVG document. Radial gradients and clip
//! paths go into `<defs>`; elements follow in draw order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Write as _;

use glam::DVec2;

use isoplot_core::{Rgb, TilePath};

use crate::scene::{BlendMode, Paint, RadialGradient, Scene, SceneElement, Style};

/// SVG writer options
#[derive(Debug, Clone)]
pub struct SvgExportConfig {
    /// Decimal places written for every coordinate
    pub precision: u8,
    /// Full-canvas fill painted under the scene
    pub background: Option<Rgb>,
    /// Emit the `<?xml ...?>` prolog
    pub xml_declaration: bool,
}

impl Default for SvgExportConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            background: None,
            xml_declaration: true,
        }
    }
}

impl SvgExportConfig {
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Omit the prolog, for inline documents
    pub fn without_xml_declaration(mut self) -> Self {
        self.xml_declaration = false;
        self
    }
}

struct SvgWriter<'a> {
    out: String,
    config: &'a SvgExportConfig,
    clip_count: usize,
    clip_defs: String,
}

impl<'a> SvgWriter<'a> {
    fn num(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.config.precision as usize)
    }

    fn point(&self, p: DVec2) -> String {
        format!("{},{}", self.num(p.x), self.num(p.y))
    }

    fn path_data(&self, path: &TilePath) -> String {
        let mut d = format!("M{}", self.point(path.start));
        for segment in &path.segments {
            let _ = write!(
                d,
                " C{} {} {}",
                self.point(segment.control1),
                self.point(segment.control2),
                self.point(segment.end)
            );
        }
        d.push_str(" Z");
        d
    }

    fn style_attributes(&self, style: &Style) -> String {
        let mut attrs = Vec::new();

        match &style.fill {
            Paint::None => attrs.push("fill=\"none\"".to_string()),
            Paint::Solid(color) => attrs.push(format!("fill=\"{}\"", color)),
            Paint::Gradient(id) => attrs.push(format!("fill=\"url(#{})\"", escape(id))),
        }
        if style.fill_opacity < 1.0 {
            attrs.push(format!("fill-opacity=\"{}\"", self.num(style.fill_opacity)));
        }

        match style.stroke {
            Some(color) if style.stroke_width > 0.0 => {
                attrs.push(format!("stroke=\"{}\"", color));
                attrs.push(format!("stroke-width=\"{}\"", self.num(style.stroke_width)));
            }
            _ => attrs.push("stroke=\"none\"".to_string()),
        }

        attrs.join(" ")
    }

    fn gradient(&mut self, gradient: &RadialGradient) {
        let header = format!(
            "    <radialGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" cx=\"{}\" cy=\"{}\" r=\"{}\">\n",
            escape(&gradient.id),
            self.num(gradient.center.x),
            self.num(gradient.center.y),
            self.num(gradient.radius)
        );
        self.out.push_str(&header);
        for stop in &gradient.stops {
            let line = format!(
                "      <stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>\n",
                self.num(stop.offset),
                stop.color,
                self.num(stop.opacity)
            );
            self.out.push_str(&line);
        }
        self.out.push_str("    </radialGradient>\n");
    }

    fn element(&mut self, element: &SceneElement, depth: usize) {
        let indent = "  ".repeat(depth);
        let line = match element {
            SceneElement::Path { path, style } => format!(
                "{indent}<path d=\"{}\" {}/>\n",
                self.path_data(path),
                self.style_attributes(style)
            ),
            SceneElement::Circle {
                center,
                radius,
                style,
                target,
            } => {
                let data = target
                    .map(|index| format!(" data-x=\"{}\" data-y=\"{}\"", index.x, index.y))
                    .unwrap_or_default();
                format!(
                    "{indent}<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}{data}/>\n",
                    self.num(center.x),
                    self.num(center.y),
                    self.num(*radius),
                    self.style_attributes(style)
                )
            }
            SceneElement::Line {
                from,
                to,
                color,
                width,
            } => format!(
                "{indent}<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                self.num(from.x),
                self.num(from.y),
                self.num(to.x),
                self.num(to.y),
                color,
                self.num(*width)
            ),
            SceneElement::Text {
                position,
                content,
                anchor,
                color,
                size,
            } => format!(
                "{indent}<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" fill=\"{}\" font-size=\"{}\">{}</text>\n",
                self.num(position.x),
                self.num(position.y),
                anchor.css_name(),
                color,
                self.num(*size),
                escape(content)
            ),
            SceneElement::Group {
                clip,
                blend,
                children,
            } => {
                let mut attrs = String::new();
                if let Some(path) = clip {
                    self.clip_count += 1;
                    let id = format!("clip-{}", self.clip_count);
                    let def = format!(
                        "    <clipPath id=\"{id}\"><path d=\"{}\"/></clipPath>\n",
                        self.path_data(path)
                    );
                    self.clip_defs.push_str(&def);
                    let _ = write!(attrs, " clip-path=\"url(#{id})\"");
                }
                if *blend != BlendMode::Normal {
                    let _ = write!(attrs, " style=\"mix-blend-mode:{}\"", blend.css_name());
                }

                self.out.push_str(&format!("{indent}<g{attrs}>\n"));
                for child in children {
                    self.element(child, depth + 1);
                }
                format!("{indent}</g>\n")
            }
        };
        self.out.push_str(&line);
    }
}

/// Escape markup characters in text and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize `scene` as an SVG document
///
/// # Example
/// ```ignore
/// let scene = view.render(RenderState::default(), None);
/// let svg = scene_to_svg(&scene, &SvgExportConfig::default());
/// std::fs::write("surface.svg", svg)?;
/// ```
pub fn scene_to_svg(scene: &Scene, config: &SvgExportConfig) -> String {
    let mut writer = SvgWriter {
        out: String::with_capacity(256 * scene.elements.len() + 512),
        config,
        clip_count: 0,
        clip_defs: String::new(),
    };

    // Elements first so clip paths are known before <defs> is assembled.
    for element in &scene.elements {
        writer.element(element, 1);
    }
    let body = std::mem::take(&mut writer.out);

    for gradient in &scene.gradients {
        writer.gradient(gradient);
    }
    let gradients = std::mem::take(&mut writer.out);

    let mut svg = String::with_capacity(body.len() + gradients.len() + writer.clip_defs.len() + 256);
    if config.xml_declaration {
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = writer.num(scene.width),
        h = writer.num(scene.height)
    );
    if let Some(background) = config.background {
        let _ = writeln!(
            svg,
            "  <rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            background
        );
    }
    if !gradients.is_empty() || !writer.clip_defs.is_empty() {
        svg.push_str("  <defs>\n");
        svg.push_str(&gradients);
        svg.push_str(&writer.clip_defs);
        svg.push_str("  </defs>\n");
    }
    svg.push_str(&body);
    svg.push_str("</svg>\n");
    svg
}
