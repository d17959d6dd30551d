// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SVG layer markup — physical size / view window extraction and the group
// rewrite that applies a transform to everything except `<defs>`.

use resinmask_core::error::{MaskError, Result};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, instrument};

/// The drawing-unit window of an SVG (`viewBox`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Physical geometry of one board layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardArtwork {
    pub width_mm: f64,
    pub height_mm: f64,
    pub view_box: ViewBox,
}

impl BoardArtwork {
    /// Read the root `width`, `height` and `viewBox` attributes.
    #[instrument(skip_all, fields(markup_len = markup.len()))]
    pub fn parse(markup: &str) -> Result<Self> {
        let doc = parse_document(markup)?;
        let root = svg_root(&doc)?;

        let width_mm = parse_length(required_attribute(root, "width")?)?;
        let height_mm = parse_length(required_attribute(root, "height")?)?;
        let view_box = parse_view_box(required_attribute(root, "viewBox")?)?;

        debug!(width_mm, height_mm, ?view_box, "Board artwork parsed");
        Ok(Self {
            width_mm,
            height_mm,
            view_box,
        })
    }
}

/// Wrap the root's content in `<g transform="matrix(..)">` and return the
/// re-serialized markup.
///
/// `<defs>` children are hoisted in front of the group so shared
/// definitions are not transformed. Text outside the root element is kept
/// byte-for-byte.
#[instrument(skip_all, fields(transform = %transform.to_svg()))]
pub fn apply_transform(markup: &str, transform: &super::Affine) -> Result<String> {
    let doc = parse_document(markup)?;
    let root = svg_root(&doc)?;
    let range = root.range();
    let element = &markup[range.clone()];

    let open_len = start_tag_len(element).ok_or_else(|| {
        MaskError::MalformedMarkup("unterminated <svg> start tag".into())
    })?;
    if element[..open_len].ends_with("/>") {
        // Nothing to mirror.
        return Ok(markup.to_owned());
    }
    let close_start = element
        .rfind("</")
        .ok_or_else(|| MaskError::MalformedMarkup("missing </svg> end tag".into()))?;

    let content_start = range.start + open_len;
    let content_end = range.start + close_start;

    let mut defs = String::new();
    let mut body = String::new();
    let mut cursor = content_start;
    for child in root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "defs")
    {
        let child_range = child.range();
        body.push_str(&markup[cursor..child_range.start]);
        defs.push_str(&markup[child_range.clone()]);
        cursor = child_range.end;
    }
    body.push_str(&markup[cursor..content_end]);

    let mut out = String::with_capacity(markup.len() + 64);
    out.push_str(&markup[..content_start]);
    out.push_str(&defs);
    out.push_str("<g transform=\"");
    out.push_str(&transform.to_svg());
    out.push_str("\">");
    out.push_str(&body);
    out.push_str("</g>");
    out.push_str(&markup[content_end..]);
    Ok(out)
}

fn parse_document(markup: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(markup, options)
        .map_err(|err| MaskError::MalformedMarkup(format!("invalid XML: {err}")))
}

fn svg_root<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(MaskError::MalformedMarkup(format!(
            "root element is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }
    Ok(root)
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| MaskError::MalformedMarkup(format!("<svg> has no {name} attribute")))
}

/// Parse a physical length. Bare numbers are millimetres.
fn parse_length(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    let (number, mm_per_unit) = if let Some(n) = trimmed.strip_suffix("mm") {
        (n, 1.0)
    } else if let Some(n) = trimmed.strip_suffix("cm") {
        (n, 10.0)
    } else if let Some(n) = trimmed.strip_suffix("in") {
        (n, 25.4)
    } else {
        (trimmed, 1.0)
    };
    let parsed: f64 = number.trim().parse().map_err(|_| {
        MaskError::MalformedMarkup(format!("'{value}' is not a physical length"))
    })?;
    let mm = parsed * mm_per_unit;
    if !mm.is_finite() || mm <= 0.0 {
        return Err(MaskError::MalformedMarkup(format!(
            "length '{value}' must be positive"
        )));
    }
    Ok(mm)
}

fn parse_view_box(value: &str) -> Result<ViewBox> {
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| MaskError::MalformedMarkup(format!("viewBox '{value}' is not numeric")))?;

    let [x, y, width, height] = numbers[..] else {
        return Err(MaskError::MalformedMarkup(format!(
            "viewBox '{value}' needs four numbers"
        )));
    };
    if !(width > 0.0 && height > 0.0) {
        return Err(MaskError::MalformedMarkup(format!(
            "viewBox '{value}' has an empty extent"
        )));
    }
    Ok(ViewBox {
        x,
        y,
        width,
        height,
    })
}

/// Length of the start tag at the beginning of `element`, including `>`.
fn start_tag_len(element: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (idx, byte) in element.bytes().enumerate() {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(idx + 1),
            (None, _) => {}
        }
    }
    None
}
