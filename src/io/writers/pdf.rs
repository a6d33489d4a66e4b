//! PDF backend for the invoice layout tree.
//!
//! Paints [`LayoutNode`]s onto A4 pages using the builtin Helvetica faces.
//! Coordinates are tracked in points from the top of the page and converted
//! to printpdf's bottom-left millimetre space only when drawing.
use std::collections::HashMap;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rgb,
};
use tracing::{debug, info, warn};

use crate::core::layout::{Align, LayoutNode, NodeKind, Rgb8, TextStyle, Weight, build_layout};
use crate::core::metrics::{is_win_ansi, text_width, wrap};
use crate::error::{Error, Result};
use crate::io::writers::logo::{Logo, load_logo};
use crate::types::InvoiceRecord;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
/// Blank margin on every side of a page, in points.
pub const PAGE_PADDING: f32 = 32.0;

const LAYER_NAME: &str = "Layer 1";

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(c.0) / 255.0,
        f32::from(c.1) / 255.0,
        f32::from(c.2) / 255.0,
        None,
    ))
}

/// Encoded document plus the number of pages it spans.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Lay out and paint `record` into a complete PDF.
pub fn render_pdf(record: &InvoiceRecord) -> Result<RenderedPdf> {
    let nodes = build_layout(record)?;
    let mut painter = Painter::new(&format!("Invoice {}", record.invoice_number))?;
    painter.load_images(&nodes);
    painter.flow(&nodes);
    let rendered = painter.finish()?;
    info!(
        "Rendered invoice {} ({} page(s), {} bytes)",
        record.invoice_number,
        rendered.pages,
        rendered.bytes.len()
    );
    Ok(rendered)
}

/// Vertical size of a node tree, independent of any open document.
struct Measure<'a> {
    logos: &'a HashMap<PathBuf, Logo>,
}

impl Measure<'_> {
    fn lines(&self, content: &str, style: &TextStyle, box_w: f32) -> Vec<String> {
        let bold = style.weight == Weight::Bold;
        wrap(content, box_w, |s| {
            text_width(s, style.size, bold, style.letter_spacing)
        })
    }

    fn image_height(&self, source: &Path, width_pt: f32, box_w: f32) -> Option<f32> {
        self.logos
            .get(source)
            .map(|logo| logo.height_for(width_pt.min(box_w)))
    }

    /// Height of `node` including its margins when offered `avail` points of width.
    fn outer(&self, node: &LayoutNode, avail: f32) -> f32 {
        if let NodeKind::Image { source, .. } = &node.kind {
            if !self.logos.contains_key(source) {
                return 0.0;
            }
        }
        node.margin_top + self.content(node, node.width * avail) + node.margin_bottom
    }

    fn content(&self, node: &LayoutNode, box_w: f32) -> f32 {
        match &node.kind {
            NodeKind::Text { content, style } => {
                self.lines(content, style, box_w).len() as f32 * style.line_advance()
            }
            NodeKind::Image { source, width_pt } => {
                self.image_height(source, *width_pt, box_w).unwrap_or(0.0)
            }
            NodeKind::Row(children) => children
                .iter()
                .map(|c| self.outer(c, box_w))
                .fold(0.0, f32::max),
            NodeKind::Stack(children) => children.iter().map(|c| self.outer(c, box_w)).sum(),
            NodeKind::Divider { thickness, .. } => *thickness,
        }
    }
}

fn place(node: &LayoutNode, x: f32, avail: f32) -> (f32, f32) {
    let box_w = node.width.clamp(0.0, 1.0) * avail;
    let box_x = match node.align {
        Align::Start => x,
        Align::Center => x + (avail - box_w) / 2.0,
        Align::End => x + avail - box_w,
    };
    (box_x, box_w)
}

fn row_gap(children: &[LayoutNode], box_w: f32) -> f32 {
    if children.len() < 2 {
        return 0.0;
    }
    let used: f32 = children.iter().map(|c| c.width * box_w).sum();
    (box_w - used).max(0.0) / (children.len() - 1) as f32
}

struct Painter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    logos: HashMap<PathBuf, Logo>,
    page_width: f32,
    page_height: f32,
    /// Distance from the top of the current page, in points
    cursor: f32,
    pages: usize,
}

impl Painter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(Error::pdf)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(Error::pdf)?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            logos: HashMap::new(),
            page_width: pt(A4_WIDTH_MM),
            page_height: pt(A4_HEIGHT_MM),
            cursor: PAGE_PADDING,
            pages: 1,
        })
    }

    fn load_images(&mut self, nodes: &[LayoutNode]) {
        for source in nodes.iter().flat_map(LayoutNode::images) {
            if self.logos.contains_key(source) {
                continue;
            }
            if let Some(logo) = load_logo(source) {
                debug!("Loaded logo {:?} ({}x{})", source, logo.width_px, logo.height_px);
                self.logos.insert(source.clone(), logo);
            }
        }
    }

    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * PAGE_PADDING
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_PADDING;
        self.pages += 1;
        debug!("Started page {}", self.pages);
    }

    /// Paint top-level nodes in order, starting a new page whenever the next
    /// node would cross the bottom margin.
    fn flow(&mut self, nodes: &[LayoutNode]) {
        let avail = self.content_width();
        let bottom = self.page_height - PAGE_PADDING;
        for node in nodes {
            let height = Measure { logos: &self.logos }.outer(node, avail);
            if self.cursor + height > bottom && self.cursor > PAGE_PADDING {
                self.new_page();
            }
            self.paint(node, PAGE_PADDING, self.cursor, avail);
            self.cursor += height;
        }
    }

    fn paint(&self, node: &LayoutNode, x: f32, top: f32, avail: f32) {
        let (box_x, box_w) = place(node, x, avail);
        self.paint_content(node, box_x, top + node.margin_top, box_w);
    }

    fn paint_content(&self, node: &LayoutNode, x: f32, top: f32, box_w: f32) {
        let measure = Measure { logos: &self.logos };
        match &node.kind {
            NodeKind::Text { content, style } => {
                for (i, line) in measure.lines(content, style, box_w).iter().enumerate() {
                    self.paint_line(line, style, node.align, x, top + i as f32 * style.line_advance(), box_w);
                }
            }
            NodeKind::Image { source, width_pt } => {
                if let Some(logo) = self.logos.get(source) {
                    let width = width_pt.min(box_w);
                    let height = logo.height_for(width);
                    Image::from_dynamic_image(&logo.image).add_to_layer(
                        self.layer.clone(),
                        ImageTransform {
                            translate_x: Some(mm(x)),
                            translate_y: Some(mm(self.page_height - top - height)),
                            dpi: Some(logo.dpi_for(width)),
                            ..Default::default()
                        },
                    );
                }
            }
            NodeKind::Row(children) => {
                let gap = row_gap(children, box_w);
                let mut cx = x;
                for child in children {
                    let cw = child.width * box_w;
                    self.paint_content(child, cx, top + child.margin_top, cw);
                    cx += cw + gap;
                }
            }
            NodeKind::Stack(children) => {
                let mut y = top;
                for child in children {
                    self.paint(child, x, y, box_w);
                    y += measure.outer(child, box_w);
                }
            }
            NodeKind::Divider { color: rule, thickness } => {
                let y = mm(self.page_height - top - thickness / 2.0);
                self.layer.set_outline_color(color(*rule));
                self.layer.set_outline_thickness(*thickness);
                self.layer.add_line(Line {
                    points: vec![
                        (Point::new(mm(x), y), false),
                        (Point::new(mm(x + box_w), y), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }

    fn paint_line(&self, line: &str, style: &TextStyle, align: Align, x: f32, top: f32, box_w: f32) {
        if line.is_empty() {
            return;
        }
        if !line.chars().all(is_win_ansi) {
            warn!("Characters outside WinAnsi will not be drawn: {:?}", line);
        }
        let bold = style.weight == Weight::Bold;
        let width = text_width(line, style.size, bold, style.letter_spacing);
        let lx = match align {
            Align::Start => x,
            Align::Center => x + (box_w - width) / 2.0,
            Align::End => x + box_w - width,
        };
        let baseline = top + (style.line_advance() - style.size) / 2.0 + 0.8 * style.size;
        let font = if bold { &self.bold } else { &self.regular };

        self.layer.set_fill_color(color(style.color));
        self.layer.set_character_spacing(style.letter_spacing);
        self.layer
            .use_text(line, style.size, mm(lx), mm(self.page_height - baseline), font);
    }

    fn finish(self) -> Result<RenderedPdf> {
        let pages = self.pages;
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc.save(&mut writer).map_err(Error::pdf)?;
        let bytes = writer.into_inner().map_err(Error::pdf)?;
        Ok(RenderedPdf { bytes, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, PartyInfo, Period};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(items: usize) -> InvoiceRecord {
        let party = |name: &str| PartyInfo {
            name: name.to_string(),
            address: "1 Main St\nSpringfield".to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            tax_id: None,
            logo: None,
        };
        InvoiceRecord {
            invoice_number: "acme_2025-03".to_string(),
            period: Period::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            )
            .unwrap(),
            from: party("Studio"),
            to: party("Acme"),
            items: (0..items)
                .map(|i| LineItem {
                    description: format!("Line item number {i}"),
                    qty: Decimal::from(i as u64 + 1),
                    price: dec!(12.5),
                })
                .collect(),
            currency: "USD".to_string(),
            tax_rate: dec!(0.1),
        }
    }

    #[test]
    fn renders_a_single_page_pdf() {
        let pdf = render_pdf(&record(3)).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert_eq!(pdf.pages, 1);
    }

    #[test]
    fn long_item_tables_flow_onto_more_pages() {
        let pdf = render_pdf(&record(120)).unwrap();
        assert!(pdf.pages > 1, "expected overflow, got {} page(s)", pdf.pages);
    }

    #[test]
    fn broken_logo_does_not_abort_rendering() {
        let mut rec = record(2);
        rec.from.logo = Some(PathBuf::from("/nonexistent/logo.png"));
        let pdf = render_pdf(&rec).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_image_takes_no_space() {
        let logos = HashMap::new();
        let measure = Measure { logos: &logos };
        let node = LayoutNode::image(PathBuf::from("gone.png"), 90.0).margin_bottom(8.0);
        assert_eq!(measure.outer(&node, 500.0), 0.0);
    }

    #[test]
    fn rows_take_the_tallest_child() {
        let logos = HashMap::new();
        let measure = Measure { logos: &logos };
        let row = LayoutNode::row(vec![
            LayoutNode::text("a", TextStyle::body()).width(0.5),
            LayoutNode::text("b\nc", TextStyle::body()).width(0.5),
        ]);
        let expected = 2.0 * TextStyle::body().line_advance();
        assert!((measure.outer(&row, 500.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn end_alignment_places_box_at_right_edge() {
        let node = LayoutNode::stack(Vec::new()).width(0.4).align(Align::End);
        let (x, w) = place(&node, 32.0, 500.0);
        assert!((w - 200.0).abs() < 1e-4);
        assert!((x - 332.0).abs() < 1e-4);
    }

    #[test]
    fn row_gap_spreads_leftover_width() {
        let children = vec![
            LayoutNode::text("", TextStyle::body()).width(0.33),
            LayoutNode::text("", TextStyle::body()).width(0.33),
            LayoutNode::text("", TextStyle::body()).width(0.33),
        ];
        assert!((row_gap(&children, 100.0) - 0.5).abs() < 1e-4);
    }
}
