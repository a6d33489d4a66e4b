//! Invoice layout as an explicit node tree.
//!
//! The tree is backend-agnostic: widths are fractions of the parent box,
//! spacing is in points, and every text node carries its own style. The
//! PDF writer walks it top to bottom; only top-level nodes may move to a
//! new page, which lets long item tables flow while the header, party and
//! totals blocks stay whole.
use std::path::PathBuf;

use crate::core::format::{format_date, format_money, format_quantity};
use crate::core::totals::tax_label;
use crate::error::Result;
use crate::types::{InvoiceRecord, LineItem, PartyInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

pub const INK: Rgb8 = Rgb8(0x11, 0x18, 0x27);
pub const GRAY: Rgb8 = Rgb8(0x6B, 0x72, 0x80);
pub const GRAY_LIGHT: Rgb8 = Rgb8(0x9C, 0xA3, 0xAF);
pub const RULE: Rgb8 = Rgb8(0xE5, 0xE7, 0xEB);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub color: Rgb8,
    /// Multiple of `size`
    pub line_height: f32,
    pub letter_spacing: f32,
}

impl TextStyle {
    pub const fn body() -> Self {
        Self {
            size: 11.0,
            weight: Weight::Regular,
            color: INK,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }

    /// Small uppercase captions above values and columns.
    pub const fn label() -> Self {
        Self {
            size: 9.0,
            color: GRAY_LIGHT,
            letter_spacing: 1.0,
            ..Self::body()
        }
    }

    pub const fn head_value() -> Self {
        Self {
            size: 12.0,
            ..Self::body()
        }
    }

    pub const fn party_name() -> Self {
        Self {
            size: 20.0,
            ..Self::body()
        }
    }

    pub const fn secondary() -> Self {
        Self {
            color: GRAY,
            line_height: 1.3,
            ..Self::body()
        }
    }

    pub const fn grand_total() -> Self {
        Self {
            size: 14.0,
            weight: Weight::Bold,
            ..Self::body()
        }
    }

    pub fn line_advance(&self) -> f32 {
        self.size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Wrapped text; `\n` forces a break
    Text { content: String, style: TextStyle },
    /// Raster image scaled to `width_pt`; height follows the aspect ratio
    Image { source: PathBuf, width_pt: f32 },
    /// Children left to right, leftover width spread between them
    Row(Vec<LayoutNode>),
    /// Children top to bottom
    Stack(Vec<LayoutNode>),
    /// Thin horizontal rule across the box
    Divider { color: Rgb8, thickness: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    /// Fraction of the parent box width, `0.0..=1.0`
    pub width: f32,
    /// Placement inside the parent box, and of text inside this box
    pub align: Align,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl LayoutNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            width: 1.0,
            align: Align::Start,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    pub fn text(content: impl Into<String>, style: TextStyle) -> Self {
        Self::new(NodeKind::Text {
            content: content.into(),
            style,
        })
    }

    pub fn image(source: PathBuf, width_pt: f32) -> Self {
        Self::new(NodeKind::Image { source, width_pt })
    }

    pub fn row(children: Vec<LayoutNode>) -> Self {
        Self::new(NodeKind::Row(children))
    }

    pub fn stack(children: Vec<LayoutNode>) -> Self {
        Self::new(NodeKind::Stack(children))
    }

    pub fn divider(color: Rgb8, thickness: f32) -> Self {
        Self::new(NodeKind::Divider { color, thickness })
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn margin_top(mut self, pt: f32) -> Self {
        self.margin_top = pt;
        self
    }

    pub fn margin_bottom(mut self, pt: f32) -> Self {
        self.margin_bottom = pt;
        self
    }

    /// Text content of this node and its descendants, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.kind {
            NodeKind::Text { content, .. } => out.push(content.as_str()),
            NodeKind::Row(children) | NodeKind::Stack(children) => {
                for child in children {
                    child.collect_texts(out);
                }
            }
            NodeKind::Image { .. } | NodeKind::Divider { .. } => {}
        }
    }

    pub fn images(&self) -> Vec<&PathBuf> {
        match &self.kind {
            NodeKind::Image { source, .. } => vec![source],
            NodeKind::Row(children) | NodeKind::Stack(children) => {
                children.iter().flat_map(LayoutNode::images).collect()
            }
            NodeKind::Text { .. } | NodeKind::Divider { .. } => Vec::new(),
        }
    }
}

/// Column fractions of the item table: description, qty, price, amount.
pub const TABLE_COLUMNS: [f32; 4] = [0.46, 0.18, 0.18, 0.18];

const HEAD_CELL: f32 = 0.33;
const PARTY_COLUMN: f32 = 0.48;
const TOTALS_WIDTH: f32 = 0.40;
const LOGO_WIDTH_PT: f32 = 90.0;

/// Build the full document tree for `record`: header, parties, item table, totals.
///
/// Fails with `Error::Overflow` when an amount does not fit a `Decimal`.
pub fn build_layout(record: &InvoiceRecord) -> Result<Vec<LayoutNode>> {
    let mut nodes = vec![
        header_block(record),
        LayoutNode::divider(RULE, 0.5).margin_bottom(16.0),
        party_block(&record.from, &record.to),
        table_header(),
    ];
    for item in &record.items {
        nodes.push(item_row(item, &record.currency)?);
    }
    nodes.push(totals_block(record)?);
    Ok(nodes)
}

fn labeled(label: &str, value: String, align: Align) -> LayoutNode {
    LayoutNode::stack(vec![
        LayoutNode::text(label.to_uppercase(), TextStyle::label()).align(align),
        LayoutNode::text(value, TextStyle::head_value())
            .align(align)
            .margin_top(2.0),
    ])
    .width(HEAD_CELL)
    .align(align)
}

fn header_block(record: &InvoiceRecord) -> LayoutNode {
    LayoutNode::row(vec![
        labeled("Invoice no", record.invoice_number.clone(), Align::Start),
        labeled("From", format_date(record.period.start), Align::Center),
        labeled("To", format_date(record.period.end), Align::End),
    ])
    .margin_bottom(12.0)
}

fn party_column(label: &str, party: &PartyInfo, with_logo: bool) -> LayoutNode {
    let mut lines = vec![
        LayoutNode::text(label.to_uppercase(), TextStyle::label()).margin_bottom(8.0),
    ];
    if with_logo {
        if let Some(logo) = &party.logo {
            lines.push(LayoutNode::image(logo.clone(), LOGO_WIDTH_PT).margin_bottom(8.0));
        }
    }
    lines.push(LayoutNode::text(party.name.clone(), TextStyle::party_name()).margin_bottom(6.0));
    if let Some(email) = &party.email {
        lines.push(LayoutNode::text(email.clone(), TextStyle::secondary()));
    }
    lines.push(LayoutNode::text(party.address.clone(), TextStyle::secondary()));
    if let Some(tax_id) = &party.tax_id {
        lines.push(LayoutNode::text(format!("Tax ID: {tax_id}"), TextStyle::secondary()));
    }
    LayoutNode::stack(lines).width(PARTY_COLUMN)
}

fn party_block(from: &PartyInfo, to: &PartyInfo) -> LayoutNode {
    LayoutNode::row(vec![
        party_column("From", from, true),
        party_column("To", to, false),
    ])
    .margin_bottom(24.0)
}

fn table_row(cells: [String; 4], style: TextStyle) -> LayoutNode {
    let children = cells
        .into_iter()
        .zip(TABLE_COLUMNS)
        .enumerate()
        .map(|(i, (content, width))| {
            let align = if i == 0 { Align::Start } else { Align::End };
            LayoutNode::text(content, style).width(width).align(align)
        })
        .collect();
    LayoutNode::row(children)
}

fn table_header() -> LayoutNode {
    let cells = ["Description", "Qty", "Price", "Amount"].map(str::to_uppercase);
    table_row(cells, TextStyle::label()).margin_bottom(6.0)
}

fn item_row(item: &LineItem, currency: &str) -> Result<LayoutNode> {
    let row = table_row(
        [
            item.description.clone(),
            format_quantity(item.qty),
            format_money(item.price, currency),
            format_money(item.amount()?, currency),
        ],
        TextStyle::body(),
    );
    Ok(row.margin_bottom(4.0))
}

fn total_line(label: String, amount: String, style: TextStyle) -> LayoutNode {
    LayoutNode::row(vec![
        LayoutNode::text(label, style).width(0.5),
        LayoutNode::text(amount, style).width(0.5).align(Align::End),
    ])
    .margin_bottom(4.0)
}

fn totals_block(record: &InvoiceRecord) -> Result<LayoutNode> {
    let totals = record.totals()?;
    let currency = record.currency.as_str();

    let mut lines = vec![total_line(
        "Subtotal".to_string(),
        format_money(totals.subtotal, currency),
        TextStyle::body(),
    )];
    if record.has_tax() {
        lines.push(total_line(
            tax_label(record.tax_rate),
            format_money(totals.tax, currency),
            TextStyle::body(),
        ));
    }
    lines.push(
        total_line(
            "Total".to_string(),
            format_money(totals.total, currency),
            TextStyle::grand_total(),
        )
        .margin_top(6.0),
    );

    Ok(LayoutNode::stack(lines)
        .width(TOTALS_WIDTH)
        .align(Align::End)
        .margin_top(16.0))
}
