//! Part label renderer
//!
//! Renders a kit part (part number + description) into one ZPL document.

use std::fmt;
use std::str::FromStr;

use label_printer::{FieldEscape, ZplBuilder};
use shared::Part;

use crate::core::config::LabelConfig;

/// Printer setup block sent ahead of `fixed` style labels
const FIXED_SETUP: &str = "^XA~TA000~JSN^LT0^MNW^MTD^PON^PMN^LH0,0^JMA^PR5,5~SD10^JUS^LRN^CI0^XZ";

/// Label document style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Part number centered by character count, wrapped description
    Centered,
    /// [`LabelStyle::Centered`] plus a Code 128 barcode of the part number
    CenteredBarcode,
    /// Fixed field positions with a printer setup block and barcode
    Fixed,
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centered" => Ok(LabelStyle::Centered),
            "centered-barcode" | "barcode" => Ok(LabelStyle::CenteredBarcode),
            "fixed" => Ok(LabelStyle::Fixed),
            other => Err(format!("unknown label style: {}", other)),
        }
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelStyle::Centered => f.write_str("centered"),
            LabelStyle::CenteredBarcode => f.write_str("centered-barcode"),
            LabelStyle::Fixed => f.write_str("fixed"),
        }
    }
}

/// Label geometry in printer dots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub label_width: i64,
    pub label_length: u32,
    /// Width of one part number character at 74x76 font size
    pub char_width: i64,
    pub description_width: u32,
    pub description_lines: u32,
    /// Added to the centered x position, positive moves right
    pub offset_adjustment: i64,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            label_width: 609,
            label_length: 406,
            char_width: 74,
            description_width: 550,
            description_lines: 5,
            offset_adjustment: -60,
        }
    }
}

impl LabelLayout {
    /// `(label_width - chars * char_width) / 2`, rounded toward negative
    /// infinity
    pub fn centered_position(&self, part_number: &str) -> i64 {
        let chars = part_number.chars().count() as i64;
        (self.label_width - chars * self.char_width).div_euclid(2)
    }

    /// x of the part number field after the fine-tune offset
    pub fn part_number_x(&self, part_number: &str) -> i32 {
        let x = self.centered_position(part_number) + self.offset_adjustment;
        x.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

/// Part label renderer
#[derive(Debug, Clone)]
pub struct PartLabelRenderer {
    style: LabelStyle,
    layout: LabelLayout,
    escape: FieldEscape,
}

impl PartLabelRenderer {
    pub fn new(style: LabelStyle, layout: LabelLayout, escape: FieldEscape) -> Self {
        Self {
            style,
            layout,
            escape,
        }
    }

    pub fn from_config(config: &LabelConfig) -> Self {
        let layout = LabelLayout {
            offset_adjustment: config.offset_adjustment as i64,
            ..LabelLayout::default()
        };
        Self::new(config.style, layout, config.escape)
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Render one part label
    pub fn render(&self, part: &Part) -> String {
        let mut b = ZplBuilder::with_escape(self.escape);
        match self.style {
            LabelStyle::Centered => self.render_centered(&mut b, part, false),
            LabelStyle::CenteredBarcode => self.render_centered(&mut b, part, true),
            LabelStyle::Fixed => self.render_fixed(&mut b, part),
        }
        b.build()
    }

    /// Render several parts into one print job, one document per line
    pub fn render_batch<'a>(&self, parts: impl IntoIterator<Item = &'a Part>) -> String {
        let mut job = String::new();
        for part in parts {
            job.push_str(&self.render(part));
            job.push('\n');
        }
        job
    }

    fn render_header(&self, b: &mut ZplBuilder) {
        b.print_width(self.layout.label_width as u32)
            .newline()
            .label_length(self.layout.label_length)
            .newline()
            .label_shift(0)
            .newline();
    }

    fn render_centered(&self, b: &mut ZplBuilder, part: &Part, barcode: bool) {
        let l = &self.layout;

        b.start().newline();
        self.render_header(b);

        b.field_origin(l.part_number_x(&part.part_number), 50)
            .font(74, 76)
            .field_data(&part.part_number)
            .newline();

        b.field_origin(30, 150)
            .field_block(l.description_width, l.description_lines, 10, 'C', 0)
            .font(28, 28)
            .field_data(&part.description)
            .newline();

        if barcode {
            b.field_origin(50, 300)
                .code128(Some(100), Some(false))
                .newline()
                .field_data(&part.part_number)
                .newline();
        }

        b.quantity(1).newline().end();
    }

    fn render_fixed(&self, b: &mut ZplBuilder, part: &Part) {
        b.line(FIXED_SETUP).start().newline().tear_off().newline();
        self.render_header(b);

        b.field_typeset(105, 154)
            .font(74, 76)
            .field_hex('\\')
            .field_data(&part.part_number)
            .newline();

        b.field_typeset(49, 198)
            .font(28, 110)
            .field_hex('\\')
            .field_data(&part.description)
            .newline();

        // Code 128 subset B start
        b.barcode_defaults(1, 3, 81)
            .field_typeset(248, 373)
            .code128(None, None)
            .newline()
            .field_data(&format!(">:>{}", part.part_number))
            .newline();

        b.quantity(1).end();
    }
}
