//! ZPL command builder
//!
//! Provides a fluent API for building ZPL label documents. Commands are
//! appended verbatim; line breaks are explicit so callers control the exact
//! document layout.

use std::borrow::Cow;
use std::str::FromStr;

/// Escape character announced by `^FH` in [`FieldEscape::Hex`] mode
const HEX_INDICATOR: char = '\\';

/// How field data is written between `^FD` and `^FS`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEscape {
    /// Insert text as-is. Carets or tildes in the text are read by the
    /// printer as commands.
    #[default]
    Raw,
    /// Announce `^FH\` and write `^`, `~`, `\` and control characters as
    /// `\XX` hex pairs
    Hex,
}

impl FromStr for FieldEscape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(FieldEscape::Raw),
            "hex" => Ok(FieldEscape::Hex),
            other => Err(format!("unknown field escape: {}", other)),
        }
    }
}

/// Escape field data according to `mode`
pub fn escape_field_data(text: &str, mode: FieldEscape) -> Cow<'_, str> {
    match mode {
        FieldEscape::Raw => Cow::Borrowed(text),
        FieldEscape::Hex => {
            if !text.chars().any(needs_hex) {
                return Cow::Borrowed(text);
            }
            let mut out = String::with_capacity(text.len() + 8);
            for ch in text.chars() {
                if needs_hex(ch) {
                    out.push(HEX_INDICATOR);
                    out.push_str(&format!("{:02X}", ch as u32));
                } else {
                    out.push(ch);
                }
            }
            Cow::Owned(out)
        }
    }
}

fn needs_hex(ch: char) -> bool {
    matches!(ch, '^' | '~' | HEX_INDICATOR) || ch.is_ascii_control()
}

/// ZPL command builder
///
/// Builds one or more `^XA ... ^XZ` documents as a string.
#[derive(Debug, Clone, Default)]
pub struct ZplBuilder {
    buf: String,
    escape: FieldEscape,
}

impl ZplBuilder {
    /// Create a builder that writes field data verbatim
    pub fn new() -> Self {
        Self::with_escape(FieldEscape::Raw)
    }

    pub fn with_escape(escape: FieldEscape) -> Self {
        Self {
            buf: String::with_capacity(512),
            escape,
        }
    }

    pub fn escape(&self) -> FieldEscape {
        self.escape
    }

    // === Raw Output ===

    /// Append text without a line break
    pub fn raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Append text followed by a line break
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Format Boundaries ===

    /// Start format (`^XA`)
    pub fn start(&mut self) -> &mut Self {
        self.raw("^XA")
    }

    /// End format (`^XZ`)
    pub fn end(&mut self) -> &mut Self {
        self.raw("^XZ")
    }

    // === Label Setup ===

    /// Print width in dots (`^PW`)
    pub fn print_width(&mut self, dots: u32) -> &mut Self {
        self.buf.push_str(&format!("^PW{}", dots));
        self
    }

    /// Label length in dots (`^LL`), zero padded to four digits
    pub fn label_length(&mut self, dots: u32) -> &mut Self {
        self.buf.push_str(&format!("^LL{:04}", dots));
        self
    }

    /// Label shift in dots (`^LS`)
    pub fn label_shift(&mut self, dots: i32) -> &mut Self {
        self.buf.push_str(&format!("^LS{}", dots));
        self
    }

    /// Tear-off media mode (`^MMT`)
    pub fn tear_off(&mut self) -> &mut Self {
        self.raw("^MMT")
    }

    // === Field Positioning ===

    /// Field origin, top-left corner (`^FO`)
    pub fn field_origin(&mut self, x: i32, y: i32) -> &mut Self {
        self.buf.push_str(&format!("^FO{},{}", x, y));
        self
    }

    /// Field typeset, baseline position (`^FT`)
    pub fn field_typeset(&mut self, x: i32, y: i32) -> &mut Self {
        self.buf.push_str(&format!("^FT{},{}", x, y));
        self
    }

    // === Text ===

    /// Scalable font 0, normal orientation (`^A0N,h,w`)
    pub fn font(&mut self, height: u32, width: u32) -> &mut Self {
        self.buf.push_str(&format!("^A0N,{},{}", height, width));
        self
    }

    /// Wrapped text block (`^FB`)
    ///
    /// `justify` is one of `L`, `C`, `R`, `J`.
    pub fn field_block(
        &mut self,
        width: u32,
        max_lines: u32,
        line_spacing: i32,
        justify: char,
        hanging_indent: u32,
    ) -> &mut Self {
        self.buf.push_str(&format!(
            "^FB{},{},{},{},{}",
            width, max_lines, line_spacing, justify, hanging_indent
        ));
        self
    }

    /// Field hexadecimal indicator (`^FH`)
    pub fn field_hex(&mut self, indicator: char) -> &mut Self {
        self.buf.push_str("^FH");
        self.buf.push(indicator);
        self
    }

    /// Field data terminated by field separator (`^FD...^FS`)
    ///
    /// In [`FieldEscape::Hex`] mode `^FH\` is emitted first unless the
    /// previous command already announced it.
    pub fn field_data(&mut self, data: &str) -> &mut Self {
        if self.escape == FieldEscape::Hex && !self.buf.ends_with("^FH\\") {
            self.field_hex(HEX_INDICATOR);
        }
        let escaped = escape_field_data(data, self.escape);
        self.buf.push_str("^FD");
        self.buf.push_str(&escaped);
        self.buf.push_str("^FS");
        self
    }

    // === Barcodes ===

    /// Barcode field defaults (`^BY`)
    pub fn barcode_defaults(&mut self, module_width: u32, ratio: u32, height: u32) -> &mut Self {
        self.buf
            .push_str(&format!("^BY{},{},{}", module_width, ratio, height));
        self
    }

    /// Code 128 barcode, interpretation line below (`^BCN`)
    ///
    /// `height` falls back to the `^BY` default when `None`. The UCC check
    /// digit flag is only written when given.
    pub fn code128(&mut self, height: Option<u32>, ucc_check_digit: Option<bool>) -> &mut Self {
        let height = height.map(|h| h.to_string()).unwrap_or_default();
        self.buf.push_str(&format!("^BCN,{},Y,N", height));
        if let Some(check) = ucc_check_digit {
            self.buf.push_str(if check { ",Y" } else { ",N" });
        }
        self
    }

    // === Output ===

    /// Print quantity (`^PQ`), no pause, one replicate, no override
    pub fn quantity(&mut self, copies: u32) -> &mut Self {
        self.buf.push_str(&format!("^PQ{},0,1,Y", copies));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish and return the ZPL text
    pub fn build(self) -> String {
        self.buf
    }

    /// Current ZPL text without consuming the builder
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}
