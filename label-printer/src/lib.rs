//! # label-printer
//!
//! Zebra label printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ZPL command building
//! - Network printing (raw TCP port 9100)
//! - HTTP POST printing (port 9100)
//! - Windows spooler printing (RAW jobs)
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Part label layout → label-server
//!
//! ## Example
//!
//! ```ignore
//! use label_printer::{NetworkPrinter, Printer, ZplBuilder};
//!
//! let mut builder = ZplBuilder::new();
//! builder
//!     .start()
//!     .print_width(609)
//!     .field_origin(170, 50)
//!     .font(74, 76)
//!     .field_data("P1")
//!     .quantity(1)
//!     .end();
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(builder.build().as_bytes()).await?;
//! ```

mod error;
mod printer;
mod zpl;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use printer::{AnyPrinter, HttpPrinter, NetworkPrinter, Printer};
pub use zpl::{FieldEscape, ZplBuilder, escape_field_data};

#[cfg(windows)]
pub use printer::WindowsPrinter;

/// Default raw printing port on Zebra network printers
pub const DEFAULT_PORT: u16 = 9100;
