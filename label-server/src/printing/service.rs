//! Kit print service
//!
//! Store (read) → renderer (per selected part) → one batch job → printer.
//! Nothing is retried; every failure comes back as a message for the user.

use std::sync::Arc;

use label_printer::{AnyPrinter, PrintError, Printer};
use shared::response::PrintResponse;
use tracing::{info, instrument, warn};

use super::renderer::PartLabelRenderer;
use crate::store::LabelStore;
use crate::utils::{AppError, AppResult};

/// Kit print service
#[derive(Debug)]
pub struct PrintService<P = AnyPrinter> {
    store: Arc<LabelStore>,
    printer: Arc<P>,
    renderer: PartLabelRenderer,
}

impl<P> Clone for PrintService<P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            printer: self.printer.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<P: Printer> PrintService<P> {
    pub fn new(store: Arc<LabelStore>, printer: Arc<P>, renderer: PartLabelRenderer) -> Self {
        Self {
            store,
            printer,
            renderer,
        }
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn renderer(&self) -> &PartLabelRenderer {
        &self.renderer
    }

    /// Print a kit
    ///
    /// `selection = None` prints every part of the kit. Otherwise only the
    /// selected part ids are printed, in kit order.
    #[instrument(skip(self, selection), fields(selected = ?selection.map(|s| s.len())))]
    pub async fn print(
        &self,
        kit_number: &str,
        selection: Option<&[String]>,
    ) -> AppResult<PrintResponse> {
        if kit_number.is_empty() {
            return Err(AppError::validation("Please select a kit."));
        }
        if selection.is_some_and(|s| s.is_empty()) {
            return Err(AppError::validation("Please select at least one part."));
        }

        let catalog = self.store.load()?;
        let parts = catalog.select_parts(kit_number, selection)?;
        if parts.is_empty() {
            return Err(AppError::validation(format!(
                "None of the selected parts exist in kit {}.",
                kit_number
            )));
        }

        let job = self.renderer.render_batch(parts.iter().copied());
        let labels = parts.len();
        let what = if selection.is_some() {
            "selected parts"
        } else {
            "kit"
        };

        info!(labels, bytes = job.len(), "Sending label job");

        if let Err(e) = self.printer.print(job.as_bytes()).await {
            warn!(error = %e, "Label job failed");
            let message = match e {
                PrintError::Status(code) => {
                    format!("Failed to print {}. Status code: {}", what, code)
                }
                other => format!("Failed to print {}. Error: {}", what, other),
            };
            return Err(AppError::Printer(message));
        }

        let message = if selection.is_some() {
            format!("Selected parts from kit {} printed successfully!", kit_number)
        } else {
            format!("Kit {} printed successfully!", kit_number)
        };

        Ok(PrintResponse {
            kit_number: kit_number.to_string(),
            labels,
            message,
        })
    }

    /// Reachability for the status indicator; never gates printing
    pub async fn printer_online(&self) -> bool {
        self.printer.is_online().await
    }
}
