//! API response payloads

use serde::{Deserialize, Serialize};

use crate::models::PartSummary;

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Current admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub username: String,
    pub role: String,
}

/// Kit detail for selection lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitResponse {
    pub kit_number: String,
    pub parts: Vec<PartSummary>,
}

/// Print result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintResponse {
    pub kit_number: String,
    /// Number of labels sent in the job
    pub labels: usize,
    pub message: String,
}

/// Printer status for the UI indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterStatusResponse {
    pub printer: String,
    pub online: bool,
    /// `green` when reachable, `red` otherwise
    pub indicator: String,
}

/// Result of a move request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    /// False when the part was already at the boundary
    pub moved: bool,
    pub order: Vec<String>,
}
