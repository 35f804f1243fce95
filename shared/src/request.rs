//! API request payloads

use serde::{Deserialize, Serialize};

use crate::models::MoveDirection;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Print request
///
/// `part_numbers` absent prints the whole kit; present but empty is a
/// selection error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintRequest {
    #[serde(default)]
    pub kit_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_numbers: Option<Vec<String>>,
}

/// Add part request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPartRequest {
    #[serde(default)]
    pub kit_number: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub description: String,
}

/// Move part request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovePartRequest {
    pub direction: MoveDirection,
}
