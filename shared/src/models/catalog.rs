//! Catalog Model
//!
//! Kit number → part number → [`Part`], both levels ordered. The order of a
//! kit's parts is the label print order and the on-screen list order; it
//! changes only through [`Catalog::move_part`], [`Catalog::add_part`] and
//! [`Catalog::delete_part`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::part::Part;

/// Ordered parts of one kit, keyed by part number
pub type Kit = IndexMap<String, Part>;

/// Catalog edit errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Kit {0} not found.")]
    KitNotFound(String),

    #[error("Part {part} not found in kit {kit}.")]
    PartNotFound { kit: String, part: String },

    /// Holds the name of the first empty field
    #[error("All fields are required.")]
    MissingField(&'static str),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Direction for reordering a part inside its kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => f.write_str("up"),
            MoveDirection::Down => f.write_str("down"),
        }
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// All kits, serialized as the label data JSON document
///
/// Equality includes kit and part order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    kits: IndexMap<String, Kit>,
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order
        self.kits.len() == other.kits.len()
            && self
                .kits
                .iter()
                .zip(&other.kits)
                .all(|((ka, a), (kb, b))| ka == kb && a.iter().eq(b.iter()))
    }
}

impl Eq for Catalog {}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }

    /// Number of kits
    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn kit(&self, kit_number: &str) -> Option<&Kit> {
        self.kits.get(kit_number)
    }

    pub fn contains_kit(&self, kit_number: &str) -> bool {
        self.kits.contains_key(kit_number)
    }

    /// Kit numbers in file order
    pub fn kit_numbers(&self) -> impl Iterator<Item = &str> {
        self.kits.keys().map(String::as_str)
    }

    pub fn kits(&self) -> impl Iterator<Item = (&str, &Kit)> {
        self.kits.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Part ids of a kit in print order
    pub fn part_order(&self, kit_number: &str) -> CatalogResult<Vec<&str>> {
        let kit = self.require_kit(kit_number)?;
        Ok(kit.keys().map(String::as_str).collect())
    }

    /// Add a part, creating the kit on its first part
    ///
    /// Re-adding an existing part number replaces its content and keeps its
    /// position.
    pub fn add_part(
        &mut self,
        kit_number: &str,
        part_number: &str,
        description: &str,
    ) -> CatalogResult<()> {
        if kit_number.is_empty() {
            return Err(CatalogError::MissingField("kit_number"));
        }
        if part_number.is_empty() {
            return Err(CatalogError::MissingField("part_number"));
        }
        if description.is_empty() {
            return Err(CatalogError::MissingField("description"));
        }

        self.kits
            .entry(kit_number.to_string())
            .or_default()
            .insert(part_number.to_string(), Part::new(part_number, description));
        Ok(())
    }

    /// Remove a part; the kit goes away with its last part
    pub fn delete_part(&mut self, kit_number: &str, part_id: &str) -> CatalogResult<Part> {
        let kit = self
            .kits
            .get_mut(kit_number)
            .ok_or_else(|| CatalogError::PartNotFound {
                kit: kit_number.to_string(),
                part: part_id.to_string(),
            })?;

        let removed = kit
            .shift_remove(part_id)
            .ok_or_else(|| CatalogError::PartNotFound {
                kit: kit_number.to_string(),
                part: part_id.to_string(),
            })?;

        if kit.is_empty() {
            self.kits.shift_remove(kit_number);
        }

        Ok(removed)
    }

    /// Swap a part with its neighbour in `direction`
    ///
    /// Returns `false` when the part already sits at that boundary; the
    /// catalog is left untouched in that case.
    pub fn move_part(
        &mut self,
        kit_number: &str,
        part_id: &str,
        direction: MoveDirection,
    ) -> CatalogResult<bool> {
        let not_found = || CatalogError::PartNotFound {
            kit: kit_number.to_string(),
            part: part_id.to_string(),
        };

        let kit = self.kits.get_mut(kit_number).ok_or_else(not_found)?;
        let index = kit.get_index_of(part_id).ok_or_else(not_found)?;

        let neighbour = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < kit.len() => index + 1,
            _ => return Ok(false),
        };

        kit.swap_indices(index, neighbour);
        Ok(true)
    }

    /// Parts to print for a kit, in kit order
    ///
    /// `None` selects the whole kit. Selected ids that are not in the kit
    /// are skipped.
    pub fn select_parts(
        &self,
        kit_number: &str,
        selection: Option<&[String]>,
    ) -> CatalogResult<Vec<&Part>> {
        let kit = self.require_kit(kit_number)?;

        let parts = match selection {
            None => kit.values().collect(),
            Some(selected) => kit
                .iter()
                .filter(|(id, _)| selected.iter().any(|s| s == *id))
                .map(|(_, part)| part)
                .collect(),
        };

        Ok(parts)
    }

    fn require_kit(&self, kit_number: &str) -> CatalogResult<&Kit> {
        self.kits
            .get(kit_number)
            .ok_or_else(|| CatalogError::KitNotFound(kit_number.to_string()))
    }
}
