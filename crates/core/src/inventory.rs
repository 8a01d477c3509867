//! Inventory number formatting.
//!
//! Inventory numbers are human-readable labels of the form `AR-00042`:
//! a constant prefix and a fixed-width zero-padded sequence value. The
//! sequence itself is issued by the storage layer inside the insert
//! transaction, so numbers are unique and strictly increasing even when
//! two create requests race.

/// Prefix of every issued inventory number.
pub const INVENTORY_PREFIX: &str = "AR-";

/// Width of the zero-padded sequence part.
pub const INVENTORY_PAD: usize = 5;

/// Formats a sequence value as an inventory number.
#[must_use]
pub fn format_inventory_number(seq: i64) -> String {
    format!("{INVENTORY_PREFIX}{seq:0width$}", width = INVENTORY_PAD)
}

/// Extracts the numeric sequence from an inventory number.
///
/// Returns `None` for labels that do not carry the expected prefix or a
/// numeric suffix.
#[must_use]
pub fn inventory_sequence(number: &str) -> Option<i64> {
    number.strip_prefix(INVENTORY_PREFIX)?.parse().ok()
}
