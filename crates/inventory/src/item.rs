use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity};

/// Inventory item name; also the record key in the backing collection.
///
/// Names are case-sensitive and stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Validate a raw name.
    ///
    /// A name must be non-empty and cannot contain `/`, which separates path
    /// segments in document keys.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if raw.contains('/') {
            return Err(DomainError::validation("item name cannot contain '/'"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with its first character upper-cased, for display only.
    pub fn display(&self) -> String {
        display_name(&self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named inventory record with its current quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: ItemName,
    pub quantity: i64,
}

impl InventoryItem {
    pub fn new(name: ItemName, quantity: i64) -> Self {
        Self { name, quantity }
    }
}

impl Entity for InventoryItem {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// Upper-case the first character of `name`, leaving the rest untouched.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a quantity typed into the update form.
///
/// Leading whitespace is skipped, then an optional sign and the longest run
/// of ASCII digits are taken; anything after the digits is ignored, so
/// `"1.5"` is 1 and `"3 units"` is 3. Input with no leading digits is a
/// validation error, as is a value outside `i64`. Negative values parse fine;
/// nothing here enforces non-negativity.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(DomainError::validation(format!(
            "quantity must be an integer, got {raw:?}"
        )));
    }

    let digits = &unsigned[..digits_len];
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    signed
        .parse::<i64>()
        .map_err(|_| DomainError::validation(format!("quantity out of range, got {raw:?}")))
}
