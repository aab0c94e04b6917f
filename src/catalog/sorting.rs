//! Sort Keys

use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};

use crate::vehicles::Vehicle;

/// Ordering applied to the filtered catalog.
///
/// Keys outside the known set are kept verbatim as [`SortKey::Unrecognized`] and leave the
/// filtered order untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Descending model year
    #[default]
    Newest,

    /// Ascending model year
    Oldest,

    /// Ascending price
    PriceLowHigh,

    /// Descending price
    PriceHighLow,

    /// Ascending `"brand model"`
    NameAZ,

    /// Descending `"brand model"`
    NameZA,

    /// Any other key; no reordering
    Unrecognized(String),
}

impl SortKey {
    /// All recognised keys, in the order the sort menu offers them.
    pub const KNOWN: [SortKey; 6] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::PriceLowHigh,
        SortKey::PriceHighLow,
        SortKey::NameAZ,
        SortKey::NameZA,
    ];

    /// Parse a wire name. Never fails.
    pub fn parse(key: &str) -> Self {
        match key {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "price-low-high" => Self::PriceLowHigh,
            "price-high-low" => Self::PriceHighLow,
            "name-a-z" => Self::NameAZ,
            "name-z-a" => Self::NameZA,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::NameAZ => "name-a-z",
            Self::NameZA => "name-z-a",
            Self::Unrecognized(key) => key,
        }
    }

    /// Menu label
    pub fn label(&self) -> &str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::PriceLowHigh => "Price: Low to High",
            Self::PriceHighLow => "Price: High to Low",
            Self::NameAZ => "Name: A to Z",
            Self::NameZA => "Name: Z to A",
            Self::Unrecognized(key) => key,
        }
    }

    /// Comparator for this key, or `None` when the key does not reorder.
    pub fn comparator(&self) -> Option<fn(&Vehicle, &Vehicle) -> Ordering> {
        match self {
            Self::Newest => Some(newest),
            Self::Oldest => Some(oldest),
            Self::PriceLowHigh => Some(price_low_high),
            Self::PriceHighLow => Some(price_high_low),
            Self::NameAZ => Some(name_a_z),
            Self::NameZA => Some(name_z_a),
            Self::Unrecognized(_) => None,
        }
    }

    /// Stable-sort `vehicles` in place.
    pub fn sort(&self, vehicles: &mut [&Vehicle]) {
        if let Some(compare) = self.comparator() {
            vehicles.sort_by(|a, b| compare(a, b));
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn newest(a: &Vehicle, b: &Vehicle) -> Ordering {
    b.year.cmp(&a.year)
}

fn oldest(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.year.cmp(&b.year)
}

fn price_low_high(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.price.to_minor_units().cmp(&b.price.to_minor_units())
}

fn price_high_low(a: &Vehicle, b: &Vehicle) -> Ordering {
    price_low_high(b, a)
}

fn name_a_z(a: &Vehicle, b: &Vehicle) -> Ordering {
    collate(&a.display_name(), &b.display_name())
}

fn name_z_a(a: &Vehicle, b: &Vehicle) -> Ordering {
    name_a_z(b, a)
}

/// Dictionary-style comparison: letters compare case-insensitively first, then lowercase
/// sorts before uppercase to break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .map(swap_case)
            .cmp(b.chars().map(swap_case))
    })
}

fn swap_case(ch: char) -> char {
    if ch.is_uppercase() {
        ch.to_lowercase().next().unwrap_or(ch)
    } else {
        ch.to_uppercase().next().unwrap_or(ch)
    }
}
