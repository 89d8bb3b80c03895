//! Garment Catalog - Fixed Vocabularies
//!
//! Size systems, garment labels and project categories. The order of
//! `GARMENT_TYPES` is the match precedence used by description inference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sizing system a garment is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSystem {
    AuWomen,
    AuMen,
    AuKids,
    Dogs,
}

impl SizeSystem {
    pub const ALL: [SizeSystem; 4] = [
        SizeSystem::AuWomen,
        SizeSystem::AuMen,
        SizeSystem::AuKids,
        SizeSystem::Dogs,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::AuWomen => "au_women",
            Self::AuMen => "au_men",
            Self::AuKids => "au_kids",
            Self::Dogs => "dogs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AuWomen => "AU Women",
            Self::AuMen => "AU Men",
            Self::AuKids => "AU Kids",
            Self::Dogs => "Dogs",
        }
    }

    /// Animal sizing. Drives the 8mm seam allowance and dog fabric rules.
    pub fn is_animal(&self) -> bool {
        matches!(self, Self::Dogs)
    }

    /// Animal or children's sizing.
    pub fn is_small(&self) -> bool {
        matches!(self, Self::Dogs | Self::AuKids)
    }

    /// Selectable sizes for this system, in display order.
    pub fn size_options(&self) -> Vec<SizeOption> {
        match self {
            Self::AuWomen => [6, 8, 10, 12, 14, 16, 18, 20, 22, 24]
                .iter()
                .map(|s| SizeOption::numbered(*s))
                .collect(),
            Self::AuMen => ["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"]
                .iter()
                .map(|s| SizeOption::lettered(s))
                .collect(),
            Self::AuKids => [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14]
                .iter()
                .map(|s| SizeOption::numbered(*s))
                .collect(),
            Self::Dogs => ["XS", "S", "M", "L", "XL", "2XL"]
                .iter()
                .map(|s| SizeOption::lettered(s))
                .collect(),
        }
    }
}

impl fmt::Display for SizeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown size system: {0}")]
pub struct UnknownSizeSystem(pub String);

impl FromStr for SizeSystem {
    type Err = UnknownSizeSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeSystem::ALL
            .iter()
            .copied()
            .find(|system| system.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSizeSystem(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub label: String,
    pub value: String,
}

impl SizeOption {
    fn numbered(size: u32) -> Self {
        Self {
            label: format!("Size {}", size),
            value: size.to_string(),
        }
    }

    fn lettered(size: &str) -> Self {
        Self {
            label: size.to_string(),
            value: size.to_string(),
        }
    }
}

/// Garment labels in description-matching precedence order.
pub const GARMENT_TYPES: [&str; 16] = [
    "Dress", "Blouse", "Skirt", "Pants", "Jacket", "Coat",
    "T-Shirt", "Tank Top", "Shorts", "Romper", "Jumpsuit",
    "Vest", "Hoodie", "Cardigan", "Dog Coat", "Dog Bandana",
];

/// Project category chosen at the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Womens,
    Mens,
    Kids,
    Animal,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Womens => "womens",
            Self::Mens => "mens",
            Self::Kids => "kids",
            Self::Animal => "animal",
        }
    }

    /// Garment menu offered for this category.
    pub fn garment_options(&self) -> &'static [&'static str] {
        match self {
            Self::Womens => &["Dress", "Blouse", "Skirt", "Pants", "Jacket"],
            Self::Mens => &["Shirt", "Trousers", "Jacket", "Vest", "Shorts"],
            Self::Kids => &["Onesie", "T-Shirt", "Dress", "Pants", "Romper"],
            Self::Animal => &["Dog Coat", "Cat Sweater", "Pet Bandana"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_system_parse() {
        assert_eq!("dogs".parse::<SizeSystem>().unwrap(), SizeSystem::Dogs);
        assert_eq!(" AU_Kids ".parse::<SizeSystem>().unwrap(), SizeSystem::AuKids);
        assert!("metric".parse::<SizeSystem>().is_err());
    }

    #[test]
    fn test_size_options() {
        let women = SizeSystem::AuWomen.size_options();
        assert_eq!(women.len(), 10);
        assert_eq!(women[0].label, "Size 6");
        assert_eq!(women[0].value, "6");

        let kids = SizeSystem::AuKids.size_options();
        assert_eq!(kids.last().unwrap().value, "14");
        assert!(!kids.iter().any(|o| o.value == "9"));

        let dogs = SizeSystem::Dogs.size_options();
        assert_eq!(dogs.last().unwrap().label, "2XL");
    }

    #[test]
    fn test_small_and_animal() {
        assert!(SizeSystem::Dogs.is_animal());
        assert!(SizeSystem::Dogs.is_small());
        assert!(SizeSystem::AuKids.is_small());
        assert!(!SizeSystem::AuKids.is_animal());
        assert!(!SizeSystem::AuMen.is_small());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&SizeSystem::AuWomen).unwrap();
        assert_eq!(json, r#""au_women""#);
        let cat: Category = serde_json::from_str(r#""animal""#).unwrap();
        assert_eq!(cat, Category::Animal);
    }
}
