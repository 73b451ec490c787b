//! Classified item records

use crate::attributes::AttributeMap;
use serde::{Deserialize, Serialize};

/// Domain category assigned to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Gun,
    Melee,
    Clothing,
    Bag,
    Attachment,
    Skipped,
}

impl Category {
    /// Every category, in table order
    pub const ALL: [Category; 6] = [
        Category::Gun,
        Category::Melee,
        Category::Clothing,
        Category::Bag,
        Category::Attachment,
        Category::Skipped,
    ];

    /// Categories handed to exporters
    pub const EXPORTED: [Category; 5] = [
        Category::Gun,
        Category::Melee,
        Category::Clothing,
        Category::Bag,
        Category::Attachment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Gun => "Gun",
            Category::Melee => "Melee",
            Category::Clothing => "Clothing",
            Category::Bag => "Bag",
            Category::Attachment => "Attachment",
            Category::Skipped => "Skipped",
        }
    }

    pub fn is_exported(self) -> bool {
        self != Category::Skipped
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl std::str::FromStr for Category {
    type Err = CategoryParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// One item definition after classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Block identifier (e.g. `Ruger1022`)
    pub id: String,
    pub category: Category,
    pub attributes: AttributeMap,
    /// Originating document, usually `"<mod>: <file>"`
    pub source_tag: String,
}

impl Record {
    /// Get a raw attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("gun".parse::<Category>(), Ok(Category::Gun));
        assert_eq!("Attachment".parse::<Category>(), Ok(Category::Attachment));
        assert_eq!(" BAG ".parse::<Category>(), Ok(Category::Bag));
        assert!("ammo".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_exported_excludes_skipped() {
        assert!(!Category::EXPORTED.contains(&Category::Skipped));
        assert!(!Category::Skipped.is_exported());
        assert!(Category::Gun.is_exported());
    }

    #[test]
    fn test_record_get() {
        let record = Record {
            id: "Axe".into(),
            category: Category::Melee,
            attributes: [("Weight".to_string(), "3".to_string())].into_iter().collect(),
            source_tag: "Vanilla: weapons.txt".into(),
        };

        assert_eq!(record.get("Weight"), Some("3"));
        assert_eq!(record.get("weight"), None);
        assert!(record.has("Weight"));
    }
}
