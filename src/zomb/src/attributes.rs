//! Attribute parsing for item block payloads
//!
//! A payload is a comma-separated list of `Name = Value` (or `Name : Value`)
//! pairs, with the odd bare flag thrown in:
//!
//! ```text
//! Weight = 0.5, CanBeEquipped, BodyLocation = Back,
//! ```
//!
//! Values stay strings. Semicolons inside values (`MountOn`, `Tags`) are kept
//! verbatim for later splitting.

use std::collections::BTreeMap;

/// Attribute name to raw string value
pub type AttributeMap = BTreeMap<String, String>;

/// Value stored for a bare flag
pub const FLAG_VALUE: &str = "true";

/// Attribute names the classifier, resolver and exporters rely on
pub mod known {
    /// Raw item type (`Weapon`, `Clothing`, `Container`, `WeaponPart`, ...)
    pub const TYPE: &str = "Type";
    /// Record identifier, injected on classification
    pub const BASE_ID: &str = "BaseID";
    /// Provenance tag of the document the record came from
    pub const FROM_MOD: &str = "FromMod";
    /// Semicolon-separated weapon ids an attachment mounts on
    pub const MOUNT_ON: &str = "MountOn";
    /// Semicolon-separated attachment ids, derived for guns
    pub const ATTACHMENTS_LIST: &str = "AttachmentsList";
    pub const IS_AIMED_FIREARM: &str = "IsAimedFirearm";
    pub const SUB_CATEGORY: &str = "SubCategory";
    pub const WEAPON_TYPE: &str = "WeaponType";
    pub const CAN_BE_EQUIPPED: &str = "CanBeEquipped";
    pub const AMMO_TYPE: &str = "AmmoType";
    pub const ATTACHMENT_TYPE: &str = "AttachmentType";
    pub const GUN_TYPE: &str = "GunType";
}

/// A value overwritten by a later occurrence of the same name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub name: String,
    pub previous: String,
    pub replacement: String,
}

/// Attributes of one block plus the duplicates seen while parsing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    pub attributes: AttributeMap,
    pub duplicates: Vec<Duplicate>,
}

/// Parse a block payload into an attribute map
///
/// Later occurrences of a name win; each overwrite is recorded in
/// [`ParsedAttributes::duplicates`]. The map never contains an empty key.
pub fn parse_attributes(body: &str) -> ParsedAttributes {
    let mut parsed = ParsedAttributes::default();

    for segment in body.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let Some((name, value)) = parse_segment(segment) else {
            tracing::debug!(segment, "dropping unparseable attribute segment");
            continue;
        };

        if let Some(previous) = parsed.attributes.insert(name.clone(), value.clone()) {
            parsed.duplicates.push(Duplicate {
                name,
                previous,
                replacement: value,
            });
        }
    }

    parsed
}

fn parse_segment(segment: &str) -> Option<(String, String)> {
    match segment.find(|c: char| c == '=' || c == ':') {
        Some(split) => {
            // Like a `\w+` match, only the word right before the separator names it
            let name = segment[..split].split_whitespace().last()?;
            let value = collapse_whitespace(&segment[split + 1..]);
            Some((name.to_string(), value))
        }
        None if is_identifier(segment) => Some((segment.to_string(), FLAG_VALUE.to_string())),
        None => None,
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Trim and squeeze internal whitespace runs to a single space
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether a raw value explicitly switches a flag off (`false`, `0`, `no`)
pub fn is_falsy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_pairs_and_bare_flag() {
        let parsed = parse_attributes("Weight = 0.5, CanBeEquipped, BodyLocation = Back");

        assert_eq!(
            parsed.attributes,
            map(&[("Weight", "0.5"), ("CanBeEquipped", "true"), ("BodyLocation", "Back")])
        );
        assert!(parsed.duplicates.is_empty());
    }

    #[test]
    fn test_colon_separator() {
        let parsed = parse_attributes("Type : Clothing, DisplayName:Hat");
        assert_eq!(parsed.attributes, map(&[("Type", "Clothing"), ("DisplayName", "Hat")]));
    }

    #[test]
    fn test_first_separator_wins() {
        let parsed = parse_attributes("DisplayName = M16: Assault Rifle");
        assert_eq!(parsed.attributes["DisplayName"], "M16: Assault Rifle");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let parsed = parse_attributes("\n  DisplayName   =   Big \n   Hiking    Bag  ,\n");
        assert_eq!(parsed.attributes["DisplayName"], "Big Hiking Bag");
    }

    #[test]
    fn test_semicolons_preserved() {
        let parsed = parse_attributes("MountOn = Pistol; Pistol2 ;Revolver, Tags = A;B");
        assert_eq!(parsed.attributes["MountOn"], "Pistol; Pistol2 ;Revolver");
        assert_eq!(parsed.attributes["Tags"], "A;B");
    }

    #[test]
    fn test_last_value_wins_with_duplicate_recorded() {
        let parsed = parse_attributes("Weight = 1, Weight = 2");

        assert_eq!(parsed.attributes["Weight"], "2");
        assert_eq!(
            parsed.duplicates,
            vec![Duplicate {
                name: "Weight".into(),
                previous: "1".into(),
                replacement: "2".into(),
            }]
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(parse_attributes(""), ParsedAttributes::default());
        assert_eq!(parse_attributes(" ,, \n ,"), ParsedAttributes::default());
    }

    #[test]
    fn test_never_empty_key() {
        let parsed = parse_attributes("= orphan, : another, Weight = 1");
        assert_eq!(parsed.attributes, map(&[("Weight", "1")]));
    }

    #[test]
    fn test_multi_word_junk_dropped() {
        let parsed = parse_attributes("some stray words, Weight = 1");
        assert_eq!(parsed.attributes, map(&[("Weight", "1")]));
    }

    #[test]
    fn test_last_word_names_attribute() {
        let parsed = parse_attributes("stray Weight = 1");
        assert_eq!(parsed.attributes, map(&[("Weight", "1")]));
    }

    #[test]
    fn test_empty_value_kept() {
        let parsed = parse_attributes("Tags = , Weight = 1");
        assert_eq!(parsed.attributes["Tags"], "");
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy("FALSE"));
        assert!(is_falsy(" false "));
        assert!(is_falsy("0"));
        assert!(!is_falsy("TRUE"));
        assert!(!is_falsy(""));
    }

    #[test]
    fn test_value_fragments_are_not_flags() {
        // Unquoted comma inside a value leaves stray fragments behind
        let parsed = parse_attributes("RunSpeedModifier = 0.9, -0.5, Base.Bullets9mm, 3, IsCookable, _Hidden");
        assert_eq!(
            parsed.attributes,
            map(&[("RunSpeedModifier", "0.9"), ("IsCookable", "true"), ("_Hidden", "true")])
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("CanBeEquipped"));
        assert!(is_identifier("Slot_2"));
        assert!(!is_identifier("2Slot"));
        assert!(!is_identifier("-0.5"));
        assert!(!is_identifier("Base.Axe"));
        assert!(!is_identifier(""));
    }
}
