//! Item classification
//!
//! Scriptfiles declare a raw `Type` inside each item block. Only a handful of
//! types matter for the exported tables, and weapons need splitting:
//!
//! | Rule | Raw type     | Condition                          | Category     |
//! |------|--------------|------------------------------------|--------------|
//! | 1    | `Weapon`     | melee use of a gun                 | `Skipped`    |
//! | 2    | `Weapon`     | firearm-aim indicator              | `Gun`        |
//! | 3    | `Weapon`     | otherwise                          | `Melee`      |
//! | 4    | `Container`  | `CanBeEquipped` present            | `Bag`        |
//! | 5    | `Clothing`   |                                    | `Clothing`   |
//! | 6    | `WeaponPart` |                                    | `Attachment` |
//! | 7    | anything else, or no `Type`       |               | `Skipped`    |
//!
//! Rules are evaluated top-down and the first match wins.

use crate::attributes::{is_falsy, known, AttributeMap};
use crate::record::Category;

pub const TYPE_WEAPON: &str = "Weapon";
pub const TYPE_CONTAINER: &str = "Container";
pub const TYPE_CLOTHING: &str = "Clothing";
pub const TYPE_WEAPON_PART: &str = "WeaponPart";

/// Marker for guns used as clubs, in ids and in `WeaponType`
pub const MELEE_GUN_MARKER: &str = "MeleeGun";

const FIREARM_SUB_CATEGORY: &str = "Firearm";
const GUN_WEAPON_TYPE: &str = "Gun";

/// Classify an item from its id and attributes
///
/// The raw type is read from the `Type` attribute. Comparisons ignore ASCII case.
pub fn classify(id: &str, attributes: &AttributeMap) -> Category {
    let Some(item_type) = attributes.get(known::TYPE).map(|t| t.trim()) else {
        return Category::Skipped;
    };

    if item_type.eq_ignore_ascii_case(TYPE_WEAPON) {
        if is_melee_gun(id, attributes) {
            Category::Skipped
        } else if is_aimed_firearm(attributes) {
            Category::Gun
        } else {
            Category::Melee
        }
    } else if item_type.eq_ignore_ascii_case(TYPE_CONTAINER) {
        if attributes.contains_key(known::CAN_BE_EQUIPPED) {
            Category::Bag
        } else {
            Category::Skipped
        }
    } else if item_type.eq_ignore_ascii_case(TYPE_CLOTHING) {
        Category::Clothing
    } else if item_type.eq_ignore_ascii_case(TYPE_WEAPON_PART) {
        Category::Attachment
    } else {
        Category::Skipped
    }
}

/// Classify and, unless skipped, stamp the id under `BaseID`
///
/// Stamping is idempotent.
pub fn classify_record(id: &str, attributes: &mut AttributeMap) -> Category {
    let category = classify(id, attributes);
    if category.is_exported() {
        attributes.insert(known::BASE_ID.to_string(), id.to_string());
    }
    category
}

fn is_melee_gun(id: &str, attributes: &AttributeMap) -> bool {
    contains_ignore_case(id, MELEE_GUN_MARKER)
        || attribute_is(attributes, known::WEAPON_TYPE, MELEE_GUN_MARKER)
}

fn is_aimed_firearm(attributes: &AttributeMap) -> bool {
    attributes
        .get(known::IS_AIMED_FIREARM)
        .is_some_and(|v| !is_falsy(v))
        || attribute_is(attributes, known::SUB_CATEGORY, FIREARM_SUB_CATEGORY)
        || attribute_is(attributes, known::WEAPON_TYPE, GUN_WEAPON_TYPE)
}

fn attribute_is(attributes: &AttributeMap, name: &str, expected: &str) -> bool {
    attributes
        .get(name)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_weapon_without_aim_is_melee() {
        let a = attrs(&[("Type", "Weapon"), ("Categories", "Axe")]);
        assert_eq!(classify("Axe", &a), Category::Melee);
    }

    #[test]
    fn test_aim_indicator_makes_gun() {
        let mut a = attrs(&[("Type", "Weapon")]);
        assert_eq!(classify("Pistol", &a), Category::Melee);

        a.insert("IsAimedFirearm".into(), "TRUE".into());
        assert_eq!(classify("Pistol", &a), Category::Gun);
    }

    #[test]
    fn test_aim_indicator_as_bare_flag() {
        let a = attrs(&[("Type", "Weapon"), ("IsAimedFirearm", "true")]);
        assert_eq!(classify("Pistol", &a), Category::Gun);
    }

    #[test]
    fn test_aim_indicator_switched_off() {
        let a = attrs(&[("Type", "Weapon"), ("IsAimedFirearm", "FALSE")]);
        assert_eq!(classify("Pistol", &a), Category::Melee);
    }

    #[test]
    fn test_other_firearm_indicators() {
        let sub = attrs(&[("Type", "Weapon"), ("SubCategory", "Firearm")]);
        assert_eq!(classify("Shotgun", &sub), Category::Gun);

        let wt = attrs(&[("Type", "Weapon"), ("WeaponType", "Gun")]);
        assert_eq!(classify("Shotgun", &wt), Category::Gun);

        let swing = attrs(&[("Type", "Weapon"), ("SubCategory", "Swinging")]);
        assert_eq!(classify("Bat", &swing), Category::Melee);
    }

    #[test]
    fn test_melee_gun_id_marker_skips_regardless() {
        let a = attrs(&[("Type", "Weapon"), ("IsAimedFirearm", "TRUE")]);
        assert_eq!(classify("AssaultRifleMeleeGun", &a), Category::Skipped);
        assert_eq!(classify("Shotgun_meleegun", &a), Category::Skipped);
    }

    #[test]
    fn test_melee_gun_weapon_type_skips() {
        let a = attrs(&[("Type", "Weapon"), ("WeaponType", "MeleeGun"), ("SubCategory", "Firearm")]);
        assert_eq!(classify("Rifle", &a), Category::Skipped);
    }

    #[test]
    fn test_container_needs_can_be_equipped() {
        let bag = attrs(&[("Type", "Container"), ("CanBeEquipped", "Back")]);
        assert_eq!(classify("Bag_Schoolbag", &bag), Category::Bag);

        let crate_ = attrs(&[("Type", "Container")]);
        assert_eq!(classify("Crate", &crate_), Category::Skipped);
    }

    #[test]
    fn test_clothing_and_parts() {
        assert_eq!(classify("Hat", &attrs(&[("Type", "Clothing")])), Category::Clothing);
        assert_eq!(classify("RedDot", &attrs(&[("Type", "WeaponPart")])), Category::Attachment);
    }

    #[test]
    fn test_type_is_case_insensitive() {
        assert_eq!(classify("Hat", &attrs(&[("Type", " clothing ")])), Category::Clothing);
    }

    #[test]
    fn test_unknown_or_missing_type_skipped() {
        assert_eq!(classify("Apple", &attrs(&[("Type", "Food")])), Category::Skipped);
        assert_eq!(classify("Thing", &attrs(&[("Weight", "1")])), Category::Skipped);
    }

    #[test]
    fn test_classify_record_stamps_base_id() {
        let mut a = attrs(&[("Type", "Clothing")]);
        assert_eq!(classify_record("Hat", &mut a), Category::Clothing);
        assert_eq!(a.get("BaseID").map(String::as_str), Some("Hat"));

        // Second pass leaves the map unchanged
        let before = a.clone();
        classify_record("Hat", &mut a);
        assert_eq!(a, before);
    }

    #[test]
    fn test_classify_record_skipped_untouched() {
        let mut a = attrs(&[("Type", "Food")]);
        assert_eq!(classify_record("Apple", &mut a), Category::Skipped);
        assert!(!a.contains_key("BaseID"));
    }
}
