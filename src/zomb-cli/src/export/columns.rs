//! Fixed column order per exported category

use zomb::Category;

pub const GUN: &[&str] = &[
    "DisplayName",
    "AttachmentType",
    "GunType",
    "AmmoType",
    "MagazineType",
    "MaxAmmo",
    "MinDamage",
    "MaxDamage",
    "HitChance",
    "CriticalChance",
    "CritDmgMultiplier",
    "ProjectileCount",
    "PiercingBullets",
    "MaxHitCount",
    "JamGunChance",
    "AimingTime",
    "ReloadTime",
    "SoundRadius",
    "MinRange",
    "MaxRange",
    "Weight",
    "AimingPerkHitChanceModifier",
    "AimingPerkCritModifier",
    "ConditionMax",
    "ConditionLowerChanceOneIn",
    "PushBackMod",
    "KnockdownMod",
    "BaseID",
    "AttachmentsList",
    "FromMod",
];

pub const MELEE: &[&str] = &[
    "DisplayName",
    "Categories",
    "MaxDamage",
    "MinDamage",
    "MinRange",
    "MaxRange",
    "CriticalChance",
    "MinimumSwingTime",
    "SwingAnim",
    "KnockdownMod",
    "IsAimedHandWeapon",
    "Tags",
    "FromMod",
];

pub const CLOTHING: &[&str] = &[
    "DisplayName",
    "BodyLocation",
    "BiteDefense",
    "RunSpeedModifier",
    "CombatSpeedModifier",
    "Insulation",
    "NeckProtectionModifier",
    "Weight",
    "FromMod",
];

pub const BAG: &[&str] = &[
    "DisplayName",
    "CanBeEquipped",
    "Capacity",
    "WeightReduction",
    "RunSpeedModifier",
    "clothingExtraSubmenu",
    "BodyLocation",
    "Weight",
    "FromMod",
];

// MountOn last, it's usually huge
pub const ATTACHMENT: &[&str] = &[
    "BaseID",
    "DisplayName",
    "PartType",
    "WeightModifier",
    "HitChanceModifier",
    "MinRangeModifier",
    "MaxRangeModifier",
    "AimingTimeModifier",
    "RecoilDelayModifier",
    "ReloadTimeModifier",
    "AngleModifier",
    "FromMod",
    "MountOn",
];

/// Columns for a category; empty for `Skipped`
pub fn for_category(category: Category) -> &'static [&'static str] {
    match category {
        Category::Gun => GUN,
        Category::Melee => MELEE,
        Category::Clothing => CLOTHING,
        Category::Bag => BAG,
        Category::Attachment => ATTACHMENT,
        Category::Skipped => &[],
    }
}
