//! MediaWiki tables for the community wiki
//!
//! Guns are split into one table per gun type, followed by a melee table.
//! Tables are written as `{| class="wikitable sortable" ... |}` blocks, each
//! preceded by a `==Group==` heading.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use zomb::{known, Category, FinalizedStore, Record};

use super::columns;

pub const FILE_NAME: &str = "mediawiki_tables.txt";

/// Wiki grouping for guns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GunType {
    Shotgun,
    Handgun,
    Rifle,
    Other,
}

impl GunType {
    pub const ALL: [GunType; 4] = [GunType::Shotgun, GunType::Handgun, GunType::Rifle, GunType::Other];

    pub fn name(self) -> &'static str {
        match self {
            GunType::Shotgun => "Shotgun",
            GunType::Handgun => "Handgun",
            GunType::Rifle => "Rifle",
            GunType::Other => "Other",
        }
    }

    /// Gun type from an explicit `GunType` attribute, else from ammo and attachment slot
    pub fn of(gun: &Record) -> Self {
        if let Some(explicit) = gun.get(known::GUN_TYPE) {
            if let Some(gun_type) = GunType::ALL
                .into_iter()
                .find(|t| t.name().eq_ignore_ascii_case(explicit.trim()))
            {
                return gun_type;
            }
        }

        let ammo = gun.get(known::AMMO_TYPE).unwrap_or_default();
        let slot = gun.get(known::ATTACHMENT_TYPE).unwrap_or_default();

        if contains_ignore_case(ammo, "Shotgun") || contains_ignore_case(slot, "Shotgun") {
            GunType::Shotgun
        } else if contains_ignore_case(slot, "Holster") {
            GunType::Handgun
        } else if contains_ignore_case(slot, "Rifle") {
            GunType::Rifle
        } else {
            GunType::Other
        }
    }

    /// Gun columns shown on the wiki for this group
    pub fn columns(self) -> Vec<&'static str> {
        columns::GUN
            .iter()
            .copied()
            .filter(|&c| c != known::ATTACHMENTS_LIST && c != known::GUN_TYPE)
            // Only shotguns come in both holster and rifle sizes
            .filter(|&c| self == GunType::Shotgun || c != known::ATTACHMENT_TYPE)
            .collect()
    }
}

/// Header text for a column, with icons for the stat columns
pub fn header(column: &str) -> &str {
    match column {
        "DisplayName" => "Name",
        "AttachmentType" => "Size",
        "Categories" => "Category",
        "AmmoType" => "[[File:RifleAmmo223.png|link=|Ammo Type]]",
        "MagazineType" => "[[File:BerettaClip.png|link=|Magazine Type]]",
        "HitChance" => "[[File:UI_Accuracy.png|28px|link=|Accuracy]]",
        "SoundRadius" => "[[File:UI_Range.png|28px|link=|Sound Radius]]",
        "MinRange" => "[[File:UI_Min.png|28px|link=|Minimum Range]]",
        "MaxRange" => "[[File:UI_Max.png|28px|link=|Maximum Range]]",
        "MinDamage" => "[[File:UI_Min.png|28px|link=|Minimum Damage]]",
        "MaxDamage" => "[[File:UI_Max.png|28px|link=|Maximum Damage]]",
        other => other,
    }
}

/// Render every non-empty gun group and the melee table
pub fn render(store: &FinalizedStore) -> String {
    let mut out = String::new();

    for gun_type in GunType::ALL {
        let guns: Vec<_> = store
            .records(Category::Gun)
            .filter(|g| GunType::of(g) == gun_type)
            .collect();
        if !guns.is_empty() {
            write_table(&mut out, gun_type.name(), &gun_type.columns(), &guns);
        }
    }

    let melee: Vec<_> = store.records(Category::Melee).collect();
    if !melee.is_empty() {
        write_table(&mut out, Category::Melee.name(), columns::MELEE, &melee);
    }

    out
}

/// Write [`FILE_NAME`] into `dir`
pub fn write(store: &FinalizedStore, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(FILE_NAME);
    fs::write(&path, render(store))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote wiki tables");
    Ok(path)
}

fn write_table(out: &mut String, title: &str, columns: &[&str], records: &[&Record]) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "\n=={title}==");
    let _ = writeln!(out, "{{| class=\"wikitable sortable\"");

    let headers: Vec<_> = columns.iter().map(|c| header(c)).collect();
    let _ = writeln!(out, "! {}", headers.join(" !! "));

    for record in records {
        let cells: Vec<_> = columns
            .iter()
            .map(|c| escape_cell(record.get(c).unwrap_or_default()))
            .collect();
        let _ = writeln!(out, "|-");
        let _ = writeln!(out, "| {}", cells.join(" || "));
    }

    let _ = writeln!(out, "|}}");
}

/// Pipes would end the cell early
fn escape_cell(value: &str) -> String {
    value.replace('|', "{{!}}")
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zomb::RecordStore;

    fn gun(pairs: &[(&str, &str)]) -> Record {
        Record {
            id: "Gun".into(),
            category: Category::Gun,
            attributes: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            source_tag: "t".into(),
        }
    }

    #[test]
    fn test_gun_type_derivation() {
        assert_eq!(GunType::of(&gun(&[("AmmoType", "Base.ShotgunShells")])), GunType::Shotgun);
        assert_eq!(GunType::of(&gun(&[("AttachmentType", "Shotgun")])), GunType::Shotgun);
        assert_eq!(GunType::of(&gun(&[("AttachmentType", "Holster")])), GunType::Handgun);
        assert_eq!(GunType::of(&gun(&[("AttachmentType", "Rifle")])), GunType::Rifle);
        assert_eq!(GunType::of(&gun(&[])), GunType::Other);
    }

    #[test]
    fn test_explicit_gun_type_wins() {
        let g = gun(&[("GunType", "rifle"), ("AttachmentType", "Holster")]);
        assert_eq!(GunType::of(&g), GunType::Rifle);

        // Unknown values fall back to derivation
        let g = gun(&[("GunType", "Bazooka"), ("AttachmentType", "Holster")]);
        assert_eq!(GunType::of(&g), GunType::Handgun);
    }

    #[test]
    fn test_group_columns() {
        let shotgun = GunType::Shotgun.columns();
        assert!(shotgun.contains(&"AttachmentType"));
        assert!(!shotgun.contains(&"AttachmentsList"));
        assert!(!shotgun.contains(&"GunType"));

        let rifle = GunType::Rifle.columns();
        assert!(!rifle.contains(&"AttachmentType"));
        assert_eq!(rifle.len(), columns::GUN.len() - 3);
    }

    #[test]
    fn test_header_renames() {
        assert_eq!(header("DisplayName"), "Name");
        assert_eq!(header("HitChance"), "[[File:UI_Accuracy.png|28px|link=|Accuracy]]");
        assert_eq!(header("Weight"), "Weight");
    }

    #[test]
    fn test_render() {
        let mut store = RecordStore::new();
        store.ingest(
            r#"
            item Shotgun { Type = Weapon, IsAimedFirearm = TRUE, DisplayName = JS-2000, AmmoType = Base.ShotgunShells, }
            item Pistol { Type = Weapon, IsAimedFirearm = TRUE, DisplayName = M9, AttachmentType = Holster, }
            item Axe { Type = Weapon, DisplayName = Axe, Categories = Axe, }
            "#,
            "Vanilla: weapons.txt",
        );
        let text = render(&store.finalize());

        let headings: Vec<_> = text.lines().filter(|l| l.starts_with("==")).collect();
        assert_eq!(headings, vec!["==Shotgun==", "==Handgun==", "==Melee=="]);
        assert!(text.contains("| JS-2000 || "));
        assert!(text.contains("! Name !! Category !! "));
        assert_eq!(text.matches("{| class=\"wikitable sortable\"").count(), 3);
        assert_eq!(text.matches("\n|}").count(), 3);
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a{{!}}b");
    }
}
