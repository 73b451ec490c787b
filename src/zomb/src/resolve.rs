//! Attachment cross-referencing
//!
//! Attachments name the weapons they fit in `MountOn`; guns carry no such
//! list. The resolver inverts that relation once every document is in:
//!
//! ```text
//! item RedDot { Type = WeaponPart, MountOn = Ruger1022; M14, }
//!   => Ruger1022.AttachmentsList = RedDot
//! ```
//!
//! It only runs from [`crate::RecordStore::finalize`], which guarantees the
//! attachment set is complete.

use crate::attributes::known;
use crate::record::Record;
use crate::store::CategoryTable;
use std::collections::HashMap;

/// Weapon id to attachment ids, both in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentLinks {
    weapons: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl AttachmentLinks {
    fn push(&mut self, weapon: &str, attachment: &str) {
        let slot = match self.index.get(weapon) {
            Some(&slot) => slot,
            None => {
                self.weapons.push((weapon.to_string(), Vec::new()));
                self.index.insert(weapon.to_string(), self.weapons.len() - 1);
                self.weapons.len() - 1
            }
        };
        self.weapons[slot].1.push(attachment.to_string());
    }

    /// Attachment ids recorded for a weapon id
    pub fn get(&self, weapon: &str) -> Option<&[String]> {
        self.index
            .get(weapon)
            .map(|&slot| self.weapons[slot].1.as_slice())
    }

    /// Weapon ids with their attachment lists, in first-mention order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.weapons
            .iter()
            .map(|(weapon, attachments)| (weapon.as_str(), attachments.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

/// What the resolver did to the gun table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Guns that received an `AttachmentsList`
    pub linked: usize,
    /// Weapon ids named in `MountOn` with no gun record
    pub dangling: usize,
}

/// Build weapon → attachment links from attachment records
///
/// `MountOn` entries are split on `;` and trimmed. Repeated entries are kept,
/// so an attachment listed twice for a weapon appears twice in its list.
pub fn attachment_links<'a>(attachments: impl IntoIterator<Item = &'a Record>) -> AttachmentLinks {
    let mut links = AttachmentLinks::default();

    for attachment in attachments {
        let Some(mount_on) = attachment.get(known::MOUNT_ON) else {
            continue;
        };

        for weapon in mount_on.split(';').map(str::trim).filter(|w| !w.is_empty()) {
            links.push(weapon, &attachment.id);
        }
    }

    links
}

/// Write `AttachmentsList` onto every gun named in `links`
///
/// Links to ids without a gun record (missing, skipped, or melee) are dropped.
pub(crate) fn apply(links: &AttachmentLinks, guns: &mut CategoryTable) -> ResolveSummary {
    let mut summary = ResolveSummary::default();

    for (weapon, attachments) in links.iter() {
        match guns.get_mut(weapon) {
            Some(gun) => {
                gun.attributes
                    .insert(known::ATTACHMENTS_LIST.to_string(), attachments.join(";"));
                summary.linked += 1;
            }
            None => {
                tracing::trace!(weapon, "dropping attachment links to unknown gun");
                summary.dangling += 1;
            }
        }
    }

    summary
}
