//! Keeps a translation's group/unit structure in line with its source file.
//!
//! After a source file gains or loses strings, [`sync_structure`] brings one derived
//! file up to date: new groups and units are added untranslated, changed source texts
//! are refreshed, and groups that no longer exist are dropped along with their units.
//! Units that vanished from a group the source still has are only counted and kept.
//! Every dropped unit is counted in [`SyncReport::units_removed`].

use std::fmt::Display;

use serde::Serialize;

use crate::{
    tree::{self, Node},
    types::{Group, TranslationFile},
};

/// What [`sync_structure`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub groups_added: usize,
    pub units_added: usize,
    pub sources_updated: usize,
    pub groups_removed: usize,
    /// Units dropped together with a removed group.
    pub units_removed: usize,
    /// Units missing from the source whose group still exists there. They are left in
    /// place.
    pub orphaned_units: usize,
}

impl SyncReport {
    /// True when the translation already matched the source.
    pub fn is_clean(&self) -> bool {
        *self == SyncReport::default()
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} group(s) added, {} unit(s) added, {} source(s) updated, {} group(s) removed, {} unit(s) removed, {} orphaned unit(s)",
            self.groups_added,
            self.units_added,
            self.sources_updated,
            self.groups_removed,
            self.units_removed,
            self.orphaned_units
        )
    }
}

/// Mirrors the structure of `source` into `derived`.
pub fn sync_structure(source: &TranslationFile, derived: &mut TranslationFile) -> SyncReport {
    let mut report = SyncReport::default();

    tree::for_each(&source.root, &mut |node| match node {
        Node::Group(group) => {
            if tree::find_group(&derived.root, &group.path).is_none() {
                let shell = Group {
                    groups: Vec::new(),
                    units: Vec::new(),
                    ..group.clone()
                };
                if tree::create_group(&mut derived.root, &shell).is_some() {
                    report.groups_added += 1;
                }
            }
        }
        Node::Unit(unit) => match tree::get_unit_mut(&mut derived.root, &unit.full_path()) {
            Some(existing) => {
                if existing.source.text != unit.source.text {
                    existing.source = unit.source.clone();
                    report.sources_updated += 1;
                }
            }
            None => {
                if tree::create_unit(&mut derived.root, &unit.untranslated()).is_some() {
                    report.units_added += 1;
                }
            }
        },
    });

    // Parents are visited before their children, so a stale subtree is removed once.
    let mut stale_groups: Vec<Vec<String>> = Vec::new();
    tree::for_each(&derived.root, &mut |node| match node {
        Node::Group(group) => {
            let inside_stale = stale_groups
                .iter()
                .any(|stale| group.path.starts_with(stale));
            if !inside_stale && tree::find_group(&source.root, &group.path).is_none() {
                stale_groups.push(group.path.clone());
            }
        }
        Node::Unit(unit) => {
            if stale_groups.iter().any(|stale| unit.path.starts_with(stale)) {
                report.units_removed += 1;
            } else if tree::get_unit(&source.root, &unit.full_path()).is_none() {
                report.orphaned_units += 1;
            }
        }
    });

    for path in &stale_groups {
        if let Some(removed) = tree::remove_group(&mut derived.root, path) {
            tracing::debug!(
                "removed group `{}` with {} unit(s)",
                path.join("/"),
                removed.units.len()
            );
            report.groups_removed += 1;
        }
    }

    report
}
