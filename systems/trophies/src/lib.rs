#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure trophy tracking: the tracked set, toggling, sorting, and the
//! persisted payload shape. Reading and writing the payload is an adapter
//! concern.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Definition of a collectible trophy rendered by adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyDefinition {
    id: String,
    name: String,
}

impl TrophyDefinition {
    /// Creates a trophy definition from its identifier and display name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable identifier used for tracking and persistence.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name adapters print in the trophy list.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Catalog of known trophies, ordered as provided by the data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyCatalog {
    trophies: Vec<TrophyDefinition>,
}

impl TrophyCatalog {
    /// Creates a catalog from explicit definitions.
    #[must_use]
    pub fn new(trophies: Vec<TrophyDefinition>) -> Self {
        Self { trophies }
    }

    /// Catalog shipped with the widget.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            TrophyDefinition::new("first-drop", "First Drop"),
            TrophyDefinition::new("pack-mule", "Pack Mule"),
            TrophyDefinition::new("night-owl", "Night Owl"),
            TrophyDefinition::new("quiet-exit", "Quiet Exit"),
            TrophyDefinition::new("goblin-mode", "Goblin Mode"),
            TrophyDefinition::new("wolf-pack", "Wolf Pack"),
        ])
    }

    /// Iterator over the catalog definitions in source order.
    pub fn iter(&self) -> impl Iterator<Item = &TrophyDefinition> {
        self.trophies.iter()
    }
}

/// Ordering applied when rendering the trophy list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    /// Alphabetical by display name.
    Name,
    /// Tracked trophies first, alphabetical within each group.
    TrackedFirst,
}

/// Row rendered for one trophy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrophyEntry<'a> {
    /// Definition backing the row.
    pub definition: &'a TrophyDefinition,
    /// Indicates whether the trophy is currently tracked.
    pub tracked: bool,
}

/// Persisted payload: the tracked identifier strings as an ordered list
/// under the fixed storage key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTrophies {
    /// Tracked identifiers in deterministic order.
    #[serde(rename = "tracked-trophies")]
    pub tracked: Vec<String>,
}

/// Mutable tracked-trophy state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrophyLog {
    tracked: BTreeSet<String>,
}

impl TrophyLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from its persisted payload; duplicates collapse.
    #[must_use]
    pub fn from_saved(saved: SavedTrophies) -> Self {
        Self {
            tracked: saved.tracked.into_iter().collect(),
        }
    }

    /// Toggles tracking of the trophy, returning whether it is tracked
    /// afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.tracked.remove(id) {
            false
        } else {
            let _ = self.tracked.insert(id.to_owned());
            true
        }
    }

    /// Reports whether the trophy is currently tracked.
    #[must_use]
    pub fn is_tracked(&self, id: &str) -> bool {
        self.tracked.contains(id)
    }

    /// Number of tracked trophies.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Captures the ordered persisted form of the log.
    #[must_use]
    pub fn to_saved(&self) -> SavedTrophies {
        SavedTrophies {
            tracked: self.tracked.iter().cloned().collect(),
        }
    }

    /// Renders catalog entries sorted according to the requested mode.
    #[must_use]
    pub fn sorted_entries<'a>(
        &self,
        catalog: &'a TrophyCatalog,
        mode: SortMode,
    ) -> Vec<TrophyEntry<'a>> {
        let mut entries: Vec<TrophyEntry<'a>> = catalog
            .iter()
            .map(|definition| TrophyEntry {
                definition,
                tracked: self.is_tracked(definition.id()),
            })
            .collect();
        match mode {
            SortMode::Name => {
                entries.sort_by(|a, b| a.definition.name().cmp(b.definition.name()));
            }
            SortMode::TrackedFirst => {
                entries.sort_by(|a, b| {
                    b.tracked
                        .cmp(&a.tracked)
                        .then_with(|| a.definition.name().cmp(b.definition.name()))
                });
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::{SavedTrophies, SortMode, TrophyCatalog, TrophyLog};

    #[test]
    fn toggle_tracks_and_untracks() {
        let mut log = TrophyLog::new();
        assert!(log.toggle("night-owl"));
        assert!(log.is_tracked("night-owl"));
        assert!(!log.toggle("night-owl"));
        assert!(!log.is_tracked("night-owl"));
    }

    #[test]
    fn saved_payload_is_ordered_and_deduplicated() {
        let saved = SavedTrophies {
            tracked: vec![
                "wolf-pack".to_owned(),
                "first-drop".to_owned(),
                "wolf-pack".to_owned(),
            ],
        };
        let log = TrophyLog::from_saved(saved);
        assert_eq!(log.tracked_count(), 2);
        assert_eq!(
            log.to_saved().tracked,
            vec!["first-drop".to_owned(), "wolf-pack".to_owned()]
        );
    }

    #[test]
    fn saved_payload_round_trips_through_json() {
        let mut log = TrophyLog::new();
        assert!(log.toggle("quiet-exit"));
        let json = serde_json::to_string(&log.to_saved()).expect("serialize");
        assert!(json.contains("tracked-trophies"));
        let restored: SavedTrophies = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(TrophyLog::from_saved(restored), log);
    }

    #[test]
    fn name_sort_orders_alphabetically() {
        let log = TrophyLog::new();
        let catalog = TrophyCatalog::standard();
        let entries = log.sorted_entries(&catalog, SortMode::Name);
        let names: Vec<&str> = entries
            .iter()
            .map(|entry| entry.definition.name())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn tracked_first_sort_floats_tracked_entries() {
        let mut log = TrophyLog::new();
        assert!(log.toggle("wolf-pack"));
        let catalog = TrophyCatalog::standard();
        let entries = log.sorted_entries(&catalog, SortMode::TrackedFirst);
        assert!(entries.first().expect("non-empty catalog").tracked);
        assert_eq!(
            entries.first().expect("non-empty catalog").definition.id(),
            "wolf-pack"
        );
    }
}
