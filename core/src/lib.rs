#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Raid Roller widget.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative roll session, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the session executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values for
//! systems and presentation layers to react to deterministically.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical title adapters present when the widget boots.
pub const WIDGET_TITLE: &str = "Raid Roller";

/// Map condition value that renders as empty text in the invite message.
pub const NORMAL_CONDITION: &str = "Normal";

/// Display categories the randomizer rolls, each backed by one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Destination map for the run.
    Map,
    /// Modifier applied on top of the rolled map.
    MapCondition,
    /// Loot rule the squad agrees to follow.
    Loot,
    /// Play style the squad adopts for the run.
    Style,
    /// Code word shouted to identify friendlies.
    CodeWord,
}

impl Category {
    /// Number of display categories driven by the randomizer.
    pub const COUNT: usize = 5;

    /// Every category in canonical display and settlement order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Map,
        Self::MapCondition,
        Self::Loot,
        Self::Style,
        Self::CodeWord,
    ];

    /// Stable zero-based index of the category within [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Map => 0,
            Self::MapCondition => 1,
            Self::Loot => 2,
            Self::Style => 3,
            Self::CodeWord => 4,
        }
    }

    /// Human-readable label adapters print next to the slot.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::MapCondition => "Map Condition",
            Self::Loot => "Loot",
            Self::Style => "Play Style",
            Self::CodeWord => "Code Word",
        }
    }
}

/// Squad sizes selectable before rolling.
///
/// Exactly one squad size is active at any time. It changes only through
/// [`Command::SelectSquadSize`], never as part of a roll, and changing it
/// does not alter already-committed results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SquadSize {
    /// Running the drop alone.
    Solo,
    /// Two-raider squad.
    Duo,
    /// Three-raider squad.
    Trio,
}

impl SquadSize {
    /// Human-readable label adapters print on the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::Duo => "Duo",
            Self::Trio => "Trio",
        }
    }
}

/// Animation lifecycle of a single slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotPhase {
    /// No roll has touched the slot since creation or the last abort.
    Idle,
    /// Rapid cosmetic cycling driven by a short recurring interval.
    CyclingFast,
    /// A fixed number of slower steps with increasing holds.
    CyclingSlow,
    /// The committed value has been applied as the final display.
    Settled,
}

impl SlotPhase {
    /// Reports whether the slot is mid-animation.
    #[must_use]
    pub const fn is_cycling(self) -> bool {
        matches!(self, Self::CyclingFast | Self::CyclingSlow)
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Selects the active squad size.
    SelectSquadSize {
        /// Squad size to activate.
        size: SquadSize,
    },
    /// Rolls every category through the grouped animation plan.
    RollAll,
    /// Re-rolls a single category (plus its coupled partner, for the map).
    Reroll {
        /// Category whose slot should run again.
        category: Category,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the session after processing commands.
///
/// The external collaborator interfaces are expressed through this stream:
/// [`Event::BusyChanged`] drives the primary trigger's busy indicator,
/// [`Event::SlotPhaseChanged`] drives the per-category reroll indicator,
/// [`Event::ShareVisibilityChanged`] drives the copy affordance, and
/// [`Event::AnnouncementRequested`] drives the fire-and-forget announcer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the active squad size changed.
    SquadSizeChanged {
        /// Squad size that became active.
        size: SquadSize,
    },
    /// Announces that a full roll started.
    RollStarted {
        /// Categories scheduled by the roll, in settlement order.
        categories: Vec<Category>,
    },
    /// Announces that a single-category re-roll started.
    RerollStarted {
        /// Categories animated by the re-roll (the map brings its condition).
        categories: Vec<Category>,
    },
    /// Requests the fire-and-forget roll announcement from adapters.
    AnnouncementRequested,
    /// Reflects the busy state of the primary roll trigger.
    BusyChanged {
        /// Indicates whether roll activity is in flight.
        busy: bool,
    },
    /// Reflects whether the copy/share affordance should be presented.
    ShareVisibilityChanged {
        /// Indicates whether the affordance is visible.
        visible: bool,
    },
    /// Confirms that a slot transitioned between animation phases.
    SlotPhaseChanged {
        /// Category whose slot changed phase.
        category: Category,
        /// Phase the slot entered.
        phase: SlotPhase,
    },
    /// Reports a cosmetic display overwrite during a cycling phase.
    SlotDisplayChanged {
        /// Category whose display changed.
        category: Category,
        /// Cosmetic value shown; discarded at settlement.
        value: String,
    },
    /// Confirms that a slot applied its committed final value.
    SlotSettled {
        /// Category that settled.
        category: Category,
        /// Value written to the result store.
        value: String,
    },
    /// Announces that every category of a full roll settled.
    RollCompleted,
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
}

/// Error raised when a random pick is attempted on an empty option set.
///
/// Defensive: the standard catalog is non-empty by construction, so this
/// only surfaces for hand-built catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cannot pick from an empty option set")]
pub struct EmptySetError;

/// Ordered option sets backing each display category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionCatalog {
    maps: Vec<String>,
    map_conditions: Vec<String>,
    loot_rules: Vec<String>,
    styles: StyleTable,
    code_words: Vec<String>,
}

impl OptionCatalog {
    /// Creates a catalog from explicit option sets.
    #[must_use]
    pub fn new(
        maps: Vec<String>,
        map_conditions: Vec<String>,
        loot_rules: Vec<String>,
        styles: StyleTable,
        code_words: Vec<String>,
    ) -> Self {
        Self {
            maps,
            map_conditions,
            loot_rules,
            styles,
            code_words,
        }
    }

    /// Catalog shipped with the widget.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            maps: to_owned_list(&[
                "Dam Battlegrounds",
                "Buried City",
                "Spaceport",
                "The Blue Gate",
                "Stella Montis",
            ]),
            map_conditions: to_owned_list(&[NORMAL_CONDITION, "Night"]),
            loot_rules: to_owned_list(&["Loot Goblin", "Standard Run", "No Loot"]),
            styles: StyleTable::standard(),
            code_words: to_owned_list(&[
                "Spicy Meatball",
                "Flapjack",
                "Penguin",
                "Pepperoni",
                "Glitter",
                "Banana Protocol",
                "Check the Fridge",
                "The Wrong Trousers",
                "My Guy",
                "Left",
                "Right",
                "Dead Ahead",
                "Look Up",
                "Look Down",
            ]),
        }
    }

    /// Option set for the provided category under the given squad size.
    ///
    /// Only the style set depends on the squad size; the other categories
    /// ignore it.
    #[must_use]
    pub fn options(&self, category: Category, squad_size: SquadSize) -> &[String] {
        match category {
            Category::Map => &self.maps,
            Category::MapCondition => &self.map_conditions,
            Category::Loot => &self.loot_rules,
            Category::Style => self.styles.for_squad(squad_size),
            Category::CodeWord => &self.code_words,
        }
    }
}

/// Per-squad-size variants of the play style option set.
///
/// The three sets describe functionally equivalent choices phrased for the
/// active squad size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    solo: Vec<String>,
    duo: Vec<String>,
    trio: Vec<String>,
}

impl StyleTable {
    /// Creates a style table from explicit per-squad-size sets.
    #[must_use]
    pub fn new(solo: Vec<String>, duo: Vec<String>, trio: Vec<String>) -> Self {
        Self { solo, duo, trio }
    }

    /// Style table shipped with the widget.
    #[must_use]
    pub fn standard() -> Self {
        let group: &[&str] = &["Lone Wolves", "Buddy Up", "Decepticon", "Kill on Sight"];
        Self {
            solo: to_owned_list(&["Lone Wolf", "Buddy Up", "Decepticon", "Kill on Sight"]),
            duo: to_owned_list(group),
            trio: to_owned_list(group),
        }
    }

    /// Style options phrased for the provided squad size.
    #[must_use]
    pub fn for_squad(&self, squad_size: SquadSize) -> &[String] {
        match squad_size {
            SquadSize::Solo => &self.solo,
            SquadSize::Duo => &self.duo,
            SquadSize::Trio => &self.trio,
        }
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::{Category, OptionCatalog, SlotPhase, SquadSize, NORMAL_CONDITION};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn category_round_trips_through_bincode() {
        for category in Category::ALL {
            assert_round_trip(&category);
        }
    }

    #[test]
    fn squad_size_round_trips_through_bincode() {
        assert_round_trip(&SquadSize::Duo);
    }

    #[test]
    fn category_indices_match_canonical_order() {
        for (position, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn cycling_phases_report_as_cycling() {
        assert!(SlotPhase::CyclingFast.is_cycling());
        assert!(SlotPhase::CyclingSlow.is_cycling());
        assert!(!SlotPhase::Idle.is_cycling());
        assert!(!SlotPhase::Settled.is_cycling());
    }

    #[test]
    fn standard_catalog_has_options_for_every_category() {
        let catalog = OptionCatalog::standard();
        for category in Category::ALL {
            for squad_size in [SquadSize::Solo, SquadSize::Duo, SquadSize::Trio] {
                assert!(
                    !catalog.options(category, squad_size).is_empty(),
                    "empty option set for {category:?}"
                );
            }
        }
    }

    #[test]
    fn standard_conditions_lead_with_normal() {
        let catalog = OptionCatalog::standard();
        let conditions = catalog.options(Category::MapCondition, SquadSize::Solo);
        assert_eq!(conditions.first().map(String::as_str), Some(NORMAL_CONDITION));
    }

    #[test]
    fn style_set_is_squad_size_aware() {
        let catalog = OptionCatalog::standard();
        let solo = catalog.options(Category::Style, SquadSize::Solo);
        let duo = catalog.options(Category::Style, SquadSize::Duo);
        assert!(solo.contains(&"Lone Wolf".to_owned()));
        assert!(duo.contains(&"Lone Wolves".to_owned()));
    }
}
