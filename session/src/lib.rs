#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative roll session state management for Raid Roller.
//!
//! The session owns the result store, the per-category slot state machines,
//! the grouped roll plan, and the busy/share flags. Adapters mutate it
//! exclusively through [`apply`] and read it back through [`query`]. All
//! suspension points of the animation are `Tick` boundaries, so adapters
//! supply wall-clock deltas while tests drive a virtual clock.

pub mod picker;
mod slots;
mod streams;

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use raid_roller_core::{Category, Command, EmptySetError, Event, OptionCatalog, SquadSize};

use crate::slots::Slot;
use crate::streams::{derive_stream_seed, RNG_STREAM_COSMETIC, RNG_STREAM_OUTCOME};

/// Grouped animation plan for a full roll: the map pair is a fork-join and
/// the remaining categories run sequentially, each group starting only after
/// every slot of the previous group settled.
const FULL_ROLL_PLAN: [&[Category]; 4] = [
    &[Category::Map, Category::MapCondition],
    &[Category::Loot],
    &[Category::Style],
    &[Category::CodeWord],
];

/// Categories animated together when the map is re-rolled.
const MAP_REROLL_GROUP: [Category; 2] = [Category::Map, Category::MapCondition];

/// Configuration parameters required to construct a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    catalog: OptionCatalog,
    rng_seed: u64,
}

impl SessionConfig {
    /// Creates a new configuration using the provided catalog and seed.
    #[must_use]
    pub fn new(catalog: OptionCatalog, rng_seed: u64) -> Self {
        Self { catalog, rng_seed }
    }

    /// Configuration backed by the standard catalog.
    #[must_use]
    pub fn standard(rng_seed: u64) -> Self {
        Self::new(OptionCatalog::standard(), rng_seed)
    }
}

/// Authoritative state of the randomizer widget.
#[derive(Debug)]
pub struct Session {
    squad_size: SquadSize,
    catalog: OptionCatalog,
    slots: [Slot; Category::COUNT],
    results: ResultStore,
    plan: VecDeque<&'static [Category]>,
    full_roll_active: bool,
    busy: bool,
    share_visible: bool,
    outcome_rng: ChaCha8Rng,
    cosmetic_rng: ChaCha8Rng,
}

impl Session {
    /// Creates a new session ready to roll.
    ///
    /// Two RNG streams are derived from the base seed: committed outcomes
    /// draw from their own stream, so the settled results depend only on the
    /// seed and command order, never on tick granularity or the number of
    /// cosmetic draws.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            squad_size: SquadSize::Solo,
            slots: Category::ALL.map(Slot::new),
            results: ResultStore::default(),
            plan: VecDeque::new(),
            full_roll_active: false,
            busy: false,
            share_visible: false,
            outcome_rng: ChaCha8Rng::seed_from_u64(derive_stream_seed(
                config.rng_seed,
                RNG_STREAM_OUTCOME,
            )),
            cosmetic_rng: ChaCha8Rng::seed_from_u64(derive_stream_seed(
                config.rng_seed,
                RNG_STREAM_COSMETIC,
            )),
            catalog: config.catalog,
        }
    }

    fn select_squad_size(&mut self, size: SquadSize, out_events: &mut Vec<Event>) {
        if self.squad_size == size {
            return;
        }
        self.squad_size = size;
        out_events.push(Event::SquadSizeChanged { size });
    }

    fn roll_all(&mut self, out_events: &mut Vec<Event>) {
        if self.full_roll_active || self.any_cycling() {
            tracing::debug!("ignoring roll request while a roll session is active");
            return;
        }

        self.full_roll_active = true;
        self.plan = FULL_ROLL_PLAN.iter().copied().collect();
        out_events.push(Event::RollStarted {
            categories: Category::ALL.to_vec(),
        });
        self.mark_busy(out_events);
        self.set_share_visible(false, out_events);
        out_events.push(Event::AnnouncementRequested);
        if !self.start_next_group(out_events) {
            self.abort_roll(out_events);
        }
    }

    fn reroll(&mut self, category: Category, out_events: &mut Vec<Event>) {
        if self.full_roll_active {
            tracing::debug!(
                category = category.label(),
                "ignoring re-roll while a full roll is in flight"
            );
            return;
        }
        if self.slot(category).is_cycling() {
            tracing::debug!(
                category = category.label(),
                "ignoring re-roll for a slot that is already cycling"
            );
            return;
        }

        let single = [category];
        let group: &[Category] = if category == Category::Map {
            &MAP_REROLL_GROUP
        } else {
            &single
        };

        out_events.push(Event::RerollStarted {
            categories: group.to_vec(),
        });
        self.mark_busy(out_events);
        self.set_share_visible(false, out_events);
        out_events.push(Event::AnnouncementRequested);
        for category in group {
            // A coupled partner that is already mid-cycle keeps its own run.
            if self.slot(*category).is_cycling() {
                continue;
            }
            if !self.start_slot(*category, out_events) {
                self.abort_roll(out_events);
                return;
            }
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        let mut settled_any = false;
        for category in Category::ALL {
            let options = self.catalog.options(category, self.squad_size);
            if let Some(value) =
                self.slots[category.index()].advance(dt, options, &mut self.cosmetic_rng, out_events)
            {
                self.results.insert(category, value.clone());
                out_events.push(Event::SlotSettled { category, value });
                settled_any = true;
            }
        }

        if settled_any {
            self.after_settlement(out_events);
        }
    }

    fn after_settlement(&mut self, out_events: &mut Vec<Event>) {
        if self.any_cycling() {
            return;
        }

        if self.full_roll_active {
            if self.plan.is_empty() {
                self.full_roll_active = false;
                out_events.push(Event::RollCompleted);
                self.update_busy(out_events);
                self.refresh_share(out_events);
            } else if !self.start_next_group(out_events) {
                self.abort_roll(out_events);
            }
        } else {
            self.update_busy(out_events);
            self.refresh_share(out_events);
        }
    }

    /// Starts every slot of the next planned group. Returns `false` when an
    /// option set turned out to be empty.
    fn start_next_group(&mut self, out_events: &mut Vec<Event>) -> bool {
        let Some(group) = self.plan.pop_front() else {
            return true;
        };
        for category in group {
            if !self.start_slot(*category, out_events) {
                return false;
            }
        }
        true
    }

    fn start_slot(&mut self, category: Category, out_events: &mut Vec<Event>) -> bool {
        let options = self.catalog.options(category, self.squad_size);
        let committed = match picker::pick(&mut self.outcome_rng, options) {
            Ok(value) => value.clone(),
            Err(EmptySetError) => {
                tracing::warn!(
                    category = category.label(),
                    "option set is empty; aborting the roll"
                );
                return false;
            }
        };
        let first_display = picker::pick(&mut self.cosmetic_rng, options)
            .map(Clone::clone)
            .unwrap_or_else(|_| committed.clone());
        self.slots[category.index()].start(committed, first_display, out_events);
        true
    }

    /// Unwinds a roll whose option set turned out to be empty: cycling slots
    /// reset to idle with their indicators cleared, the store keeps its
    /// previous values, and the busy state reverts.
    fn abort_roll(&mut self, out_events: &mut Vec<Event>) {
        for slot in &mut self.slots {
            if slot.is_cycling() {
                slot.reset(out_events);
            }
        }
        self.plan.clear();
        self.full_roll_active = false;
        self.update_busy(out_events);
        self.refresh_share(out_events);
    }

    fn slot(&self, category: Category) -> &Slot {
        &self.slots[category.index()]
    }

    fn any_cycling(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_cycling())
    }

    fn is_busy_now(&self) -> bool {
        self.full_roll_active || self.any_cycling()
    }

    fn mark_busy(&mut self, out_events: &mut Vec<Event>) {
        if !self.busy {
            self.busy = true;
            out_events.push(Event::BusyChanged { busy: true });
        }
    }

    fn update_busy(&mut self, out_events: &mut Vec<Event>) {
        let busy = self.is_busy_now();
        if busy != self.busy {
            self.busy = busy;
            out_events.push(Event::BusyChanged { busy });
        }
    }

    fn set_share_visible(&mut self, visible: bool, out_events: &mut Vec<Event>) {
        if self.share_visible != visible {
            self.share_visible = visible;
            out_events.push(Event::ShareVisibilityChanged { visible });
        }
    }

    fn refresh_share(&mut self, out_events: &mut Vec<Event>) {
        let visible = !self.is_busy_now() && self.results.is_complete();
        self.set_share_visible(visible, out_events);
    }
}

/// Mapping from category to its settled display value.
///
/// Absence of a value is the "unrolled" sentinel. Mutated only on
/// settlement.
#[derive(Debug, Default)]
struct ResultStore {
    values: BTreeMap<Category, String>,
}

impl ResultStore {
    fn insert(&mut self, category: Category, value: String) {
        let _ = self.values.insert(category, value);
    }

    fn value(&self, category: Category) -> Option<&str> {
        self.values.get(&category).map(String::as_str)
    }

    fn is_complete(&self) -> bool {
        Category::ALL
            .iter()
            .all(|category| self.values.contains_key(category))
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectSquadSize { size } => session.select_squad_size(size, out_events),
        Command::RollAll => session.roll_all(out_events),
        Command::Reroll { category } => session.reroll(category, out_events),
        Command::Tick { dt } => session.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::collections::BTreeMap;

    use raid_roller_core::{Category, SlotPhase, SquadSize};

    use super::Session;

    /// Currently selected squad size.
    #[must_use]
    pub fn squad_size(session: &Session) -> SquadSize {
        session.squad_size
    }

    /// Reports whether any roll activity is in flight.
    #[must_use]
    pub fn is_busy(session: &Session) -> bool {
        session.is_busy_now()
    }

    /// Reports whether the copy/share affordance should be presented.
    #[must_use]
    pub fn share_visible(session: &Session) -> bool {
        session.share_visible
    }

    /// Captures a read-only view of every slot in canonical order.
    #[must_use]
    pub fn slot_view(session: &Session) -> SlotTableView {
        let rows = Category::ALL
            .iter()
            .map(|category| {
                let slot = session.slot(*category);
                SlotRow {
                    category: *category,
                    phase: slot.phase(),
                    display: slot
                        .display()
                        .map(ToOwned::to_owned)
                        .or_else(|| session.results.value(*category).map(ToOwned::to_owned)),
                }
            })
            .collect();
        SlotTableView { rows }
    }

    /// Captures the settled results for message composition.
    ///
    /// Returns `None` while any roll activity is in flight so consumers can
    /// never observe a mix of pre- and post-roll values.
    #[must_use]
    pub fn invite_view(session: &Session) -> Option<ResultsView> {
        if session.is_busy_now() {
            return None;
        }
        Some(ResultsView {
            values: session.results.values.clone(),
        })
    }

    /// Read-only snapshot describing all slots.
    #[derive(Clone, Debug)]
    pub struct SlotTableView {
        rows: Vec<SlotRow>,
    }

    impl SlotTableView {
        /// Iterator over the captured slot rows in canonical order.
        pub fn iter(&self) -> impl Iterator<Item = &SlotRow> {
            self.rows.iter()
        }
    }

    /// Immutable representation of a single slot used for queries.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SlotRow {
        /// Category backing the slot.
        pub category: Category,
        /// Animation phase the slot currently occupies.
        pub phase: SlotPhase,
        /// Text adapters should display, or `None` before the first roll.
        pub display: Option<String>,
    }

    /// Settled display values keyed by category.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ResultsView {
        values: BTreeMap<Category, String>,
    }

    impl ResultsView {
        /// Builds a view directly from settled entries.
        ///
        /// Intended for adapters and tests that already hold settled values;
        /// live widget flows should prefer [`invite_view`].
        #[must_use]
        pub fn from_entries(entries: impl IntoIterator<Item = (Category, String)>) -> Self {
            Self {
                values: entries.into_iter().collect(),
            }
        }

        /// Settled value for the category, or `None` for the unrolled sentinel.
        #[must_use]
        pub fn value(&self, category: Category) -> Option<&str> {
            self.values.get(&category).map(String::as_str)
        }

        /// Reports whether every category holds a settled value.
        #[must_use]
        pub fn is_complete(&self) -> bool {
            Category::ALL
                .iter()
                .all(|category| self.values.contains_key(category))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squad_size_selection_is_idempotent() {
        let mut session = Session::new(SessionConfig::standard(1));
        let mut events = Vec::new();
        apply(
            &mut session,
            Command::SelectSquadSize {
                size: SquadSize::Duo,
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::SelectSquadSize {
                size: SquadSize::Duo,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SquadSizeChanged {
                size: SquadSize::Duo
            }]
        );
    }

    #[test]
    fn fresh_session_is_idle_with_hidden_share() {
        let session = Session::new(SessionConfig::standard(1));
        assert!(!query::is_busy(&session));
        assert!(!query::share_visible(&session));
        assert!(query::invite_view(&session)
            .expect("idle session exposes a view")
            .value(Category::Map)
            .is_none());
    }
}
