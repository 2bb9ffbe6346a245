//! Slot state machines that drive the two-phase cycling animation.

use std::time::Duration;

use rand::Rng;
use raid_roller_core::{Category, Event, SlotPhase};

use crate::picker;

/// Interval between cosmetic overwrites during the fast cycle.
pub(crate) const FAST_CYCLE_INTERVAL: Duration = Duration::from_millis(75);
/// Total duration of the fast cycle.
pub(crate) const FAST_CYCLE_DURATION: Duration = Duration::from_millis(1_050);
/// Number of slow steps before settlement.
pub(crate) const SLOW_STEP_COUNT: u32 = 4;
/// Hold applied to the first slow step.
pub(crate) const SLOW_STEP_BASE_HOLD: Duration = Duration::from_millis(180);
/// Additional hold applied per subsequent slow step.
pub(crate) const SLOW_STEP_HOLD_INCREMENT: Duration = Duration::from_millis(140);

/// Hold duration of the provided slow step; each step holds longer than the
/// previous one.
pub(crate) fn slow_step_hold(step: u32) -> Duration {
    SLOW_STEP_BASE_HOLD + SLOW_STEP_HOLD_INCREMENT * step
}

/// State machine for one display slot.
///
/// The committed final value is fixed when the slot starts, before any
/// cycling; everything drawn during the cycling phases is cosmetic and is
/// discarded at settlement.
#[derive(Clone, Debug)]
pub(crate) struct Slot {
    category: Category,
    phase: SlotPhase,
    committed: Option<String>,
    display: Option<String>,
    phase_elapsed: Duration,
    fast_accumulator: Duration,
    slow_step: u32,
}

impl Slot {
    /// Creates an idle slot for the category.
    pub(crate) fn new(category: Category) -> Self {
        Self {
            category,
            phase: SlotPhase::Idle,
            committed: None,
            display: None,
            phase_elapsed: Duration::ZERO,
            fast_accumulator: Duration::ZERO,
            slow_step: 0,
        }
    }

    /// Animation phase the slot currently occupies.
    pub(crate) const fn phase(&self) -> SlotPhase {
        self.phase
    }

    /// Text currently shown for the slot, if any value was ever applied.
    pub(crate) fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Reports whether the slot is mid-animation.
    pub(crate) const fn is_cycling(&self) -> bool {
        self.phase.is_cycling()
    }

    /// Begins the animation with the committed final value fixed up front.
    pub(crate) fn start(
        &mut self,
        committed: String,
        first_display: String,
        out_events: &mut Vec<Event>,
    ) {
        self.committed = Some(committed);
        self.phase = SlotPhase::CyclingFast;
        self.phase_elapsed = Duration::ZERO;
        self.fast_accumulator = Duration::ZERO;
        self.slow_step = 0;
        out_events.push(Event::SlotPhaseChanged {
            category: self.category,
            phase: SlotPhase::CyclingFast,
        });
        self.overwrite_display(first_display, out_events);
    }

    /// Returns the slot to idle without settling; the indicator clears.
    pub(crate) fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.phase = SlotPhase::Idle;
        self.committed = None;
        self.display = None;
        self.phase_elapsed = Duration::ZERO;
        self.fast_accumulator = Duration::ZERO;
        self.slow_step = 0;
        out_events.push(Event::SlotPhaseChanged {
            category: self.category,
            phase: SlotPhase::Idle,
        });
    }

    /// Advances the animation by `dt`, returning the committed value when
    /// the slot settles during this advance.
    pub(crate) fn advance<R: Rng>(
        &mut self,
        dt: Duration,
        options: &[String],
        cosmetic_rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Option<String> {
        match self.phase {
            SlotPhase::Idle | SlotPhase::Settled => None,
            SlotPhase::CyclingFast => {
                self.phase_elapsed = self.phase_elapsed.saturating_add(dt);
                self.fast_accumulator = self.fast_accumulator.saturating_add(dt);
                while self.fast_accumulator >= FAST_CYCLE_INTERVAL {
                    self.fast_accumulator -= FAST_CYCLE_INTERVAL;
                    self.overwrite_random(options, cosmetic_rng, out_events);
                }
                if self.phase_elapsed >= FAST_CYCLE_DURATION {
                    // The fast accumulator is abandoned here; once the phase
                    // changes no further fast firings are possible.
                    self.phase = SlotPhase::CyclingSlow;
                    self.phase_elapsed = Duration::ZERO;
                    self.slow_step = 0;
                    out_events.push(Event::SlotPhaseChanged {
                        category: self.category,
                        phase: SlotPhase::CyclingSlow,
                    });
                    self.overwrite_random(options, cosmetic_rng, out_events);
                }
                None
            }
            SlotPhase::CyclingSlow => {
                self.phase_elapsed = self.phase_elapsed.saturating_add(dt);
                while self.phase_elapsed >= slow_step_hold(self.slow_step) {
                    self.phase_elapsed -= slow_step_hold(self.slow_step);
                    self.slow_step += 1;
                    if self.slow_step >= SLOW_STEP_COUNT {
                        return Some(self.settle(out_events));
                    }
                    self.overwrite_random(options, cosmetic_rng, out_events);
                }
                None
            }
        }
    }

    fn settle(&mut self, out_events: &mut Vec<Event>) -> String {
        let value = self
            .committed
            .take()
            .expect("cycling slot holds a committed value");
        self.phase = SlotPhase::Settled;
        self.display = Some(value.clone());
        self.phase_elapsed = Duration::ZERO;
        out_events.push(Event::SlotPhaseChanged {
            category: self.category,
            phase: SlotPhase::Settled,
        });
        value
    }

    fn overwrite_random<R: Rng>(
        &mut self,
        options: &[String],
        cosmetic_rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        // The set was validated when the roll started.
        if let Ok(value) = picker::pick(cosmetic_rng, options) {
            let value = value.clone();
            self.overwrite_display(value, out_events);
        }
    }

    fn overwrite_display(&mut self, value: String, out_events: &mut Vec<Event>) {
        self.display = Some(value.clone());
        out_events.push(Event::SlotDisplayChanged {
            category: self.category,
            value,
        });
    }
}
