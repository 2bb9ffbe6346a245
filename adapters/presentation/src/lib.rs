#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Raid Roller adapters.
//!
//! The [`Scene`] is a declarative view-model built purely from the session's
//! event stream; concrete adapters render it however they like. Collaborator
//! traits for the announcer and the clipboard live here so front ends can
//! swap implementations freely.

mod seasonal;

pub use seasonal::{seasonal_theme, SeasonalTheme};

use std::time::Duration;

use anyhow::Result as AnyResult;
use raid_roller_core::{Category, Event, SquadSize};

/// How long the copy acknowledgment stays on screen before reverting.
pub const ACKNOWLEDGMENT_DURATION: Duration = Duration::from_secs(2);

/// Placeholder shown for a slot that has never settled.
pub const UNROLLED_PLACEHOLDER: &str = "---";

/// Transient state of the copy acknowledgment display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acknowledgment {
    /// Default appearance.
    Idle,
    /// Clipboard write succeeded; reverts once `remaining` elapses.
    Copied {
        /// Time left before the display reverts.
        remaining: Duration,
    },
    /// Clipboard write failed; reverts once `remaining` elapses.
    Failed {
        /// Time left before the display reverts.
        remaining: Duration,
    },
}

/// Row describing one slot as adapters should render it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotDisplay {
    /// Category backing the slot.
    pub category: Category,
    /// Text to render, already defaulted to the unrolled placeholder.
    pub text: String,
    /// Indicates that the slot's re-roll indicator is active.
    pub cycling: bool,
}

/// Declarative view-model of the widget, driven by the session event stream.
#[derive(Clone, Debug)]
pub struct Scene {
    slot_texts: [String; Category::COUNT],
    slot_cycling: [bool; Category::COUNT],
    squad_size: SquadSize,
    roll_enabled: bool,
    share_visible: bool,
    acknowledgment: Acknowledgment,
    seasonal: Option<SeasonalTheme>,
}

impl Scene {
    /// Creates a scene in its boot state: placeholders everywhere, the roll
    /// trigger enabled, and the share affordance hidden.
    #[must_use]
    pub fn new(squad_size: SquadSize) -> Self {
        Self {
            slot_texts: std::array::from_fn(|_| UNROLLED_PLACEHOLDER.to_owned()),
            slot_cycling: [false; Category::COUNT],
            squad_size,
            roll_enabled: true,
            share_visible: false,
            acknowledgment: Acknowledgment::Idle,
            seasonal: None,
        }
    }

    /// Applies a batch of session events to the view-model.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SquadSizeChanged { size } => self.squad_size = *size,
                Event::BusyChanged { busy } => self.roll_enabled = !busy,
                Event::ShareVisibilityChanged { visible } => self.share_visible = *visible,
                Event::SlotPhaseChanged { category, phase } => {
                    self.slot_cycling[category.index()] = phase.is_cycling();
                }
                Event::SlotDisplayChanged { category, value }
                | Event::SlotSettled { category, value } => {
                    self.slot_texts[category.index()] = value.clone();
                }
                Event::TimeAdvanced { dt } => self.decay_acknowledgment(*dt),
                Event::RollStarted { .. }
                | Event::RerollStarted { .. }
                | Event::AnnouncementRequested
                | Event::RollCompleted => {}
            }
        }
    }

    /// Records the outcome of a clipboard write; the acknowledgment reverts
    /// after [`ACKNOWLEDGMENT_DURATION`].
    pub fn report_copy(&mut self, success: bool) {
        self.acknowledgment = if success {
            Acknowledgment::Copied {
                remaining: ACKNOWLEDGMENT_DURATION,
            }
        } else {
            Acknowledgment::Failed {
                remaining: ACKNOWLEDGMENT_DURATION,
            }
        };
    }

    /// Installs the seasonal theme chrome, if one is active.
    pub fn set_seasonal(&mut self, seasonal: Option<SeasonalTheme>) {
        self.seasonal = seasonal;
    }

    /// Rows describing every slot in canonical order.
    #[must_use]
    pub fn slot_rows(&self) -> Vec<SlotDisplay> {
        Category::ALL
            .iter()
            .map(|category| SlotDisplay {
                category: *category,
                text: self.slot_texts[category.index()].clone(),
                cycling: self.slot_cycling[category.index()],
            })
            .collect()
    }

    /// Squad size currently reflected by the selector.
    #[must_use]
    pub const fn squad_size(&self) -> SquadSize {
        self.squad_size
    }

    /// Whether the primary roll trigger is enabled.
    #[must_use]
    pub const fn roll_enabled(&self) -> bool {
        self.roll_enabled
    }

    /// Whether the copy/share affordance is visible.
    #[must_use]
    pub const fn share_visible(&self) -> bool {
        self.share_visible
    }

    /// Current state of the copy acknowledgment display.
    #[must_use]
    pub const fn acknowledgment(&self) -> Acknowledgment {
        self.acknowledgment
    }

    /// Seasonal theme chrome, if one is active.
    #[must_use]
    pub const fn seasonal(&self) -> Option<SeasonalTheme> {
        self.seasonal
    }

    fn decay_acknowledgment(&mut self, dt: Duration) {
        self.acknowledgment = match self.acknowledgment {
            Acknowledgment::Idle => Acknowledgment::Idle,
            Acknowledgment::Copied { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    Acknowledgment::Idle
                } else {
                    Acknowledgment::Copied { remaining }
                }
            }
            Acknowledgment::Failed { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    Acknowledgment::Idle
                } else {
                    Acknowledgment::Failed { remaining }
                }
            }
        };
    }
}

/// Fire-and-forget announcement collaborator.
///
/// Implementations must not block; any playback failure is swallowed by the
/// implementation rather than surfaced to the caller.
pub trait Announcer {
    /// Triggers the roll announcement.
    fn announce(&mut self);
}

/// Announcer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&mut self) {}
}

/// Clipboard collaborator invoked with the composed invite message.
pub trait Clipboard {
    /// Writes the text; an error feeds the failure acknowledgment and never
    /// touches session state.
    fn write(&mut self, text: &str) -> AnyResult<()>;
}

/// In-memory clipboard used by tests and headless front ends.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    last: Option<String>,
}

impl MemoryClipboard {
    /// Most recently written text, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> AnyResult<()> {
        self.last = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use raid_roller_core::{Category, Event, SlotPhase, SquadSize};

    use super::{
        Acknowledgment, Clipboard, MemoryClipboard, Scene, ACKNOWLEDGMENT_DURATION,
        UNROLLED_PLACEHOLDER,
    };

    #[test]
    fn boot_scene_shows_placeholders() {
        let scene = Scene::new(SquadSize::Solo);
        assert!(scene
            .slot_rows()
            .iter()
            .all(|row| row.text == UNROLLED_PLACEHOLDER && !row.cycling));
        assert!(scene.roll_enabled());
        assert!(!scene.share_visible());
    }

    #[test]
    fn busy_events_disable_the_roll_trigger() {
        let mut scene = Scene::new(SquadSize::Solo);
        scene.handle(&[Event::BusyChanged { busy: true }]);
        assert!(!scene.roll_enabled());
        scene.handle(&[Event::BusyChanged { busy: false }]);
        assert!(scene.roll_enabled());
    }

    #[test]
    fn slot_events_drive_text_and_indicator() {
        let mut scene = Scene::new(SquadSize::Solo);
        scene.handle(&[
            Event::SlotPhaseChanged {
                category: Category::Map,
                phase: SlotPhase::CyclingFast,
            },
            Event::SlotDisplayChanged {
                category: Category::Map,
                value: "Buried City".to_owned(),
            },
        ]);
        let rows = scene.slot_rows();
        let map_row = &rows[Category::Map.index()];
        assert!(map_row.cycling);
        assert_eq!(map_row.text, "Buried City");

        scene.handle(&[
            Event::SlotPhaseChanged {
                category: Category::Map,
                phase: SlotPhase::Settled,
            },
            Event::SlotSettled {
                category: Category::Map,
                value: "Spaceport".to_owned(),
            },
        ]);
        let rows = scene.slot_rows();
        let map_row = &rows[Category::Map.index()];
        assert!(!map_row.cycling);
        assert_eq!(map_row.text, "Spaceport");
    }

    #[test]
    fn acknowledgment_reverts_after_its_display_duration() {
        let mut scene = Scene::new(SquadSize::Solo);
        scene.report_copy(true);
        assert!(matches!(
            scene.acknowledgment(),
            Acknowledgment::Copied { .. }
        ));

        scene.handle(&[Event::TimeAdvanced {
            dt: ACKNOWLEDGMENT_DURATION / 2,
        }]);
        assert!(matches!(
            scene.acknowledgment(),
            Acknowledgment::Copied { .. }
        ));

        scene.handle(&[Event::TimeAdvanced {
            dt: ACKNOWLEDGMENT_DURATION,
        }]);
        assert_eq!(scene.acknowledgment(), Acknowledgment::Idle);
    }

    #[test]
    fn failed_copies_surface_the_failure_state() {
        let mut scene = Scene::new(SquadSize::Solo);
        scene.report_copy(false);
        assert!(matches!(
            scene.acknowledgment(),
            Acknowledgment::Failed { .. }
        ));
    }

    #[test]
    fn memory_clipboard_retains_the_last_write() {
        let mut clipboard = MemoryClipboard::default();
        clipboard
            .write("meet at the blue gate")
            .expect("memory clipboard never fails");
        assert_eq!(clipboard.last(), Some("meet at the blue gate"));
    }
}
