use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use raid_roller_core::{Category, Command, Event, SquadSize};
use raid_roller_session::{self as session, query, Session, SessionConfig};

const SEED: u64 = 0x5eed_0042;
const TICK_BUDGET: u32 = 8_000;

#[test]
fn identical_scripts_replay_to_identical_event_streams() {
    let first = replay(SEED, Duration::from_millis(25));
    let second = replay(SEED, Duration::from_millis(25));

    assert_eq!(first.events, second.events, "replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn committed_outcomes_are_independent_of_tick_granularity() {
    let coarse = replay(SEED, Duration::from_millis(40));
    let fine = replay(SEED, Duration::from_millis(10));

    assert_eq!(
        coarse.settled, fine.settled,
        "settled values must not depend on tick slicing"
    );
}

fn replay(seed: u64, dt: Duration) -> ReplayOutcome {
    let mut session = Session::new(SessionConfig::standard(seed));
    let mut events = Vec::new();

    session::apply(
        &mut session,
        Command::SelectSquadSize {
            size: SquadSize::Duo,
        },
        &mut events,
    );
    session::apply(&mut session, Command::RollAll, &mut events);
    run_until_idle(&mut session, dt, &mut events);

    session::apply(
        &mut session,
        Command::Reroll {
            category: Category::Loot,
        },
        &mut events,
    );
    run_until_idle(&mut session, dt, &mut events);

    let view = query::invite_view(&session).expect("idle session exposes results");
    let settled = Category::ALL
        .iter()
        .map(|category| {
            (
                *category,
                view.value(*category)
                    .expect("completed replay settles every category")
                    .to_owned(),
            )
        })
        .collect();

    ReplayOutcome { events, settled }
}

fn run_until_idle(session: &mut Session, dt: Duration, out_events: &mut Vec<Event>) {
    for _ in 0..TICK_BUDGET {
        session::apply(session, Command::Tick { dt }, out_events);
        if !query::is_busy(session) {
            return;
        }
    }
    panic!("roll did not complete within the tick budget");
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    settled: Vec<(Category, String)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.settled.len().hash(&mut hasher);
        for (category, value) in &self.settled {
            category.index().hash(&mut hasher);
            value.hash(&mut hasher);
        }
        hasher.finish()
    }
}
