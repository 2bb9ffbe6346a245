#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure invite message composition over settled roll results.

use raid_roller_core::{Category, NORMAL_CONDITION};
use raid_roller_session::query::ResultsView;
use thiserror::Error;

/// Greeting that opens every invite message.
const INVITE_GREETING: &str = "Hey, Raider - want to team up?";

/// Errors raised while composing the invite message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A category still holds the unrolled sentinel; the composer fails
    /// closed rather than rendering a partial message.
    #[error("category {0:?} has not been rolled")]
    MissingResult(Category),
}

/// Renders the settled results into the shareable invite message.
///
/// Fails closed with [`ComposeError::MissingResult`] if any category has
/// never settled. Mid-roll refusal is handled upstream: the only live source
/// of a [`ResultsView`] is `query::invite_view`, which returns `None` while
/// anything is cycling.
pub fn compose_invite(results: &ResultsView) -> Result<String, ComposeError> {
    let map = require(results, Category::Map)?;
    let condition = require(results, Category::MapCondition)?;
    let loot = require(results, Category::Loot)?;
    let style = require(results, Category::Style)?;
    let code_word = require(results, Category::CodeWord)?;

    let destination = destination_phrase(map, condition);
    let loot = loot_phrase(loot);
    let style = style_phrase(style);
    Ok(format!(
        "{INVITE_GREETING} We are heading to {destination}, {loot} and {style}. \
         Code word for this run is {code_word}."
    ))
}

fn require<'a>(results: &'a ResultsView, category: Category) -> Result<&'a str, ComposeError> {
    results
        .value(category)
        .ok_or(ComposeError::MissingResult(category))
}

fn destination_phrase(map: &str, condition: &str) -> String {
    if condition == NORMAL_CONDITION {
        map.to_owned()
    } else {
        format!("{map} ({condition})")
    }
}

fn loot_phrase(value: &str) -> String {
    if value == "No Loot" {
        "for No Loot".to_owned()
    } else {
        format!("for a {value}")
    }
}

fn style_phrase(value: &str) -> String {
    match value {
        "Lone Wolf" => "we will go Lone Wolf".to_owned(),
        "Lone Wolves" => "we will be Lone Wolves".to_owned(),
        "Decepticon" => "we will play Decepticon".to_owned(),
        other => format!("we will {other}"),
    }
}

#[cfg(test)]
mod tests {
    use raid_roller_core::Category;
    use raid_roller_session::query::ResultsView;

    use super::{compose_invite, loot_phrase, style_phrase, ComposeError};

    fn view(entries: &[(Category, &str)]) -> ResultsView {
        ResultsView::from_entries(
            entries
                .iter()
                .map(|(category, value)| (*category, (*value).to_owned())),
        )
    }

    fn complete_view() -> ResultsView {
        view(&[
            (Category::Map, "Spaceport"),
            (Category::MapCondition, "Normal"),
            (Category::Loot, "No Loot"),
            (Category::Style, "Lone Wolves"),
            (Category::CodeWord, "Banana Protocol"),
        ])
    }

    #[test]
    fn composes_the_duo_invite_message() {
        let message = compose_invite(&complete_view()).expect("complete view composes");
        assert_eq!(
            message,
            "Hey, Raider - want to team up? We are heading to Spaceport, for No Loot \
             and we will be Lone Wolves. Code word for this run is Banana Protocol."
        );
    }

    #[test]
    fn non_normal_condition_is_appended_after_the_map() {
        let results = view(&[
            (Category::Map, "Buried City"),
            (Category::MapCondition, "Night"),
            (Category::Loot, "Standard Run"),
            (Category::Style, "Buddy Up"),
            (Category::CodeWord, "Flapjack"),
        ]);
        let message = compose_invite(&results).expect("complete view composes");
        assert!(message.contains("We are heading to Buried City (Night),"));
    }

    #[test]
    fn loot_goblin_renders_with_an_article() {
        assert_eq!(loot_phrase("Loot Goblin"), "for a Loot Goblin");
    }

    #[test]
    fn no_loot_renders_without_an_article() {
        assert_eq!(loot_phrase("No Loot"), "for No Loot");
    }

    #[test]
    fn style_without_an_override_uses_the_generic_phrasing() {
        assert_eq!(style_phrase("Kill on Sight"), "we will Kill on Sight");
    }

    #[test]
    fn style_overrides_apply_to_exact_values() {
        assert_eq!(style_phrase("Lone Wolf"), "we will go Lone Wolf");
        assert_eq!(style_phrase("Lone Wolves"), "we will be Lone Wolves");
        assert_eq!(style_phrase("Decepticon"), "we will play Decepticon");
    }

    #[test]
    fn refuses_to_compose_with_an_unrolled_category() {
        let results = view(&[
            (Category::Map, "Spaceport"),
            (Category::MapCondition, "Normal"),
            (Category::Loot, "No Loot"),
            (Category::Style, "Lone Wolves"),
        ]);
        assert_eq!(
            compose_invite(&results),
            Err(ComposeError::MissingResult(Category::CodeWord))
        );
    }
}
