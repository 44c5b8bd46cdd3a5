use serde::Serialize;

use crate::domain::{Answers, Choice, Item};

/// Items both partners answered positively, in catalog order.
///
/// `dislike` and unanswered are both negative. Answers for ids that are not
/// in `items` are ignored. The result does not depend on which partner is
/// passed first.
#[must_use]
pub fn compute_matches<'a>(items: &'a [Item], a: &Answers, b: &Answers) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| is_positive(a, item) && is_positive(b, item))
        .collect()
}

fn is_positive(answers: &Answers, item: &Item) -> bool {
    answers.get(item.id()).is_some_and(Choice::is_positive)
}

/// A matched item together with what each partner chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchRow<'a> {
    /// The matched item.
    pub item: &'a Item,
    /// Partner A's choice.
    pub a: Choice,
    /// Partner B's choice.
    pub b: Choice,
}

/// Like [`compute_matches`], with both partners' choices attached.
#[must_use]
pub fn match_rows<'a>(items: &'a [Item], a: &Answers, b: &Answers) -> Vec<MatchRow<'a>> {
    items
        .iter()
        .filter_map(|item| {
            let choice_a = a.get(item.id()).filter(|c| c.is_positive())?;
            let choice_b = b.get(item.id()).filter(|c| c.is_positive())?;
            Some(MatchRow {
                item,
                a: choice_a,
                b: choice_b,
            })
        })
        .collect()
}
