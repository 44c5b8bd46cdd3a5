//! One round of the questionnaire for two partners.
//!
//! The [`Session`] owns the catalog and both partners' walkers. It is the
//! only place either partner's answers are mutated, and it is passed by
//! reference to whatever drives the flow.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Catalog, Choice, Item, ItemId, MatchRow, Walker, WalkerState,
    matches::{compute_matches, match_rows},
    walker::InvalidItem,
};

/// One of the two partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Partner {
    /// Answers first.
    A,
    /// Answers second.
    B,
}

impl Partner {
    /// Both partners, in answering order.
    pub const BOTH: [Self; 2] = [Self::A, Self::B];
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Where the session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Waiting for both partners' names.
    Names,
    /// A partner is answering.
    Answering(Partner),
    /// Both partners are done; matches can be shown.
    Compare,
}

/// Errors returned by [`Session`] operations.
///
/// None of these leave the session in a different state than before the
/// call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The item is not in the session's catalog.
    #[error(transparent)]
    InvalidItem(#[from] InvalidItem),
    /// A partner name was empty or whitespace.
    #[error("partner {0} needs a name")]
    BlankName(Partner),
    /// The active partner has unanswered items.
    #[error("partner {partner} has answered {answered} of {total} items")]
    Incomplete {
        /// The partner who is not done.
        partner: Partner,
        /// Items answered so far.
        answered: usize,
        /// Items in the catalog.
        total: usize,
    },
    /// The operation is not available at this stage.
    #[error("cannot {action} while at stage {stage:?}")]
    WrongStage {
        /// What was attempted.
        action: &'static str,
        /// The stage the session is at.
        stage: Stage,
    },
}

/// Two partners answering the same catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    names: Option<(String, String)>,
    a: Walker,
    b: Walker,
    stage: Stage,
}

impl Session {
    /// Starts a session over `catalog`, waiting for names.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        if catalog.is_empty() {
            tracing::warn!("catalog has no items; every partner starts complete");
        }
        Self {
            catalog,
            names: None,
            a: Walker::new(),
            b: Walker::new(),
            stage: Stage::Names,
        }
    }

    /// The catalog being answered.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Sets both partners' names and starts partner A's turn.
    ///
    /// Names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BlankName`] if either name is blank and
    /// [`SessionError::WrongStage`] if names were already set.
    pub fn set_names(&mut self, a: &str, b: &str) -> Result<(), SessionError> {
        if self.stage != Stage::Names {
            return Err(SessionError::WrongStage {
                action: "set names",
                stage: self.stage,
            });
        }
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() {
            return Err(SessionError::BlankName(Partner::A));
        }
        if b.is_empty() {
            return Err(SessionError::BlankName(Partner::B));
        }
        self.names = Some((a.to_string(), b.to_string()));
        self.stage = Stage::Answering(Partner::A);
        Ok(())
    }

    /// The partner's name, or `"A"`/`"B"` when names are not set.
    #[must_use]
    pub fn name(&self, partner: Partner) -> &str {
        match (&self.names, partner) {
            (Some((a, _)), Partner::A) => a,
            (Some((_, b)), Partner::B) => b,
            (None, Partner::A) => "A",
            (None, Partner::B) => "B",
        }
    }

    /// The partner's walker.
    #[must_use]
    pub const fn walker(&self, partner: Partner) -> &Walker {
        match partner {
            Partner::A => &self.a,
            Partner::B => &self.b,
        }
    }

    const fn walker_mut(&mut self, partner: Partner) -> &mut Walker {
        match partner {
            Partner::A => &mut self.a,
            Partner::B => &mut self.b,
        }
    }

    /// Records a partner's choice for an item.
    ///
    /// Only the partner whose turn it is can record. Overwriting an earlier
    /// answer is allowed until the turn ends.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongStage`] outside of the partner's turn and
    /// [`SessionError::InvalidItem`] if the item is not in the catalog. In
    /// both cases nothing is recorded.
    #[instrument(level = "debug", skip(self))]
    pub fn record_choice(
        &mut self,
        partner: Partner,
        id: &ItemId,
        choice: Choice,
    ) -> Result<WalkerState, SessionError> {
        if self.stage != Stage::Answering(partner) {
            return Err(SessionError::WrongStage {
                action: "record a choice",
                stage: self.stage,
            });
        }
        let Self { catalog, a, b, .. } = self;
        let walker = match partner {
            Partner::A => a,
            Partner::B => b,
        };
        Ok(walker.record(catalog, id, choice)?)
    }

    /// The item the partner should answer next.
    #[must_use]
    pub fn current_item(&self, partner: Partner) -> Option<&Item> {
        self.walker(partner).current(&self.catalog)
    }

    /// Whether the partner has answered every item.
    #[must_use]
    pub fn is_complete(&self, partner: Partner) -> bool {
        self.walker(partner).is_complete(&self.catalog)
    }

    /// The partner's walker state.
    #[must_use]
    pub fn state(&self, partner: Partner) -> WalkerState {
        self.walker(partner).state(&self.catalog)
    }

    /// Moves past the active partner's turn.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Incomplete`] if the active partner still has
    /// unanswered items, and [`SessionError::WrongStage`] outside of a turn.
    pub fn advance(&mut self) -> Result<Stage, SessionError> {
        let Stage::Answering(partner) = self.stage else {
            return Err(SessionError::WrongStage {
                action: "advance",
                stage: self.stage,
            });
        };

        if !self.is_complete(partner) {
            let (answered, total) = self.walker(partner).progress(&self.catalog);
            return Err(SessionError::Incomplete {
                partner,
                answered,
                total,
            });
        }

        self.stage = match partner {
            Partner::A => Stage::Answering(Partner::B),
            Partner::B => Stage::Compare,
        };
        tracing::debug!(stage = ?self.stage, "advanced");
        Ok(self.stage)
    }

    /// Items both partners answered positively, in catalog order.
    #[must_use]
    pub fn matches(&self) -> Vec<&Item> {
        compute_matches(self.catalog.items(), self.a.answers(), self.b.answers())
    }

    /// Matches with both partners' choices attached.
    #[must_use]
    pub fn comparison(&self) -> Vec<MatchRow<'_>> {
        match_rows(self.catalog.items(), self.a.answers(), self.b.answers())
    }

    /// Discards names and all answers and returns to the start.
    pub fn reset(&mut self) {
        self.names = None;
        for partner in Partner::BOTH {
            self.walker_mut(partner).reset();
        }
        self.stage = Stage::Names;
        tracing::debug!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryId};

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn catalog(ids: &[&str]) -> Catalog {
        Catalog::new(vec![Category::new(
            CategoryId::new("c").unwrap(),
            "C",
            ids.iter()
                .map(|s| Item::new(id(s), s.to_uppercase()))
                .collect(),
        )])
        .unwrap()
    }

    /// A session with names set, at partner A's turn.
    fn started(ids: &[&str]) -> Session {
        let mut session = Session::new(catalog(ids));
        session.set_names("Alex", "Bo").unwrap();
        session
    }

    /// Answers the active partner's remaining items in order, then advances.
    fn finish_turn(session: &mut Session, choices: &[Choice]) {
        let Stage::Answering(partner) = session.stage() else {
            panic!("not in a turn: {:?}", session.stage());
        };
        for choice in choices {
            let id = session.current_item(partner).unwrap().id().clone();
            session.record_choice(partner, &id, *choice).unwrap();
        }
        session.advance().unwrap();
    }

    fn matched_ids(session: &Session) -> Vec<&str> {
        session
            .matches()
            .iter()
            .map(|item| item.id().as_str())
            .collect()
    }

    #[test]
    fn like_and_try_match() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);
        finish_turn(&mut session, &[Choice::Try]);
        assert_eq!(matched_ids(&session), ["x1"]);
    }

    #[test]
    fn like_and_dislike_do_not_match() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);
        finish_turn(&mut session, &[Choice::Dislike]);
        assert!(session.matches().is_empty());
    }

    #[test]
    fn last_write_wins_within_a_turn() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);

        session.record_choice(Partner::B, &id("x1"), Choice::Like).unwrap();
        assert_eq!(matched_ids(&session), ["x1"]);

        assert_eq!(
            session.record_choice(Partner::B, &id("x1"), Choice::Dislike),
            Ok(WalkerState::Complete)
        );
        assert!(session.matches().is_empty());
        session.advance().unwrap();
        assert!(session.matches().is_empty());
    }

    #[test]
    fn partners_do_not_share_answers() {
        let mut session = started(&["x1", "x2"]);
        session.record_choice(Partner::A, &id("x1"), Choice::Like).unwrap();

        assert_eq!(session.current_item(Partner::A).unwrap().id(), &id("x2"));
        assert_eq!(session.current_item(Partner::B).unwrap().id(), &id("x1"));
        assert!(session.walker(Partner::B).answers().is_empty());
    }

    #[test]
    fn other_partner_cannot_record_during_a_turn() {
        let mut session = started(&["x1"]);

        let error = session
            .record_choice(Partner::B, &id("x1"), Choice::Like)
            .unwrap_err();

        assert!(matches!(
            error,
            SessionError::WrongStage {
                stage: Stage::Answering(Partner::A),
                ..
            }
        ));
        assert!(session.walker(Partner::B).answers().is_empty());
    }

    #[test]
    fn finished_partner_cannot_record() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);

        assert!(
            session
                .record_choice(Partner::A, &id("x1"), Choice::Dislike)
                .is_err()
        );
        assert_eq!(
            session.walker(Partner::A).answers().get(&id("x1")),
            Some(Choice::Like)
        );
    }

    #[test]
    fn answers_are_frozen_at_compare() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);
        finish_turn(&mut session, &[Choice::Like]);
        assert_eq!(session.stage(), Stage::Compare);

        for partner in Partner::BOTH {
            let error = session
                .record_choice(partner, &id("x1"), Choice::Dislike)
                .unwrap_err();
            assert_eq!(
                error,
                SessionError::WrongStage {
                    action: "record a choice",
                    stage: Stage::Compare,
                }
            );
        }
        assert_eq!(matched_ids(&session), ["x1"]);
    }

    #[test]
    fn recording_before_names_is_rejected() {
        let mut session = Session::new(catalog(&["x1"]));
        assert!(matches!(
            session.record_choice(Partner::A, &id("x1"), Choice::Like),
            Err(SessionError::WrongStage {
                stage: Stage::Names,
                ..
            })
        ));
    }

    #[test]
    fn invalid_item_leaves_current_item() {
        let mut session = started(&["x1"]);
        let error = session
            .record_choice(Partner::A, &id("nope"), Choice::Like)
            .unwrap_err();

        assert_eq!(error, SessionError::InvalidItem(InvalidItem(id("nope"))));
        assert_eq!(session.current_item(Partner::A).unwrap().id(), &id("x1"));
    }

    #[test]
    fn empty_catalog_is_complete_with_no_matches() {
        let mut session = Session::new(Catalog::default());
        for partner in Partner::BOTH {
            assert!(session.is_complete(partner));
            assert!(session.current_item(partner).is_none());
        }
        session.set_names("Alex", "Bo").unwrap();
        finish_turn(&mut session, &[]);
        finish_turn(&mut session, &[]);
        assert_eq!(session.stage(), Stage::Compare);
        assert!(session.matches().is_empty());
    }

    #[test]
    fn stages_follow_the_flow() {
        let mut session = Session::new(catalog(&["x1"]));
        assert_eq!(session.stage(), Stage::Names);
        assert_eq!(session.name(Partner::A), "A");

        assert_eq!(
            session.set_names("  ", "Bo"),
            Err(SessionError::BlankName(Partner::A))
        );
        session.set_names(" Alex ", "Bo").unwrap();
        assert_eq!(session.name(Partner::A), "Alex");
        assert_eq!(session.stage(), Stage::Answering(Partner::A));

        assert_eq!(
            session.advance(),
            Err(SessionError::Incomplete {
                partner: Partner::A,
                answered: 0,
                total: 1,
            })
        );

        session.record_choice(Partner::A, &id("x1"), Choice::Like).unwrap();
        assert_eq!(session.advance(), Ok(Stage::Answering(Partner::B)));
        session.record_choice(Partner::B, &id("x1"), Choice::Like).unwrap();
        assert_eq!(session.advance(), Ok(Stage::Compare));

        assert!(matches!(
            session.advance(),
            Err(SessionError::WrongStage { .. })
        ));
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = started(&["x1"]);
        finish_turn(&mut session, &[Choice::Like]);
        finish_turn(&mut session, &[Choice::Like]);

        session.reset();

        assert_eq!(session.stage(), Stage::Names);
        assert_eq!(session.name(Partner::B), "B");
        for partner in Partner::BOTH {
            assert!(session.walker(partner).answers().is_empty());
            assert!(!session.is_complete(partner));
            assert_eq!(session.state(partner), WalkerState::Answering(0));
        }
        assert!(session.matches().is_empty());
    }

    #[test]
    fn comparison_lists_both_choices() {
        let mut session = started(&["x1", "x2"]);
        finish_turn(&mut session, &[Choice::Try, Choice::Like]);
        finish_turn(&mut session, &[Choice::Like, Choice::Dislike]);

        let rows = session.comparison();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item.id(), &id("x1"));
        assert_eq!(rows[0].a, Choice::Try);
        assert_eq!(rows[0].b, Choice::Like);
    }
}
