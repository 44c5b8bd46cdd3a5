//! The interactive two-partner flow.
//!
//! Names, then partner A's answers, then partner B's, then the matches.
//! Input goes through a [`Prompter`] so the flow can be driven without a
//! terminal.

use clap::Parser;
use dialoguer::{Confirm, Input, Select, console::Term, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;
use yesnomaybe::{
    Choice, Item, Partner, Session,
    domain::{Locale, Stage, WalkerState, project},
};

use super::{Workspace, compare, terminal::Colorize, text::Text};

/// What a partner is asked for a single item.
#[derive(Debug, Clone, Copy)]
pub struct Question<'a> {
    pub item: &'a Item,
    pub category: &'a str,
    /// One-based.
    pub position: usize,
    pub total: usize,
}

/// Source of answers for the interactive flow.
pub trait Prompter {
    /// Both partners' names.
    fn names(&mut self) -> anyhow::Result<(String, String)>;

    /// A partner's answer to one question.
    fn choose(&mut self, name: &str, question: Question<'_>, locale: Locale)
    -> anyhow::Result<Choice>;

    /// Called after a partner finishes, before the next one starts.
    fn hand_over(&mut self, to: &str) -> anyhow::Result<()>;

    /// Whether to start a fresh round after the matches are shown.
    fn again(&mut self) -> anyhow::Result<bool>;
}

/// Prompts on the terminal.
pub struct Terminal {
    theme: ColorfulTheme,
    text: Text,
}

impl Terminal {
    fn new(locale: Locale) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            text: Text(locale),
        }
    }

    fn name(&self, prompt: &str) -> anyhow::Result<String> {
        let required = self.text.name_required();
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err(required)
                } else {
                    Ok(())
                }
            })
            .interact_text()?)
    }
}

impl Prompter for Terminal {
    fn names(&mut self) -> anyhow::Result<(String, String)> {
        Ok((self.name("Name 1")?, self.name("Name 2")?))
    }

    fn choose(
        &mut self,
        name: &str,
        question: Question<'_>,
        locale: Locale,
    ) -> anyhow::Result<Choice> {
        let labels: Vec<_> = Choice::ALL
            .iter()
            .map(|choice| {
                let projection = project(Some(*choice), locale);
                projection.label.tone(projection.tone)
            })
            .collect();

        let tier = question
            .item
            .tier()
            .map_or_else(String::new, |tier| format!(" [{tier}]").dim());
        let mut prompt = format!(
            "{name} {}  {}: {}{tier}",
            format!("{}/{}", question.position, question.total).dim(),
            question.category,
            question.item.label(),
        );
        if let Some(reference) = question.item.reference() {
            let line = format!("{}: {reference}", self.text.photo());
            prompt = format!("{prompt}\n  {}", line.dim());
        }

        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(Choice::ALL[index])
    }

    fn hand_over(&mut self, to: &str) -> anyhow::Result<()> {
        Term::stdout().clear_screen()?;
        println!("{}", self.text.hand_over(to).success());
        Confirm::with_theme(&self.theme)
            .with_prompt(self.text.ready(to))
            .default(true)
            .wait_for_newline(true)
            .interact()?;
        Term::stdout().clear_screen()?;
        Ok(())
    }

    fn again(&mut self) -> anyhow::Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(self.text.start_over())
            .default(false)
            .interact()?)
    }
}

#[derive(Debug, Parser, Default)]
#[command(about = "Answer the questionnaire as two partners")]
pub struct Play {
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Play {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = workspace.load_catalog()?;
        let mut session = Session::new(catalog);
        let locale = workspace.locale();
        let mut terminal = Terminal::new(locale);
        self.drive(&mut session, &mut terminal, locale)
    }

    /// Runs rounds until the prompter declines another.
    fn drive(
        &self,
        session: &mut Session,
        prompter: &mut impl Prompter,
        locale: Locale,
    ) -> anyhow::Result<()> {
        loop {
            match session.stage() {
                Stage::Names => {
                    let (a, b) = prompter.names()?;
                    session.set_names(&a, &b)?;
                }
                Stage::Answering(partner) => {
                    self.walk(session, partner, prompter, locale)?;
                    session.advance()?;
                    if partner == Partner::A {
                        prompter.hand_over(session.name(Partner::B))?;
                    }
                }
                Stage::Compare => {
                    let rows = session.comparison();
                    compare::print_table(
                        session.catalog(),
                        &rows,
                        (session.name(Partner::A), session.name(Partner::B)),
                        locale,
                    );
                    if !prompter.again()? {
                        return Ok(());
                    }
                    session.reset();
                }
            }
        }
    }

    fn walk(
        &self,
        session: &mut Session,
        partner: Partner,
        prompter: &mut impl Prompter,
        locale: Locale,
    ) -> anyhow::Result<()> {
        let (answered, total) = session.walker(partner).progress(session.catalog());
        let progress = if self.no_progress {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64).with_style(
                ProgressStyle::with_template("{prefix} {bar:30} {pos}/{len}")?
                    .progress_chars("█▉▊▋▌▍▎▏ "),
            )
        };
        progress.set_prefix(session.name(partner).to_string());
        progress.set_position(answered as u64);

        while let WalkerState::Answering(index) = session.state(partner) {
            let catalog = session.catalog();
            let item = &catalog.items()[index];
            let category = catalog
                .category_at(index)
                .map_or("", |category| category.label);
            let question = Question {
                item,
                category,
                position: session.walker(partner).position(catalog),
                total,
            };

            let name = session.name(partner);
            let choice = progress.suspend(|| prompter.choose(name, question, locale))?;
            let id = item.id().clone();

            session.record_choice(partner, &id, choice)?;
            progress.inc(1);
            tracing::debug!(%partner, %id, %choice, "answered");
        }

        progress.finish_and_clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use yesnomaybe::{Catalog, Category, ItemId, domain::CategoryId};

    use super::*;

    /// Answers from a script, in order.
    #[derive(Default)]
    struct Scripted {
        names: VecDeque<(String, String)>,
        choices: VecDeque<Choice>,
        rounds: VecDeque<bool>,
        asked: Vec<(String, String, usize)>,
        handed_to: Vec<String>,
    }

    impl Prompter for Scripted {
        fn names(&mut self) -> anyhow::Result<(String, String)> {
            self.names
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no names left"))
        }

        fn choose(
            &mut self,
            name: &str,
            question: Question<'_>,
            _locale: Locale,
        ) -> anyhow::Result<Choice> {
            self.asked.push((
                name.to_string(),
                question.item.id().to_string(),
                question.position,
            ));
            self.choices
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no choices left"))
        }

        fn hand_over(&mut self, to: &str) -> anyhow::Result<()> {
            self.handed_to.push(to.to_string());
            Ok(())
        }

        fn again(&mut self) -> anyhow::Result<bool> {
            Ok(self.rounds.pop_front().unwrap_or(false))
        }
    }

    fn catalog(ids: &[&str]) -> Catalog {
        Catalog::new(vec![Category::new(
            CategoryId::new("c").unwrap(),
            "C",
            ids.iter()
                .map(|s| Item::new(ItemId::new(*s).unwrap(), s.to_uppercase()))
                .collect(),
        )])
        .unwrap()
    }

    const fn quiet() -> Play {
        Play { no_progress: true }
    }

    fn names(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn full_round_reaches_compare() {
        let mut session = Session::new(catalog(&["x1", "x2"]));
        let mut script = Scripted {
            names: [names("Alex", "Bo")].into(),
            choices: [Choice::Like, Choice::Dislike, Choice::Try, Choice::Try].into(),
            ..Scripted::default()
        };

        quiet().drive(&mut session, &mut script, Locale::En).unwrap();

        assert_eq!(session.stage(), Stage::Compare);
        assert_eq!(script.handed_to, ["Bo"]);
        assert_eq!(
            script.asked,
            [
                ("Alex".to_string(), "x1".to_string(), 1),
                ("Alex".to_string(), "x2".to_string(), 2),
                ("Bo".to_string(), "x1".to_string(), 1),
                ("Bo".to_string(), "x2".to_string(), 2),
            ]
        );
        let matched: Vec<_> = session.matches().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(matched, ["x1"]);
    }

    #[test]
    fn start_over_resets_the_session() {
        let mut session = Session::new(catalog(&["x1"]));
        let mut script = Scripted {
            names: [names("Alex", "Bo"), names("Cy", "Di")].into(),
            choices: [Choice::Like, Choice::Like, Choice::Dislike, Choice::Like].into(),
            rounds: [true, false].into(),
            ..Scripted::default()
        };

        quiet().drive(&mut session, &mut script, Locale::De).unwrap();

        assert_eq!(session.name(Partner::A), "Cy");
        assert!(session.matches().is_empty());
        assert_eq!(script.handed_to, ["Bo", "Di"]);
    }

    #[test]
    fn empty_catalog_goes_straight_to_compare() {
        let mut session = Session::new(Catalog::default());
        let mut script = Scripted {
            names: [names("Alex", "Bo")].into(),
            ..Scripted::default()
        };

        quiet().drive(&mut session, &mut script, Locale::En).unwrap();

        assert!(script.asked.is_empty());
        assert_eq!(session.stage(), Stage::Compare);
    }

    #[test]
    fn blank_name_is_an_error() {
        let mut session = Session::new(catalog(&["x1"]));
        let mut script = Scripted {
            names: [names("Alex", " ")].into(),
            ..Scripted::default()
        };

        let error = quiet()
            .drive(&mut session, &mut script, Locale::En)
            .unwrap_err();
        assert_eq!(error.to_string(), "partner B needs a name");
    }
}
