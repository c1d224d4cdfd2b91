//! Pause suggestion commands for CLI.

use clap::Subcommand;
use juggler_core::SuggestionState;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum SuggestionAction {
    /// Show the current suggestion state
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pause the suggested project
    Accept,
    /// Dismiss the suggestion
    Dismiss {
        /// Also stop suggesting until tomorrow (UTC)
        #[arg(long)]
        today: bool,
    },
    /// Lift a "not today" snooze
    Reset,
}

pub fn run(action: SuggestionAction) -> CliResult {
    let mut session = Session::open()?;
    let store = &mut session.store;

    match action {
        SuggestionAction::Show { json } => {
            if json {
                print_json(store.suggestion())?;
            } else {
                match store.suggestion() {
                    SuggestionState::Idle => println!("No pause suggestion."),
                    SuggestionState::Pending { suggestion } => println!(
                        "Pause '{}' ({}, impact {}) to free {} effort points.",
                        suggestion.project.name,
                        suggestion.project.dna,
                        suggestion.project.impact_score,
                        suggestion.effort_reduction
                    ),
                    SuggestionState::Suppressed { on } => {
                        println!("Suggestions snoozed for {on}.")
                    }
                }
            }
        }
        SuggestionAction::Accept => {
            let accepted = store.accept_pause_suggestion()?;
            let load = store.load();
            println!(
                "Paused '{}'. Load is now {} ({}).",
                accepted.project.name, load.total_effort, load.tier
            );
        }
        SuggestionAction::Dismiss { today } => {
            store.dismiss_pause_suggestion(today)?;
            if today {
                println!("Suggestion dismissed for today.");
            } else {
                println!("Suggestion dismissed.");
            }
        }
        SuggestionAction::Reset => {
            if store.reset_suggestion_suppression() {
                println!("Snooze lifted.");
            } else {
                println!("Suggestions were not snoozed.");
            }
        }
    }

    session.save()
}
