//! Prints the discussion to the terminal as it unfolds

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use roundtable_application::TurnObserver;
use roundtable_domain::{BooleanDecision, Message, SelectionDecision};

/// Observer that prints every turn as `**Name**` followed by its content.
///
/// Moderator decisions go to stderr so that stdout stays a clean transcript.
#[derive(Debug)]
pub struct ConsoleObserver {
    show_decisions: bool,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self {
            show_decisions: true,
        }
    }

    pub fn with_decisions(mut self, show: bool) -> Self {
        self.show_decisions = show;
        self
    }

    pub fn render_termination(decision: &BooleanDecision) -> String {
        let verdict = if decision.value {
            "terminate".green().bold()
        } else {
            "continue".cyan().bold()
        };
        format!("{} {} - {}", "[moderator]".dimmed(), verdict, decision.reason)
    }

    pub fn render_selection(decision: &SelectionDecision) -> String {
        format!(
            "{} next: {} - {}",
            "[moderator]".dimmed(),
            decision.value.as_str().yellow().bold(),
            decision.reason
        )
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnObserver for ConsoleObserver {
    fn on_message(&self, message: &Message) {
        println!("{}\n", ConsoleFormatter::format_message(message));
    }

    fn on_termination_decision(&self, decision: &BooleanDecision) {
        if self.show_decisions {
            eprintln!("{}", Self::render_termination(decision));
        }
    }

    fn on_speaker_selected(&self, decision: &SelectionDecision) {
        if self.show_decisions {
            eprintln!("{}", Self::render_selection(decision));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{Decision, ParticipantId};

    #[test]
    fn test_render_termination() {
        let stop = Decision::new(true, "They agree");
        let rendered = ConsoleObserver::render_termination(&stop);
        assert!(rendered.contains("terminate"));
        assert!(rendered.ends_with("They agree"));

        let go_on = Decision::new(false, "Still debating");
        assert!(ConsoleObserver::render_termination(&go_on).contains("continue"));
    }

    #[test]
    fn test_render_selection() {
        let decision = Decision::new(ParticipantId::new("Farmer").unwrap(), "Rural view needed");
        let rendered = ConsoleObserver::render_selection(&decision);
        assert!(rendered.contains("Farmer"));
        assert!(rendered.contains("Rural view needed"));
    }

    #[test]
    fn test_decisions_shown_by_default() {
        assert!(ConsoleObserver::new().show_decisions);
        assert!(!ConsoleObserver::new().with_decisions(false).show_decisions);
    }
}
