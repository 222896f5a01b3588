//! Console output formatter for discussion results

use colored::Colorize;
use roundtable_application::GroupChatResult;
use roundtable_domain::{Message, TerminationReason};
use serde::Serialize;

/// Machine-readable summary of a finished discussion
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub topic: &'a str,
    pub task: &'a str,
    pub termination: &'a TerminationReason,
    pub rounds: usize,
    pub summary: SummaryReport<'a>,
    pub transcript: &'a [Message],
}

#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub content: &'a str,
    pub reason: &'a str,
}

impl<'a> RunReport<'a> {
    pub fn new(topic: &'a str, result: &'a GroupChatResult) -> Self {
        let transcript = result.history.messages();
        Self {
            topic,
            task: transcript.first().map(Message::content).unwrap_or_default(),
            termination: &result.termination,
            rounds: result.rounds,
            summary: SummaryReport {
                content: result.summary.content(),
                reason: &result.reason,
            },
            transcript,
        }
    }
}

/// Formats discussion results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result: transcript, how it ended, and the summary
    pub fn format(topic: &str, result: &GroupChatResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Discussion"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));
        output.push_str(&format!(
            "{} {}\n",
            "Rounds:".cyan().bold(),
            result.rounds
        ));

        output.push_str(&Self::section_header("Transcript"));
        for message in result.history.messages() {
            output.push('\n');
            output.push_str(&Self::format_message(message));
            output.push('\n');
        }

        output.push_str(&Self::section_header("Outcome"));
        output.push_str(&format!(
            "\n{} {}\n",
            "Ended:".cyan().bold(),
            Self::format_termination(&result.termination)
        ));

        output.push_str(&format!(
            "\n{}\n{}\n",
            "Summary".yellow().bold(),
            result.summary.content()
        ));
        if !result.reason.is_empty() {
            output.push_str(&format!("\n{} {}\n", "Why:".dimmed(), result.reason));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(topic: &str, result: &GroupChatResult) -> String {
        serde_json::to_string_pretty(&RunReport::new(topic, result))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(topic: &str, result: &GroupChatResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Summary ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n", "Topic:".bold(), topic));
        output.push_str(&format!(
            "{} {} after {} round(s)\n\n",
            "Ended:".dimmed(),
            Self::format_termination(&result.termination),
            result.rounds
        ));

        output.push_str(result.summary.content());
        output.push('\n');

        output
    }

    /// A single turn, as `**Name**` followed by what was said
    pub fn format_message(message: &Message) -> String {
        format!(
            "{}\n{}",
            format!("**{}**", message.author().display_name()).bold(),
            message.content()
        )
    }

    fn format_termination(reason: &TerminationReason) -> String {
        match reason {
            TerminationReason::RoundLimit => reason.to_string().yellow().to_string(),
            TerminationReason::Decided(text) => text.green().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
