//! Run Group Chat use case
//!
//! Drives one moderated discussion from the opening task to the closing
//! summary:
//!
//! ```text
//! seed history with the task
//!   loop:
//!     should_terminate? ──yes──────────────┐
//!     round cap reached? ──yes─────────────┤
//!     select_next_agent                    │
//!     participant.generate → append        │
//!     should_request_user_input → append   │
//!                                          ▼
//!                                   filter_results → summary
//! ```
//!
//! The round cap always wins over a "keep going" decision. With
//! [`CapPrecedence::BeforeEvaluator`] the cap is checked first and the
//! termination query is skipped once it is reached.
//!
//! The use case is the only writer of the [`ConversationHistory`]. Managers,
//! participants and observers receive snapshots or single messages.

mod roster;
mod types;

pub use roster::ParticipantRoster;
pub use types::{GroupChatResult, OrchestrationError, RunGroupChatError, RunGroupChatInput};

use crate::config::ExecutionParams;
use crate::manager::GroupChatManager;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::human_input::HumanInputPort;
use crate::ports::observer::{NoObserver, TurnObserver};
use crate::use_cases::shared::cancellable;
use roundtable_domain::core::string::preview;
use roundtable_domain::{
    Author, CapPrecedence, ConversationHistory, Message, Role, RoundState, RunPhase,
    TerminationReason,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running a group chat
#[derive(Clone)]
pub struct RunGroupChatUseCase {
    manager: Arc<dyn GroupChatManager>,
    params: ExecutionParams,
    observer: Arc<dyn TurnObserver>,
    human_input: Option<Arc<dyn HumanInputPort>>,
    logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunGroupChatUseCase {
    pub fn new(manager: Arc<dyn GroupChatManager>) -> Self {
        Self {
            manager,
            params: ExecutionParams::default(),
            observer: Arc::new(NoObserver),
            human_input: None,
            logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Retry behaviour for participant turns.
    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn TurnObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Attach a channel for human contributions.
    ///
    /// Without one, requests for user input are logged and ignored.
    pub fn with_human_input(mut self, port: Arc<dyn HumanInputPort>) -> Self {
        self.human_input = Some(port);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run the discussion to completion.
    pub async fn execute(
        &self,
        input: RunGroupChatInput,
        roster: &ParticipantRoster,
    ) -> Result<GroupChatResult, RunGroupChatError> {
        info!(
            "Starting group chat on '{}' with {} participants (max {} rounds)",
            input.config.topic(),
            roster.len(),
            input.config.max_rounds()
        );

        let mut history = ConversationHistory::new(&input.task);
        let mut round = RoundState::new(input.config.max_rounds());
        let mut phase = RunPhase::default();

        match self
            .drive(&input, roster, &mut history, &mut round, &mut phase)
            .await
        {
            Ok((summary, reason, termination)) => {
                info!(
                    "Group chat finished after {} rounds: {}",
                    round.round(),
                    termination
                );
                Ok(GroupChatResult {
                    summary,
                    reason,
                    termination,
                    rounds: round.round(),
                    history,
                })
            }
            Err(kind) => {
                // Failed is reachable from every non-terminal phase
                let _ = phase.transition(RunPhase::Failed);
                warn!("Group chat failed in round {}: {}", round.round(), kind);
                self.logger.log(ConversationEvent::new(
                    "run_failed",
                    json!({
                        "round": round.round(),
                        "error": kind.code(),
                        "message": kind.to_string(),
                    }),
                ));
                Err(RunGroupChatError::new(kind, history))
            }
        }
    }

    async fn drive(
        &self,
        input: &RunGroupChatInput,
        roster: &ParticipantRoster,
        history: &mut ConversationHistory,
        round: &mut RoundState,
        phase: &mut RunPhase,
    ) -> Result<(Message, String, TerminationReason), OrchestrationError> {
        let token = &self.cancellation_token;
        let topic = input.config.topic();
        let cap_first = input.config.cap_precedence() == CapPrecedence::BeforeEvaluator;

        let termination = loop {
            let snapshot = history.snapshot();

            if cap_first && round.is_exhausted() {
                break TerminationReason::RoundLimit;
            }

            let decision = cancellable(token, self.manager.should_terminate(&snapshot, topic)).await?;
            self.observer.on_termination_decision(&decision);
            self.logger.log(ConversationEvent::new(
                "termination_decision",
                json!({
                    "round": round.round(),
                    "result": decision.value,
                    "reason": decision.reason,
                }),
            ));
            if decision.value {
                break TerminationReason::Decided(decision.reason);
            }

            if round.is_exhausted() {
                info!("Round limit of {} reached", round.max_rounds());
                break TerminationReason::RoundLimit;
            }

            let selection = cancellable(
                token,
                self.manager
                    .select_next_agent(&snapshot, roster.registry(), topic),
            )
            .await?;
            let Some(participant) = roster.get(&selection.value) else {
                warn!("Moderator selected unknown participant '{}'", selection.value);
                return Err(OrchestrationError::UnknownParticipant {
                    id: selection.value.to_string(),
                    available: roster.names(),
                });
            };
            self.observer.on_speaker_selected(&selection);
            self.logger.log(ConversationEvent::new(
                "speaker_selected",
                json!({
                    "round": round.round(),
                    "participant": selection.value.as_str(),
                    "reason": selection.reason,
                }),
            ));

            let content = cancellable(
                token,
                self.params
                    .retry
                    .run("participant turn", || participant.generate(&snapshot)),
            )
            .await?;

            let message = history
                .append(
                    Role::Assistant,
                    Author::Participant(participant.id().clone()),
                    content,
                )
                .clone();
            let completed = round.advance()?;
            debug!(
                "Round {}/{}: {} said {}",
                completed,
                round.max_rounds(),
                participant.id(),
                preview(message.content(), 80)
            );
            self.observer.on_message(&message);
            self.logger.log(ConversationEvent::new(
                "participant_turn",
                json!({
                    "round": completed,
                    "index": message.index(),
                    "participant": participant.id().as_str(),
                    "content": message.content(),
                }),
            ));

            self.collect_user_input(history).await?;
        };

        phase.transition(RunPhase::Terminating)?;
        let snapshot = history.snapshot();
        let summary = cancellable(token, self.manager.filter_results(&snapshot, topic)).await?;
        phase.transition(RunPhase::Done)?;

        self.logger.log(ConversationEvent::new(
            "summary",
            json!({
                "rounds": round.round(),
                "termination": termination.to_string(),
                "content": summary.value.content(),
                "reason": summary.reason,
            }),
        ));
        Ok((summary.value, summary.reason, termination))
    }

    async fn collect_user_input(
        &self,
        history: &mut ConversationHistory,
    ) -> Result<(), OrchestrationError> {
        let token = &self.cancellation_token;
        let snapshot = history.snapshot();
        let decision = cancellable(token, self.manager.should_request_user_input(&snapshot)).await?;
        if !decision.value {
            return Ok(());
        }

        let Some(port) = &self.human_input else {
            debug!(
                "User input requested but no input channel is attached: {}",
                decision.reason
            );
            return Ok(());
        };

        let Some(text) = cancellable(token, port.request_input(&snapshot)).await? else {
            return Ok(());
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let message = history.append(Role::User, Author::User, text).clone();
        self.observer.on_message(&message);
        self.logger.log(ConversationEvent::new(
            "user_input",
            json!({
                "index": message.index(),
                "content": message.content(),
            }),
        ));
        Ok(())
    }
}
