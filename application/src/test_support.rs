//! Hand-written port doubles shared by the unit tests.

use crate::manager::{GroupChatManager, ManagerError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::observer::TurnObserver;
use crate::ports::participant::Participant;
use async_trait::async_trait;
use roundtable_domain::{
    BooleanDecision, ChatRequest, ConversationHistory, Decision, HistorySnapshot, Message, Model,
    ParticipantId, ParticipantProfile, ParticipantRegistry, SelectionDecision, SummaryDecision,
    Task,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) fn seeded_history(task: &str) -> ConversationHistory {
    ConversationHistory::new(&Task::new(task).unwrap())
}

pub(crate) fn registry(names: &[&str]) -> ParticipantRegistry {
    ParticipantRegistry::new(
        names
            .iter()
            .map(|n| ParticipantProfile::new(ParticipantId::new(*n).unwrap(), format!("{n}'s perspective")))
            .collect(),
    )
    .unwrap()
}

/// Gateway that replays scripted replies and records every request.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, _model: &Model, request: &ChatRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("script exhausted".into())))
    }
}

/// Participant that replays scripted replies.
pub(crate) struct ScriptedParticipant {
    id: ParticipantId,
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    seen: Mutex<Vec<HistorySnapshot>>,
    cancel_on_generate: Option<CancellationToken>,
}

impl ScriptedParticipant {
    pub(crate) fn new(name: &str, replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            id: ParticipantId::new(name).unwrap(),
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
            cancel_on_generate: None,
        }
    }

    /// Always answers `"{name} speaks"`.
    pub(crate) fn talker(name: &str) -> Self {
        let replies = (0..64).map(|_| Ok(format!("{name} speaks"))).collect();
        Self::new(name, replies)
    }

    /// Cancels `token` while generating, simulating a cancellation that
    /// arrives while the call is in flight.
    pub(crate) fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_generate = Some(token);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn seen(&self) -> Vec<HistorySnapshot> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Participant for ScriptedParticipant {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    fn description(&self) -> &str {
        "scripted participant"
    }

    async fn generate(&self, history: &HistorySnapshot) -> Result<String, GatewayError> {
        self.seen.lock().unwrap().push(history.clone());
        if let Some(token) = &self.cancel_on_generate {
            token.cancel();
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("script exhausted".into())))
    }
}

/// Manager with scripted decisions. Exhausted scripts answer "no" to
/// termination and user input.
pub(crate) struct ScriptedManager {
    terminations: Mutex<VecDeque<bool>>,
    selections: Mutex<VecDeque<String>>,
    user_input: Mutex<VecDeque<bool>>,
    summary: String,
    calls: Mutex<Vec<&'static str>>,
    summarized: Mutex<Vec<HistorySnapshot>>,
}

impl ScriptedManager {
    pub(crate) fn new(terminations: Vec<bool>, selections: Vec<&str>) -> Self {
        Self {
            terminations: Mutex::new(terminations.into()),
            selections: Mutex::new(selections.into_iter().map(String::from).collect()),
            user_input: Mutex::new(VecDeque::new()),
            summary: "Summary of the discussion.".to_string(),
            calls: Mutex::new(Vec::new()),
            summarized: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_user_input(self, answers: Vec<bool>) -> Self {
        *self.user_input.lock().unwrap() = answers.into();
        self
    }

    /// Names of the operations called, in order.
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub(crate) fn summarized(&self) -> Vec<HistorySnapshot> {
        self.summarized.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }
}

#[async_trait]
impl GroupChatManager for ScriptedManager {
    async fn should_request_user_input(
        &self,
        _history: &HistorySnapshot,
    ) -> Result<BooleanDecision, ManagerError> {
        self.record("user_input");
        let value = self.user_input.lock().unwrap().pop_front().unwrap_or(false);
        Ok(Decision::new(value, "scripted"))
    }

    async fn should_terminate(
        &self,
        _history: &HistorySnapshot,
        _topic: &str,
    ) -> Result<BooleanDecision, ManagerError> {
        self.record("terminate");
        let value = self.terminations.lock().unwrap().pop_front().unwrap_or(false);
        let reason = if value { "Consensus reached" } else { "Keep going" };
        Ok(Decision::new(value, reason))
    }

    async fn select_next_agent(
        &self,
        _history: &HistorySnapshot,
        _participants: &ParticipantRegistry,
        _topic: &str,
    ) -> Result<SelectionDecision, ManagerError> {
        self.record("select");
        let name = self
            .selections
            .lock()
            .unwrap()
            .pop_front()
            .expect("selection script exhausted");
        Ok(Decision::new(ParticipantId::new(name).unwrap(), "scripted"))
    }

    async fn filter_results(
        &self,
        history: &HistorySnapshot,
        _topic: &str,
    ) -> Result<SummaryDecision, ManagerError> {
        self.record("filter");
        self.summarized.lock().unwrap().push(history.clone());
        if history.is_empty() {
            return Err(ManagerError::EmptyHistory);
        }
        Ok(Decision::new(
            Message::moderator_summary(history.len() as u64, self.summary.clone()),
            "scripted",
        ))
    }
}

/// Observer that records everything it is told.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    messages: Mutex<Vec<Message>>,
    terminations: Mutex<Vec<BooleanDecision>>,
    selections: Mutex<Vec<SelectionDecision>>,
}

impl RecordingObserver {
    pub(crate) fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn terminations(&self) -> Vec<BooleanDecision> {
        self.terminations.lock().unwrap().clone()
    }

    pub(crate) fn selections(&self) -> Vec<SelectionDecision> {
        self.selections.lock().unwrap().clone()
    }
}

impl TurnObserver for RecordingObserver {
    fn on_message(&self, message: &Message) {
        self.messages.lock().unwrap().push(message.clone());
    }

    fn on_termination_decision(&self, decision: &BooleanDecision) {
        self.terminations.lock().unwrap().push(decision.clone());
    }

    fn on_speaker_selected(&self, decision: &SelectionDecision) {
        self.selections.lock().unwrap().push(decision.clone());
    }
}

/// Conversation logger that keeps events in memory.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.event_type).collect()
    }

    pub(crate) fn events(&self) -> Vec<ConversationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
