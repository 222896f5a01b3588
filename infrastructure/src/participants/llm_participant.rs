//! A participant that speaks through a chat completion model.

use crate::config::FileParticipantConfig;
use async_trait::async_trait;
use roundtable_application::ports::llm_gateway::{GatewayError, LlmGateway};
use roundtable_application::ports::participant::Participant;
use roundtable_domain::{
    Author, ChatRequest, DomainError, HistorySnapshot, Message, Model, ParticipantId,
    ParticipantProfile, PromptMessage,
};
use std::sync::Arc;
use tracing::debug;

/// A participant with its own persona instructions and model.
///
/// Every turn is one completion request: the persona instructions as the
/// system message, followed by the discussion as this participant sees it.
pub struct LlmParticipant {
    profile: ParticipantProfile,
    instructions: String,
    model: Model,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmParticipant {
    pub fn new(
        profile: ParticipantProfile,
        instructions: impl Into<String>,
        model: Model,
        gateway: Arc<dyn LlmGateway>,
    ) -> Self {
        Self {
            profile,
            instructions: instructions.into(),
            model,
            gateway,
        }
    }

    /// Build from a `[[participants]]` entry.
    pub fn from_config(
        config: &FileParticipantConfig,
        default_model: &Model,
        gateway: Arc<dyn LlmGateway>,
    ) -> Result<Self, DomainError> {
        let id = ParticipantId::new(config.name.as_str())?;
        Ok(Self::new(
            ParticipantProfile::new(id, config.description.clone()),
            config.instructions.clone(),
            config.parse_model(default_model),
            gateway,
        ))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Render one history message from this participant's point of view.
    ///
    /// Its own turns are assistant messages. Everybody else's turns are user
    /// messages tagged with the speaker's name.
    fn perspective(&self, message: &Message) -> PromptMessage {
        match message.author() {
            Author::Participant(id) if id == &self.profile.id => {
                PromptMessage::assistant(message.content())
            }
            Author::Participant(id) => PromptMessage::user(message.content()).with_name(id.as_str()),
            _ => message.to_prompt_message(),
        }
    }

    pub(crate) fn build_request(&self, history: &HistorySnapshot) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if !self.instructions.trim().is_empty() {
            messages.push(PromptMessage::system(self.instructions.as_str()));
        }
        messages.extend(history.messages().iter().map(|m| self.perspective(m)));
        ChatRequest::new(messages)
    }
}

#[async_trait]
impl Participant for LlmParticipant {
    fn id(&self) -> &ParticipantId {
        &self.profile.id
    }

    fn description(&self) -> &str {
        &self.profile.description
    }

    async fn generate(&self, history: &HistorySnapshot) -> Result<String, GatewayError> {
        let request = self.build_request(history);
        debug!(
            "{} is speaking ({}, {} messages)",
            self.profile.id,
            self.model,
            request.messages.len()
        );
        let reply = self.gateway.complete(&self.model, &request).await?;
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ConversationHistory, Role, Task};
    use std::sync::Mutex;

    struct EchoGateway {
        requests: Mutex<Vec<(Model, ChatRequest)>>,
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn complete(&self, model: &Model, request: &ChatRequest) -> Result<String, GatewayError> {
            self.requests
                .lock()
                .unwrap()
                .push((model.clone(), request.clone()));
            Ok("  Land should be taxed lightly.\n".to_string())
        }
    }

    fn farmer(gateway: Arc<EchoGateway>) -> LlmParticipant {
        let config = FileParticipantConfig::new(
            "Farmer",
            "A rural farmer from Southeast Asia.",
            "You're a farmer from Southeast Asia.",
        );
        LlmParticipant::from_config(&config, &Model::Gpt4oMini, gateway).unwrap()
    }

    fn discussion() -> ConversationHistory {
        let mut history = ConversationHistory::new(&Task::new("Please start the discussion.").unwrap());
        history.append(
            Role::Assistant,
            Author::Participant(ParticipantId::new("Farmer").unwrap()),
            "Farms need relief.",
        );
        history.append(
            Role::Assistant,
            Author::Participant(ParticipantId::new("Developer").unwrap()),
            "Tech should pay its share.",
        );
        history
    }

    #[test]
    fn test_request_renders_own_perspective() {
        let gateway = Arc::new(EchoGateway {
            requests: Mutex::new(Vec::new()),
        });
        let request = farmer(gateway).build_request(&discussion().snapshot());
        let messages = request.messages;

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], PromptMessage::system("You're a farmer from Southeast Asia."));
        assert_eq!(messages[1], PromptMessage::user("Please start the discussion."));
        assert_eq!(messages[2], PromptMessage::assistant("Farms need relief."));
        assert_eq!(
            messages[3],
            PromptMessage::user("Tech should pay its share.").with_name("Developer")
        );
    }

    #[tokio::test]
    async fn test_generate_uses_configured_model_and_trims() {
        let gateway = Arc::new(EchoGateway {
            requests: Mutex::new(Vec::new()),
        });
        let participant = farmer(gateway.clone());
        assert_eq!(participant.id(), "Farmer");
        assert_eq!(participant.description(), "A rural farmer from Southeast Asia.");

        let reply = participant.generate(&discussion().snapshot()).await.unwrap();
        assert_eq!(reply, "Land should be taxed lightly.");

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, Model::Gpt4oMini);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let gateway = Arc::new(EchoGateway {
            requests: Mutex::new(Vec::new()),
        });
        let config = FileParticipantConfig::new("Taxi Driver", "", "");
        assert!(LlmParticipant::from_config(&config, &Model::Gpt4o, gateway).is_err());
    }
}
