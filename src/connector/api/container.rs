use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::{ChatClient, ChatSession, CompleteMessageUseCase};
use crate::connector::http::AppState;
use crate::connector::{HttpTalkClient, MockChatClient, OpenAiChatClient, ProviderConfig};

/// Extra time the chat client waits beyond the provider deadline, so the
/// server's own timeout response arrives before the client gives up.
const CLIENT_GRACE: Duration = Duration::from_secs(5);

pub struct ContainerConfig {
    /// Answer from [`MockChatClient`] instead of calling the provider.
    pub mock_provider: bool,
    pub provider: ProviderConfig,
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let chat_client: Arc<dyn ChatClient> = if config.mock_provider {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            if !config.provider.has_credential() {
                warn!("GROQ_API_KEY is not set; every talk request will fail with a configuration error");
            }
            debug!(
                "Using provider at {} model {}",
                config.provider.base_url, config.provider.model
            );
            Arc::new(OpenAiChatClient::new(config.provider.clone()))
        };

        Self {
            chat_client,
            config,
        }
    }

    /// Build around an existing client, e.g. a scripted one in tests.
    pub fn with_chat_client(config: ContainerConfig, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            config,
        }
    }

    pub fn complete_message_use_case(&self) -> CompleteMessageUseCase {
        CompleteMessageUseCase::new(self.chat_client.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::new(self.complete_message_use_case()))
    }

    pub fn chat_session(&self, url: &str, fallback: bool) -> ChatSession {
        let api = HttpTalkClient::new(url, self.provider_timeout() + CLIENT_GRACE);
        ChatSession::new(Arc::new(api)).with_fallback_replies(fallback)
    }

    pub fn provider_timeout(&self) -> Duration {
        self.config.provider.timeout
    }

    pub fn mock_provider(&self) -> bool {
        self.config.mock_provider
    }
}
