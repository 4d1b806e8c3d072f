use std::sync::Arc;

use anyhow::Context;
use strategic_analyst::adapters::{ChatClient, ChatClientConfig, OpenRouterTransport};
use strategic_analyst::config::AppConfig;
use strategic_analyst::domain::session::AnalystSession;

use crate::cli::Commands;

pub mod analyze;
pub mod chat;
pub mod check;

pub type Client = ChatClient<OpenRouterTransport>;

/// Shared state for one CLI invocation.
pub struct AppContext {
    pub config: AppConfig,
    pub client: Arc<Client>,
}

impl AppContext {
    /// Loads configuration and builds the HTTP client.
    pub fn init(api_key: Option<String>) -> anyhow::Result<Self> {
        let config = AppConfig::load_validated(api_key).context("failed to load configuration")?;

        let transport = OpenRouterTransport::new().context("failed to build HTTP client")?;
        let client = ChatClient::new(transport, ChatClientConfig::from_ai_config(&config.ai));

        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Fresh session seeded from configuration.
    pub fn session(&self) -> AnalystSession {
        AnalystSession::new()
            .with_credential(self.config.ai.api_key.clone())
            .with_model(self.config.ai.model.clone())
            .with_short_mode(self.config.consultant.short_mode)
    }

    pub fn base_url(&self) -> &str {
        &self.config.ai.base_url
    }
}

pub async fn dispatch(command: Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Check => check::handle(ctx).await,
        Commands::Analyze(args) => analyze::handle(&args, ctx).await,
        Commands::Chat(args) => chat::handle(&args, ctx).await,
    }
}
