//! recast-bot - a minimal connector bot.
//!
//! Receives connector messages on `POST /`, analyses text messages and
//! replies with the detected intent.

use std::sync::Arc;

use recast_sdk::adapters::webhook_router;
use recast_sdk::application::{ConnectClient, RequestClient, RequestOptions};
use recast_sdk::config::AppConfig;
use recast_sdk::domain::messaging::{Attachment, Component, InboundMessage};
use recast_sdk::domain::nlp::Analysis;
use recast_sdk::ports::{handler_fn, MessageWriter};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Builds the reply to one inbound message.
async fn answer(client: &RequestClient, message: &InboundMessage) -> Component {
    let Some(text) = message.text() else {
        return Attachment::text("I can only read text for now.").into();
    };

    match client.analyse_text(text, RequestOptions::default()).await {
        Ok(response) => match response.intent() {
            Ok(intent) => Attachment::text(format!(
                "I understood '{}' ({:.0}% sure).",
                intent.slug,
                intent.confidence * 100.0
            ))
            .into(),
            Err(_) => Attachment::text("Sorry, I did not understand.").into(),
        },
        Err(err) => {
            tracing::error!(error = %err, "Analysis failed");
            Attachment::text("Something went wrong on my side.").into()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let requester = Arc::new(config.api.requester()?);
    let request_client = Arc::new(RequestClient::new(
        requester.clone(),
        config.api.client_defaults(),
        config.api.endpoints(),
    ));

    let connect_client = ConnectClient::new(
        requester,
        config.api.client_defaults(),
        config.api.endpoints(),
    )
    .with_handler(handler_fn(
        move |writer: Arc<dyn MessageWriter>, message: InboundMessage| {
            let request_client = Arc::clone(&request_client);
            async move {
                let reply = answer(&request_client, &message).await;
                if let Err(err) = writer.reply(vec![reply]).await {
                    tracing::error!(
                        error = %err,
                        conversation_id = %message.conversation_id(),
                        "Failed to send reply"
                    );
                }
            }
        },
    ));

    let app = webhook_router(Arc::new(connect_client)).layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("recast-bot listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
