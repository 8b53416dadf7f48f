use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use ondemand_chat::cli::{self, CliCommand};
use ondemand_chat::client::OnDemandClient;
use ondemand_chat::config::{ClientConfig, ConfigManager, ENV_API_KEY, ENV_EXTERNAL_USER_ID};
use ondemand_chat::models::StreamEvent;

/// Load configuration: environment variables win, falling back to the
/// config file, falling back to defaults (which fail validation).
fn load_config() -> ClientConfig {
    if let Some(config) = ClientConfig::from_env() {
        return config;
    }
    match ConfigManager::new() {
        Some(manager) => manager.load(),
        None => ClientConfig::default(),
    }
}

fn print_event(event: StreamEvent) {
    match event {
        StreamEvent::Json(value) => println!("SSE Data: {}", value),
        StreamEvent::Raw(text) => println!("SSE Non-JSON Data: {}", text),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if cli::parse_args(std::env::args()) == CliCommand::Version {
        cli::handle_version_command();
    }

    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config();
    if let Err(err) = config.validate() {
        let path = ConfigManager::new()
            .map(|m| m.config_path().display().to_string())
            .unwrap_or_else(|| "the config file".to_string());
        tracing::warn!(
            "{}; set {} and {} or edit {}",
            err,
            ENV_API_KEY,
            ENV_EXTERNAL_USER_ID,
            path
        );
        return Ok(());
    }

    let client = OnDemandClient::new(config);

    let session_id = match client.create_session().await {
        Ok(id) => {
            println!("Chat session created. Session ID: {}", id);
            id
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to create chat session, cannot submit queries");
            return Ok(());
        }
    };

    println!("\n--- Testing Sync Mode ---");
    let sync_query = "What is the capital of France in sync mode?";
    match client.submit_query_sync(&session_id, sync_query).await {
        Ok(body) => {
            println!("Sync Response Data:");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(err) => tracing::error!(error = %err, "sync query failed"),
    }

    println!("\n--- Testing Stream Mode ---");
    let stream_query = "Tell me a very short story in stream mode, one sentence at a time.";
    println!("Streaming response:");
    match client
        .submit_query_stream(&session_id, stream_query, print_event)
        .await
    {
        Ok(status) => println!("\nStream processing status: {}", status),
        Err(err) => tracing::error!(error = %err, "stream query failed"),
    }

    Ok(())
}
