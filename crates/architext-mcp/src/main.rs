mod server;

use std::sync::Arc;

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use architext_core::{
    ai_configured, read_settings, read_stored_settings, write_settings, AiSettings, FileStore,
};
use architext_generate::{LlmInvoker, ModelInvoker};

use crate::server::ArchitextServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Handle `architext-mcp configure <provider> <model> [api-key]`
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("configure") {
        return configure(&args[1..]);
    }

    let settings = read_settings();
    if !ai_configured(&settings) {
        tracing::warn!(
            "no model provider configured; run `architext-mcp configure` or set ARCHITEXT_PROVIDER, ARCHITEXT_MODEL and ARCHITEXT_API_KEY"
        );
    }
    let model = LlmInvoker::new(settings);
    let store = FileStore::open_default();
    tracing::info!(model = %model.describe(), designs = %store.path().display(), "starting ArchiText MCP server");

    let service = ArchitextServer::new(Arc::new(model), Arc::new(store))
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!("MCP server error: {}", e))?;
    service.waiting().await?;
    Ok(())
}

/// Write the provider settings to ~/.architext/settings.json.
fn configure(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(settings) = configured(read_stored_settings(), args) else {
        eprintln!("Usage: architext-mcp configure <provider> <model> [api-key]");
        eprintln!("Providers: openai, anthropic, google, ollama, groq, mistral, deepseek");
        std::process::exit(2);
    };
    write_settings(&settings)?;
    if ai_configured(&settings) {
        eprintln!("Saved {} ({}) settings.", settings.provider, settings.model);
    } else {
        eprintln!(
            "Saved settings, but provider '{}' needs an API key before designs can be generated.",
            settings.provider
        );
    }
    Ok(())
}

/// Apply `<provider> <model> [api-key]` over the stored settings. Fields the
/// command does not set, like the request timeout, are kept.
fn configured(stored: AiSettings, args: &[String]) -> Option<AiSettings> {
    let [provider, model, rest @ ..] = args else {
        return None;
    };
    Some(AiSettings {
        provider: provider.clone(),
        model: model.clone(),
        api_key: rest.first().cloned().unwrap_or_default(),
        ..stored
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn configure_keeps_the_stored_timeout() {
        let stored = AiSettings {
            provider: "openai".to_string(),
            api_key: "sk-old".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: Some(90),
        };
        let settings = configured(stored, &args(&["anthropic", "claude-sonnet", "sk-new"])).unwrap();
        assert_eq!(settings.provider, "anthropic");
        assert_eq!(settings.model, "claude-sonnet");
        assert_eq!(settings.api_key, "sk-new");
        assert_eq!(settings.timeout_secs, Some(90));
    }

    #[test]
    fn configure_needs_provider_and_model() {
        assert!(configured(AiSettings::default(), &args(&["ollama"])).is_none());
        let settings = configured(AiSettings::default(), &args(&["ollama", "llama3"])).unwrap();
        assert!(settings.api_key.is_empty());
        assert!(ai_configured(&settings));
    }
}
