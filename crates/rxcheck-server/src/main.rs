use std::sync::Arc;

use anyhow::Context;
use rxcheck_core::{Analyzer, Datasets, NameMatcher};
use rxcheck_llm::{OllamaClient, OllamaVisionOcr};
use rxcheck_server::{config::APP_VERSION, AppState, ServerConfig};

// The generation clients use blocking HTTP, so they are created here and
// outlive the runtime rather than being dropped inside it.
fn main() -> anyhow::Result<()> {
    rxcheck_server::init_tracing();
    tracing::info!("rxcheck starting v{}", APP_VERSION);

    let config = ServerConfig::from_env()?;

    let datasets = Datasets::load(&config.interactions_csv, &config.dosage_csv)
        .context("failed to load datasets")?;

    let client = Arc::new(
        OllamaClient::new(&config.llm_url, &config.llm_model, config.llm_timeout_secs)
            .context("failed to build generation client")?
            .with_api_token(config.api_token.clone()),
    );
    tracing::info!(
        url = %config.llm_url,
        model = %config.llm_model,
        ocr_model = %config.ocr_model,
        "generation service configured"
    );

    let ocr = OllamaVisionOcr::new(client.clone(), config.ocr_model.clone());
    let analyzer = Analyzer::new(Arc::new(datasets), client.clone())
        .with_matcher(NameMatcher::with_threshold(config.match_threshold));
    let state = AppState::new(analyzer, Arc::new(ocr));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(rxcheck_server::serve(config.bind, state))?;
    drop(runtime);

    drop(client);
    tracing::info!("rxcheck stopped");
    Ok(())
}
