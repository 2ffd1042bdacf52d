use std::sync::Arc;

use anyhow::Result;
use pagegist_common::observability::{LogConfig, init_logging};
use pagegist_config::{ConfigError, PagegistConfig, PagegistConfigLoader};
use pagegist_http::HttpClient;
use pagegist_llm::OpenRouterClient;
use pagegist_tui::{Pipeline, ShutdownHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // .env first, so the loader's environment pass sees it.
    dotenv::dotenv().ok();

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Nothing useful can run without a credential; say why and stop
            // before the terminal is put into raw mode.
            eprintln!("pagegist: {e}");
            std::process::exit(1);
        }
    };

    let log_path = init_logging(LogConfig {
        log_dir: cfg.log.dir.clone(),
        emit_stderr: cfg.log.stderr,
        ..LogConfig::default()
    })?;

    tracing::info!(
        model = %cfg.llm.model,
        base_url = %cfg.llm.base_url,
        log = %log_path.display(),
        "pagegist.start"
    );

    let summarizer = Arc::new(OpenRouterClient::new(
        &cfg.llm.base_url,
        cfg.llm.api_key.clone(),
        cfg.llm.model.clone(),
    )?);
    let http = HttpClient::new(&cfg.llm.base_url)?;
    let pipeline = Pipeline::new(http, summarizer);

    pagegist_tui::run(pipeline, ShutdownHandle::new()).await?;

    tracing::info!("pagegist.stop");
    Ok(())
}

fn load_config() -> Result<PagegistConfig, ConfigError> {
    let path = std::env::var("PAGEGIST_CONFIG").unwrap_or_else(|_| "pagegist.toml".into());
    PagegistConfigLoader::new().with_file(path).load()
}
