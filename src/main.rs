use anyhow::{Context, Result};
use ragbot::{
    api,
    cli::{output::Output, Cli, Commands},
    db::KnowledgeBase,
    feedback::{FeedbackStore, JsonlFeedbackStore, LoggingFeedbackStore},
    llm::ChatCompletionsClient,
    rag::{embeddings::Embedder, extract::PdfTextExtractor, RagPipeline},
    utils::{config::Config, logging::init_tracing},
    AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let (config, source) = Config::load(&cli.config, cli.config_is_explicit())
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config.server, cli.verbose);
    tracing::debug!(source = %source, "Configuration loaded");

    let command = cli.command.unwrap_or(Commands::Serve);
    if command == Commands::Serve {
        output.banner();
    }

    let config = Arc::new(config);

    match command {
        Commands::Serve => {
            let pipeline = Arc::new(build_pipeline(&config).await?);
            serve(config, pipeline, output).await
        }
        Commands::Ingest { path } => {
            let outcome = build_pipeline(&config)
                .await?
                .ingest_file(&path)
                .await
                .with_context(|| format!("ingesting {}", path.display()))?;
            output.indexed(&outcome);
            Ok(())
        }
        Commands::Query { text } => {
            let response = build_pipeline(&config)
                .await?
                .query(&text)
                .await
                .context("answering query")?;
            output.answer(&response);
            Ok(())
        }
        // Counters only need the snapshot, not the embedding model
        Commands::Stats => {
            let knowledge_base = open_knowledge_base(&config).await?;
            output.stats(&knowledge_base.stats().await);
            Ok(())
        }
    }
}

async fn open_knowledge_base(config: &Config) -> Result<KnowledgeBase> {
    KnowledgeBase::from_config(&config.rag)
        .await
        .with_context(|| {
            format!(
                "opening knowledge base at {}",
                config.rag.snapshot_path.display()
            )
        })
}

async fn build_pipeline(config: &Config) -> Result<RagPipeline> {
    let embedder = load_embedder(config).await?;

    let knowledge_base = Arc::new(open_knowledge_base(config).await?);

    let credentials = config.llm.credentials();
    let llm = Arc::new(ChatCompletionsClient::new(
        &config.llm.api_base,
        credentials.api_key,
        credentials.model,
    )?);

    let pipeline = RagPipeline::new(
        &config.rag,
        Arc::new(PdfTextExtractor),
        embedder,
        llm,
        knowledge_base,
    )?;

    let stats = pipeline.stats().await;
    tracing::info!(
        chunks = stats.chunks,
        sources = stats.sources.len(),
        snapshot = %config.rag.snapshot_path.display(),
        "Knowledge base ready"
    );

    Ok(pipeline)
}

#[cfg(feature = "local-embeddings")]
async fn load_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    use ragbot::rag::embeddings::{FastEmbedder, LocalModel};

    let model: LocalModel = config.rag.embedding_model.parse()?;
    let embedder = FastEmbedder::load(model, config.rag.model_cache_dir.clone()).await?;
    Ok(Arc::new(embedder))
}

#[cfg(not(feature = "local-embeddings"))]
async fn load_embedder(_config: &Config) -> Result<Arc<dyn Embedder>> {
    anyhow::bail!("built without the `local-embeddings` feature; no embedding backend available")
}

fn feedback_store(config: &Config) -> Arc<dyn FeedbackStore> {
    match &config.feedback.path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Writing feedback to file");
            Arc::new(JsonlFeedbackStore::new(path))
        }
        None => Arc::new(LoggingFeedbackStore),
    }
}

async fn serve(config: Arc<Config>, pipeline: Arc<RagPipeline>, output: &Output) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        feedback: feedback_store(&config),
        config,
        pipeline,
    };
    let app = api::app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    output.success(&format!("Listening on http://{}", addr));
    output.info(&format!("OpenAPI document at http://{}/api-docs/openapi.json", addr));
    tracing::info!(addr = %addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
