use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use vid_digest::{
    openai::OpenAIClient, server, tracing::init_tracing_subscriber, yt::YtDlp, Cli, Config,
    SummaryPipelineBuilder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = sentry::init((
        cli.sentry_dsn.clone().unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    init_tracing_subscriber()?;

    let config = Config::try_from(cli)
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))
        .context("Invalid configuration")?;

    tokio::fs::create_dir_all(&config.workdir)
        .await
        .with_context(|| format!("Failed to create workdir {}", config.workdir.display()))?;

    let openai_client = OpenAIClient::from_config(&config);
    let yt_dlp = YtDlp::new_with_cookies(config.cookies_path.clone())
        .check_certificates(!config.no_check_certificates);

    let mut builder = SummaryPipelineBuilder::new(&config.workdir)
        .audio_handler(yt_dlp)
        .transcriber(openai_client.clone())
        .summarizer(openai_client)
        .chunk_failure_policy(config.chunk_failure_policy);
    if let Some(max_chars) = config.chunk_max_chars {
        builder = builder.with_chunking(max_chars);
    }

    let app = server::router(builder.build(), config.allowed_origins.clone());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, workdir = ?config.workdir, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
