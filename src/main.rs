use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use std::time::Duration;
use storytime_backend::controllers::{
    health::Readiness, speech::SpeechController, story::StoryController,
};
use storytime_backend::domain::{speech::SpeechService, story::StoryService};
use storytime_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use storytime_backend::infrastructure::http::start_http_server;
use storytime_backend::infrastructure::repositories::{
    AudioRepository, CompletionRepository, ImageRepository, OpenAiCompletionRepository,
    OpenAiImageRepository, OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
    UnconfiguredProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Storytime Backend on {}:{}",
        config.host,
        config.port
    );

    // Create OpenAI client
    let openai_client = config.openai_api_key.as_ref().map(|api_key| {
        // Rate limits surface to the retry executor instead of the SDK's own backoff
        let no_backoff = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Arc::new(
            Client::with_config(OpenAIConfig::new().with_api_key(api_key)).with_backoff(no_backoff),
        )
    });

    if openai_client.is_none() {
        tracing::warn!("OPENAI_API_KEY not set. Story generation will report a configuration error");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject provider clients)
    tracing::info!("Instantiating repositories...");
    let (completion_repo, image_repo): (Arc<dyn CompletionRepository>, Arc<dyn ImageRepository>) =
        match &openai_client {
            Some(client) => (
                Arc::new(OpenAiCompletionRepository::new(
                    client.clone(),
                    config.openai_story_model.clone(),
                )),
                Arc::new(OpenAiImageRepository::new(
                    client.clone(),
                    config.openai_image_model.clone(),
                )),
            ),
            None => (
                Arc::new(UnconfiguredProvider::new("OpenAI")),
                Arc::new(UnconfiguredProvider::new("OpenAI")),
            ),
        };

    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;

            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(polly_client, config.polly_voice.clone()))
        }
        TtsProvider::OpenAi => match &openai_client {
            Some(client) => Arc::new(OpenAiTtsRepository::new(
                client.clone(),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            )),
            None => Arc::new(UnconfiguredProvider::new("OpenAI")),
        },
    };

    let audio_repo = Arc::new(AudioRepository::new(
        config.audio_cache_capacity,
        config.audio_cache_ttl(),
    ));

    let readiness = Arc::new(Readiness {
        story_provider: completion_repo.is_configured() && image_repo.is_configured(),
        speech_provider: tts_repo.is_configured(),
    });

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let retry_policy = config.retry_policy();
    tracing::info!(
        max_attempts = retry_policy.max_attempts,
        base_delay_ms = retry_policy.base_delay.as_millis(),
        attempt_timeout = ?retry_policy.attempt_timeout,
        "Provider retry policy"
    );
    let story_service = Arc::new(StoryService::new(
        completion_repo,
        image_repo,
        retry_policy.clone(),
    ));
    let speech_service = Arc::new(SpeechService::new(tts_repo, retry_policy));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let story_controller = Arc::new(StoryController::new(story_service));
    let speech_controller = Arc::new(SpeechController::new(speech_service, audio_repo));

    if config.api_token.is_none() && !config.is_development() {
        tracing::warn!("API_TOKEN not set. API routes are open to any caller");
    }

    // Start HTTP server with all routes
    start_http_server(
        Arc::new(config),
        readiness,
        story_controller,
        speech_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storytime_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storytime_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
