use review_common::clock::SystemClock;
use review_common::config::AppConfig;
use review_notifier::{Notifier, TelegramSender};
use review_poller::fetcher::ApiFetcher;
use review_poller::poller::PollLoop;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("review_poller=info,review_notifier=info,review_engine=info")
    });
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Homework review bot starting...");

    // A configuration defect is not retried and nothing is sent: the bot
    // token or chat id may be the missing piece.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(fatal = true, error = %e, "Startup configuration check failed");
            std::process::exit(1);
        }
    };

    let fetcher = ApiFetcher::from_config(&config)?;
    let sender = TelegramSender::from_config(&config)?;

    let poll_loop = PollLoop::new(
        fetcher,
        Notifier::new(sender),
        SystemClock,
        config.retry_time,
    )
    .with_cursor_policy(config.cursor_policy);

    tracing::info!(endpoint = %config.endpoint, "Polling homework API");

    tokio::select! {
        _ = poll_loop.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Homework review bot stopped.");
    Ok(())
}
