use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use fitness_intake::persist::FlushOutcome;
use fitness_intake::routes::{FitnessRouteState, fitness_routes};
use fitness_intake::store::MemoryStore;
use fitness_intake::{FitnessConfig, FitnessSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FitnessConfig::from_env()?;
    let http_port = config.http_port;

    eprintln!("💪 Fitness Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Autosave: {}ms", config.autosave_delay.as_millis());

    let store = Arc::new(MemoryStore::new());
    let session = FitnessSession::new(config, store);
    if let Err(e) = session.load().await {
        eprintln!("   Warning: could not load saved data: {}", e);
    }

    if let Some(port) = http_port {
        let app = fitness_routes(FitnessRouteState {
            session: Arc::clone(&session),
        });
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
        eprintln!("   HTTP API: http://0.0.0.0:{}/api/fitness/status", port);
        tokio::spawn(async move {
            tracing::info!(port, "Fitness HTTP server started");
            if let Err(e) = axum::serve(listener, app).await {
                tracing::warn!(error = %e, "HTTP server stopped");
            }
        });
    }

    eprintln!("   Commands: /status, /save, /quit\n");
    for message in session.messages().await {
        println!("{}\n", message.content);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/save" => match session.save_now().await {
                FlushOutcome::Failed { .. } => eprintln!("   Save failed"),
                FlushOutcome::LocalOnly => eprintln!("   Not authenticated, kept locally"),
                _ => eprintln!("   Saved"),
            },
            "/status" => {
                let status = session.status().await;
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            text => {
                if let Some(reply) = session.handle_message(text).await {
                    println!("\n{}\n", reply.text);
                }
            }
        }
    }

    if let FlushOutcome::Failed { .. } = session.save_now().await {
        tracing::warn!("Final save failed, unsaved changes are lost");
    }
    session.shutdown();
    Ok(())
}
