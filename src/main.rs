//! `FinAssist` terminal client
//!
//! Line-oriented front end: each line typed is submitted as a question and
//! the transcript is printed as it grows.

use finassist::backend::{HttpBackend, LoggingBackend};
use finassist::config::ClientConfig;
use finassist::conversation::{Message, MessageRole};
use finassist::health::HealthMonitor;
use finassist::runtime::{self, ClientEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout is the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finassist=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(backend = %config.backend_url, "Starting client");

    let backend = Arc::new(LoggingBackend::new(HttpBackend::new(&config.backend_url)?));

    let monitor = HealthMonitor::new();
    let mut health_rx = monitor.subscribe();
    monitor.spawn(Arc::clone(&backend));

    let (chat, runtime_handle) = runtime::start(Arc::clone(&backend));
    let mut events = chat.subscribe();

    for message in chat.snapshot().await?.messages {
        print_message(&message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut health_known = false;
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    // Let an in-flight answer arrive before leaving
                    if chat.snapshot().await?.pending {
                        continue;
                    }
                    // The last answer may have settled before its event was shown
                    for message in runtime::drain_appended(&mut events) {
                        print_message(&message);
                    }
                    break;
                };
                if chat.snapshot().await?.pending {
                    println!("(still waiting for the previous answer, ignored)");
                    continue;
                }
                chat.set_text(line).await?;
                chat.submit().await?;
            }
            event = events.recv() => match event {
                Ok(ClientEvent::MessageAppended { message, .. }) => print_message(&message),
                Ok(ClientEvent::PendingChanged { pending: true }) => println!("..."),
                Ok(ClientEvent::PendingChanged { pending: false }) if !stdin_open => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Transcript display fell behind");
                }
                Err(RecvError::Closed) => break,
            },
            changed = health_rx.changed(), if !health_known => {
                health_known = true;
                if changed.is_ok() {
                    let report = health_rx.borrow().clone();
                    println!("[{}]", report.status.badge_text());
                }
            }
        }
    }

    drop(chat);
    runtime_handle.await?;
    Ok(())
}

fn print_message(message: &Message) {
    let who = match message.role {
        MessageRole::User => "you",
        MessageRole::Assistant => "assistant",
    };

    let mut meta = Vec::new();
    if let Some(label) = message.source_label() {
        meta.push(label);
    }
    if let Some(confidence) = message.confidence {
        meta.push(format!("{confidence:.2}"));
    }

    if meta.is_empty() {
        println!("[{}] {who}: {}", message.timestamp, message.content);
    } else {
        println!(
            "[{}] {who} ({}): {}",
            message.timestamp,
            meta.join(" "),
            message.content
        );
    }
}
