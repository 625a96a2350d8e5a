use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::parser::parse_line;
use crate::stats::StatsRepository;

/// One received chat message, reduced to its textual parts. Presentation
/// details (embed objects, emoji, formatting) are stripped before this point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub embed_descriptions: Vec<String>,
}

/// Inbound boundary: whatever is connected to the chat platform implements
/// this and yields messages until the connection closes.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Option<IncomingMessage>;
}

/// Message source backed by a tokio channel, for wiring the HTTP gateway (or
/// any other producer) to the pipeline.
pub struct ChannelMessageSource {
    receiver: mpsc::Receiver<IncomingMessage>,
}

impl ChannelMessageSource {
    pub fn new(receiver: mpsc::Receiver<IncomingMessage>) -> Self {
        Self { receiver }
    }
}

#[async_trait]
impl MessageSource for ChannelMessageSource {
    async fn next_message(&mut self) -> Option<IncomingMessage> {
        self.receiver.recv().await
    }
}

/// Feeds message text through the line parser into the stats repository.
pub struct IngestPipeline {
    stats: Arc<dyn StatsRepository>,
}

impl IngestPipeline {
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// Ingests every textual part of a message independently. Embed
    /// descriptions and plain content are deliberately not deduplicated
    /// against each other: a message repeating the same line in both gets
    /// counted twice. Returns how many rating lines were applied.
    #[instrument(skip(self, message))]
    pub async fn process_message(&self, message: &IncomingMessage) -> usize {
        let mut applied = 0;
        for description in &message.embed_descriptions {
            if !description.is_empty() {
                applied += self.ingest(description).await;
            }
        }
        if !message.content.is_empty() {
            applied += self.ingest(&message.content).await;
        }
        applied
    }

    /// Splits `text` into lines and applies every parsable rating line. A
    /// malformed line is skipped without affecting its neighbors; nothing
    /// propagates past this boundary.
    pub async fn ingest(&self, text: &str) -> usize {
        if !text.contains('→') {
            return 0;
        }

        let mut applied = 0;
        for line in text.lines() {
            if let Some(event) = parse_line(line) {
                debug!(player = %event.player, delta = event.delta, "Recorded rating line");
                match self.stats.record_event(event).await {
                    Ok(()) => applied += 1,
                    Err(err) => error!(error = %err, "Failed to record rating event"),
                }
            }
        }
        applied
    }
}

/// Drains a message source into the pipeline until the source closes.
pub fn spawn_ingest_task<S>(mut source: S, pipeline: Arc<IngestPipeline>) -> JoinHandle<()>
where
    S: MessageSource + 'static,
{
    tokio::spawn(async move {
        while let Some(message) = source.next_message().await {
            pipeline.process_message(&message).await;
        }
        info!("Message source closed, stopping ingest task");
    })
}
