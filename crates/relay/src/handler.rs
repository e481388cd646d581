//! Webhook handler: per-log decode, resolve, format, deliver.

use std::sync::Arc;

use alloy::primitives::{B256, U256};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, warn};

use events::abi::JOB_EVENT_TOPIC;
use events::{DecodeError, JobEvent, JobEventKind, decode_created_payload, decode_job_event};
use notifier::telegram::NotificationSink;
use notifier::{fallback_message, job_event_message};
use token_metadata::TokenResolver;

use crate::webhook::{WebhookDocument, WebhookLog};

pub struct AppState {
    pub sink: Arc<dyn NotificationSink>,
    pub resolver: TokenResolver,
}

/// `POST /` entry point.
///
/// Body parse failures answer 500 with the error in the body so the
/// provider records the attempt as failed; per-log decode failures degrade
/// to fallback notifications and never fail the request.
pub async fn handle_webhook(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let document: WebhookDocument = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(e) => {
            warn!("Failed to parse webhook body: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {e}")).into_response();
        }
    };

    let Some(block) = document.block() else {
        debug!("Webhook document carried no block data");
        return (StatusCode::OK, "No logs found").into_response();
    };
    if block.logs.is_empty() {
        debug!("Block {} carried no logs", block.number);
        return (StatusCode::OK, "No logs found").into_response();
    }

    info!("Processing {} log(s) from block {}", block.logs.len(), block.number);
    for log in &block.logs {
        process_log(&state, log, block.number).await;
    }
    (StatusCode::OK, "OK").into_response()
}

/// Runs one log through the pipeline. Only logs whose first topic is the
/// `JobEvent` signature participate; everything else is skipped silently.
async fn process_log(state: &AppState, log: &WebhookLog, block_number: u64) {
    let Some(first_topic) = log.topics.first() else {
        debug!("Skipping log without topics");
        return;
    };
    if first_topic.parse::<B256>().ok() != Some(JOB_EVENT_TOPIC) {
        debug!("Skipping log with topic {first_topic}");
        return;
    }

    let tx_hash = log.tx_hash();
    let envelope = parse_topics(&log.topics).and_then(|topics| {
        let data = alloy::hex::decode(&log.data)?;
        decode_job_event(&topics, &data)
    });

    let envelope = match envelope {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(
                "Envelope decode failed at stage {}: {e} (data: {})",
                e.stage(),
                log.data
            );
            let job_id = log
                .topics
                .get(1)
                .and_then(|t| t.parse::<B256>().ok())
                .map(|t| U256::from_be_bytes(t.0));
            let message = fallback_message(job_id, &tx_hash, block_number, &e.to_string());
            if !state.sink.deliver(&message).await {
                warn!("Fallback notification for tx {tx_hash} was not delivered");
            }
            return;
        }
    };

    if !envelope.kind.is_known() {
        info!("Skipping unknown event type {}", envelope.kind.code());
        return;
    }

    let event = JobEvent {
        envelope,
        tx_hash,
        block_number,
    };

    let mut details = None;
    let mut detail_warning = None;
    if event.envelope.kind == JobEventKind::Created && !event.envelope.payload.is_empty() {
        match decode_created_payload(&event.envelope.payload) {
            Ok(decoded) => details = Some(decoded),
            Err(e) => {
                warn!(
                    "Created payload decode failed for job {}: {e} (payload: 0x{})",
                    event.envelope.job_id,
                    alloy::hex::encode(&event.envelope.payload)
                );
                detail_warning = Some(e.to_string());
            }
        }
    }

    let token = match &details {
        Some(job) => Some(state.resolver.resolve(job.token).await),
        None => None,
    };

    let message = job_event_message(
        &event,
        details.as_ref().zip(token.as_ref()),
        detail_warning.as_deref(),
    );
    if state.sink.deliver(&message).await {
        info!(
            "Notified {} for job {}",
            event.envelope.kind, event.envelope.job_id
        );
    } else {
        warn!(
            "Notification for job {} was not delivered",
            event.envelope.job_id
        );
    }
}

fn parse_topics(raw: &[String]) -> Result<Vec<B256>, DecodeError> {
    raw.iter()
        .map(|topic| {
            topic
                .parse::<B256>()
                .map_err(|e| DecodeError::Envelope(format!("invalid topic '{topic}': {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_topics() {
        let topics = parse_topics(&[
            "0x2c03c6df0d03954344db45c40d4facdfa60aaf0e03186fc750db6b83c6bbd1bb".to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000007".to_string(),
        ])
        .unwrap();
        assert_eq!(topics[0], JOB_EVENT_TOPIC);
        assert_eq!(U256::from_be_bytes(topics[1].0), U256::from(7));

        assert!(parse_topics(&["0xzz".to_string()]).is_err());
        assert!(parse_topics(&["0x12".to_string()]).is_err());
    }
}
