//! Typed view of the provider's webhook document.
//!
//! Shape: `{ "event": { "data": { "block": { "number", "logs": [...] } } } }`.
//! The outer chain is optional (a document without it simply carries no
//! logs), but fields inside each log are required: a log missing `topics`
//! or `data` fails the whole parse and the request is answered with 500.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookDocument {
    pub event: Option<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub data: Option<WebhookData>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub block: Option<WebhookBlock>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookBlock {
    pub number: u64,
    #[serde(default)]
    pub logs: Vec<WebhookLog>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookLog {
    pub topics: Vec<String>,
    pub data: String,
    pub transaction: Option<WebhookTransaction>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookTransaction {
    pub hash: Option<String>,
}

impl WebhookDocument {
    pub fn block(&self) -> Option<&WebhookBlock> {
        self.event.as_ref()?.data.as_ref()?.block.as_ref()
    }
}

impl WebhookLog {
    pub fn tx_hash(&self) -> String {
        self.transaction
            .as_ref()
            .and_then(|tx| tx.hash.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let document: WebhookDocument = serde_json::from_str(
            r#"{
                "webhookId": "wh_x",
                "event": {
                    "data": {
                        "block": {
                            "number": 250000000,
                            "logs": [
                                {
                                    "topics": ["0xaa", "0xbb"],
                                    "data": "0x1234",
                                    "transaction": {"hash": "0xcc"}
                                }
                            ]
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        let block = document.block().unwrap();
        assert_eq!(block.number, 250_000_000);
        assert_eq!(block.logs.len(), 1);
        assert_eq!(block.logs[0].topics, vec!["0xaa", "0xbb"]);
        assert_eq!(block.logs[0].tx_hash(), "0xcc");
    }

    #[test]
    fn test_absent_chain_is_no_logs() {
        let document: WebhookDocument = serde_json::from_str("{}").unwrap();
        assert!(document.block().is_none());

        let document: WebhookDocument =
            serde_json::from_str(r#"{"event": {"data": {}}}"#).unwrap();
        assert!(document.block().is_none());
    }

    #[test]
    fn test_missing_log_fields_fail_parse() {
        // topics is required on every log
        let result: Result<WebhookDocument, _> = serde_json::from_str(
            r#"{"event":{"data":{"block":{"number":1,"logs":[{"data":"0x"}]}}}}"#,
        );
        assert!(result.is_err());

        // so is the block number
        let result: Result<WebhookDocument, _> =
            serde_json::from_str(r#"{"event":{"data":{"block":{"logs":[]}}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_transaction_hash() {
        let document: WebhookDocument = serde_json::from_str(
            r#"{"event":{"data":{"block":{"number":1,"logs":[{"topics":[],"data":"0x"}]}}}}"#,
        )
        .unwrap();
        assert_eq!(document.block().unwrap().logs[0].tx_hash(), "unknown");
    }
}
