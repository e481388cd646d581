//! Telegram HTML rendering of job events.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use events::{CreatedJobDetails, JobEvent};
use token_metadata::{TokenMetadata, short_address};

const EXPLORER_BASE_URL: &str = "https://arbiscan.io";

const DURATION_UNITS: [(&str, u64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Renders one decoded event as a Telegram HTML message.
///
/// `details` carries the decoded `Created` payload together with the
/// resolved reward token; `detail_warning` replaces the details block when
/// the payload failed to decode. Lines whose datum is absent are omitted.
pub fn job_event_message(
    event: &JobEvent,
    details: Option<(&CreatedJobDetails, &TokenMetadata)>,
    detail_warning: Option<&str>,
) -> String {
    let envelope = &event.envelope;
    let mut lines = Vec::new();
    lines.push(format!("🔔 <b>{}</b>", envelope.kind));
    lines.push(format!("📋 Job ID: {}", envelope.job_id));
    lines.push(format!(
        "🔗 <a href=\"{EXPLORER_BASE_URL}/tx/{}\">View Transaction</a>",
        event.tx_hash
    ));

    if let Some((job, token)) = details {
        if !job.title.is_empty() {
            lines.push(format!("📝 <b>{}</b>", escape_html(&job.title)));
        }
        lines.push(format!(
            "💰 Reward: {} <a href=\"{EXPLORER_BASE_URL}/token/{}\">{}</a>",
            format_token_amount(job.amount, token.decimals),
            job.token,
            escape_html(&token.symbol)
        ));
        let (categories, custom) = split_tags(&job.tags);
        if !categories.is_empty() {
            lines.push(format!("📂 Category: {}", categories.join(", ")));
        }
        if !custom.is_empty() {
            lines.push(format!("🏷️ Tags: {}", escape_html(&custom.join(", "))));
        }
        if job.max_time != 0 {
            lines.push(format!(
                "⏳ Max Time: {}",
                format_duration(u64::from(job.max_time))
            ));
        }
        lines.push(format!(
            "👥 Multiple Applicants: {}",
            if job.multiple_applicants { "Yes" } else { "No" }
        ));
        if !job.delivery_method.is_empty() {
            lines.push(format!(
                "📦 Delivery: {}",
                escape_html(&job.delivery_method)
            ));
        }
    }

    if let Some(warning) = detail_warning {
        lines.push(format!(
            "⚠️ Could not parse job details: {}",
            escape_html(warning)
        ));
    }

    if let Some(actor) = envelope.actor_address() {
        lines.push(format!(
            "👤 Address: <a href=\"{EXPLORER_BASE_URL}/address/{actor}\">{}</a>",
            short_address(&actor)
        ));
    }
    if envelope.timestamp != 0 {
        lines.push(format!(
            "⏰ Event Time: {}",
            format_utc(i64::from(envelope.timestamp))
        ));
    }
    lines.push(format!("📦 Block: {}", event.block_number));
    lines.push(format!("🕐 Processed: {}", format_utc(Utc::now().timestamp())));

    lines.join("\n")
}

/// Renders the notification sent when the envelope itself could not be
/// decoded. Carries whatever the log still tells us.
pub fn fallback_message(
    job_id: Option<U256>,
    tx_hash: &str,
    block_number: u64,
    error: &str,
) -> String {
    let job_id = job_id.map_or_else(|| "unknown".to_string(), |id| id.to_string());
    [
        "🔔 <b>Job Event: Parse Error</b>".to_string(),
        format!("📋 Job ID: {job_id}"),
        format!("🔗 <a href=\"{EXPLORER_BASE_URL}/tx/{tx_hash}\">View Transaction</a>"),
        format!("📦 Block: {block_number}"),
        format!("⚠️ Error: {}", escape_html(error)),
        format!("🕐 Processed: {}", format_utc(Utc::now().timestamp())),
    ]
    .join("\n")
}

/// Scales `amount` by `10^decimals` and renders it with thousands grouping.
/// The fraction is truncated at eight digits and trailing zeros dropped.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }
    let Some(scale) = U256::from(10u8).checked_pow(U256::from(decimals)) else {
        // 10^decimals exceeds U256: every representable amount rounds to 0.
        return "0".to_string();
    };
    let whole = amount / scale;
    let fraction = amount % scale;

    let mut out = group_thousands(&whole.to_string());
    if !fraction.is_zero() {
        let digits = format!("{fraction:0>width$}", width = decimals as usize);
        let keep = (decimals as usize).min(8);
        let trimmed = digits[..keep].trim_end_matches('0');
        if !trimmed.is_empty() {
            out.push('.');
            out.push_str(trimmed);
        }
    }
    out
}

/// Renders a duration as its single largest whole unit, `Unknown` for zero.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "Unknown".to_string();
    }
    for (unit, unit_seconds) in DURATION_UNITS {
        let count = seconds / unit_seconds;
        if count >= 1 {
            return format!("{count} {unit}{}", plural(count));
        }
    }
    format!("{seconds} second{}", plural(seconds))
}

/// Splits tags into category labels (known codes) and custom tags,
/// preserving order within each group.
pub fn split_tags(tags: &[String]) -> (Vec<&'static str>, Vec<String>) {
    let mut categories = Vec::new();
    let mut custom = Vec::new();
    for tag in tags {
        match category_label(tag) {
            Some(label) => categories.push(label),
            None => custom.push(tag.clone()),
        }
    }
    (categories, custom)
}

fn category_label(tag: &str) -> Option<&'static str> {
    Some(match tag {
        "DA" => "Digital Audio",
        "DV" => "Digital Video",
        "DT" => "Digital Text",
        "DS" => "Digital Software",
        "DO" => "Digital Others",
        "NDG" => "Non-Digital Goods",
        "NDS" => "Non-Digital Services",
        "NDO" => "Non-Digital Others",
        _ => return None,
    })
}

/// Inserts a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn plural(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn format_utc(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(datetime) => format!("{} UTC", datetime.format("%Y-%m-%d %H:%M:%S")),
        None => "Unknown".to_string(),
    }
}

/// Telegram parses messages as HTML, so user-controlled text must not carry
/// markup characters.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, B256, Bytes, address};
    use events::{DecodePath, JobEnvelope, JobEventKind};

    fn event(kind: JobEventKind, payload: Bytes) -> JobEvent {
        JobEvent {
            envelope: JobEnvelope {
                job_id: U256::from(42),
                kind,
                actor: Bytes::from(vec![0x11; 20]),
                payload,
                timestamp: 1_700_000_000,
                decoded_via: DecodePath::Schema,
            },
            tx_hash: "0xabc".to_string(),
            block_number: 250_000_000,
        }
    }

    fn created_details() -> CreatedJobDetails {
        CreatedJobDetails {
            title: "Translate whitepaper".to_string(),
            content_hash: B256::repeat_byte(0x42),
            multiple_applicants: true,
            tags: vec!["DT".to_string(), "translation".to_string()],
            token: address!("af88d065e77c8cc2239327c5edb3a432268e5831"),
            amount: U256::from(1_500_000_000u64),
            max_time: 86_400,
            delivery_method: "ipfs".to_string(),
            arbitrator: Address::ZERO,
            whitelist_workers: false,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "Unknown");
        assert_eq!(format_duration(59), "59 seconds");
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(120), "2 minutes");
        assert_eq!(format_duration(3_600), "1 hour");
        assert_eq!(format_duration(90_000), "1 day");
        assert_eq!(format_duration(604_800), "1 week");
        assert_eq!(format_duration(2_592_000), "1 month");
        assert_eq!(format_duration(63_072_000), "2 years");
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount(U256::ZERO, 18), "0");
        assert_eq!(format_token_amount(U256::from(1_500_000_000u64), 6), "1,500");
        assert_eq!(format_token_amount(U256::from(1_000_000u64), 6), "1");
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_token_amount(U256::from(123u64), 6), "0.000123");
        assert_eq!(
            format_token_amount(U256::from(1_234_567_890_123_456_789u64), 18),
            "1.23456789"
        );
        assert_eq!(format_token_amount(U256::from(5u8), 0), "5");
        assert_eq!(
            format_token_amount(U256::from(1_234_567u64) * U256::from(10u8).pow(U256::from(18u8)), 18),
            "1,234,567"
        );
    }

    #[test]
    fn test_whole_part_thousands_grouping() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("999999"), "999,999");
        assert_eq!(group_thousands("1000000"), "1,000,000");
        assert_eq!(group_thousands("1500"), "1,500");

        // Grouping applies to the scaled whole part only.
        assert_eq!(format_token_amount(U256::from(1_500_000_000u64), 6), "1,500");
        assert_eq!(
            format_token_amount(U256::from(987_654_321u64), 0),
            "987,654,321"
        );
        assert_eq!(
            format_token_amount(U256::from(1_234_567_891_234u64), 3),
            "1,234,567,891.234"
        );
    }

    #[test]
    fn test_fraction_truncates_at_eight_digits() {
        // 0.00000001 is the smallest displayed fraction at 18 decimals.
        let wei = |n: u64| U256::from(n);
        assert_eq!(format_token_amount(wei(10_000_000_000), 18), "0.00000001");
        // One order of magnitude below the cutoff truncates to zero.
        assert_eq!(format_token_amount(wei(1_000_000_000), 18), "0");
        assert_eq!(format_token_amount(wei(1), 18), "0");
        // Digits past the eighth are dropped, not rounded.
        assert_eq!(
            format_token_amount(wei(999_999_999_900_000_000), 18),
            "0.99999999"
        );
    }

    #[test]
    fn test_split_tags() {
        let (categories, custom) = split_tags(&[
            "DT".to_string(),
            "rust".to_string(),
            "NDG".to_string(),
            "urgent".to_string(),
        ]);
        assert_eq!(categories, vec!["Digital Text", "Non-Digital Goods"]);
        assert_eq!(custom, vec!["rust".to_string(), "urgent".to_string()]);

        let (categories, custom) = split_tags(&[]);
        assert!(categories.is_empty());
        assert!(custom.is_empty());

        // Codes are case sensitive; lowercase is a custom tag.
        let (categories, custom) = split_tags(&["dt".to_string()]);
        assert!(categories.is_empty());
        assert_eq!(custom, vec!["dt".to_string()]);
    }

    #[test]
    fn test_created_message_fields_in_order() {
        let details = created_details();
        let token = TokenMetadata::new("USDC", 6);
        let message = job_event_message(
            &event(JobEventKind::Created, Bytes::new()),
            Some((&details, &token)),
            None,
        );
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "🔔 <b>Job Created</b>");
        assert_eq!(lines[1], "📋 Job ID: 42");
        assert_eq!(
            lines[2],
            "🔗 <a href=\"https://arbiscan.io/tx/0xabc\">View Transaction</a>"
        );
        assert_eq!(lines[3], "📝 <b>Translate whitepaper</b>");
        assert!(lines[4].starts_with("💰 Reward: 1,500 "));
        assert!(lines[4].contains("/token/0xaf88d065e77c8cC2239327C5EDb3A432268e5831"));
        assert!(lines[4].ends_with(">USDC</a>"));
        assert_eq!(lines[5], "📂 Category: Digital Text");
        assert_eq!(lines[6], "🏷️ Tags: translation");
        assert_eq!(lines[7], "⏳ Max Time: 1 day");
        assert_eq!(lines[8], "👥 Multiple Applicants: Yes");
        assert_eq!(lines[9], "📦 Delivery: ipfs");
        assert!(lines[10].starts_with("👤 Address: "));
        assert_eq!(lines[11], "⏰ Event Time: 2023-11-14 22:13:20 UTC");
        assert_eq!(lines[12], "📦 Block: 250000000");
        assert!(lines[13].starts_with("🕐 Processed: "));
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_non_created_message_skips_details() {
        let message = job_event_message(&event(JobEventKind::Paid, Bytes::new()), None, None);
        assert!(message.contains("🔔 <b>Job Paid</b>"));
        assert!(!message.contains("Reward"));
        assert!(!message.contains("Multiple Applicants"));
        assert!(message.contains("📦 Block: 250000000"));
    }

    #[test]
    fn test_degraded_message_carries_warning() {
        let message = job_event_message(
            &event(JobEventKind::Created, Bytes::from(vec![0xff])),
            None,
            Some("payload too short: 1 byte(s)"),
        );
        assert!(message.contains("⚠️ Could not parse job details: payload too short: 1 byte(s)"));
        assert!(!message.contains("Reward"));
    }

    #[test]
    fn test_empty_title_and_delivery_omitted() {
        let details = CreatedJobDetails {
            title: String::new(),
            delivery_method: String::new(),
            tags: Vec::new(),
            max_time: 0,
            ..created_details()
        };
        let token = TokenMetadata::new("USDC", 6);
        let message = job_event_message(
            &event(JobEventKind::Created, Bytes::new()),
            Some((&details, &token)),
            None,
        );
        assert!(!message.contains("📝"));
        assert!(!message.contains("📂"));
        assert!(!message.contains("🏷️"));
        assert!(!message.contains("⏳"));
        assert!(!message.contains("Delivery"));
        assert!(message.contains("💰 Reward: 1,500 "));
        assert!(message.contains("👥 Multiple Applicants: Yes"));
    }

    #[test]
    fn test_short_actor_omits_address_line() {
        let mut event = event(JobEventKind::Closed, Bytes::new());
        event.envelope.actor = Bytes::from(vec![0x11; 8]);
        let message = job_event_message(&event, None, None);
        assert!(!message.contains("👤"));
    }

    #[test]
    fn test_zero_timestamp_omits_event_time() {
        let mut event = event(JobEventKind::Closed, Bytes::new());
        event.envelope.timestamp = 0;
        let message = job_event_message(&event, None, None);
        assert!(!message.contains("⏰"));
    }

    #[test]
    fn test_html_escaping() {
        let details = CreatedJobDetails {
            title: "<script>alert(1)</script> & more".to_string(),
            ..created_details()
        };
        let token = TokenMetadata::new("USDC", 6);
        let message = job_event_message(
            &event(JobEventKind::Created, Bytes::new()),
            Some((&details, &token)),
            None,
        );
        assert!(message.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!message.contains("<script>"));
    }

    #[test]
    fn test_fallback_message() {
        let message = fallback_message(Some(U256::from(7)), "0xdead", 123, "ABI decode failed: x");
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "🔔 <b>Job Event: Parse Error</b>");
        assert_eq!(lines[1], "📋 Job ID: 7");
        assert_eq!(
            lines[2],
            "🔗 <a href=\"https://arbiscan.io/tx/0xdead\">View Transaction</a>"
        );
        assert_eq!(lines[3], "📦 Block: 123");
        assert_eq!(lines[4], "⚠️ Error: ABI decode failed: x");

        let message = fallback_message(None, "unknown", 0, "e");
        assert!(message.contains("📋 Job ID: unknown"));
    }
}
