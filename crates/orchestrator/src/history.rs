//! Merged client interaction history and call analysis views.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use database::{CallRecord, ChatMessage, Client, Sender};

/// One event in a client's merged interaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    /// RFC 3339 timestamp of the event.
    pub timestamp: String,
    /// What kind of event this is.
    pub kind: HistoryEventKind,
    /// Sender, for chat messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
    /// Event text: the message, call description, or feedback.
    pub detail: String,
}

/// Kind of history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEventKind {
    Message,
    Call,
    Feedback,
}

/// Merge a client's chat log, call records, and stored feedback into one
/// sequence ordered by time.
///
/// Timestamps are compared as parsed datetimes, not strings, so mixed
/// offsets order correctly; events with unparseable timestamps sort first.
pub fn merge_history(
    client: &Client,
    chatlog: &[ChatMessage],
    calls: &[CallRecord],
) -> Vec<HistoryEvent> {
    let mut events = Vec::new();

    for message in chatlog {
        events.push(HistoryEvent {
            timestamp: message.timestamp.clone(),
            kind: HistoryEventKind::Message,
            sender: Some(message.sender),
            detail: message.message.clone(),
        });
    }

    for call in calls {
        events.push(HistoryEvent {
            timestamp: call.call_time.clone(),
            kind: HistoryEventKind::Call,
            sender: None,
            detail: format!("Outbound call {} ({})", call.call_id, call.status),
        });
    }

    if let (Some(feedback), Some(date)) = (&client.last_feedback, &client.last_feedback_date) {
        events.push(HistoryEvent {
            timestamp: date.clone(),
            kind: HistoryEventKind::Feedback,
            sender: None,
            detail: feedback.clone(),
        });
    }

    events.sort_by_key(|event| parse_timestamp(&event.timestamp));
    events
}

/// Plain-text analysis of the most recent call for a policy.
///
/// Returns an informational string, not an error, when no calls exist.
pub fn analysis_text(policy_number: &str, latest: Option<&CallRecord>) -> String {
    let Some(record) = latest else {
        return format!("No calls on record for policy {}.", policy_number);
    };

    let mut text = format!(
        "Latest call for policy {}\nCall id: {}\nStatus: {}\nPlaced: {}\n",
        policy_number, record.call_id, record.status, record.call_time
    );
    if let Some(checked) = &record.last_checked {
        text.push_str(&format!("Last checked: {}\n", checked));
    }
    if let Some(notes) = &record.notes {
        text.push_str(&format!("Feedback: {}\n", notes));
    }
    text
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::ClientStatus;

    fn test_client() -> Client {
        Client {
            policy_number: "12345678".to_string(),
            name: "Jane Doe".to_string(),
            dob: "1990-01-01".to_string(),
            email: "janedoe@example.com".to_string(),
            phone: "+15551234567".to_string(),
            sex: None,
            status: ClientStatus::Active,
            summary: None,
            last_feedback: None,
            last_feedback_date: None,
        }
    }

    fn message(id: i64, timestamp: &str, sender: Sender, text: &str) -> ChatMessage {
        ChatMessage {
            id,
            message: text.to_string(),
            sender,
            timestamp: timestamp.to_string(),
        }
    }

    fn call(call_id: &str, call_time: &str) -> CallRecord {
        CallRecord {
            call_id: call_id.to_string(),
            policy_number: "12345678".to_string(),
            call_time: call_time.to_string(),
            status: "completed".to_string(),
            last_checked: None,
            notes: None,
        }
    }

    #[test]
    fn test_merge_orders_by_time_across_sources() {
        let mut client = test_client();
        client.last_feedback = Some("please call back".to_string());
        client.last_feedback_date = Some("2026-08-01T12:00:00+00:00".to_string());

        let chatlog = vec![
            message(1, "2026-08-01T09:00:00+00:00", Sender::Assistant, "Hello"),
            message(2, "2026-08-01T15:00:00+00:00", Sender::Client, "Thanks"),
        ];
        let calls = vec![call("call-1", "2026-08-01T10:30:00+00:00")];

        let events = merge_history(&client, &chatlog, &calls);

        let kinds: Vec<HistoryEventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HistoryEventKind::Message,
                HistoryEventKind::Call,
                HistoryEventKind::Feedback,
                HistoryEventKind::Message,
            ]
        );
    }

    #[test]
    fn test_merge_compares_parsed_times_not_strings() {
        // 12:30+02:00 is 10:30Z, so it precedes 12:00Z even though a
        // string comparison would order it the other way around.
        let chatlog = vec![
            message(1, "2026-08-01T12:00:00Z", Sender::Client, "later"),
            message(2, "2026-08-01T12:30:00+02:00", Sender::Client, "earlier"),
        ];

        let events = merge_history(&test_client(), &chatlog, &[]);
        assert_eq!(events[0].detail, "earlier");
        assert_eq!(events[1].detail, "later");
    }

    #[test]
    fn test_merge_preserves_sender() {
        let chatlog = vec![message(
            1,
            "2026-08-01T09:00:00+00:00",
            Sender::Client,
            "my question",
        )];

        let events = merge_history(&test_client(), &chatlog, &[]);
        assert_eq!(events[0].sender, Some(Sender::Client));
    }

    #[test]
    fn test_analysis_with_no_calls() {
        let text = analysis_text("12345678", None);
        assert_eq!(text, "No calls on record for policy 12345678.");
    }

    #[test]
    fn test_analysis_formats_latest_call() {
        let mut record = call("call-9", "2026-08-01T10:30:00+00:00");
        record.status = "ended".to_string();
        record.last_checked = Some("2026-08-01T10:35:00+00:00".to_string());
        record.notes = Some("follow up on claim".to_string());

        let text = analysis_text("12345678", Some(&record));
        assert!(text.contains("Call id: call-9"));
        assert!(text.contains("Status: ended"));
        assert!(text.contains("Last checked: 2026-08-01T10:35:00+00:00"));
        assert!(text.contains("Feedback: follow up on claim"));
    }
}
