//! Best-effort extraction of action items from a meeting transcript.
//!
//! The transcript is wrapped in a fixed instruction prompt and sent to a
//! [`CompletionProvider`]. The reply is free-form text that should contain a
//! JSON array; it is parsed in two stages (the first bracketed span, then the
//! whole reply). Rate limited calls are retried with linear backoff. Every
//! other failure is logged and turned into an empty result, since a meeting
//! with nothing extractable is not an error for the caller.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::llm::CompletionProvider;
use entity_api::action_item::NewActionItem;
use entity_api::action_item_status::ActionItemStatus;
use log::*;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use service::config::Config;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// One action item as the model described it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ExtractedActionItem {
    #[serde(default, deserialize_with = "string_or_default")]
    pub task: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Option<String>,
}

impl From<ExtractedActionItem> for NewActionItem {
    fn from(item: ExtractedActionItem) -> Self {
        NewActionItem {
            task: item.task,
            owner: item.owner,
            due_date: item.due_date,
            status: ActionItemStatus::Pending,
            tags: item.tags,
        }
    }
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Models sometimes answer `"tags": ["a", "b"]` instead of a comma separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::Text(text)) => Some(text),
        Some(Tags::List(list)) if list.is_empty() => None,
        Some(Tags::List(list)) => Some(list.join(", ")),
        None => None,
    })
}

pub fn build_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this meeting transcript and extract every action item. For each one identify:
1. The task to be completed
2. The person responsible, if one is named
3. Any due date or timeline that was mentioned
4. Relevant tags or categories

Respond with a JSON array of objects with these fields:
- task (string): clear description of what needs to be done
- owner (string or null): person responsible
- due_date (string or null): when it is due, in the wording used in the transcript
- tags (string or null): comma separated categories

Meeting Transcript:
{transcript}

Return only the JSON array, no other text."#
    )
}

fn bracketed_span() -> &'static Regex {
    static BRACKETED_SPAN: OnceLock<Regex> = OnceLock::new();
    BRACKETED_SPAN.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("valid bracket pattern"))
}

/// Parses the action items out of a model reply. The first `[` through the last
/// `]` is tried when present, otherwise the reply as a whole. When that span is
/// not valid JSON, the first complete array starting at the first `[` is used,
/// so bracketed notes after the array do not spoil it.
pub fn parse_action_items(text: &str) -> Result<Vec<ExtractedActionItem>, Error> {
    let Some(span) = bracketed_span().find(text) else {
        return Ok(serde_json::from_str(text.trim())?);
    };

    match serde_json::from_str(span.as_str()) {
        Ok(items) => Ok(items),
        Err(e) => serde_json::Deserializer::from_str(&text[span.start()..])
            .into_iter::<Vec<ExtractedActionItem>>()
            .next()
            .and_then(Result::ok)
            .ok_or_else(|| Error::from(e)),
    }
}

/// Calls the model and parses its reply, retrying while rate limited.
pub struct Extractor {
    provider: Arc<dyn CompletionProvider>,
    max_attempts: u32,
    backoff: Duration,
}

impl Extractor {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_attempts: u32, backoff: Duration) -> Self {
        Self {
            provider,
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.extraction_max_attempts,
            Duration::from_secs(config.extraction_backoff_secs),
        )
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// Returns the action items found in `transcript`, or an empty vector when the
    /// model could not be reached or answered with something unparseable.
    pub async fn extract(&self, transcript: &str) -> Vec<ExtractedActionItem> {
        let prompt = build_prompt(transcript);

        for attempt in 1..=self.max_attempts {
            let err = match self.provider.generate(&prompt).await {
                Ok(text) => match parse_action_items(&text) {
                    Ok(items) => {
                        debug!("Extracted {} action items on attempt {attempt}", items.len());
                        return items;
                    }
                    Err(err) => err,
                },
                Err(err) if err.is_rate_limited() && attempt < self.max_attempts => {
                    let wait = self.backoff * attempt;
                    warn!(
                        "Rate limited on attempt {attempt}/{}, retrying in {}s",
                        self.max_attempts,
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }
                Err(err) => err,
            };

            log_failure(&err, attempt);
            return Vec::new();
        }

        Vec::new()
    }
}

fn log_failure(err: &Error, attempt: u32) {
    match &err.error_kind {
        DomainErrorKind::External(ExternalErrorKind::RateLimited) => {
            warn!("Action item extraction gave up after {attempt} rate limited attempts")
        }
        DomainErrorKind::External(ExternalErrorKind::InvalidResponse(message)) => {
            warn!("Action item extraction got a malformed response: {message}")
        }
        _ => warn!("Action item extraction failed to reach the model: {err}"),
    }
}
