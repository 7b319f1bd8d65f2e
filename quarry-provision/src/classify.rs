//! Idempotency classification of ambiguous "create" responses.
//!
//! The platform can answer a create call three ways:
//! - 201 — the resource was made, no ambiguity.
//! - 409, or an error payload saying "already exists" — it was already there.
//! - 200 — ambiguous: an idempotent PUT-style create answers 200 both for a
//!   fresh creation and for a pre-existing resource. The platform also takes
//!   a non-deterministic grace period to forget a deleted resource's name,
//!   so a fresh creation right after a delete is indistinguishable from
//!   hitting a stale duplicate by status alone.
//!
//! The 200 case is resolved by a timestamp heuristic: a resource whose
//! `created_on` and `updated_on` are nearly identical was just made.

use chrono::{DateTime, Duration, FixedOffset};

use quarry_client::RawResponse;

use crate::outcome::OperationOutcome;

const ALREADY_EXISTS_INDICATOR: &str = "already exists";

/// Tuning for the ambiguous-200 heuristic.
///
/// The threshold is empirical, not load-bearing beyond "small gap vs. large
/// gap"; it is a parameter rather than a constant so deployments seeing
/// higher platform latency can widen it.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Maximum `|updated_on - created_on|` still considered a fresh creation.
    pub ambiguity_threshold: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ambiguity_threshold: Duration::seconds(2),
        }
    }
}

impl ClassifierConfig {
    /// Config with the threshold given in milliseconds.
    pub fn with_grace_ms(ms: i64) -> Self {
        Self {
            ambiguity_threshold: Duration::milliseconds(ms),
        }
    }
}

/// Classify the raw outcome of a create call.
///
/// `resource` is the human-readable label used in outcome messages, e.g.
/// `repository 'api'`.
pub fn classify_create(
    resource: &str,
    resp: &RawResponse,
    config: &ClassifierConfig,
) -> OperationOutcome {
    match resp.status {
        201 => OperationOutcome::created(format!("{resource} created")),
        200 => classify_ambiguous_ok(resource, resp, config),
        409 => OperationOutcome::already_exists(format!("{resource} already exists")),
        _ => {
            if resp
                .error_message()
                .is_some_and(|m| m.to_lowercase().contains(ALREADY_EXISTS_INDICATOR))
            {
                return OperationOutcome::already_exists(format!("{resource} already exists"));
            }
            let message = match resp.error_message() {
                Some(m) => format!("failed to create {resource}: {m}"),
                None => format!("failed to create {resource} (HTTP {})", resp.status),
            };
            OperationOutcome::failed(message, Some(resp.body.clone()))
        }
    }
}

/// The `ConsistencyAmbiguous` branch: 200 on a create is only valid for
/// either a fresh creation or a pre-existing resource, so decide by the
/// timestamp gap. Resolved automatically, but logged as its own category
/// because the heuristic is empirical.
fn classify_ambiguous_ok(
    resource: &str,
    resp: &RawResponse,
    config: &ClassifierConfig,
) -> OperationOutcome {
    let gap = timestamp_gap(resp);
    match gap {
        Some(gap) if gap < config.ambiguity_threshold => {
            tracing::warn!(
                "ambiguous 200 on create for {resource}: timestamp gap {}ms, treating as fresh",
                gap.num_milliseconds()
            );
            OperationOutcome::created(format!("{resource} created"))
        }
        Some(gap) => {
            tracing::warn!(
                "ambiguous 200 on create for {resource}: timestamp gap {}ms, treating as pre-existing",
                gap.num_milliseconds()
            );
            OperationOutcome::already_exists(format!("{resource} already exists"))
        }
        None => {
            // A 200 without usable timestamps means the resource exists; only
            // fresh-looking timestamps rescue it as a creation.
            tracing::warn!(
                "ambiguous 200 on create for {resource} with no usable timestamps, treating as pre-existing"
            );
            OperationOutcome::already_exists(format!("{resource} already exists"))
        }
    }
}

/// `|updated_on - created_on|`, when both parse as RFC 3339.
fn timestamp_gap(resp: &RawResponse) -> Option<Duration> {
    let created = parse_timestamp(resp.field_str("created_on")?)?;
    let updated = parse_timestamp(resp.field_str("updated_on")?)?;
    Some((updated - created).abs())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
