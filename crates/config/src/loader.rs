//! Read [`RouterConfig`] from environment variables.

use crate::{
    error::{Error, Result},
    schema::{HistoryConfig, LoggingToggles, RouterConfig, RoutingPolicy},
};

pub const DELIVERY_QUEUE: &str = "TRIAGE_DELIVERY_QUEUE";
pub const ESCALATION_QUEUE: &str = "TRIAGE_ESCALATION_QUEUE";
pub const CREDENTIAL_NAME: &str = "TRIAGE_CREDENTIAL_NAME";
pub const HISTORY_TABLE: &str = "TRIAGE_HISTORY_TABLE";
pub const HISTORY_REGION: &str = "TRIAGE_HISTORY_REGION";
pub const HISTORY_TTL_ATTRIBUTE: &str = "TRIAGE_HISTORY_TTL_ATTRIBUTE";
pub const HISTORY_TTL_SECS: &str = "TRIAGE_HISTORY_TTL_SECS";
pub const HISTORY_WINDOW: &str = "TRIAGE_HISTORY_WINDOW";
pub const USE_DEFAULT_AGENT: &str = "TRIAGE_USE_DEFAULT_AGENT";
pub const DEFAULT_AGENT: &str = "TRIAGE_DEFAULT_AGENT";
pub const LOG_CLASSIFIER: &str = "TRIAGE_LOG_CLASSIFIER";
pub const LOG_AGENT_CALLS: &str = "TRIAGE_LOG_AGENT_CALLS";

/// Load configuration from the process environment.
pub fn from_env() -> Result<RouterConfig> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// The seam exists so tests can supply variables without touching the
/// process environment.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<RouterConfig> {
    let delivery_queue = lookup(DELIVERY_QUEUE)
        .filter(|v| !v.trim().is_empty())
        .ok_or(Error::missing(DELIVERY_QUEUE))?;

    let escalation_queue = lookup(ESCALATION_QUEUE)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("{delivery_queue}-escalation"));

    let defaults = RouterConfig::default();
    let credential_name = lookup(CREDENTIAL_NAME).unwrap_or(defaults.credential_name);

    let window_pairs = match lookup(HISTORY_WINDOW) {
        Some(raw) => parse_window(HISTORY_WINDOW, &raw)?,
        None => HistoryConfig::default().window_pairs,
    };

    let ttl_secs = lookup(HISTORY_TTL_SECS)
        .map(|raw| parse_u64(HISTORY_TTL_SECS, &raw))
        .transpose()?;

    let use_default_agent_if_none = lookup(USE_DEFAULT_AGENT)
        .map(|raw| parse_bool(USE_DEFAULT_AGENT, &raw))
        .transpose()?
        .unwrap_or(false);

    let logging_defaults = LoggingToggles::default();
    let classifier_decisions = lookup(LOG_CLASSIFIER)
        .map(|raw| parse_bool(LOG_CLASSIFIER, &raw))
        .transpose()?
        .unwrap_or(logging_defaults.classifier_decisions);
    let agent_invocations = lookup(LOG_AGENT_CALLS)
        .map(|raw| parse_bool(LOG_AGENT_CALLS, &raw))
        .transpose()?
        .unwrap_or(logging_defaults.agent_invocations);

    Ok(RouterConfig {
        delivery_queue,
        escalation_queue,
        credential_name,
        history: HistoryConfig {
            table: lookup(HISTORY_TABLE),
            region: lookup(HISTORY_REGION),
            ttl_attribute: lookup(HISTORY_TTL_ATTRIBUTE),
            ttl_secs,
            window_pairs,
        },
        policy: RoutingPolicy {
            use_default_agent_if_none,
            default_agent: lookup(DEFAULT_AGENT),
        },
        logging: LoggingToggles {
            classifier_decisions,
            agent_invocations,
        },
    })
}

fn parse_window(name: &'static str, raw: &str) -> Result<usize> {
    let parsed: usize = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(name, raw, "expected a positive integer"))?;
    if parsed == 0 {
        return Err(Error::invalid(name, raw, "window must be at least 1 pair"));
    }
    Ok(parsed)
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid(name, raw, "expected an unsigned integer"))
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid(name, raw, "expected a boolean")),
    }
}
