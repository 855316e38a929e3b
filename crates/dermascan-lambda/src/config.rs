use std::env;

use jiff::SignedDuration;

const DEFAULT_BUCKET: &str = "dermascan";
const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_secs(3600);

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub bucket: String,
    pub region: String,
    /// Idle time after which an in-memory session is dropped.
    pub session_ttl: SignedDuration,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset, blank or unparsable
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let session_ttl = lookup("DERMASCAN_SESSION_TTL_SECS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|secs| *secs > 0)
            .map(SignedDuration::from_secs)
            .unwrap_or(DEFAULT_SESSION_TTL);

        Self {
            bucket: get("DERMASCAN_BUCKET", DEFAULT_BUCKET),
            region: get("AWS_REGION", DEFAULT_REGION),
            session_ttl,
        }
    }
}
