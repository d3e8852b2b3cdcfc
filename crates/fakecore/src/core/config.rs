use once_cell::sync::Lazy;
use std::env;

// Configuration for the test harness.
// Read once from the environment, then constant for the process.

/// Default seed for new payload factories
/// Read from FAKEBOT_SEED environment variable
/// Set it to replay the exact payloads of a failing CI run.
/// Default: unset (every factory draws from process entropy)
pub static DEFAULT_SEED: Lazy<Option<u64>> =
    Lazy::new(|| env::var("FAKEBOT_SEED").ok().and_then(|raw| raw.trim().parse().ok()));

/// Whether new fake APIs fail once their response queue is exhausted
/// Read from FAKEBOT_FAIL_WHEN_EMPTY environment variable ("1", "true", "yes")
/// Default: false (exhausted queue answers with the default success value)
pub static FAIL_WHEN_EMPTY: Lazy<bool> = Lazy::new(|| {
    env::var("FAKEBOT_FAIL_WHEN_EMPTY")
        .map(|raw| parse_flag(&raw))
        .unwrap_or(false)
});

/// Log filter for `init_test_logger`
/// Read from FAKEBOT_LOG environment variable (env_logger syntax)
/// Default: warn
pub static LOG_FILTER: Lazy<String> = Lazy::new(|| env::var("FAKEBOT_LOG").unwrap_or_else(|_| "warn".to_string()));

/// Parses a boolean environment flag.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Generator defaults
pub mod generators {
    /// Digits in a generated numeric id when the placeholder gives none
    pub const ID_DIGITS: usize = 9;

    /// Largest digit count that still fits an i64
    pub const MAX_ID_DIGITS: usize = 18;

    /// Length of a generated `file_id`
    pub const FILE_ID_LENGTH: usize = 36;

    /// Length of a generated `file_unique_id`
    pub const FILE_UNIQUE_ID_LENGTH: usize = 16;

    /// How far back `unixTime` may reach (seconds)
    pub const UNIX_TIME_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

    /// "Now" for seeded RNGs (2023-11-14T22:13:20Z), so seeded timestamps replay exactly
    pub const SEEDED_NOW: i64 = 1_700_000_000;

    /// Longest string a length argument may ask for (`token`, `fileId`, patterns)
    pub const MAX_TEXT_LENGTH: usize = 4096;

    /// Most words `sentence:<words>` may ask for
    pub const MAX_SENTENCE_WORDS: usize = 256;

    /// Upper bound used by `numberBetween` without a max argument
    pub const NUMBER_BETWEEN_MAX: i64 = 2_147_483_647;

    /// Maximum nesting of fragment and skeleton substitutions during resolution
    pub const MAX_RESOLVE_DEPTH: usize = 32;
}

/// Fake bot identity
pub mod bot {
    /// Name reported by the fake bot
    pub const NAME: &str = "fake";

    /// Token the fake bot pretends to hold
    pub const TOKEN: &str = "fake-token-for-testing";

    /// Default answer for a call with nothing queued
    pub fn default_response() -> serde_json::Value {
        serde_json::json!({ "ok": true, "result": true })
    }
}
