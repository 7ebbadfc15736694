//! Router Configuration
//!
//! All settings come from `SKILL_ROUTER_*` environment variables, read once
//! at startup. Unset or unparseable values fall back to their documented
//! defaults; configuration can never abort a routing invocation.

use std::path::PathBuf;

/// Default HTTP registry base (raw file hosting of the skills repository)
pub const DEFAULT_HTTP_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/krishna-505/cloud-skills/main";

/// Default local-mirror directory when `registry_kind = local` and no path is set
pub const DEFAULT_LOCAL_REGISTRY_DIR: &str = "./cloud-skills";

/// Which registry adapter variant to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// Remote HTTPS source serving `index.json` and per-skill body documents
    Http,
    /// Local filesystem mirror with the same layout
    Local,
}

impl RegistryKind {
    /// Parse the `SKILL_ROUTER_REGISTRY_KIND` value; unknown values are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "http" => Some(Self::Http),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Runtime configuration, one record per process
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub registry_kind: RegistryKind,
    /// Base URL (http) or root directory (local) of the registry
    pub registry_url: String,
    /// Cache root directory
    pub cache_dir: PathBuf,
    /// Index cache TTL in seconds
    pub index_ttl_seconds: u64,
    /// Body cache TTL in seconds
    pub body_ttl_seconds: u64,
    /// Hard timeout for each registry HTTP request
    pub fetch_timeout_ms: u64,
    /// Minimum weighted score for a skill to be injected
    pub threshold: f64,
    /// Score gap under which the top two candidates count as ambiguous
    pub ambiguity_gap: f64,
    /// Maximum injected body size in bytes (cut at a char boundary)
    pub body_max_chars: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            registry_kind: RegistryKind::Http,
            registry_url: DEFAULT_HTTP_REGISTRY_URL.to_string(),
            cache_dir: default_cache_dir(),
            index_ttl_seconds: 86_400,
            body_ttl_seconds: 604_800,
            fetch_timeout_ms: 2_000,
            threshold: 18.0,
            ambiguity_gap: 10.0,
            body_max_chars: 8_000,
        }
    }
}

impl RouterConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(raw) = std::env::var("SKILL_ROUTER_REGISTRY_KIND") {
            match RegistryKind::parse(&raw) {
                Some(kind) => cfg.registry_kind = kind,
                None => tracing::warn!("unrecognized registry kind '{raw}', using http"),
            }
        }

        cfg.registry_url = match std::env::var("SKILL_ROUTER_REGISTRY_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => match cfg.registry_kind {
                RegistryKind::Http => DEFAULT_HTTP_REGISTRY_URL.to_string(),
                RegistryKind::Local => DEFAULT_LOCAL_REGISTRY_DIR.to_string(),
            },
        };

        if let Ok(dir) = std::env::var("SKILL_ROUTER_CACHE_DIR") {
            if !dir.trim().is_empty() {
                cfg.cache_dir = PathBuf::from(dir);
            }
        }

        cfg.index_ttl_seconds = parse_value(
            env_raw("SKILL_ROUTER_INDEX_TTL_SECONDS"),
            cfg.index_ttl_seconds,
        );
        cfg.body_ttl_seconds = parse_value(
            env_raw("SKILL_ROUTER_BODY_TTL_SECONDS"),
            cfg.body_ttl_seconds,
        );
        cfg.fetch_timeout_ms = parse_value(
            env_raw("SKILL_ROUTER_FETCH_TIMEOUT_MS"),
            cfg.fetch_timeout_ms,
        );
        cfg.threshold = parse_value(env_raw("SKILL_ROUTER_THRESHOLD"), cfg.threshold);
        cfg.ambiguity_gap = parse_value(env_raw("SKILL_ROUTER_AMBIGUITY_GAP"), cfg.ambiguity_gap);
        cfg.body_max_chars = parse_value(env_raw("SKILL_ROUTER_BODY_MAX_CHARS"), cfg.body_max_chars);

        cfg
    }
}

fn env_raw(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an optional raw value, keeping the default when absent or invalid.
fn parse_value<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Per-user cache root: `<platform cache dir>/skill-router`, with a temp-dir
/// fallback for environments without a resolvable home.
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("skill-router")
}
