//! Registry Adapters
//!
//! Two interchangeable skill sources behind one trait: a remote HTTPS tree
//! and a local filesystem mirror with the same layout (`index.json` at the
//! root, bodies addressed by each descriptor's `body_path`). Callers cannot
//! tell the variants apart; both verify fetched bodies against the
//! descriptor hash before handing them over.

mod http;
mod local;

pub use http::HttpRegistry;
pub use local::LocalRegistry;

use async_trait::async_trait;

use crate::config::{RegistryKind, RouterConfig};
use crate::error::{RouterError, RouterResult};
use crate::index::{sha256_hex, SkillDescriptor, SkillIndex};

/// A source of skill indexes and bodies
#[async_trait]
pub trait SkillRegistry: Send + Sync {
    /// Fetch and parse the registry index.
    async fn fetch_index(&self) -> RouterResult<SkillIndex>;

    /// Fetch a skill body and verify it against the descriptor's hash.
    async fn fetch_body(&self, skill: &SkillDescriptor) -> RouterResult<String>;
}

/// Build the configured adapter variant.
pub fn build_registry(config: &RouterConfig) -> RouterResult<Box<dyn SkillRegistry>> {
    Ok(match config.registry_kind {
        RegistryKind::Http => Box::new(HttpRegistry::new(
            &config.registry_url,
            config.fetch_timeout_ms,
        )?),
        RegistryKind::Local => Box::new(LocalRegistry::new(&config.registry_url)),
    })
}

/// Shared integrity check for fetched bodies.
pub(crate) fn verify_body(skill: &SkillDescriptor, body: String) -> RouterResult<String> {
    let actual = sha256_hex(body.as_bytes());
    if actual != skill.body_hash {
        return Err(RouterError::integrity_mismatch(
            &skill.id,
            &skill.body_hash,
            actual,
        ));
    }
    Ok(body)
}
