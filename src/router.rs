//! Routing Orchestration
//!
//! One `Router` value per process, built from configuration, owning the
//! cache handle and the registry adapter. Both the index and the winning
//! body go through the same three-tier retrieval: fresh cache, then the
//! registry (caching the result), then stale cache as the offline
//! fallback. When every tier fails the invocation produces nothing, which
//! is a normal outcome.

use crate::cache::{CacheStore, Freshness};
use crate::config::RouterConfig;
use crate::error::RouterResult;
use crate::index::{SkillDescriptor, SkillIndex};
use crate::injector::{format_injection, truncate_utf8};
use crate::matching::{rank_skills, select_best};
use crate::registry::{build_registry, SkillRegistry};

/// Prompts shorter than this (in chars, trimmed) are never routed; they are
/// almost always slash commands or typos.
const MIN_PROMPT_CHARS: usize = 5;

pub struct Router {
    config: RouterConfig,
    cache: CacheStore,
    registry: Box<dyn SkillRegistry>,
}

impl Router {
    /// Build a router from `SKILL_ROUTER_*` environment variables.
    pub fn from_env() -> RouterResult<Self> {
        Self::new(RouterConfig::from_env())
    }

    pub fn new(config: RouterConfig) -> RouterResult<Self> {
        let cache = CacheStore::new(
            &config.cache_dir,
            config.index_ttl_seconds,
            config.body_ttl_seconds,
        );
        let registry = build_registry(&config)?;
        Ok(Self {
            config,
            cache,
            registry,
        })
    }

    /// Route one prompt. `Ok(None)` means "inject nothing", which is the
    /// common case; callers treat errors the same way.
    pub async fn route(&self, prompt: &str) -> RouterResult<Option<String>> {
        if prompt.trim().chars().count() < MIN_PROMPT_CHARS {
            tracing::debug!("prompt too short, skipping");
            return Ok(None);
        }

        let Some(index) = self.load_index().await else {
            tracing::debug!("no index available, skipping");
            return Ok(None);
        };

        let ranked = rank_skills(prompt, &index, self.config.threshold);
        let Some(selection) = select_best(&ranked, self.config.ambiguity_gap) else {
            tracing::debug!("no skill above threshold");
            return Ok(None);
        };

        let Some(body) = self.load_body(selection.best).await else {
            tracing::debug!("could not load body for '{}'", selection.best.id);
            return Ok(None);
        };

        let body = truncate_utf8(&body, self.config.body_max_chars);
        tracing::debug!(
            "injecting '{}' (score {:.1}, ambiguous: {})",
            selection.best.id,
            selection.score,
            selection.is_ambiguous()
        );

        Ok(Some(format_injection(
            selection.best,
            selection.score,
            body,
            selection.runner_up,
        )))
    }

    /// Three-tier index retrieval: fresh cache, registry fetch, stale cache.
    async fn load_index(&self) -> Option<SkillIndex> {
        let (cached, freshness) = self.cache.get_index();
        if freshness == Freshness::Fresh {
            tracing::debug!("index served from fresh cache");
            return cached;
        }

        match self.registry.fetch_index().await {
            Ok(index) => {
                if let Err(e) = self.cache.put_index(&index) {
                    tracing::warn!("failed to cache index: {e}");
                }
                tracing::debug!("index fetched from registry");
                Some(index)
            }
            Err(e) => {
                tracing::debug!("index fetch failed: {e}");
                if freshness == Freshness::Stale {
                    tracing::debug!("serving stale cached index");
                    cached
                } else {
                    None
                }
            }
        }
    }

    /// Three-tier body retrieval for the winning skill.
    async fn load_body(&self, skill: &SkillDescriptor) -> Option<String> {
        let (cached, freshness) = self.cache.get_body(&skill.id, &skill.body_hash);
        if freshness == Freshness::Fresh {
            tracing::debug!("body '{}' served from fresh cache", skill.id);
            return cached;
        }

        match self.registry.fetch_body(skill).await {
            Ok(body) => {
                if let Err(e) = self.cache.put_body(&skill.id, &skill.body_hash, &body) {
                    tracing::warn!("failed to cache body '{}': {e}", skill.id);
                }
                tracing::debug!("body '{}' fetched from registry", skill.id);
                Some(body)
            }
            Err(e) => {
                tracing::debug!("body fetch failed for '{}': {e}", skill.id);
                if freshness == Freshness::Stale {
                    tracing::debug!("serving stale cached body for '{}'", skill.id);
                    cached
                } else {
                    None
                }
            }
        }
    }
}
