//! Prompt-Time Skill Router
//!
//! A short-lived stdin/stdout hook: before the assistant processes a user
//! prompt, the router scores the prompt against a registry of skill
//! descriptors and injects at most one skill document as a system message.
//! Routing is deterministic, bilingual (English/Chinese), works offline
//! through a stale-tolerant disk cache, and never blocks the prompt: any
//! failure means an empty emission and a zero exit.
//!
//! Architecture:
//! - config:   `SKILL_ROUTER_*` environment configuration
//! - hook:     stdin/stdout JSON envelope
//! - index:    wire-format parsing into validated skill descriptors
//! - registry: HTTP and local-mirror skill sources behind one trait
//! - cache:    disk cache with TTL freshness and content-hash validation
//! - matching: language detection, five-layer scoring, selection
//! - injector: UTF-8-safe body truncation and message formatting
//! - router:   per-invocation orchestration with three-tier retrieval

pub mod cache;
pub mod config;
pub mod error;
pub mod hook;
pub mod index;
pub mod injector;
pub mod matching;
pub mod registry;
pub mod router;

pub use config::{RegistryKind, RouterConfig};
pub use error::{RouterError, RouterResult};
pub use router::Router;
