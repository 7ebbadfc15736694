//! Local Registry
//!
//! Filesystem mirror of the registry tree, used for development and fully
//! offline setups. The layout matches the HTTP variant exactly: `index.json`
//! at the root, bodies at their `body_path` relative to it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{RouterError, RouterResult};
use crate::index::{parse_index, SkillDescriptor, SkillIndex};
use crate::registry::{verify_body, SkillRegistry};

pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, relative: &str) -> RouterResult<String> {
        let path = self.root.join(relative);
        if !path.exists() {
            return Err(RouterError::not_found(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(&path)?)
    }
}

#[async_trait]
impl SkillRegistry for LocalRegistry {
    async fn fetch_index(&self) -> RouterResult<SkillIndex> {
        let text = self.read("index.json")?;
        parse_index(&text)
    }

    async fn fetch_body(&self, skill: &SkillDescriptor) -> RouterResult<String> {
        let body = self.read(&skill.body_path)?;
        verify_body(skill, body)
    }
}
