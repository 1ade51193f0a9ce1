use crate::{
    error::{Error, Result},
    repo_syncer::SyncTarget,
};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref REMOTE_NAME_REGEXP: regex::Regex =
        regex::Regex::new(r"([^/:\\]+?)(?:\.git)?[/\\]*$").unwrap();
}

/// 推导 `git clone <remote>` 默认使用的目录名
///
/// # Example
/// ```rust
/// assert_eq!(Some("x".to_string()), gitsync::directory_name("https://example.com/x.git"));
/// assert_eq!(Some("repo".to_string()), gitsync::directory_name("git@github.com:owner/repo.git"));
/// ```
pub fn directory_name(remote: &str) -> Option<String> {
    REMOTE_NAME_REGEXP
        .captures(remote)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty() && name != "." && name != "..")
}

/// 普通仓库，直接给定远端地址和本地目录
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Repository {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub remote: String,
    /// 本地目录，优先级高于 `root`
    pub path: Option<String>,
    /// 父目录，本地目录为 `<root>/<remote 目录名>`
    pub root: Option<String>,
}

impl Repository {
    pub fn new(remote: &str, path: &str) -> Self {
        Self {
            name: directory_name(remote).unwrap_or_default(),
            remote: remote.to_string(),
            path: Some(path.to_string()),
            root: None,
        }
    }
}

impl SyncTarget for Repository {
    fn target_directory(&self) -> Result<PathBuf> {
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let root = self.root.as_deref().filter(|r| !r.is_empty()).ok_or_else(|| {
            Error::Configuration(format!(
                "target_directory: repository '{}' has neither path nor root",
                self.name
            ))
        })?;
        let name = directory_name(&self.remote).ok_or_else(|| {
            Error::Configuration(format!(
                "target_directory: cannot derive directory name from remote '{}'",
                self.remote
            ))
        })?;
        Ok(Path::new(root).join(name))
    }

    fn remote_url(&self) -> Result<String> {
        if self.remote.is_empty() {
            return Err(Error::Configuration(format!(
                "remote_url: repository '{}' has no remote",
                self.name
            )));
        }
        Ok(self.remote.clone())
    }
}
