//! gitsync 负责把本地仓库与远端保持同步：目录不存在时 `git clone`，存在时 `git pull`。
//!
//! ```no_run
//! use gitsync::{GitBinary, Repository, RepoSyncer};
//!
//! # async fn run() -> gitsync::Result<()> {
//! let repo = Repository::new("https://example.com/x.git", "/tmp/repo");
//! let output = RepoSyncer::new(GitBinary::default()).sync(&repo).await?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod gitter;
mod repo_github;
mod repo_syncer;
mod repository;
#[cfg(test)]
mod testing;

pub use error::*;
pub use gitter::*;
pub use repo_github::*;
pub use repo_syncer::*;
pub use repository::*;
