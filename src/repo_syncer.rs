use crate::{
    error::{Error, Result},
    gitter::{GitBinary, Gitter},
};
use std::{ffi::OsStr, path::Path, path::PathBuf, time};
use tracing::{error, info};

/// SyncTarget 描述一个需要同步的仓库
///
/// 具体实现需要提供本地目录和远端地址，未覆盖的访问器会返回
/// `Error::Configuration`，在任何 git 进程启动之前失败。
pub trait SyncTarget: Send + Sync {
    /// 仓库在本地的目录
    fn target_directory(&self) -> Result<PathBuf> {
        Err(Error::not_implemented("target_directory"))
    }

    /// clone 使用的远端地址，只在 clone 分支被读取
    fn remote_url(&self) -> Result<String> {
        Err(Error::not_implemented("remote_url"))
    }
}

/// 一次同步执行的动作，由调用时目录是否存在决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Clone,
    Pull,
}

impl SyncAction {
    pub fn detect(dir: &Path) -> Self {
        if dir.is_dir() {
            SyncAction::Pull
        } else {
            SyncAction::Clone
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::Clone => "clone",
            SyncAction::Pull => "pull",
        }
    }
}

/// RepoSyncer 负责 clone 或 pull 一个仓库
pub struct RepoSyncer<G = GitBinary> {
    git: G,
}

impl Default for RepoSyncer<GitBinary> {
    fn default() -> Self {
        Self::new(GitBinary::default())
    }
}

impl<G: Gitter> RepoSyncer<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    pub fn gitter(&self) -> &G {
        &self.git
    }

    /// 目录存在时在该目录下执行 `git pull`，否则执行
    /// `git clone <remote> <dir>`，成功时返回 git 的合并输出
    pub async fn sync(&self, target: &dyn SyncTarget) -> Result<String> {
        let dir = target.target_directory()?;
        if dir.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "target_directory: must not be empty".to_string(),
            ));
        }

        let now = time::Instant::now();
        let action = SyncAction::detect(&dir);
        let result = match action {
            SyncAction::Pull => {
                self.git
                    .git(&[OsStr::new("pull")], Some(dir.as_path()))
                    .await
            }
            SyncAction::Clone => {
                let remote = target.remote_url()?;
                if remote.is_empty() {
                    return Err(Error::Configuration(
                        "remote_url: must not be empty".to_string(),
                    ));
                }
                self.git
                    .git(
                        &[OsStr::new("clone"), OsStr::new(&remote), dir.as_os_str()],
                        None,
                    )
                    .await
            }
        };

        let output = result.and_then(|r| r.into_output());
        match &output {
            Ok(_) => info!(
                "git {}: elapsed {} => {}",
                action.as_str(),
                humantime::format_duration(now.elapsed()),
                dir.display(),
            ),
            // git 的输出随错误返回给调用方，这里不重复记录
            Err(Error::Sync(_)) => error!(
                "git {} exited with non-zero status in '{}'",
                action.as_str(),
                dir.display(),
            ),
            Err(e) => error!(
                "failed to execute git {} command in '{}', err: {}",
                action.as_str(),
                dir.display(),
                e,
            ),
        }
        output
    }
}
