use crate::error::{Error, Result};
use async_process::{Command, Stdio};
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::{ffi::OsStr, io::Read, path::Path, thread};
use tokio::sync::oneshot;
use tracing::debug;

lazy_static! {
    static ref URL_USERINFO_REGEXP: regex::Regex =
        regex::Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*://)[^/@]+@").unwrap();
}

/// 隐藏 URL 中的用户信息（token、密码），用于日志输出
pub fn redact(arg: &OsStr) -> String {
    URL_USERINFO_REGEXP
        .replace(&arg.to_string_lossy(), "${1}***@")
        .into_owned()
}

/// 一次 git 调用的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// stdout 与 stderr 合并后的输出
    pub output: String,
    /// 进程退出码，被信号终止时为 None
    pub code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// 非零退出时转换为 `Error::Sync`，消息即为原始输出
    pub fn into_output(self) -> Result<String> {
        if self.success() {
            Ok(self.output)
        } else {
            Err(Error::Sync(self.output))
        }
    }
}

/// Gitter 定义了 `git` 调用接口
///
/// `cwd` 为 None 时沿用调用方的工作目录，进程自身的工作目录永远不会被修改。
#[async_trait]
pub trait Gitter: Send + Sync {
    async fn git(&self, args: &[&OsStr], cwd: Option<&Path>) -> Result<CommandResult>;
}

/// `git` 可执行文件抽象，默认使用 PATH 中的 `git` 命令
#[derive(Debug, Clone)]
pub struct GitBinary {
    program: String,
}

impl Default for GitBinary {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitBinary {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Gitter for GitBinary {
    async fn git(&self, args: &[&OsStr], cwd: Option<&Path>) -> Result<CommandResult> {
        let redacted: Vec<String> = args.iter().map(|a| redact(a)).collect();
        debug!("exec {} {:?}, cwd: {:?}", self.program, redacted, cwd);

        // stdout 和 stderr 共用同一个管道，保留两者的交错顺序
        let (mut reader, writer) = std::io::pipe()?;
        let mut c = Command::new(&self.program);
        c.args(args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        if let Some(dir) = cwd {
            c.current_dir(dir);
        }

        let mut child = c.spawn()?;
        // 释放父进程持有的写端，否则读取永远不会遇到 EOF
        drop(c);

        // 在独立线程读取管道，不依赖具体的异步运行时
        let (tx, rx) = oneshot::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = tx.send(reader.read_to_end(&mut buf).map(|_| buf));
        });
        let out = rx.await.map_err(std::io::Error::other)??;
        let status = child.status().await?;

        Ok(CommandResult {
            output: String::from_utf8_lossy(&out).into_owned(),
            code: status.code(),
        })
    }
}
