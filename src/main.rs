use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gitsync::{
    config::{self, Config, Github},
    GitBinary, RepoSyncer, Repository, SyncTarget,
};
use std::{path::PathBuf, process::exit};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "gitsync", version, about = "Clone a repository if absent, pull it if present")]
struct Args {
    /// git 可执行文件
    #[clap(long, global = true)]
    git: Option<String>,

    /// 日志级别，支持 EnvFilter 语法
    #[clap(long, global = true)]
    log_level: Option<String>,

    /// 日志目录，设置后日志按天滚动写入 gitsync.log
    #[clap(long, global = true)]
    log_dir: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sync a repository from an explicit remote
    Repo {
        #[clap(long)]
        remote: String,
        #[clap(long)]
        path: String,
    },
    /// Sync a github repository (or its wiki) into the archive directory
    Github {
        /// owner/name
        nwo: String,
        #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[clap(long)]
        archive_dir: Option<String>,
        #[clap(long)]
        wiki: bool,
    },
    /// Sync the target described by a yaml config file
    Config { file: PathBuf },
}

impl Command {
    fn into_config(self) -> Result<Config> {
        let config = match self {
            Command::Repo { remote, path } => Config {
                repository: Some(Repository::new(&remote, &path)),
                ..Default::default()
            },
            Command::Github {
                nwo,
                token,
                archive_dir,
                wiki,
            } => Config {
                github: Some(Github {
                    nwo,
                    token,
                    archive_dir,
                    wiki,
                }),
                ..Default::default()
            },
            Command::Config { file } => config::load_config(&file)?,
        };
        Ok(config)
    }
}

fn init_tracing(level: &str, dir: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level))?;

    match dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gitsync.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.command.into_config()?;
    let level = args
        .log_level
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let log_dir = args.log_dir.or_else(|| config.log.dir.clone());
    let _guard = init_tracing(&level, log_dir.as_deref())?;

    let target: Box<dyn SyncTarget> = config.target()?;
    let git = args
        .git
        .or_else(|| config.git.clone())
        .map(GitBinary::new)
        .unwrap_or_default();

    let output = RepoSyncer::new(git).sync(target.as_ref()).await?;
    print!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{}", format!("{:#}", e).trim_end());
        exit(1)
    }
}
