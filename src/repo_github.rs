use crate::{
    error::{Error, Result},
    repo_syncer::SyncTarget,
};
use lazy_static::lazy_static;
use std::{
    fmt,
    path::{Path, PathBuf},
};

lazy_static! {
    static ref NWO_REGEXP: regex::Regex =
        regex::Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").unwrap();
}

static GITHUB_HOST: &str = "github.com";

/// Github 仓库标识 `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Nwo {
    owner: String,
    name: String,
}

impl Nwo {
    fn parse(nwo: &str) -> Result<Self> {
        let caps = NWO_REGEXP.captures(nwo).ok_or_else(|| {
            Error::Configuration(format!("invalid github repository '{}', expect owner/name", nwo))
        })?;
        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }

    fn remote(&self, token: Option<&str>, suffix: &str) -> String {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => format!(
                "https://{}:x-oauth-basic@{}/{}/{}{}",
                token, GITHUB_HOST, self.owner, self.name, suffix
            ),
            None => format!("https://{}/{}/{}{}", GITHUB_HOST, self.owner, self.name, suffix),
        }
    }

    fn dir(&self, archive_dir: &Path, kind: &str) -> PathBuf {
        archive_dir.join(kind).join(&self.owner).join(&self.name)
    }
}

/// Github 仓库，归档到 `<archive_dir>/repositories/<owner>/<name>`
#[derive(Clone)]
pub struct GithubRepository {
    nwo: Nwo,
    token: Option<String>,
    archive_dir: PathBuf,
}

impl GithubRepository {
    pub fn new(nwo: &str, token: Option<String>, archive_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            nwo: Nwo::parse(nwo)?,
            token,
            archive_dir: archive_dir.into(),
        })
    }

    pub fn nwo(&self) -> String {
        format!("{}/{}", self.nwo.owner, self.nwo.name)
    }

    /// 同一仓库对应的 wiki
    pub fn wiki(&self) -> GithubWiki {
        GithubWiki {
            repo: self.clone(),
        }
    }
}

impl fmt::Debug for GithubRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubRepository")
            .field("nwo", &self.nwo())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("archive_dir", &self.archive_dir)
            .finish()
    }
}

impl SyncTarget for GithubRepository {
    fn target_directory(&self) -> Result<PathBuf> {
        Ok(self.nwo.dir(&self.archive_dir, "repositories"))
    }

    fn remote_url(&self) -> Result<String> {
        Ok(self.nwo.remote(self.token.as_deref(), ".git"))
    }
}

/// Github wiki，归档到 `<archive_dir>/wikis/<owner>/<name>`
#[derive(Debug, Clone)]
pub struct GithubWiki {
    repo: GithubRepository,
}

impl GithubWiki {
    pub fn new(nwo: &str, token: Option<String>, archive_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(GithubRepository::new(nwo, token, archive_dir)?.wiki())
    }
}

impl SyncTarget for GithubWiki {
    fn target_directory(&self) -> Result<PathBuf> {
        Ok(self.repo.nwo.dir(&self.repo.archive_dir, "wikis"))
    }

    fn remote_url(&self) -> Result<String> {
        Ok(self.repo.nwo.remote(self.repo.token.as_deref(), ".wiki.git"))
    }
}
