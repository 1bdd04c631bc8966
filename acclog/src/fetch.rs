use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Phrase logged by a training run right before it prints its experiment
/// folder, e.g.
/// `caching various config files to Experiments/crd_SERVER138-20200731-120845/.caching`.
pub const EXP_ID_MARKER: &str = "caching various config files";

// log path template on each server; the first `{}` is the project and the
// second the log id
const DEFAULT_SERVERS: &[(&str, &str)] = &[
    (
        "138",
        "wanghuan@155.33.198.138:/home/wanghuan/Projects/{}/Experiments/*-{}/log/log.txt",
    ),
    (
        "5",
        "wanghuan@155.33.199.5:/home3/wanghuan/Projects/{}/Experiments/*-{}/log/log.txt",
    ),
    (
        "155",
        "yulun@155.33.198.115:/media/yulun/12THD1/Huan_Projects/{}/Experiments/*-{}/log/log.txt",
    ),
    // cluster
    ("clu", ""),
    (
        "170",
        "huan@155.33.198.170:/home/wanghuan/Projects/{}/Experiments/*-{}/log/log.txt",
    ),
];

/// A `server:project:log_id` comparison target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub server: String,
    pub project: String,
    pub log_id: String,
}

impl Target {
    pub fn parse(token: &str) -> Result<Self, Report> {
        let parts: Vec<_> = token.split(':').collect();
        match parts.as_slice() {
            [server, project, log_id]
                if !server.is_empty()
                    && !project.is_empty()
                    && !log_id.is_empty() =>
            {
                Ok(Self {
                    server: server.to_string(),
                    project: project.to_string(),
                    log_id: log_id.to_string(),
                })
            }
            _ => eyre::bail!(
                "invalid target {:?}: expected 'server:project:log_id'",
                token
            ),
        }
    }
}

/// Maps server identifiers to remote log path templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServerTable {
    templates: BTreeMap<String, String>,
}

impl Default for ServerTable {
    fn default() -> Self {
        let templates = DEFAULT_SERVERS
            .iter()
            .map(|(server, template)| (server.to_string(), template.to_string()))
            .collect();
        Self { templates }
    }
}

impl ServerTable {
    /// Loads a table from a JSON object like `{"138": "user@host:..."}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("open server table {}", path.display()))?;
        let buf = std::io::BufReader::new(file);
        let table = serde_json::from_reader(buf)
            .wrap_err_with(|| format!("parse server table {}", path.display()))?;
        Ok(table)
    }

    pub fn remote_path(&self, target: &Target) -> Result<String, Report> {
        let template = match self.templates.get(&target.server) {
            Some(template) => template,
            None => eyre::bail!("unknown server {:?}", target.server),
        };
        if template.is_empty() {
            eyre::bail!("server {:?} has no log path configured", target.server);
        }
        if template.matches("{}").count() != 2 {
            eyre::bail!(
                "log path template for server {:?} should have two '{{}}' placeholders: {:?}",
                target.server,
                template
            );
        }
        let path = template
            .replacen("{}", &target.project, 1)
            .replacen("{}", &target.log_id, 1);
        Ok(path)
    }
}

/// Copies a remote file and returns its contents.
pub trait Fetcher {
    fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, Report>;
}

/// Fetches files with `scp`.
#[derive(Debug, Clone)]
pub struct ScpFetcher {
    staging: PathBuf,
}

impl ScpFetcher {
    /// `staging` is the local file `scp` writes to before it's read back.
    pub fn new(staging: impl Into<PathBuf>) -> Self {
        Self {
            staging: staging.into(),
        }
    }
}

impl Fetcher for ScpFetcher {
    fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, Report> {
        tracing::info!("scp {} {}", remote_path, self.staging.display());
        let status = Command::new("scp")
            .arg(remote_path)
            .arg(&self.staging)
            .status()
            .wrap_err("run scp")?;
        if !status.success() {
            eyre::bail!("scp {:?} failed: {}", remote_path, status);
        }
        let contents = std::fs::read(&self.staging)
            .wrap_err_with(|| format!("read {}", self.staging.display()))?;
        std::fs::remove_file(&self.staging)
            .wrap_err_with(|| format!("remove {}", self.staging.display()))?;
        Ok(contents)
    }
}

/// Experiment id (e.g. `SERVER138-20200731-120845`) found in the first line
/// containing [`EXP_ID_MARKER`].
pub fn exp_id(contents: &str) -> Result<String, Report> {
    let line = contents
        .lines()
        .find(|line| line.contains(EXP_ID_MARKER))
        .ok_or_else(|| {
            eyre::eyre!("no line with {:?} in fetched log", EXP_ID_MARKER)
        })?;
    let (_, rest) = line.split_once("SERVER").ok_or_else(|| {
        eyre::eyre!("no SERVER token in experiment line {:?}", line)
    })?;
    let id = rest.split('/').next().unwrap_or(rest);
    Ok(format!("SERVER{}", id))
}

/// A fetched log stored locally as `log_<exp_id>.txt`.
#[derive(Debug, Clone)]
pub struct FetchedLog {
    pub exp_id: String,
    pub path: PathBuf,
    pub contents: String,
}

/// Fetches the log of `target` and stores it in `output_dir`.
pub fn fetch_log(
    target: &Target,
    servers: &ServerTable,
    fetcher: &impl Fetcher,
    output_dir: impl AsRef<Path>,
) -> Result<FetchedLog, Report> {
    let remote_path = servers.remote_path(target)?;
    let bytes = fetcher
        .fetch(&remote_path)
        .wrap_err_with(|| format!("fetch {}", remote_path))?;
    let contents = String::from_utf8(bytes)
        .wrap_err_with(|| format!("log {} is not valid utf-8", remote_path))?;

    let exp_id = exp_id(&contents)
        .wrap_err_with(|| format!("find experiment id in {}", remote_path))?;
    let path = output_dir.as_ref().join(format!("log_{}.txt", exp_id));
    std::fs::write(&path, &contents)
        .wrap_err_with(|| format!("write {}", path.display()))?;
    tracing::info!("fetched {} to {}", remote_path, path.display());

    Ok(FetchedLog {
        exp_id,
        path,
        contents,
    })
}
