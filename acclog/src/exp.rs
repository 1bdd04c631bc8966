use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::path::Path;

const SERVER_TOKEN: &str = "SERVER";
const NAME_SEP: &str = "_SERVER";

/// An experiment directory named `<name>_SERVER<id>-<timestamp>`, e.g.
/// `Experiments/kd-vgg13vgg8-cifar100-Temp40_SERVER5-20200727-220318`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentPath {
    path: String,
    name: String,
    run_id: String,
}

impl ExperimentPath {
    pub fn parse(path: &str) -> Result<Self, Report> {
        let trimmed = path.trim_matches('/');
        if !trimmed.contains(SERVER_TOKEN) {
            eyre::bail!(
                "experiment path {:?} should contain {:?}",
                path,
                SERVER_TOKEN
            );
        }

        // the run id is whatever comes after the last '-'
        let run_id = trimmed.rsplit('-').next().unwrap_or_default();
        if run_id.is_empty() || !run_id.bytes().all(|b| b.is_ascii_digit()) {
            eyre::bail!(
                "experiment path {:?} should end with a numeric run id, found {:?}",
                path,
                run_id
            );
        }

        let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
        let name = base.split(NAME_SEP).next().unwrap_or(base);

        Ok(Self {
            path: path.to_string(),
            name: name.to_string(),
            run_id: run_id.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Log file written by the training run.
    pub fn log_file(&self) -> String {
        format!("{}/log/log.txt", self.path)
    }
}

/// Lists the entries of `experiments_dir` whose name contains `keyword`,
/// sorted lexicographically.
pub fn discover(
    experiments_dir: impl AsRef<Path>,
    keyword: &str,
) -> Result<Vec<ExperimentPath>, Report> {
    let experiments_dir = experiments_dir.as_ref();
    let read_dir = std::fs::read_dir(experiments_dir).wrap_err_with(|| {
        format!("read experiments directory {}", experiments_dir.display())
    })?;

    let mut paths = Vec::new();
    for entry in read_dir {
        let entry = entry.wrap_err("incorrect directory entry")?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        // hidden entries are never matched by a shell glob
        if file_name.starts_with('.') || !file_name.contains(keyword) {
            continue;
        }
        paths.push(format!("{}/{}", experiments_dir.display(), file_name));
    }
    paths.sort();
    tracing::debug!(
        "found {} experiments matching {:?} in {}",
        paths.len(),
        keyword,
        experiments_dir.display()
    );

    paths.iter().map(|path| ExperimentPath::parse(path)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub run_id: String,
    pub last: f64,
    pub best: f64,
}

/// Repeated runs of the same experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentGroup {
    pub name: String,
    pub runs: Vec<Run>,
}

impl ExperimentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: Vec::new(),
        }
    }

    pub fn run_ids(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().map(|run| run.run_id.as_str())
    }

    pub fn last(&self) -> Vec<f64> {
        self.runs.iter().map(|run| run.last).collect()
    }

    pub fn best(&self) -> Vec<f64> {
        self.runs.iter().map(|run| run.best).collect()
    }
}

/// Groups experiments by name, keeping the order in which names first
/// appear.
pub fn group(
    paths: &[ExperimentPath],
) -> Vec<(String, Vec<&ExperimentPath>)> {
    let mut groups: Vec<(String, Vec<&ExperimentPath>)> = Vec::new();
    for path in paths {
        match groups.iter_mut().find(|(name, _)| name == path.name()) {
            Some((_, members)) => members.push(path),
            None => groups.push((path.name().to_string(), vec![path])),
        }
    }
    groups
}
