use crate::fetch::{ServerTable, Target};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::path::PathBuf;

pub const DEFAULT_EXPERIMENTS_DIR: &str = "Experiments";
pub const DEFAULT_METRIC_KEY: &str = "Acc1";
pub const DEFAULT_WINDOW: usize = 1;

/// Inputs of the Result Collector.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// directory holding one folder per experiment run
    pub experiments_dir: PathBuf,
    /// only experiments whose folder name contains this are collected
    pub keyword: String,
    /// substring of the log line reporting the accuracies, e.g. `Epoch 240`
    pub marker: String,
    /// server label printed in the group header
    pub server: Option<String>,
    /// project name printed in the group header; the current project if unset
    pub project: Option<String>,
}

impl CollectConfig {
    pub fn new(keyword: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            experiments_dir: PathBuf::from(DEFAULT_EXPERIMENTS_DIR),
            keyword: keyword.into(),
            marker: marker.into(),
            server: None,
            project: None,
        }
    }

    pub fn set_server(&mut self, server: impl Into<String>) {
        self.server = Some(server.into());
    }

    pub fn set_project(&mut self, project: impl Into<String>) {
        self.project = Some(project.into());
    }

    pub fn set_experiments_dir(&mut self, experiments_dir: impl Into<PathBuf>) {
        self.experiments_dir = experiments_dir.into();
    }
}

/// Inputs of the remote comparison.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub targets: Vec<Target>,
    pub window: usize,
    pub key: String,
    pub servers: ServerTable,
    pub output_dir: PathBuf,
    /// if set, the figure is saved here instead of shown
    pub save: Option<PathBuf>,
}

impl CompareConfig {
    /// Builds a config from positional inputs: each is either a smoothing
    /// window (a bare integer; the last one wins) or a
    /// `server:project:log_id` target.
    pub fn from_inputs<'a>(
        inputs: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, Report> {
        let mut window = DEFAULT_WINDOW;
        let mut targets = Vec::new();
        for input in inputs {
            if input.contains(':') {
                targets.push(Target::parse(input)?);
            } else {
                window = input.parse::<usize>().wrap_err_with(|| {
                    format!("invalid smoothing window {:?}", input)
                })?;
                if window == 0 {
                    eyre::bail!("smoothing window should be at least 1");
                }
            }
        }
        if targets.is_empty() {
            eyre::bail!("there should be at least one 'server:project:log_id'");
        }

        Ok(Self {
            targets,
            window,
            key: String::from(DEFAULT_METRIC_KEY),
            servers: ServerTable::default(),
            output_dir: PathBuf::from("."),
            save: None,
        })
    }
}
