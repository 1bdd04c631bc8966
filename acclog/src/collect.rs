use crate::config::CollectConfig;
use crate::exp::{self, ExperimentGroup, ExperimentPath, Run};
use crate::log::{self, BEST_ACCURACY, LAST_ACCURACY};
use crate::metrics::{self, Digits};
use crate::util;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

/// Last and best accuracy reported in the marker line of a log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    pub last: f64,
    pub best: f64,
}

/// Scans `log_file` for the first line containing `marker` and extracts its
/// accuracies. Returns `None` if no line contains the marker.
pub fn extract_accuracy(
    log_file: &str,
    marker: &str,
) -> Result<Option<Accuracy>, Report> {
    let file =
        File::open(log_file).wrap_err_with(|| format!("open {}", log_file))?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.wrap_err_with(|| format!("read {}", log_file))?;
        if !line.contains(marker) {
            continue;
        }
        let location = || format!("{}:{}: {:?}", log_file, index + 1, line);

        let last = log::extract_first(LAST_ACCURACY, &line)
            .wrap_err_with(location)?
            .ok_or_else(|| {
                eyre::eyre!("no last accuracy in marker line {}", location())
            })?;

        if log::select(BEST_ACCURACY, &line).is_none() {
            eyre::bail!(
                "unsupported log format (no best accuracy key) in {}",
                location()
            );
        }
        let best = log::extract_first(BEST_ACCURACY, &line)
            .wrap_err_with(location)?
            .ok_or_else(|| {
                eyre::eyre!("no best accuracy value in {}", location())
            })?;

        return Ok(Some(Accuracy { last, best }));
    }
    Ok(None)
}

pub struct Collector {
    config: CollectConfig,
}

impl Collector {
    pub fn new(config: CollectConfig) -> Self {
        Self { config }
    }

    /// Collects and reports every experiment group, writing the report to
    /// `out`.
    pub fn run(
        &self,
        out: &mut impl Write,
    ) -> Result<Vec<ExperimentGroup>, Report> {
        let paths =
            exp::discover(&self.config.experiments_dir, &self.config.keyword)?;
        let mut groups = Vec::new();
        for (name, members) in exp::group(&paths) {
            writeln!(out, "[{}]", name)?;
            let group = self.collect_group(name, &members, out)?;
            write!(out, "{}", self.report(&group)?)?;
            writeln!(out)?;
            groups.push(group);
        }
        Ok(groups)
    }

    fn collect_group(
        &self,
        name: String,
        members: &[&ExperimentPath],
        out: &mut impl Write,
    ) -> Result<ExperimentGroup, Report> {
        let mut group = ExperimentGroup::new(name);
        for exp in members {
            let log_file = exp.log_file();
            match extract_accuracy(&log_file, &self.config.marker)? {
                Some(Accuracy { last, best }) => group.runs.push(Run {
                    run_id: exp.run_id().to_string(),
                    last,
                    best,
                }),
                None => {
                    tracing::warn!(
                        "marker {:?} not found in {}",
                        self.config.marker,
                        log_file
                    );
                    writeln!(
                        out,
                        "Not found mark \"{}\" in the log \"{}\", skip it",
                        self.config.marker, log_file
                    )?;
                }
            }
        }
        Ok(group)
    }

    /// `[server-project]`, resolved only once there's a group to report.
    fn header(&self) -> Result<String, Report> {
        let server = match &self.config.server {
            Some(server) => server,
            None => eyre::bail!("no server label: set --server or SERVER"),
        };
        let project = match &self.config.project {
            Some(project) => project.clone(),
            None => util::current_project_name()?,
        };
        Ok(format!("[{}-{}]", server, project))
    }

    /// Renders the header, run ids and the last/best accuracy lines of a
    /// group.
    pub fn report(&self, group: &ExperimentGroup) -> Result<String, Report> {
        let last = group.last();
        let best = group.best();
        let digits = Digits::detect(&last);
        let run_ids: Vec<_> = group.run_ids().collect();
        Ok(format!(
            "{}\n{}\n{}\n{}\n",
            self.header()?,
            run_ids.join(", "),
            metrics::summary_line(&last, digits),
            metrics::summary_line(&best, digits),
        ))
    }
}
