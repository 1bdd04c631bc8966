use acclog::fetch::{self, Fetcher};
use acclog::{series, CompareConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;

/// One smoothed series, labeled with its experiment id.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub values: Vec<f64>,
}

/// Fetches the log of every target (in the order given), extracts the
/// configured metric, aligns all series to the shortest one and smooths
/// them.
pub fn prepare(
    config: &CompareConfig,
    fetcher: &impl Fetcher,
) -> Result<Vec<Curve>, Report> {
    let mut labels = Vec::with_capacity(config.targets.len());
    let mut all = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        let log = fetch::fetch_log(
            target,
            &config.servers,
            fetcher,
            &config.output_dir,
        )?;
        let values = series::extract(&log.contents, &config.key)
            .wrap_err_with(|| {
                format!("extract {:?} from {}", config.key, log.path.display())
            })?;
        tracing::info!(
            "{}: {} values of {:?}",
            log.exp_id,
            values.len(),
            config.key
        );
        labels.push(log.exp_id);
        all.push(values);
    }

    let aligned = series::align(all)?;
    let curves = labels
        .into_iter()
        .zip(aligned)
        .map(|(label, values)| Curve {
            label,
            values: series::smooth(&values, config.window),
        })
        .collect();
    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acclog::ServerTable;
    use color_eyre::eyre;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct MemoryFetcher {
        files: HashMap<String, String>,
    }

    impl Fetcher for MemoryFetcher {
        fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, Report> {
            self.files
                .get(remote_path)
                .map(|contents| contents.as_bytes().to_vec())
                .ok_or_else(|| eyre::eyre!("no such file {}", remote_path))
        }
    }

    fn training_log(exp_id: &str, steps: usize) -> String {
        let mut log = format!(
            "caching various config files to Experiments/x_{}/.caching\n",
            exp_id
        );
        for step in 0..steps {
            log.push_str(&format!(
                "Step {} loss 1.0 Acc1 = {} lr 0.1\n",
                step,
                step + 2
            ));
        }
        log
    }

    fn setup() -> (TempDir, MemoryFetcher, ServerTable) {
        let dir = tempfile::tempdir().unwrap();

        let mut fetcher = MemoryFetcher::default();
        fetcher.files.insert(
            String::from("h:/P/*-100/log.txt"),
            training_log("SERVER1-20200731-100", 100),
        );
        fetcher.files.insert(
            String::from("h:/P/*-50/log.txt"),
            training_log("SERVER1-20200731-50", 50),
        );
        let servers =
            serde_json::from_str(r#"{"s": "h:/{}/*-{}/log.txt"}"#).unwrap();
        (dir, fetcher, servers)
    }

    fn compare_config(
        inputs: Vec<&str>,
        dir: &Path,
        servers: &ServerTable,
    ) -> CompareConfig {
        let mut config = CompareConfig::from_inputs(inputs).unwrap();
        config.servers = servers.clone();
        config.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn prepare_aligns_to_shortest() {
        let (dir, fetcher, servers) = setup();
        let config =
            compare_config(vec!["s:P:100", "s:P:50"], dir.path(), &servers);
        let curves = prepare(&config, &fetcher).unwrap();

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label, "SERVER1-20200731-100");
        assert_eq!(curves[1].label, "SERVER1-20200731-50");
        assert_eq!(curves[0].values.len(), 50);
        assert_eq!(curves[1].values.len(), 50);
        // values > 1 are percentages; stride 2 on the longer series
        assert_eq!(curves[0].values[..3], [0.02, 0.04, 0.06]);
        assert_eq!(curves[1].values[..3], [0.02, 0.03, 0.04]);

        // fetched logs are kept locally
        assert!(dir.path().join("log_SERVER1-20200731-100.txt").is_file());
        assert!(dir.path().join("log_SERVER1-20200731-50.txt").is_file());
    }

    #[test]
    fn prepare_smooths() {
        let (dir, fetcher, servers) = setup();
        let config = compare_config(vec!["s:P:50", "3"], dir.path(), &servers);
        let curves = prepare(&config, &fetcher).unwrap();

        // raw series is 0.02, 0.03, 0.04, ...; the first outputs average
        // the padding [0.02, 0.03, 0.04] with the series start
        let values = &curves[0].values;
        assert_eq!(values.len(), 50);
        let expected = [0.03, 0.03, 0.03, 0.04, 0.05];
        for (value, expected) in values.iter().zip(expected.iter()) {
            assert!((value - expected).abs() < 1e-12, "{:?}", values);
        }
        assert!((values[49] - 0.50).abs() < 1e-12);
    }

    #[test]
    fn prepare_fails_on_empty_series() {
        let (dir, mut fetcher, servers) = setup();
        fetcher.files.insert(
            String::from("h:/P/*-0/log.txt"),
            training_log("SERVER1-20200731-0", 0),
        );
        let config =
            compare_config(vec!["s:P:50", "s:P:0"], dir.path(), &servers);
        assert!(prepare(&config, &fetcher).is_err());

        // unknown log
        let config = compare_config(vec!["s:P:7"], dir.path(), &servers);
        assert!(prepare(&config, &fetcher).is_err());
    }
}
