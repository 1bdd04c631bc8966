#![deny(rust_2018_idioms)]

// This module contains the definition of `ExperimentPath` and
// `ExperimentGroup`.
pub mod exp;

// This module contains the rules used to pull numeric values out of log lines.
pub mod log;

// This module contains the definition of `Digits` and summary statistics.
pub mod metrics;

// This module contains extraction, alignment and smoothing of metric series.
pub mod series;

// This module contains the definition of `Fetcher` and `ServerTable`.
pub mod fetch;

// This module contains the Result Collector.
pub mod collect;

// This module contains the definition of `CollectConfig` and `CompareConfig`.
pub mod config;

// This module contains some utilitary functions.
pub mod util;

// Re-exports.
pub use collect::Collector;
pub use config::{CollectConfig, CompareConfig};
pub use exp::{ExperimentGroup, ExperimentPath, Run};
pub use fetch::{Fetcher, ScpFetcher, ServerTable};
