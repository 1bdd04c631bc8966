use acclog::util;
use acclog::{CompareConfig, ScpFetcher, ServerTable};
use clap::{App, Arg};
use color_eyre::Report;

// Usage:
//   $ compare 138:DAFL:120845 138:DAFL:120835 5:CRD:070245 10
fn main() -> Result<(), Report> {
    color_eyre::install()?;
    util::init_tracing();

    let config = parse_args()?;
    tracing::debug!("{:?}", config);

    let fetcher = ScpFetcher::new(config.output_dir.join("log.txt"));
    let curves = acclog_plot::prepare(&config, &fetcher)?;
    acclog_plot::compare_plot(&curves, &config.key, config.save.as_deref())?;
    Ok(())
}

fn parse_args() -> Result<CompareConfig, Report> {
    let matches = App::new("compare")
        .version("0.1")
        .about("Fetches training logs from remote servers and plots a metric of each run on one chart.")
        .arg(
            Arg::with_name("inputs")
                .value_name("INPUT")
                .help("either 'server:project:log_id' or a bare integer setting the smoothing window (default: 1)")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("key")
                .long("key")
                .value_name("KEY")
                .help("metric to plot; default: Acc1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("servers")
                .long("servers")
                .value_name("SERVERS_FILE")
                .help("JSON object mapping server ids to log path templates with two '{}' (project and log id); replaces the built-in table")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output-dir")
                .value_name("OUTPUT_DIR")
                .help("where fetched logs are stored as 'log_<exp_id>.txt'; default: .")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("save")
                .long("save")
                .value_name("FILE")
                .help("save the figure to FILE instead of showing it")
                .takes_value(true),
        )
        .get_matches();

    let inputs = matches.values_of("inputs").into_iter().flatten();
    let mut config = CompareConfig::from_inputs(inputs)?;
    if let Some(key) = matches.value_of("key") {
        config.key = key.to_string();
    }
    if let Some(servers) = matches.value_of("servers") {
        config.servers = ServerTable::load(servers)?;
    }
    if let Some(output_dir) = matches.value_of("output_dir") {
        config.output_dir = output_dir.into();
    }
    config.save = matches.value_of("save").map(Into::into);
    Ok(config)
}
