use acclog::util;
use acclog::{CollectConfig, Collector};
use clap::{App, Arg};
use color_eyre::Report;

// Usage, from the project directory:
//   $ collect 20200731-18 "Epoch 240"
fn main() -> Result<(), Report> {
    color_eyre::install()?;
    util::init_tracing();

    let config = parse_args();
    tracing::debug!("{:?}", config);

    let collector = Collector::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    collector.run(&mut out)?;
    Ok(())
}

fn parse_args() -> CollectConfig {
    let matches = App::new("collect")
        .version("0.1")
        .about("Prints the last and best accuracy of repeated experiment runs.")
        .arg(
            Arg::with_name("keyword")
                .value_name("KEYWORD")
                .help("only experiments whose folder name contains KEYWORD are collected")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("marker")
                .value_name("MARKER")
                .help("substring of the log line with the accuracies, e.g. 'Epoch 240' or 'Step 11200'")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("server")
                .long("server")
                .value_name("SERVER")
                .env("SERVER")
                .help("server label shown in each group header")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("project")
                .long("project")
                .value_name("PROJECT")
                .help("project name shown in each group header; default: the current directory, which should be inside a 'Projects' directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("experiments")
                .long("experiments")
                .value_name("EXPERIMENTS_DIR")
                .help("directory with one folder per experiment run; default: Experiments")
                .takes_value(true),
        )
        .get_matches();

    // these are required, so clap makes sure they're set
    let keyword = matches.value_of("keyword").unwrap_or_default();
    let marker = matches.value_of("marker").unwrap_or_default();

    // server and project are only resolved once a group is reported
    let mut config = CollectConfig::new(keyword, marker);
    if let Some(server) = matches.value_of("server") {
        config.set_server(server);
    }
    if let Some(project) = matches.value_of("project") {
        config.set_project(project);
    }
    if let Some(experiments_dir) = matches.value_of("experiments") {
        config.set_experiments_dir(experiments_dir);
    }
    config
}
