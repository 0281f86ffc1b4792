use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use forest_cover::{parse_input, CoverEngine, Strategy};

fn cli() -> Command {
    Command::new("forest-cover")
        .version(clap::crate_version!())
        .about("Exact minimum vertex cover of a forest")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Graph to read; standard input if omitted"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .value_name("STRATEGY")
                .help("rescan, queue or components")
                .value_parser(|s: &str| s.parse::<Strategy>())
                .default_value("queue"),
        )
        .arg(
            Arg::new("unchecked")
                .long("unchecked")
                .help("Skip the symmetry and acyclicity check")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-cover")
                .long("print-cover")
                .help("Print the cover vertices after its size")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    env_logger::init();
    let matches = cli().get_matches();
    match run(&matches, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches, mut out: impl Write) -> forest_cover::Result<()> {
    let graph = match matches.get_one::<String>("input") {
        Some(path) => parse_input(BufReader::new(File::open(path)?))?,
        None => parse_input(io::stdin().lock())?,
    };
    let engine = CoverEngine::new()
        .with_strategy(matches.get_one::<Strategy>("strategy").copied().unwrap_or_default())
        .verify_forest(!matches.get_flag("unchecked"));

    if matches.get_flag("print-cover") {
        let cover = engine.compute(&graph)?;
        out.write_all(cover.format().as_bytes())?;
    } else {
        writeln!(out, "{}", engine.compute_size(&graph)?)?;
    }
    Ok(())
}
