//! A simple CLI tool for replaying a recorded panchayat election and printing
//! the results.

use std::cmp::Ordering;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};

use panchayat_election::{
    error::{Error, Result},
    logging,
    model::{candidate::CandidateResult, dump::ElectionDump},
    Config,
};

const PROGRAM_NAME: &str = "panchayat";

const ABOUT_TEXT: &str = "Replay a recorded panchayat election and report the results.

EXIT CODES:
     0: Replay succeeded.
     1: The election or config file could not be read.";

const ELECTION_PATH: &str = "ELECTION_PATH";
const CONFIG_PATH: &str = "config";
const SORT: &str = "sort";

const ELECTION_PATH_HELP: &str = "The path to a JSON election dump with `candidates`,\n\
`voters`, `votes`, and optionally `regions` and `rules`";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .arg(
            Arg::new(ELECTION_PATH)
                .help(ELECTION_PATH_HELP)
                .action(ArgAction::Set)
                .required(true),
        )
        .arg(
            Arg::new(CONFIG_PATH)
                .long("config")
                .short('c')
                .help("Path to a JSON config file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(SORT)
                .long("sort")
                .help("How to order the results")
                .value_parser(["votes", "name", "party"])
                .default_value("votes")
                .action(ArgAction::Set),
        )
}

fn by_votes(a: &CandidateResult, b: &CandidateResult) -> Ordering {
    b.votes.cmp(&a.votes)
}

fn by_name(a: &CandidateResult, b: &CandidateResult) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_party(a: &CandidateResult, b: &CandidateResult) -> Ordering {
    a.party.cmp(&b.party)
}

/// Comparator for the requested ordering. Ties always fall back to declaration order.
fn comparator(sort: &str) -> fn(&CandidateResult, &CandidateResult) -> Ordering {
    match sort {
        "name" => by_name,
        "party" => by_party,
        _ => by_votes,
    }
}

/// Replay the election and render the report.
fn replay(path: &str, config: &Config, sort: &str) -> Result<String> {
    let dump = ElectionDump::from_path(path)?;
    let (election, report) = dump.replay(config.default_rules());

    let mut lines = vec![
        format!("Registered voters: {}", report.registered),
        format!("Votes accepted: {}", election.total_votes()),
        "Results:".to_string(),
    ];
    lines.extend(
        election
            .results_sorted_by(comparator(sort))
            .iter()
            .map(|result| format!("  {result}")),
    );
    lines.push(match &report.winner {
        Some(winner) => format!("Winner: {winner}"),
        None => "Winner: none, no votes were cast".to_string(),
    });
    lines.push(if report.tally.is_empty() {
        "Tally: empty".to_string()
    } else {
        format!("Tally: {}", report.tally)
    });
    if dump.regions.is_some() {
        lines.push(format!("Votes across regions: {}", report.region_total));
    }
    lines.extend(
        report
            .rejected_voters
            .iter()
            .chain(&report.rejected_votes)
            .map(|rejection| {
                format!(
                    "Rejected {}: {}",
                    rejection.voter_id.as_deref().unwrap_or("<no id>"),
                    rejection.reason
                )
            }),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Load the config named on the command line, if any.
fn load_config(args: &ArgMatches) -> Result<Config> {
    Config::load(args.get_one::<String>(CONFIG_PATH).map(Path::new))
}

/// Run the replay, report the result, and return the exit code.
fn run(args: &ArgMatches, config: &Config) -> u8 {
    let path: &String = args.get_one(ELECTION_PATH).unwrap(); // Required argument is guaranteed to be present.
    let sort: &String = args.get_one(SORT).unwrap(); // Has a default.
    match replay(path, config, sort) {
        Ok(report) => {
            print!("{report}");
            0
        }
        Err(Error::Io(e)) => {
            println!("IO error: {e}");
            1
        }
        Err(Error::Json(e)) => {
            println!("Invalid JSON: {e}");
            1
        }
        Err(e) => {
            println!("{e}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("Failed to load config: {e}");
            std::process::exit(1)
        }
    };

    // Set up logging.
    if let Err(e) = logging::init(&config) {
        eprintln!("{e}");
    }
    info!("Replaying election from {:?}", args.get_one::<String>(ELECTION_PATH));

    let exit_code = run(&args, &config);
    if exit_code != 0 {
        error!("Replay failed");
    }
    std::process::exit(exit_code.into())
}
