mod config;
mod dot;
mod error;
mod parse;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use structopt::StructOpt;

use error::CliError;

/// Reorders a program graph (and, if needed, inserts copy nodes) so every use
/// sits within the configured distance of its definition.
#[derive(StructOpt)]
struct Args {
    /// Path to the input graph file.
    input: PathBuf,

    /// Path to a TOML file overriding the default tunables.
    #[structopt(long)]
    config: Option<PathBuf>,

    /// Also print the DOT rendering of the graph before transformation.
    #[structopt(long)]
    dump_input: bool,
}

fn main() -> ExitCode {
    pretty_logger::init_level(log::LevelFilter::Info).expect("failed to install logger");

    let args = Args::from_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = config::load(args.config.as_deref())?;

    let text = fs::read_to_string(&args.input).map_err(error::InputError::from)?;
    let input_graph = parse::parse(&text)?;
    log::info!("parsed {} node(s) from {:?}", input_graph.len(), args.input);

    if args.dump_input {
        println!("{}", dot::render(&input_graph));
    }

    let output_graph = scheduler::update_nodes(&input_graph, &config)?;
    println!("{}", dot::render(&output_graph));

    Ok(())
}
