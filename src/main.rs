use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pbsdo::commands::{generate_jobs, GenerateOptions};
use pbsdo::models::Config;

/// pbsdo - Create PBS jobs from the standard input
#[derive(Parser)]
#[command(name = "pbsdo")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "pbsdo [OPTIONS] <COMMAND> [INITIAL_ARGUMENTS]...")]
struct Cli {
    /// Command to run, followed by its initial arguments
    #[arg(trailing_var_arg = true, required = true, value_name = "COMMAND")]
    command: Vec<String>,

    /// Read items from file instead of standard input
    #[arg(short = 'a', long = "arg-file", value_name = "FILE")]
    arg_file: Option<PathBuf>,

    /// Replace occurrences of replace-str in the initial arguments with input
    #[arg(short = 'I', value_name = "REPLACE_STR")]
    replace_str: Option<String>,

    /// Rewrite each input token by regex substitution
    #[arg(long, num_args = 2, value_names = ["PATTERN", "REPL"])]
    resub: Option<Vec<String>>,

    /// Only build commands from inputs matching regex
    #[arg(short = 'r', long, value_name = "REGEX")]
    regex: Option<String>,

    /// Omit inputs matching regex instead
    #[arg(short = 'o', long)]
    omit: bool,

    /// Regex used to tokenize the input
    #[arg(long, default_value = r"\s+", value_name = "REGEX")]
    delimiter: String,

    /// Use at most max-args arguments per command line
    #[arg(
        short = 'n',
        long = "max-args",
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_args: u64,

    /// Skip the check that each argument is a file that exists
    #[arg(short = 'f', long = "no-check")]
    no_check: bool,

    /// Basename for pbs files (default: the command name)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Submit jobs after writing scripts; without this flag, a dry run
    #[arg(short = 'g', long)]
    go: bool,

    /// Write a text file with stdout for each process
    #[arg(long = "write-stdout")]
    write_stdout: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of jobs to split into
    #[arg(
        short = 'j',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    jobs: u64,

    /// Shell to use in pbs files (default: the value of $SHELL)
    #[arg(long, value_name = "PATH")]
    shell: Option<String>,

    /// Number of child processes in each pbs job (default: same as ppn)
    #[arg(short = 'P', long, value_parser = clap::value_parser!(u64).range(1..))]
    workers: Option<u64>,

    /// Processors to request per pbs job (default: smaller of 4 and the
    /// number of arguments)
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u64).range(1..))]
    ppn: Option<u64>,

    /// Memory to allocate per pbs job in gb (default: 4 times the
    /// processors per job)
    #[arg(short = 'm', long)]
    mem: Option<u64>,

    /// Walltime per job in the format hh:mm:ss
    #[arg(short = 'w', long, value_name = "HH:MM:SS")]
    walltime: Option<String>,

    /// Path to a pbsdo.toml config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> pbsdo::Result<()> {
    let workdir = std::env::current_dir()?;

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_from_dir(&workdir)?,
    };
    let config = config.with_overrides(
        cli.walltime,
        cli.mem,
        cli.ppn.map(|p| p as usize),
        cli.shell,
        cli.write_stdout,
        cli.no_check,
    );

    // clap enforces at least one trailing value
    let (command, initial) = cli
        .command
        .split_first()
        .expect("command is required");

    let options = GenerateOptions {
        command: command.clone(),
        initial_args: initial.join(" "),
        arg_file: cli.arg_file,
        replace_str: cli.replace_str,
        resub: cli.resub.map(|pair| (pair[0].clone(), pair[1].clone())),
        regex: cli.regex,
        regex_omit: cli.omit,
        delimiter: cli.delimiter,
        max_args: cli.max_args as usize,
        jobs: cli.jobs as usize,
        workers: cli.workers.map(|w| w as usize),
        name: cli.name,
        go: cli.go,
        verbose: cli.verbose,
    };

    generate_jobs(&workdir, &config, options)
}
