use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::core::input::{check_arguments, read_raw, TokenPipeline};
use crate::core::partition::{partition, plural};
use crate::core::script::synthesize;
use crate::core::submit::submit;
use crate::error::{PbsDoError, Result};
use crate::models::{Config, JobSpec, ScriptCounter};

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Command to execute in the generated scripts
    pub command: String,
    /// Initial arguments supplied to the command
    pub initial_args: String,
    /// Read tokens from this file instead of standard input
    pub arg_file: Option<PathBuf>,
    /// Marker in the initial arguments replaced by each batch
    pub replace_str: Option<String>,
    /// Regex substitution (pattern, replacement) applied to every token
    pub resub: Option<(String, String)>,
    /// Only build commands from tokens matching this regex
    pub regex: Option<String>,
    /// Omit tokens matching the regex instead
    pub regex_omit: bool,
    /// Regex used to tokenize the input
    pub delimiter: String,
    /// Arguments per command invocation
    pub max_args: usize,
    /// Number of jobs to split into
    pub jobs: usize,
    /// Worker processes per job (defaults to ppn)
    pub workers: Option<usize>,
    /// Basename for script files (defaults to the command name)
    pub name: Option<String>,
    /// Submit scripts after writing them; without this the run is a dry run
    pub go: bool,
    /// Echo generated submit commands
    pub verbose: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            command: String::new(),
            initial_args: String::new(),
            arg_file: None,
            replace_str: None,
            resub: None,
            regex: None,
            regex_omit: false,
            delimiter: r"\s+".to_string(),
            max_args: 1,
            jobs: 1,
            workers: None,
            name: None,
            go: false,
            verbose: false,
        }
    }
}

/// Generate one PBS script per job for the tokens on the input, writing them
/// into `workdir` and optionally submitting each one.
pub fn generate_jobs(workdir: &PathBuf, config: &Config, options: GenerateOptions) -> Result<()> {
    let pipeline = TokenPipeline::new(
        &options.delimiter,
        options
            .resub
            .as_ref()
            .map(|(pattern, repl)| (pattern.as_str(), repl.as_str())),
        options.regex.as_deref().map(|p| (p, options.regex_omit)),
    )?;

    let raw = read_raw(options.arg_file.as_deref())?;
    let tokens = pipeline.tokens(&raw);

    let n_tokens = tokens.len();
    if n_tokens == 0 {
        return Err(PbsDoError::EmptyInput);
    }
    if config.behavior.check_files {
        check_arguments(&tokens)?;
    }

    let ppn = config.resources.ppn.unwrap_or_else(|| n_tokens.min(4));
    let workers = options.workers.unwrap_or(ppn);
    if ppn < 1 {
        return Err(PbsDoError::InvalidGroupCount(ppn));
    }
    if workers < 1 {
        return Err(PbsDoError::InvalidGroupCount(workers));
    }
    let mem = config.resources.mem.unwrap_or(4 * ppn as u64);
    if !(1..=180).contains(&mem) {
        return Err(PbsDoError::InvalidMemory { mem });
    }

    // Duplicate tokens would land in more than one job, so the top-level
    // split requires unique arguments.
    let job_lists = partition(&tokens, options.jobs, true)?;

    print_summary(options.jobs, ppn, mem, n_tokens, &job_lists);

    let spec = JobSpec {
        command: options.command.clone(),
        initial_args: options.initial_args.clone(),
        replace_str: options.replace_str.clone(),
        mem,
        ppn,
        workers,
        batch_size: options.max_args,
        walltime: config.resources.walltime.clone(),
        shell: config.behavior.shell.clone(),
        workdir: workdir.clone(),
        write_stdout: config.behavior.write_stdout,
        base_name: options.name.clone(),
    };

    let counter = ScriptCounter::new();
    for job_tokens in &job_lists {
        let script = synthesize(&spec, job_tokens, &counter)?;
        let path = workdir.join(&script.file_name);
        fs::write(&path, &script.text)?;
        info!("Wrote {}", script.file_name);

        if options.verbose {
            println!("{} {}", config.behavior.submit_command, script.file_name);
        }
        if options.go {
            submit(&script.file_name, &config.behavior.submit_command, workdir)?;
        }
    }

    if !options.go {
        println!(
            "\nDry run: {} script{} written, none submitted. Pass --go to submit.",
            job_lists.len(),
            plural(job_lists.len())
        );
    }

    Ok(())
}

/// Print the resource summary for the run, in the shape the scheduler
/// request will take.
fn print_summary(
    requested_jobs: usize,
    ppn: usize,
    mem: u64,
    n_tokens: usize,
    job_lists: &[Vec<String>],
) {
    println!(
        "\nRequested {} job{} with {} processor{} and {} gb memory each...",
        requested_jobs,
        plural(requested_jobs),
        ppn,
        plural(ppn),
        mem
    );
    println!("\t{} argument{}", n_tokens, plural(n_tokens));

    let n_jobs = job_lists.len();
    let per_job = job_lists.iter().map(|list| list.len()).max().unwrap_or(0);
    println!("\t{} job{}", n_jobs, plural(n_jobs));
    println!("\t{} argument{} per job", per_job, plural(per_job));
    println!("\t{} processor{} per job", ppn, plural(ppn));

    if per_job >= ppn {
        let n = per_job.div_ceil(ppn);
        println!("\t{} argument{} per process", n, plural(n));
    } else {
        let n = ppn.div_ceil(per_job);
        let noun = if n == 1 { "process" } else { "processes" };
        println!("\t{} {} per argument", n, noun);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert_eq!(options.delimiter, r"\s+");
        assert_eq!(options.max_args, 1);
        assert_eq!(options.jobs, 1);
        assert!(!options.go);
        assert!(options.workers.is_none());
    }
}
