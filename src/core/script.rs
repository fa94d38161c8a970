use tracing::debug;

use crate::core::partition::{chunks, partition, plural};
use crate::error::Result;
use crate::models::{JobScript, JobSpec, ScriptCounter};

/// Render the PBS script for one job.
///
/// The job's tokens are split across the job's workers, each worker's
/// batches become command invocations, and the result carries the resource
/// request header. Pure text production: writing the file and submitting it
/// are the caller's concern. The counter is read and advanced exactly once
/// per call to derive the sequential file name.
pub fn synthesize(spec: &JobSpec, tokens: &[String], counter: &ScriptCounter) -> Result<JobScript> {
    let index = counter.advance();
    let file_name = format!("{}_{}.pbs", spec.script_base(), index);

    // Workers never outnumber the command invocations they would run.
    let invocations = tokens.len().div_ceil(spec.batch_size);
    let workers = spec.workers.min(invocations).max(1);
    let groups = partition(tokens, workers, false)?;
    let n_workers = groups.len();

    let mut text = String::new();
    text.push_str(&format!("#!{}\n", spec.shell));
    text.push_str(&format!(
        "#PBS -l mem={}gb,nodes=1:ppn={},walltime={}\n\n",
        spec.mem, spec.ppn, spec.walltime
    ));
    text.push_str(&format!("cd {}\n", spec.workdir.display()));

    for (worker, group) in groups.iter().enumerate() {
        let commands: Vec<String> = chunks(group, spec.batch_size)
            .map(|batch| render_command(spec, batch))
            .collect();
        let mut line = commands.join("; ");
        if spec.write_stdout {
            line.push_str(&format!(" > stdout_{}_{}.txt", index, worker));
        }
        if n_workers > 1 {
            line.push_str(" &");
        }
        line.push('\n');
        text.push_str(&line);
    }

    if n_workers > 1 {
        text.push_str("wait\n");
    }

    debug!(
        "Rendered {} ({} worker{}, {} token{})",
        file_name,
        n_workers,
        plural(n_workers),
        tokens.len(),
        plural(tokens.len())
    );

    Ok(JobScript {
        index,
        file_name,
        text,
    })
}

/// One command invocation over a single batch of arguments.
fn render_command(spec: &JobSpec, batch: &[String]) -> String {
    let args = batch.join(" ");
    match &spec.replace_str {
        Some(marker) => {
            let rendered = spec.initial_args.replace(marker.as_str(), &args);
            format!("{} {}", spec.command, rendered)
        }
        None => {
            let sep = if spec.initial_args.is_empty() { "" } else { " " };
            format!("{} {}{}{}", spec.command, spec.initial_args, sep, args)
        }
    }
}
