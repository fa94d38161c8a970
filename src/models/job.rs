use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Immutable configuration for the jobs generated in one run.
///
/// Built once from the merged config and CLI options; the synthesizer only
/// reads from it.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Command to execute.
    pub command: String,
    /// Initial arguments supplied to the command.
    pub initial_args: String,
    /// Marker replaced by the batch arguments in `initial_args` instead of
    /// appending them after it.
    pub replace_str: Option<String>,
    /// Memory to request in gb.
    pub mem: u64,
    /// Processors per node named in the PBS header.
    pub ppn: usize,
    /// Number of background worker processes per job.
    pub workers: usize,
    /// Arguments supplied to each call of the command.
    pub batch_size: usize,
    /// Walltime in the format hh:mm:ss.
    pub walltime: String,
    /// Shell named on the shebang line.
    pub shell: String,
    /// Directory the script changes into before running.
    pub workdir: PathBuf,
    /// Redirect each worker's stdout to a per-worker text file.
    pub write_stdout: bool,
    /// Basename for script files; defaults to the command's file stem.
    pub base_name: Option<String>,
}

impl JobSpec {
    /// Basename used for script file names.
    pub fn script_base(&self) -> String {
        match &self.base_name {
            Some(name) => name.clone(),
            None => Path::new(&self.command)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(self.command.as_str())
                .to_string(),
        }
    }
}

/// One rendered PBS script.
///
/// Generated in memory, written once, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScript {
    /// Sequential index used in the file name.
    pub index: u64,
    /// File name in the form `<base>_<index>.pbs`.
    pub file_name: String,
    /// Full script text.
    pub text: String,
}

/// Run-scoped counter for sequential script names.
///
/// One counter is shared across every script produced in a run. The lock
/// keeps names unique if the synthesizer is ever driven from more than one
/// thread; the counter is never reset mid-run.
#[derive(Debug, Default)]
pub struct ScriptCounter {
    next: Mutex<u64>,
}

impl ScriptCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current value and advance by one.
    pub fn advance(&self) -> u64 {
        let mut next = self.next.lock().expect("script counter lock poisoned");
        let value = *next;
        *next += 1;
        value
    }

    /// Current value without advancing.
    pub fn peek(&self) -> u64 {
        *self.next.lock().expect("script counter lock poisoned")
    }
}
