use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration loaded from pbsdo.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: ResourcesConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Default resource requests for generated jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Walltime per job in the format hh:mm:ss
    #[serde(default = "default_walltime")]
    pub walltime: String,
    /// Memory per job in gb; derived from ppn when unset
    #[serde(default)]
    pub mem: Option<u64>,
    /// Processors to request per job; derived from the argument count when unset
    #[serde(default)]
    pub ppn: Option<usize>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            walltime: default_walltime(),
            mem: None,
            ppn: None,
        }
    }
}

fn default_walltime() -> String {
    "12:00:00".to_string()
}

/// Behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Shell named on the shebang line of generated scripts
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Command used to submit scripts to the scheduler
    #[serde(default = "default_submit_command")]
    pub submit_command: String,
    /// Redirect each worker's stdout to a per-worker text file
    #[serde(default)]
    pub write_stdout: bool,
    /// Check that each input argument names an existing file
    #[serde(default = "default_check_files")]
    pub check_files: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            submit_command: default_submit_command(),
            write_stdout: false,
            check_files: default_check_files(),
        }
    }
}

fn default_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/tcsh".to_string())
}

fn default_submit_command() -> String {
    "qsub".to_string()
}

fn default_check_files() -> bool {
    true
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.clone(), e))
    }

    /// Try to load config from pbsdo.toml in the given directory
    pub fn load_from_dir(dir: &PathBuf) -> Result<Self, ConfigError> {
        let config_path = dir.join("pbsdo.toml");
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        walltime: Option<String>,
        mem: Option<u64>,
        ppn: Option<usize>,
        shell: Option<String>,
        write_stdout: bool,
        no_check: bool,
    ) -> Self {
        if let Some(w) = walltime {
            self.resources.walltime = w;
        }
        if let Some(m) = mem {
            self.resources.mem = Some(m);
        }
        if let Some(p) = ppn {
            self.resources.ppn = Some(p);
        }
        if let Some(s) = shell {
            self.behavior.shell = s;
        }
        if write_stdout {
            self.behavior.write_stdout = true;
        }
        if no_check {
            self.behavior.check_files = false;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}
