//! Common test utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use pbsdo::commands::GenerateOptions;
use pbsdo::models::Config;

/// Create a working directory for a generation run
pub fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let workdir = temp_dir.path().to_path_buf();
    (temp_dir, workdir)
}

/// Create token files under the working directory and return their absolute
/// paths
pub fn create_token_files(workdir: &PathBuf, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let path = workdir.join(name);
            fs::write(&path, "x").expect("Failed to write token file");
            path.display().to_string()
        })
        .collect()
}

/// Write an argument file holding the given tokens, one per line
pub fn create_arg_file(workdir: &PathBuf, tokens: &[String]) -> PathBuf {
    let path = workdir.join("args.txt");
    fs::write(&path, tokens.join("\n")).expect("Failed to write arg file");
    path
}

/// Config with a fixed shell so script headers are predictable
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.behavior.shell = "/bin/sh".to_string();
    config
}

/// Options for a grep run reading from the given arg file
pub fn base_options(arg_file: PathBuf) -> GenerateOptions {
    GenerateOptions {
        command: "grep".to_string(),
        arg_file: Some(arg_file),
        ..GenerateOptions::default()
    }
}

/// Names of the .pbs files currently in the working directory
pub fn pbs_files(workdir: &PathBuf) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(workdir)
        .expect("Failed to read workdir")
        .filter_map(|entry| {
            let name = entry.expect("Failed to read dir entry").file_name();
            let name = name.to_string_lossy().to_string();
            name.ends_with(".pbs").then_some(name)
        })
        .collect();
    names.sort();
    names
}
