use crate::cli::GlobalFlags;
use crate::formatter::{OutputFormat, write_output};
use clap::Args;
use secretmounts::MountPathPair;
use secretmounts::fs::OsFs;
use secretmounts::mounts_conf::read_mount_lines;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::Tabled;

/// Parse mounts files without touching any secret
#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Mounts file to check instead of the configured ones (repeatable)
    #[arg(long = "mounts-file", visible_alias = "default-mounts-file", value_name = "FILE")]
    pub mounts_files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Tabled, Serialize, Debug, Clone, PartialEq)]
struct EntryPresenter {
    #[tabled(rename = "FILE")]
    file: String,
    #[tabled(rename = "LINE")]
    line: usize,
    #[tabled(rename = "HOST PATH")]
    host_path: String,
    #[tabled(rename = "CONTAINER PATH")]
    container_path: String,
    #[tabled(rename = "ERROR")]
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
}

fn check_file(file: &Path) -> Vec<EntryPresenter> {
    read_mount_lines(&OsFs, file)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let parsed = line.and_then(|line| MountPathPair::parse(&line));
            let (host_path, container_path, error) = match parsed {
                Ok(pair) => (
                    pair.host_path.display().to_string(),
                    pair.container_path.display().to_string(),
                    String::new(),
                ),
                Err(e) => (String::new(), String::new(), e.to_string()),
            };
            EntryPresenter {
                file: file.display().to_string(),
                line: idx + 1,
                host_path,
                container_path,
                error,
            }
        })
        .collect()
}

pub fn execute(args: CheckConfigArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let config = global.load_config()?;

    let entries: Vec<EntryPresenter> = config
        .effective_mount_files(&args.mounts_files)
        .iter()
        .flat_map(|file| check_file(file))
        .collect();

    write_output(&mut std::io::stdout().lock(), args.format, &entries, |e| e.clone())?;

    let malformed = entries.iter().filter(|e| !e.error.is_empty()).count();
    if malformed > 0 {
        anyhow::bail!("{} malformed mount-path entries", malformed);
    }
    Ok(())
}
