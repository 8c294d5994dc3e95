use crate::cli::GlobalFlags;
use crate::formatter::{OutputFormat, write_output};
use clap::Args;
use secretmounts::fs::OsFs;
use secretmounts::{MountDescriptor, NoopRelabeler, SecretMounts};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Copy secrets into a container working directory
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Container working directory on the host
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workdir: PathBuf,

    /// Mount label applied to each new staging directory
    #[arg(short = 'l', long, default_value = "")]
    pub mount_label: String,

    /// Mounts file to read instead of the configured ones (repeatable)
    #[arg(long = "mounts-file", visible_alias = "default-mounts-file", value_name = "FILE")]
    pub mounts_files: Vec<PathBuf>,

    /// Skip labeling staging directories
    #[arg(long)]
    pub no_label: bool,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Tabled, Serialize)]
struct MountPresenter {
    #[tabled(rename = "SOURCE")]
    source: String,
    #[tabled(rename = "DESTINATION")]
    destination: String,
    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    kind: String,
    #[tabled(rename = "OPTIONS")]
    options: String,
}

impl From<&MountDescriptor> for MountPresenter {
    fn from(mount: &MountDescriptor) -> Self {
        Self {
            source: mount.source.display().to_string(),
            destination: mount.destination.display().to_string(),
            kind: mount.kind.clone(),
            options: mount.options.join(","),
        }
    }
}

pub fn execute(args: PrepareArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let config = global.load_config()?;

    let mounts = if args.no_label {
        SecretMounts::with_capabilities(config, OsFs, NoopRelabeler).mounts(
            &args.mount_label,
            &args.workdir,
            &args.mounts_files,
        )
    } else {
        SecretMounts::new(config).mounts(&args.mount_label, &args.workdir, &args.mounts_files)
    };

    // Structured output keeps the runtime's mount shape.
    write_output(&mut std::io::stdout().lock(), args.format, &mounts[..], presenters)
}

fn presenters(mounts: &[MountDescriptor]) -> Vec<MountPresenter> {
    mounts.iter().map(MountPresenter::from).collect()
}
