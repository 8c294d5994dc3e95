use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Scratch host for one test: a secrets area and a container working dir.
pub struct TestContext {
    pub cmd: Command,
    pub host: TempDir,
    pub workdir: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Fresh command sharing this context's FIPS marker location.
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_secretmounts");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(30));
        cmd.arg("--fips-marker").arg(self.fips_marker());
        cmd.env_remove("SECRETMOUNTS_CONFIG");
        cmd
    }

    pub fn host_path(&self, rel: &str) -> PathBuf {
        self.host.path().join(rel)
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    pub fn fips_marker(&self) -> PathBuf {
        self.host_path("system-fips")
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.host_path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Write a mounts file mapping host-relative dirs to container paths.
    pub fn mounts_file(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let content: String = entries
            .iter()
            .map(|(host, ctr)| format!("{}:{}\n", self.host_path(host).display(), ctr))
            .collect();
        self.write(name, &content)
    }
}

pub fn secretmounts() -> TestContext {
    let host = TempDir::new().expect("Failed to create host temp dir");
    let workdir = TempDir::new().expect("Failed to create workdir temp dir");

    let bin_path = env!("CARGO_BIN_EXE_secretmounts");
    let mut cmd = Command::new(bin_path);
    // You can override this with .timeout(Duration::from_secs(N))
    cmd.timeout(Duration::from_secs(30));
    cmd.arg("--fips-marker").arg(host.path().join("system-fips"));
    cmd.env_remove("SECRETMOUNTS_CONFIG");

    TestContext { cmd, host, workdir }
}
