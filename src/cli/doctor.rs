//! Doctor command - check the symflower binary

use crate::tools::symflower::{self, InstallPlan};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(install_dir: &Path) -> Result<()> {
    println!("evalmetrics doctor\n");

    let found = match find_binary(install_dir) {
        Some(path) => {
            debug!("Checking \"{}\" binary {}", symflower::BINARY, path.display());
            let version = symflower::probe_version(&path)?;
            println!("✓ {} v{} at {}", symflower::BINARY, version, path.display());
            Some((path, version))
        }
        None => {
            println!("○ {}: not found on PATH or in {}", symflower::BINARY, install_dir.display());
            None
        }
    };

    let plan = symflower::plan_install(
        found.as_ref().map(|(path, version)| (path.as_path(), *version)),
        install_dir,
    )?;
    match plan {
        InstallPlan::UpToDate { .. } => {
            println!("✓ Version requirement met (need v{})", symflower::REQUIRED_VERSION);
        }
        InstallPlan::Install { target } => {
            println!(
                "○ Install v{} to {}",
                symflower::REQUIRED_VERSION,
                target.display()
            );
            println!("  Download: {}", symflower::current_platform_download_url()?);
        }
    }

    Ok(())
}

/// Look up the binary on `PATH`, then in `install_dir`
fn find_binary(install_dir: &Path) -> Option<PathBuf> {
    which::which(symflower::BINARY)
        .or_else(|_| which::which_in(symflower::BINARY, Some(install_dir), install_dir))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write an executable stand-in for the binary into `dir`
    fn install_fake_binary(dir: &Path) -> PathBuf {
        let binary = dir.join(format!("{}{}", symflower::BINARY, std::env::consts::EXE_SUFFIX));
        std::fs::write(&binary, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        binary
    }

    #[test]
    fn test_find_binary_in_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        install_fake_binary(dir.path());

        // A binary on PATH takes precedence, either way the name matches
        let found = find_binary(dir.path()).unwrap();
        assert!(found
            .file_stem()
            .is_some_and(|stem| stem == symflower::BINARY));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_binary_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let binary = install_fake_binary(dir.path());
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o644)).unwrap();

        if let Some(path) = find_binary(dir.path()) {
            assert!(!path.starts_with(dir.path()));
        }
    }

    #[test]
    fn test_find_binary_missing() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        let found = find_binary(&empty);
        if let Some(path) = found {
            // A symflower installation on PATH is the only acceptable hit
            assert!(!path.starts_with(&empty));
        }
    }
}
