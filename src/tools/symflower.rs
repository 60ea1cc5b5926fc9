//! The `symflower` analysis binary
//!
//! Version numbers are a single integer, so compatibility is a plain
//! numeric comparison against [`REQUIRED_VERSION`].

use super::{ToolError, ToolResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use tracing::debug;

/// Binary name looked up on `PATH`
pub const BINARY: &str = "symflower";

/// Minimum version this evaluation revision works with
pub const REQUIRED_VERSION: u64 = 35657;

const DOWNLOAD_BASE_URL: &str = "https://download.symflower.com/local";

/// What to do about the installed binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    /// A compatible binary is already available
    UpToDate { path: PathBuf, version: u64 },
    /// Download the required version to this path
    Install { target: PathBuf },
}

/// Extract the version from the output of `symflower version`
pub fn parse_version(output: &str) -> ToolResult<u64> {
    static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        VERSION_PATTERN.get_or_init(|| Regex::new(r"symflower v(\d+) on").expect("valid regex"));

    let captures = pattern
        .captures(output)
        .ok_or_else(|| ToolError::VersionNotFound(output.trim().to_string()))?;
    let version = &captures[1];
    version
        .parse()
        .map_err(|_| ToolError::InvalidVersion(version.to_string()))
}

/// Decide whether the binary needs to be (re)installed into `install_dir`.
///
/// `found` is the binary currently resolvable on `PATH` together with its
/// version. An outdated binary outside `install_dir` belongs to the user and
/// is never replaced.
pub fn plan_install(found: Option<(&Path, u64)>, install_dir: &Path) -> ToolResult<InstallPlan> {
    let target = install_dir.join(BINARY);

    let Some((path, installed)) = found else {
        debug!("No {} binary found, installing to {}", BINARY, target.display());
        return Ok(InstallPlan::Install { target });
    };

    if installed >= REQUIRED_VERSION {
        return Ok(InstallPlan::UpToDate {
            path: path.to_path_buf(),
            version: installed,
        });
    }

    if path.parent() != Some(install_dir) {
        return Err(ToolError::UserManagedOutdated {
            binary: BINARY,
            path: path.to_path_buf(),
            installed,
            required: REQUIRED_VERSION,
        });
    }

    debug!(
        "{} v{} is outdated (need v{}), reinstalling",
        BINARY, installed, REQUIRED_VERSION
    );
    Ok(InstallPlan::Install { target })
}

/// Download URL of the required release for a platform.
///
/// `os` and `arch` use the values of [`std::env::consts`].
pub fn download_url(os: &str, arch: &str) -> ToolResult<String> {
    // Releases use Go platform names
    let os = match os {
        "macos" => "darwin",
        other => other,
    };
    let arch = match arch {
        "x86" => "x86",
        "x86_64" => "x86_64",
        "arm" => "arm",
        "aarch64" => "arm64",
        other => return Err(ToolError::UnknownArchitecture(other.to_string())),
    };
    Ok(format!(
        "{}/v{}/{}-{}-{}",
        DOWNLOAD_BASE_URL, REQUIRED_VERSION, BINARY, os, arch
    ))
}

/// Download URL for the platform this binary was built for
pub fn current_platform_download_url() -> ToolResult<String> {
    download_url(std::env::consts::OS, std::env::consts::ARCH)
}

/// Run `<binary> version` and parse the reported version
pub fn probe_version(binary: &Path) -> ToolResult<u64> {
    let output = Command::new(binary).arg("version").output()?;
    if !output.status.success() {
        return Err(ToolError::CommandFailed {
            binary: binary.display().to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_version(&String::from_utf8_lossy(&output.stdout))
}
