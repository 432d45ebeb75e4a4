//! Locating and running the ffmpeg and ffprobe binaries.
//!
//! Binaries are resolved once at startup: a `bin` folder next to the
//! executable wins (bundled-tool deployments), then the parent's `bin`
//! (development layout), then a `bin` under the working directory, and
//! finally `PATH`.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{ExtractionError, ExtractionResult};

#[cfg(windows)]
const FFMPEG_EXE: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_EXE: &str = "ffmpeg";

#[cfg(windows)]
const FFPROBE_EXE: &str = "ffprobe.exe";
#[cfg(not(windows))]
const FFPROBE_EXE: &str = "ffprobe";

/// Resolved paths to the external encoder and prober.
#[derive(Debug, Clone)]
pub struct Toolchain {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Toolchain {
    /// Locate ffmpeg and ffprobe on this machine.
    pub fn locate() -> ExtractionResult<Self> {
        let mut search_dirs: Vec<PathBuf> = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            search_dirs.push(exe_dir.join("bin"));
            search_dirs.push(exe_dir.join("..").join("bin"));
        }
        search_dirs.push(PathBuf::from("bin"));

        for dir in &search_dirs {
            let ffmpeg = dir.join(FFMPEG_EXE);
            if ffmpeg.is_file() {
                let tools = Self {
                    ffmpeg,
                    ffprobe: dir.join(FFPROBE_EXE),
                };
                tracing::debug!("using bundled tools in {}", dir.display());
                return Ok(tools);
            }
        }

        let ffmpeg = find_in_path(FFMPEG_EXE).ok_or_else(|| ExtractionError::ToolNotFound {
            tool: "ffmpeg".to_string(),
        })?;
        let ffprobe = find_in_path(FFPROBE_EXE).ok_or_else(|| ExtractionError::ToolNotFound {
            tool: "ffprobe".to_string(),
        })?;

        tracing::debug!(
            "using ffmpeg at {} and ffprobe at {}",
            ffmpeg.display(),
            ffprobe.display()
        );
        Ok(Self { ffmpeg, ffprobe })
    }

    /// Build a toolchain from explicit binary paths.
    pub fn with_paths(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Path to the resolved ffmpeg binary.
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg
    }

    /// Path to the resolved ffprobe binary.
    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe
    }

    /// Run ffmpeg with the given arguments, discarding stdout.
    pub(crate) fn run_ffmpeg(&self, args: &[String]) -> ExtractionResult<()> {
        run_tool(&self.ffmpeg, "ffmpeg", args)?;
        Ok(())
    }

    /// Run ffprobe and return its trimmed stdout.
    pub(crate) fn ffprobe_stdout(&self, args: &[&str], path: &Path) -> ExtractionResult<String> {
        let mut all: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        all.push(path.to_string_lossy().to_string());
        let output = run_tool(&self.ffprobe, "ffprobe", &all)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Shared command runner: logs the invocation, captures stderr, and maps
/// a non-zero exit to `CommandFailed`.
fn run_tool(
    tool_path: &Path,
    tool_name: &str,
    args: &[String],
) -> ExtractionResult<std::process::Output> {
    tracing::debug!("Running: {} {}", tool_name, args.join(" "));

    let output = Command::new(tool_path)
        .args(args)
        .output()
        .map_err(|e| ExtractionError::spawn(tool_name, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractionError::command_failed(
            tool_name,
            output.status.code().unwrap_or(-1),
            stderr.trim().to_string(),
        ));
    }

    Ok(output)
}

/// Search PATH entries for an executable file with the given name.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
