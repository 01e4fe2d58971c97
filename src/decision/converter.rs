//! External document converter invocation.
//!
//! Spawns the converter (LibreOffice by default) in headless mode, waits for
//! it with a deadline and kills it when the deadline passes. Standard error is
//! drained concurrently so a chatty converter cannot block on a full pipe.
//!
//! On unix the converter leads its own process group. `soffice` forks helper
//! processes, so the whole group is killed on timeout and again once the
//! launcher exits.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::GeneratorError;

pub const DEFAULT_CONVERTER: &str = "soffice";
pub const DEFAULT_TARGET_EXTENSION: &str = "pdf";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How to invoke the converter.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub program: PathBuf,
    /// Arguments placed before the conversion arguments (e.g. a script path
    /// when `program` is an interpreter).
    pub base_args: Vec<String>,
    pub target_extension: String,
    pub timeout: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_CONVERTER),
            base_args: Vec::new(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConverterConfig {
    /// Where the converter is expected to put the output for `input`.
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        output_dir.join(format!("{}.{}", stem, self.target_extension))
    }
}

/// Convert `input` into `output_dir`, returning the path of the produced file.
///
/// The file is not read or checked here; a converter that exits 0 without
/// producing output surfaces as a read error later. One deadline covers the
/// wait and the stderr drain.
pub async fn convert(
    config: &ConverterConfig,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, GeneratorError> {
    let deadline = Instant::now() + config.timeout;

    let mut command = Command::new(&config.program);
    command
        .args(&config.base_args)
        .arg("--headless")
        .arg("--convert-to")
        .arg(&config.target_extension)
        .arg("--outdir")
        .arg(output_dir)
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    log::debug!(
        "Spawning converter {} for {}",
        config.program.display(),
        input.display()
    );
    let mut child = command
        .spawn()
        .map_err(GeneratorError::ConverterUnavailable)?;
    let group = child.id();

    let stderr_reader = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf).await;
            buf
        })
    });

    let status = match tokio::time::timeout_at(deadline, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            kill_group(group).await;
            abort_reader(stderr_reader);
            return Err(GeneratorError::ConverterWait(e));
        }
        Err(_) => {
            log::warn!(
                "Converter exceeded {:?}; terminating process",
                config.timeout
            );
            kill_group(group).await;
            if let Err(e) = child.kill().await {
                log::error!("Failed to terminate converter process: {}", e);
            }
            abort_reader(stderr_reader);
            return Err(GeneratorError::ConversionTimeout(config.timeout));
        }
    };

    // Anything the launcher left running would hold the stderr pipe open.
    kill_group(group).await;

    let stderr = match stderr_reader {
        Some(mut handle) => match tokio::time::timeout_at(deadline, &mut handle).await {
            Ok(joined) => joined.unwrap_or_default(),
            Err(_) => {
                log::warn!("Converter stderr still open at deadline; discarding it");
                handle.abort();
                String::new()
            }
        },
        None => String::new(),
    };

    if status.success() {
        Ok(config.output_path(input, output_dir))
    } else {
        Err(GeneratorError::ConversionFailed {
            code: status.code(),
            stderr: stderr.trim().to_string(),
        })
    }
}

fn abort_reader(reader: Option<JoinHandle<String>>) {
    if let Some(handle) = reader {
        handle.abort();
    }
}

/// SIGKILL every process left in the converter's process group.
#[cfg(unix)]
async fn kill_group(group: Option<u32>) {
    let Some(pgid) = group else {
        return;
    };
    let result = Command::new("kill")
        .arg("-KILL")
        .arg("--")
        .arg(format!("-{pgid}"))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
    match result {
        Ok(status) if status.success() => {
            log::debug!("Terminated leftover converter processes in group {}", pgid)
        }
        // Group already empty.
        Ok(_) => {}
        Err(e) => log::warn!("Failed to signal converter process group {}: {}", pgid, e),
    }
}

#[cfg(not(unix))]
async fn kill_group(_group: Option<u32>) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_input_stem() {
        let config = ConverterConfig::default();
        let out = config.output_path(
            Path::new("/scratch/fill/decision-abc.fodt"),
            Path::new("/scratch/convert"),
        );
        assert_eq!(out, PathBuf::from("/scratch/convert/decision-abc.pdf"));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let config = ConverterConfig {
            program: PathBuf::from("/definitely/not/a/converter-binary"),
            ..Default::default()
        };
        let result = convert(&config, Path::new("in.fodt"), Path::new(".")).await;
        assert!(matches!(result, Err(GeneratorError::ConverterUnavailable(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_background_child_does_not_hold_up_completion() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConverterConfig {
            program: PathBuf::from("sh"),
            base_args: vec!["-c".into(), "sleep 8 & exit 0".into(), "sh".into()],
            timeout: Duration::from_secs(3),
            ..Default::default()
        };

        let started = std::time::Instant::now();
        let output = convert(&config, &dir.path().join("in.fodt"), dir.path())
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(output, dir.path().join("in.pdf"));
    }
}
