use std::{
    path::PathBuf,
    process::{ExitStatus, Stdio},
};

use tokio::process::Command;

use crate::yt::{AudioArtifact, AudioHandler};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("yt-dlp exited with {status}: {stderr}")]
    ToolFailed { status: ExitStatus, stderr: String },
    #[error("yt-dlp did not produce expected file: {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("Failed to run yt-dlp: {0}")]
    Io(#[from] std::io::Error),
}

/// Audio extraction through the `yt-dlp` command line tool
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_path: Option<PathBuf>,
    no_check_certificates: bool,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            cookies_path: None,
            no_check_certificates: true,
        }
    }
}

impl YtDlp {
    pub fn new_with_cookies(cookies_path: Option<PathBuf>) -> Self {
        Self {
            cookies_path,
            ..Default::default()
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn check_certificates(mut self, check: bool) -> Self {
        self.no_check_certificates = !check;
        self
    }

    fn command(&self, url: &str, artifact: &AudioArtifact) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-x")
            .arg("--audio-format")
            .arg(AudioArtifact::EXTENSION)
            .arg("-o")
            .arg(artifact.output_template());

        if let Some(cookies) = &self.cookies_path {
            cmd.arg("--cookies").arg(cookies);
        }
        if self.no_check_certificates {
            cmd.arg("--no-check-certificates");
        }

        cmd.arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

impl AudioHandler for YtDlp {
    type Error = AudioError;

    #[tracing::instrument(skip(self, artifact), fields(path = ?artifact.path()))]
    async fn download(&self, url: &str, artifact: &AudioArtifact) -> Result<(), Self::Error> {
        let output = self
            .command(url, artifact)
            .output()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to spawn yt-dlp"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(status = %output.status, %stderr, "Failed to download audio");
            return Err(AudioError::ToolFailed {
                status: output.status,
                stderr,
            });
        }

        if !artifact.path().exists() {
            return Err(AudioError::MissingOutput(artifact.path().to_path_buf()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn builds_mp3_extraction_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::reserve(dir.path()).unwrap();
        let cmd = YtDlp::default().command("https://youtu.be/abc", &artifact);
        let args = args(&cmd);

        assert_eq!(&args[..3], ["-x", "--audio-format", "mp3"]);
        assert_eq!(args[4], artifact.output_template().to_string_lossy());
        assert!(args.contains(&"--no-check-certificates".to_string()));
        assert!(!args.contains(&"--cookies".to_string()));
        assert_eq!(&args[args.len() - 2..], ["--", "https://youtu.be/abc"]);
    }

    #[test]
    fn cookies_are_passed_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::reserve(dir.path()).unwrap();
        let cmd = YtDlp::new_with_cookies(Some("/etc/yt/cookies.txt".into()))
            .check_certificates(true)
            .command("https://youtu.be/abc", &artifact);
        let args = args(&cmd);

        let idx = args.iter().position(|a| a == "--cookies").unwrap();
        assert_eq!(args[idx + 1], "/etc/yt/cookies.txt");
        assert!(!args.contains(&"--no-check-certificates".to_string()));
    }
}
