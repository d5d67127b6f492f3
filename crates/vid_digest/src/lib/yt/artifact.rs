use std::{
    fs::{create_dir_all, remove_dir_all},
    path::{Path, PathBuf},
};

use uuid::Uuid;

/// Temporary audio owned by a single request.
///
/// Each artifact gets its own directory under the workdir so that anything the
/// downloader leaves next to the audio (`.part`, `.ytdl`, pre-conversion
/// `.webm`/`.m4a`) goes with it. The directory is removed when the artifact is
/// dropped, whichever way the request ends.
#[derive(Debug)]
pub struct AudioArtifact {
    id: Uuid,
    dir: PathBuf,
    path: PathBuf,
}

impl AudioArtifact {
    pub const EXTENSION: &'static str = "mp3";

    /// Creates `<workdir>/<utc timestamp>-<uuid>/` and reserves
    /// `<utc timestamp>-<uuid>.mp3` inside it. The audio file itself is not created.
    pub fn reserve(workdir: &Path) -> std::io::Result<Self> {
        let id = Uuid::new_v4();
        let stem = format!("{}-{id}", chrono::Utc::now().format("%Y%m%dT%H%M%S"));
        let dir = workdir.join(&stem);
        create_dir_all(&dir)?;

        let path = dir.join(format!("{stem}.{}", Self::EXTENSION));
        Ok(Self { id, dir, path })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// yt-dlp output template: same stem, extension filled in by the tool
    pub fn output_template(&self) -> PathBuf {
        self.path.with_extension("%(ext)s")
    }
}

impl Drop for AudioArtifact {
    fn drop(&mut self) {
        match remove_dir_all(&self.dir) {
            Ok(()) => tracing::debug!(path = ?self.dir, "Removed audio directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = ?e, path = ?self.dir, "Failed to remove audio directory")
            }
        }
    }
}
