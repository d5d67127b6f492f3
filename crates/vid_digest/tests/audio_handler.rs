#![cfg(unix)]

mod mocks;

use std::{os::unix::fs::PermissionsExt, path::PathBuf};

use mocks::{summarizer::MockSummarizer, transcriber::MockTranscriber};
use vid_digest::{
    yt::{AudioArtifact, AudioError, AudioHandler, YtDlp},
    Stage, SummaryPipelineBuilder,
};

/// Stand-in for yt-dlp that downloads part of a webm next to the output
/// template (`-o` is the fifth argument) and then fails post-processing
fn interrupted_download_script(dir: &tempfile::TempDir) -> PathBuf {
    let script = dir.path().join("yt-dlp");
    std::fs::write(
        &script,
        r#"#!/bin/sh
stem=$(printf '%s' "$5" | sed 's/\.%(ext)s$//')
printf 'partial' > "$stem.webm.part"
printf 'partial' > "$stem.webm"
echo "ERROR: Postprocessing: ffprobe and ffmpeg not found" >&2
exit 1
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[tokio::test]
async fn non_zero_exit_is_reported_as_tool_failure() {
    let workdir = tempfile::tempdir().unwrap();
    let artifact = AudioArtifact::reserve(workdir.path()).unwrap();

    let err = YtDlp::default()
        .with_binary("false")
        .download("https://youtu.be/abc", &artifact)
        .await
        .unwrap_err();

    assert!(matches!(err, AudioError::ToolFailed { .. }), "got: {err}");
}

#[tokio::test]
async fn success_without_output_file_is_reported() {
    let workdir = tempfile::tempdir().unwrap();
    let artifact = AudioArtifact::reserve(workdir.path()).unwrap();

    let err = YtDlp::default()
        .with_binary("true")
        .download("https://youtu.be/abc", &artifact)
        .await
        .unwrap_err();

    match err {
        AudioError::MissingOutput(path) => assert_eq!(path, artifact.path()),
        other => panic!("expected missing output, got {other}"),
    }
}

#[tokio::test]
async fn missing_binary_is_an_io_error() {
    let workdir = tempfile::tempdir().unwrap();
    let artifact = AudioArtifact::reserve(workdir.path()).unwrap();

    let err = YtDlp::default()
        .with_binary("/nonexistent/yt-dlp")
        .download("https://youtu.be/abc", &artifact)
        .await
        .unwrap_err();

    assert!(matches!(err, AudioError::Io(_)));
}

#[tokio::test]
async fn intermediate_files_are_removed_with_the_artifact() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let artifact = AudioArtifact::reserve(workdir.path()).unwrap();

    let err = YtDlp::default()
        .with_binary(interrupted_download_script(&bin_dir))
        .download("https://youtu.be/abc", &artifact)
        .await
        .unwrap_err();

    match err {
        AudioError::ToolFailed { stderr, .. } => assert!(stderr.contains("ffmpeg not found")),
        other => panic!("expected tool failure, got {other}"),
    }
    assert!(artifact.path().with_extension("webm.part").exists());
    assert!(artifact.path().with_extension("webm").exists());

    drop(artifact);
    assert_eq!(std::fs::read_dir(workdir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn failed_download_leaves_workdir_empty() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let transcriber = MockTranscriber::new("transcript");
    let transcriber_calls = transcriber.calls.clone();

    let pipeline = SummaryPipelineBuilder::new(workdir.path())
        .audio_handler(YtDlp::default().with_binary(interrupted_download_script(&bin_dir)))
        .transcriber(transcriber)
        .summarizer(MockSummarizer::new("summary"))
        .build();

    let err = pipeline.run("https://youtu.be/abc").await.unwrap_err();
    assert_eq!(err.stage(), Stage::Download);
    assert!(transcriber_calls.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_dir(workdir.path()).unwrap().count(), 0);
}
