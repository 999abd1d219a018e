//! Parser for yt-dlp command output

use super::traits::FetchedVideo;
use crate::error::DownloadError;

/// Title used when the extractor does not report one
pub const DEFAULT_TITLE: &str = "video";

/// Exit status of an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command exited successfully (exit code 0)
    Success,
    /// The command exited with a non-zero exit code
    Failure,
}

impl ExitStatus {
    /// Returns `true` if the exit status represents success
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<bool> for ExitStatus {
    fn from(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Parse the output of a yt-dlp run started with `--print after_move:title`
///
/// On success the title is the last non-empty stdout line. On failure the
/// reason is the last `ERROR:` line of stderr, falling back to the last
/// non-empty stderr line.
pub fn parse_ytdlp_output(
    stdout: &[u8],
    stderr: &[u8],
    exit_status: ExitStatus,
) -> crate::Result<FetchedVideo> {
    let output = String::from_utf8_lossy(stdout);
    let error_output = String::from_utf8_lossy(stderr);

    if !exit_status.is_success() {
        let reason = error_output
            .lines()
            .rev()
            .find_map(|line| line.trim().strip_prefix("ERROR:"))
            .map(|line| line.trim().to_string())
            .or_else(|| last_non_empty(&error_output))
            .unwrap_or_else(|| "yt-dlp exited with an error".to_string());

        return Err(DownloadError::FetchFailed { reason }.into());
    }

    let title = last_non_empty(&output).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    Ok(FetchedVideo { title })
}

fn last_non_empty(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .rev()
        .find(|line| !line.is_empty())
        .map(String::from)
}
