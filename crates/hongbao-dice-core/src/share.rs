//! Share and export
//!
//! The game core never touches the screen, the clipboard or the browser
//! directly. Front-ends hand in implementations of the capability traits below
//! and the share flow wires them together.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::completion::Completion;
use crate::config::GameConfig;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Failed to save screenshot: {0}")]
    Save(#[from] std::io::Error),

    #[error("Save cancelled")]
    Cancelled,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Failed to open share link: {0}")]
    Link(String),

    #[error("Nothing to share until every die is rolled")]
    NotFinished,
}

/// Produces encoded image bytes of the share card
pub trait ScreenshotCapture {
    fn capture(&mut self) -> Result<Vec<u8>, ShareError>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// Stores captured bytes locally, returning where they went
pub trait FileDownload {
    fn save(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, ShareError>;
}

/// Opens a URL in a new browsing context
pub trait ShareLink {
    fn open(&mut self, url: &str) -> Result<(), ShareError>;
}

/// Writes downloads into a fixed directory
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileDownload for DirectoryDownload {
    fn save(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, ShareError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// What happened during a share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareReport {
    pub saved_to: PathBuf,
    pub copied: bool,
    pub link_opened: bool,
}

impl ShareReport {
    /// One-line status for the UI
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Screenshot saved to {}", self.saved_to.display())];
        if self.copied {
            parts.push("greeting copied to clipboard".to_string());
        }
        if self.link_opened {
            parts.push("paste it into your new post".to_string());
        }
        parts.join("; ")
    }
}

/// Greeting posted alongside the screenshot
pub fn greeting_text(completion: &Completion) -> String {
    let dice = completion
        .values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("、");

    format!(
        "🧧🎊 恭賀新禧！新年快樂！🎊🧧\n\n\
         我在「新年擲骰子」遊戲中骰出了 {}，\n\
         紅包金額是 {} 元！\n\n\
         🎉 金蛇年行大運，萬事如意！\n\
         🎲 快來試試你的新年手氣吧！",
        dice,
        completion.formatted_total()
    )
}

/// Capture the share card and store it.
pub fn download_screenshot(
    capture: &mut dyn ScreenshotCapture,
    download: &mut dyn FileDownload,
    file_name: &str,
) -> Result<PathBuf, ShareError> {
    let bytes = capture.capture()?;
    let path = download.save(&bytes, file_name)?;
    log::info!("Saved screenshot ({} bytes) to {}", bytes.len(), path.display());
    Ok(path)
}

/// The capability set a full share needs
pub struct ShareTargets<'a> {
    pub capture: &'a mut dyn ScreenshotCapture,
    pub download: &'a mut dyn FileDownload,
    pub clipboard: &'a mut dyn Clipboard,
    pub link: &'a mut dyn ShareLink,
}

/// Download the screenshot, copy the greeting and open the social site.
///
/// Capture and save failures abort the share. Clipboard and link failures are
/// logged and the flow carries on.
pub fn share(
    completion: Option<&Completion>,
    config: &GameConfig,
    targets: ShareTargets<'_>,
) -> Result<ShareReport, ShareError> {
    let completion = completion.ok_or(ShareError::NotFinished)?;

    let saved_to = download_screenshot(
        targets.capture,
        targets.download,
        &config.screenshot_file_name,
    )?;

    let copied = match targets.clipboard.write_text(&greeting_text(completion)) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    };

    let link_opened = match targets.link.open(&config.share_url) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    };

    Ok(ShareReport {
        saved_to,
        copied,
        link_opened,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::DieValue;

    struct FakeCapture(Result<Vec<u8>, ()>);

    impl ScreenshotCapture for FakeCapture {
        fn capture(&mut self) -> Result<Vec<u8>, ShareError> {
            self.0
                .clone()
                .map_err(|_| ShareError::Capture("no window".to_string()))
        }
    }

    #[derive(Default)]
    struct MemoryDownload(Vec<(String, Vec<u8>)>);

    impl FileDownload for MemoryDownload {
        fn save(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, ShareError> {
            self.0.push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        text: Option<String>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::Clipboard("denied".to_string()));
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLink(Vec<String>);

    impl ShareLink for FakeLink {
        fn open(&mut self, url: &str) -> Result<(), ShareError> {
            self.0.push(url.to_string());
            Ok(())
        }
    }

    fn completion() -> Completion {
        Completion::from_values([1, 2, 3, 4, 5].map(|v| DieValue::new(v).unwrap()))
    }

    #[test]
    fn test_greeting_mentions_dice_and_total() {
        let text = greeting_text(&completion());
        assert!(text.contains("1、2、3、4、5"));
        assert!(text.contains("$12,345"));
    }

    #[test]
    fn test_share_runs_every_step() {
        let config = GameConfig::default();
        let mut capture = FakeCapture(Ok(vec![1, 2, 3]));
        let mut download = MemoryDownload::default();
        let mut clipboard = FakeClipboard::default();
        let mut link = FakeLink::default();

        let report = share(
            Some(&completion()),
            &config,
            ShareTargets {
                capture: &mut capture,
                download: &mut download,
                clipboard: &mut clipboard,
                link: &mut link,
            },
        )
        .unwrap();

        assert!(report.copied);
        assert!(report.link_opened);
        assert_eq!(download.0.len(), 1);
        assert_eq!(download.0[0].0, config.screenshot_file_name);
        assert_eq!(download.0[0].1, vec![1, 2, 3]);
        assert!(clipboard.text.unwrap().contains("$12,345"));
        assert_eq!(link.0, vec![config.share_url.clone()]);
    }

    #[test]
    fn test_clipboard_failure_is_swallowed() {
        let config = GameConfig::default();
        let mut capture = FakeCapture(Ok(vec![0]));
        let mut download = MemoryDownload::default();
        let mut clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let mut link = FakeLink::default();

        let report = share(
            Some(&completion()),
            &config,
            ShareTargets {
                capture: &mut capture,
                download: &mut download,
                clipboard: &mut clipboard,
                link: &mut link,
            },
        )
        .unwrap();

        assert!(!report.copied);
        assert!(report.link_opened);
        assert_eq!(link.0.len(), 1);
    }

    #[test]
    fn test_capture_failure_aborts_share() {
        let config = GameConfig::default();
        let mut capture = FakeCapture(Err(()));
        let mut download = MemoryDownload::default();
        let mut clipboard = FakeClipboard::default();
        let mut link = FakeLink::default();

        let result = share(
            Some(&completion()),
            &config,
            ShareTargets {
                capture: &mut capture,
                download: &mut download,
                clipboard: &mut clipboard,
                link: &mut link,
            },
        );

        assert!(matches!(result, Err(ShareError::Capture(_))));
        assert!(download.0.is_empty());
        assert!(clipboard.text.is_none());
        assert!(link.0.is_empty());
    }

    #[test]
    fn test_share_requires_finished_game() {
        let config = GameConfig::default();
        let mut capture = FakeCapture(Ok(vec![0]));
        let mut download = MemoryDownload::default();
        let mut clipboard = FakeClipboard::default();
        let mut link = FakeLink::default();

        let result = share(
            None,
            &config,
            ShareTargets {
                capture: &mut capture,
                download: &mut download,
                clipboard: &mut clipboard,
                link: &mut link,
            },
        );
        assert!(matches!(result, Err(ShareError::NotFinished)));
    }

    #[test]
    fn test_directory_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut download = DirectoryDownload::new(dir.path().join("shots"));
        let path = download.save(b"png", "card.png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
        assert_eq!(path, dir.path().join("shots").join("card.png"));
    }
}
