//! Native share targets
//!
//! Desktop implementations of the core share capabilities: window screenshots
//! encoded with `image`, an async save dialog from `rfd`, the system clipboard via
//! `arboard`, and the default browser via `webbrowser`.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use hongbao_dice_core::{
    download_screenshot, share, Clipboard, Completion, FileDownload, GameConfig,
    ScreenshotCapture, ShareError, ShareLink, ShareTargets,
};

/// Encode a captured window frame as PNG bytes
pub fn encode_capture(image: Image) -> Result<Vec<u8>, ShareError> {
    let dynamic = image
        .try_into_dynamic()
        .map_err(|e| ShareError::Capture(e.to_string()))?;
    encode_png(dynamic.to_rgb8())
}

/// Encode an RGB buffer as PNG bytes
pub fn encode_png(rgb: image::RgbImage) -> Result<Vec<u8>, ShareError> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ShareError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// PNG bytes encoded when the frame arrived, handed out once
pub struct EncodedImage {
    bytes: Option<Vec<u8>>,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }
}

impl ScreenshotCapture for EncodedImage {
    fn capture(&mut self) -> Result<Vec<u8>, ShareError> {
        self.bytes
            .take()
            .ok_or_else(|| ShareError::Capture("frame already consumed".to_string()))
    }
}

/// Writes to the exact path picked in the save dialog
pub struct ChosenFile(pub PathBuf);

impl FileDownload for ChosenFile {
    fn save(&mut self, bytes: &[u8], _file_name: &str) -> Result<PathBuf, ShareError> {
        std::fs::write(&self.0, bytes)?;
        Ok(self.0.clone())
    }
}

/// What to do with a captured frame once it has somewhere to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Save, copy the greeting and open the share page
    Share,
    /// Save only
    Download,
}

/// A save dialog still open, with the encoded frame waiting on it
#[derive(Component)]
pub struct SaveDialogTask {
    pub task: Task<Option<PathBuf>>,
    pub bytes: Vec<u8>,
    pub kind: ExportKind,
}

/// Open the save dialog off the main schedule so frames keep running
pub fn spawn_save_dialog(file_name: &str) -> Task<Option<PathBuf>> {
    let file_name = file_name.to_string();
    IoTaskPool::get().spawn(async move {
        let file = rfd::AsyncFileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .set_title("Save red envelope card")
            .save_file()
            .await;

        file.map(|f| f.path().to_path_buf())
    })
}

/// Store the frame and, for a share, copy the greeting and open the link.
///
/// Returns the status line to show.
pub fn complete_export(
    kind: ExportKind,
    bytes: Vec<u8>,
    download: &mut dyn FileDownload,
    config: &GameConfig,
    completion: Option<&Completion>,
    clipboard: &mut dyn Clipboard,
    link: &mut dyn ShareLink,
) -> Result<String, ShareError> {
    let mut capture = EncodedImage::new(bytes);
    match kind {
        ExportKind::Share => {
            let report = share(
                completion,
                config,
                ShareTargets {
                    capture: &mut capture,
                    download,
                    clipboard,
                    link,
                },
            )?;
            Ok(report.summary())
        }
        ExportKind::Download => {
            let path = download_screenshot(&mut capture, download, &config.screenshot_file_name)?;
            Ok(format!("Screenshot saved to {}", path.display()))
        }
    }
}

/// System clipboard, opened lazily and kept alive so the copied text stays
/// available after the write returns.
#[derive(Resource, Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
        let slot = self
            .inner
            .get_mut()
            .map_err(|_| ShareError::Clipboard("clipboard lock poisoned".to_string()))?;

        if slot.is_none() {
            *slot = Some(arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?);
        }

        match slot.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ShareError::Clipboard(e.to_string())),
            None => Err(ShareError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

/// Opens links in the default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLink;

impl ShareLink for BrowserLink {
    fn open(&mut self, url: &str) -> Result<(), ShareError> {
        webbrowser::open(url).map_err(|e| ShareError::Link(e.to_string()))
    }
}
