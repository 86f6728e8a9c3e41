//! Hongbao Dice core
//!
//! The New Year red envelope dice game without any rendering attached:
//! - `face` - die faces, pip counts and the orientation showing each value
//! - `animation` - one die's eased spin from a random start to its face
//! - `session` - five roll slots, the busy guard, hints and the result panel
//! - `completion` - place values, the total and its breakdown
//! - `share` - screenshot/clipboard/download/link capabilities and the share flow
//! - `config` - tunable timings and share settings
//!
//! A front-end owns one [`GameSession`], forwards clicks to
//! [`GameSession::roll`] and calls [`GameSession::advance`] once per frame,
//! drawing the orientations it returns.

pub mod animation;
pub mod completion;
pub mod config;
pub mod face;
pub mod session;
pub mod share;

pub use animation::{ease_out_cubic, AnimationStep, RollAnimation, RollPlan, Spin, SpinDirection};
pub use completion::{format_amount, Completion, Place, PlaceResult, DICE_COUNT, MULTIPLIERS};
pub use config::{ConfigError, GameConfig};
pub use face::{orientation_for, pip_layout, DieValue, Face, Orientation};
pub use session::{
    CompletionCheck, GameSession, Hint, IgnoreReason, ResultPanel, RollRequest, SessionEvent,
};
pub use share::{
    download_screenshot, greeting_text, share, Clipboard, DirectoryDownload, FileDownload,
    ScreenshotCapture, ShareError, ShareLink, ShareReport, ShareTargets,
};
