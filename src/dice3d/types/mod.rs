//! Type definitions for the Hongbao Dice 3D game
//!
//! This module is organized into submodules:
//! - `dice` - Die components, the session resource, materials and messages
//! - `ui` - UI components for the hint, result panel and buttons
//! - `camera` - Camera-related components
//! - `settings` - Game configuration resource

pub mod camera;
pub mod dice;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use settings::*;
pub use ui::*;
