pub mod share;
pub mod systems;
pub mod types;

pub use share::*;
pub use systems::*;
pub use types::*;
