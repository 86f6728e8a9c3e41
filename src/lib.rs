//! Hongbao Dice - click five 3D dice to roll a New Year red envelope amount.
//!
//! The game rules live in `hongbao-dice-core`; this crate is the Bevy
//! front-end drawing the dice, the result card and the share buttons.

pub mod dice3d;
