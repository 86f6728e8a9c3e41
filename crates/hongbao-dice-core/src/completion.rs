//! Completion aggregator
//!
//! Turns five resolved dice into the red envelope amount and its per-die
//! breakdown.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::face::DieValue;

/// Number of dice in a game
pub const DICE_COUNT: usize = 5;

/// Decimal place bound to each die, in die order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Place {
    TenThousands,
    Thousands,
    Hundreds,
    Tens,
    Units,
}

impl Place {
    pub const ALL: [Place; DICE_COUNT] = [
        Place::TenThousands,
        Place::Thousands,
        Place::Hundreds,
        Place::Tens,
        Place::Units,
    ];

    pub fn for_die(index: usize) -> Option<Place> {
        Self::ALL.get(index).copied()
    }

    pub fn multiplier(self) -> u32 {
        match self {
            Place::TenThousands => 10_000,
            Place::Thousands => 1_000,
            Place::Hundreds => 100,
            Place::Tens => 10,
            Place::Units => 1,
        }
    }

    /// Short place label as printed on the share card
    pub fn label(self) -> &'static str {
        match self {
            Place::TenThousands => "萬",
            Place::Thousands => "千",
            Place::Hundreds => "百",
            Place::Tens => "十",
            Place::Units => "個",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Place::TenThousands => "ten-thousands",
            Place::Thousands => "thousands",
            Place::Hundreds => "hundreds",
            Place::Tens => "tens",
            Place::Units => "units",
        }
    }
}

/// Fixed place-value multipliers, in die order
pub const MULTIPLIERS: [u32; DICE_COUNT] = [10_000, 1_000, 100, 10, 1];

/// One entry of the result breakdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place: Place,
    pub value: DieValue,
}

impl fmt::Display for PlaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}位 {}", self.place.label(), self.value)
    }
}

/// The outcome of a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub values: [DieValue; DICE_COUNT],
    pub total: u32,
}

impl Completion {
    /// `None` while any slot is still unresolved.
    pub fn from_results(results: &[Option<DieValue>; DICE_COUNT]) -> Option<Self> {
        let values = results.iter().copied().collect::<Option<Vec<DieValue>>>()?;
        let values: [DieValue; DICE_COUNT] = values.try_into().ok()?;
        Some(Self::from_values(values))
    }

    pub fn from_values(values: [DieValue; DICE_COUNT]) -> Self {
        let total = values
            .iter()
            .zip(MULTIPLIERS)
            .map(|(value, multiplier)| u32::from(value.get()) * multiplier)
            .sum();
        Self { values, total }
    }

    pub fn breakdown(&self) -> [PlaceResult; DICE_COUNT] {
        std::array::from_fn(|i| PlaceResult {
            place: Place::ALL[i],
            value: self.values[i],
        })
    }

    /// `$` followed by the total with grouped thousands
    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }
}

/// Format an amount as currency with grouped thousands, e.g. `$12,345`
pub fn format_amount(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
