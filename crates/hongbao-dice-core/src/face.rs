//! Die face model
//!
//! Static mapping from face identity to pip count, and the orientation that
//! brings a given face to the front of the die.
//!
//! Orientations are expressed the way a screen-space 3D transform reads them:
//! `x` then `y` rotation in degrees, with the y axis pointing down. Rendering
//! front-ends convert them to their own coordinate system.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of faces on a die
pub const FACE_COUNT: usize = 6;

/// A resolved pip value, always in `1..=6`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Uniform sample in `1..=6`
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    /// All six values in ascending order
    pub fn all() -> impl Iterator<Item = DieValue> {
        (Self::MIN..=Self::MAX).map(DieValue)
    }
}

impl TryFrom<u8> for DieValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DieValue::new(value).ok_or_else(|| format!("die value out of range: {}", value))
    }
}

impl From<DieValue> for u8 {
    fn from(value: DieValue) -> Self {
        value.0
    }
}

impl fmt::Display for DieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotation about the x and y axes, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    pub const FRONT: Orientation = Orientation::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotateX({}deg) rotateY({}deg)", self.x, self.y)
    }
}

/// The six faces of a cube die
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    /// Pip count printed on this face. Opposite faces always sum to 7.
    pub fn pips(self) -> u8 {
        match self {
            Face::Front => 1,
            Face::Back => 6,
            Face::Right => 2,
            Face::Left => 5,
            Face::Top => 3,
            Face::Bottom => 4,
        }
    }

    pub fn value(self) -> DieValue {
        DieValue(self.pips())
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
        }
    }

    pub fn for_value(value: DieValue) -> Face {
        match value.get() {
            1 => Face::Front,
            2 => Face::Right,
            3 => Face::Top,
            4 => Face::Bottom,
            5 => Face::Left,
            _ => Face::Back,
        }
    }

    /// Outward normal in a right-handed, y-up frame where the front face
    /// looks toward +z.
    pub fn normal(self) -> [f32; 3] {
        match self {
            Face::Front => [0.0, 0.0, 1.0],
            Face::Back => [0.0, 0.0, -1.0],
            Face::Right => [1.0, 0.0, 0.0],
            Face::Left => [-1.0, 0.0, 0.0],
            Face::Top => [0.0, 1.0, 0.0],
            Face::Bottom => [0.0, -1.0, 0.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Right => "right",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }
}

/// Orientation that brings the face showing `value` to the front.
pub fn orientation_for(value: DieValue) -> Orientation {
    match Face::for_value(value) {
        Face::Front => Orientation::new(0.0, 0.0),
        Face::Right => Orientation::new(0.0, -90.0),
        Face::Top => Orientation::new(-90.0, 0.0),
        Face::Bottom => Orientation::new(90.0, 0.0),
        Face::Left => Orientation::new(0.0, 90.0),
        Face::Back => Orientation::new(0.0, 180.0),
    }
}

/// Pip centres for a face showing `pips`, on a 3x3 grid.
///
/// Coordinates are in `[-1, 1]`, `(col, row)` with row growing downward.
pub fn pip_layout(pips: u8) -> &'static [(i8, i8)] {
    match pips {
        1 => &[(0, 0)],
        2 => &[(-1, -1), (1, 1)],
        3 => &[(-1, -1), (0, 0), (1, 1)],
        4 => &[(-1, -1), (1, -1), (-1, 1), (1, 1)],
        5 => &[(-1, -1), (1, -1), (0, 0), (-1, 1), (1, 1)],
        6 => &[(-1, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (1, 1)],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_die_value_range() {
        assert_eq!(DieValue::new(0), None);
        assert_eq!(DieValue::new(7), None);
        assert_eq!(DieValue::new(1).map(DieValue::get), Some(1));
        assert_eq!(DieValue::new(6).map(DieValue::get), Some(6));
        assert_eq!(DieValue::all().count(), 6);
    }

    #[test]
    fn test_die_value_sample_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = DieValue::sample(&mut rng).get();
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_opposite_faces_sum_to_seven() {
        for face in Face::ALL {
            assert_eq!(face.pips() + face.opposite().pips(), 7, "{}", face.name());
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_face_for_value_round_trips() {
        for value in DieValue::all() {
            assert_eq!(Face::for_value(value).value(), value);
        }
    }

    #[test]
    fn test_orientation_table() {
        let expected = [
            (1, 0.0, 0.0),
            (2, 0.0, -90.0),
            (3, -90.0, 0.0),
            (4, 90.0, 0.0),
            (5, 0.0, 90.0),
            (6, 0.0, 180.0),
        ];
        for (v, x, y) in expected {
            let o = orientation_for(DieValue::new(v).unwrap());
            assert_eq!(o, Orientation::new(x, y), "value {}", v);
        }
    }

    #[test]
    fn test_pip_layout_counts() {
        for face in Face::ALL {
            assert_eq!(pip_layout(face.pips()).len(), face.pips() as usize);
        }
        assert!(pip_layout(0).is_empty());
    }

    #[test]
    fn test_die_value_serde() {
        let v: DieValue = serde_json::from_str("4").unwrap();
        assert_eq!(v.get(), 4);
        assert!(serde_json::from_str::<DieValue>("9").is_err());
        assert_eq!(serde_json::to_string(&v).unwrap(), "4");
    }

    #[test]
    fn test_orientation_display() {
        let o = Orientation::new(-20.0, 20.0);
        assert_eq!(o.to_string(), "rotateX(-20deg) rotateY(20deg)");
    }
}
