//! Hand gesture identifiers and hand selection.

use serde::{Deserialize, Serialize};

/// Number of distinct hand gestures reported by the avatar runtime.
pub const GESTURE_COUNT: i32 = 8;

/// Hand gestures, in the order of their integer parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Neutral,
    Fist,
    HandOpen,
    FingerPoint,
    Victory,
    RockNRoll,
    HandGun,
    ThumbsUp,
}

impl Gesture {
    /// Integer value carried by the gesture parameter.
    pub fn value(&self) -> i32 {
        match self {
            Gesture::Neutral => 0,
            Gesture::Fist => 1,
            Gesture::HandOpen => 2,
            Gesture::FingerPoint => 3,
            Gesture::Victory => 4,
            Gesture::RockNRoll => 5,
            Gesture::HandGun => 6,
            Gesture::ThumbsUp => 7,
        }
    }

    /// Gesture for an integer parameter value.
    pub fn from_value(value: i32) -> Option<Self> {
        Self::all().get(usize::try_from(value).ok()?).copied()
    }

    /// Returns the gesture as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Neutral => "neutral",
            Gesture::Fist => "fist",
            Gesture::HandOpen => "hand_open",
            Gesture::FingerPoint => "finger_point",
            Gesture::Victory => "victory",
            Gesture::RockNRoll => "rock_n_roll",
            Gesture::HandGun => "hand_gun",
            Gesture::ThumbsUp => "thumbs_up",
        }
    }

    /// Returns all gestures in value order.
    pub fn all() -> &'static [Gesture] {
        &[
            Gesture::Neutral,
            Gesture::Fist,
            Gesture::HandOpen,
            Gesture::FingerPoint,
            Gesture::Victory,
            Gesture::RockNRoll,
            Gesture::HandGun,
            Gesture::ThumbsUp,
        ]
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::all()
            .iter()
            .find(|g| g.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown gesture: {}", s))
    }
}

/// Which hand drives the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    /// Name of the built-in gesture parameter for this hand.
    pub fn gesture_parameter(&self) -> &'static str {
        match self {
            Hand::Left => "GestureLeft",
            Hand::Right => "GestureRight",
        }
    }
}

impl std::str::FromStr for Hand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Hand::Left),
            "right" => Ok(Hand::Right),
            _ => Err(format!("unknown hand: {}", s)),
        }
    }
}
