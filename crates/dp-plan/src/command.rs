//! Turn-by-turn command types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Compass ───────────────────────────────────────────────────────────────────

/// Eight-point compass heading of a stretch of road.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Compass {
    /// Bucket a segment bearing (0° = east, counter-clockwise) into 45°
    /// sectors centred on the eight headings.
    ///
    /// | Bearing          | Heading   |
    /// |------------------|-----------|
    /// | [0, 22.5)        | east      |
    /// | [22.5, 67.5)     | northeast |
    /// | [67.5, 112.5)    | north     |
    /// | [112.5, 157.5)   | northwest |
    /// | [157.5, 202.5)   | west      |
    /// | [202.5, 247.5)   | southwest |
    /// | [247.5, 292.5)   | south     |
    /// | [292.5, 337.5)   | southeast |
    /// | [337.5, 360)     | east      |
    pub fn from_bearing(degrees: f64) -> Self {
        let b = degrees.rem_euclid(360.0);
        if b < 22.5 {
            Compass::East
        } else if b < 67.5 {
            Compass::NorthEast
        } else if b < 112.5 {
            Compass::North
        } else if b < 157.5 {
            Compass::NorthWest
        } else if b < 202.5 {
            Compass::West
        } else if b < 247.5 {
            Compass::SouthWest
        } else if b < 292.5 {
            Compass::South
        } else if b < 337.5 {
            Compass::SouthEast
        } else {
            Compass::East
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compass::East      => "east",
            Compass::NorthEast => "northeast",
            Compass::North     => "north",
            Compass::NorthWest => "northwest",
            Compass::West      => "west",
            Compass::SouthWest => "southwest",
            Compass::South     => "south",
            Compass::SouthEast => "southeast",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TurnDirection ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Classify a turn angle in degrees (see [`dp_core::turn_angle`]).
    ///
    /// `[1, 180)` is a left turn and `[180, 359]` a right turn.  Anything
    /// else, i.e. `[0, 1)` and `(359, 360)`, is driving straight on and
    /// returns `None`.
    pub fn classify(angle: f64) -> Option<Self> {
        if (1.0..180.0).contains(&angle) {
            Some(TurnDirection::Left)
        } else if (180.0..=359.0).contains(&angle) {
            Some(TurnDirection::Right)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Left  => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DeliveryCommand ───────────────────────────────────────────────────────────

/// One line of driving directions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum DeliveryCommand {
    /// Drive `miles` along `street`, heading `direction`.
    Proceed {
        direction: Compass,
        street:    String,
        miles:     f64,
    },
    /// Turn onto `street`.
    Turn {
        direction: TurnDirection,
        street:    String,
    },
    /// Hand over `item` at the current stop.
    Deliver { item: String },
}

impl DeliveryCommand {
    pub fn deliver(item: impl Into<String>) -> Self {
        DeliveryCommand::Deliver { item: item.into() }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, DeliveryCommand::Proceed { .. })
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, DeliveryCommand::Turn { .. })
    }

    pub fn is_deliver(&self) -> bool {
        matches!(self, DeliveryCommand::Deliver { .. })
    }
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryCommand::Proceed { direction, street, miles } => {
                write!(f, "Proceed {miles:.2} miles {direction} on {street}")
            }
            DeliveryCommand::Turn { direction, street } => {
                write!(f, "Turn {direction} on {street}")
            }
            DeliveryCommand::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}
