use arrayvec::ArrayVec;

use crate::grid::DistanceMeasurer;
use crate::types::Point;

/// Constraint on where a forced movement may send its target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum MovementDirection {
    /// Strictly farther from the source.
    Push,
    /// Strictly nearer to the source.
    Pull,
    /// Either farther or nearer, never the same distance.
    PushOrPull,
    /// No directional constraint.
    #[default]
    Any,
}

/// One leg of a directional movement, relative to the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Heading {
    /// Away from the source.
    Away,
    /// Toward the source.
    Toward,
}

impl MovementDirection {
    /// Whether `candidate` satisfies this direction for a target currently at `target`.
    pub fn accepts<M: DistanceMeasurer + ?Sized>(
        self,
        measurer: &M,
        source: Point,
        target: Point,
        candidate: Point,
    ) -> bool {
        if self == MovementDirection::Any {
            return true;
        }
        let current = measurer.measure(source, target);
        let next = measurer.measure(source, candidate);
        match self {
            MovementDirection::Push => next > current,
            MovementDirection::Pull => next < current,
            MovementDirection::PushOrPull => next != current,
            MovementDirection::Any => true,
        }
    }

    /// Headings this direction allows, push before pull.
    pub fn headings(self) -> ArrayVec<Heading, 2> {
        let mut headings = ArrayVec::new();
        if matches!(self, MovementDirection::Push | MovementDirection::PushOrPull) {
            headings.push(Heading::Away);
        }
        if matches!(self, MovementDirection::Pull | MovementDirection::PushOrPull) {
            headings.push(Heading::Toward);
        }
        headings
    }

    pub fn is_directional(self) -> bool {
        self != MovementDirection::Any
    }
}

impl Heading {
    /// The single-heading direction used to re-check a point on this leg.
    pub fn direction(self) -> MovementDirection {
        match self {
            Heading::Away => MovementDirection::Push,
            Heading::Toward => MovementDirection::Pull,
        }
    }
}
