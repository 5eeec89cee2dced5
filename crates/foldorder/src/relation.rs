//! Relation values and the outcome of guarded writes.

use std::fmt;

use crate::error::MatrixError;

/// Stacking relation of face `i` with respect to face `j`, as stored at `(i, j)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The faces do not overlap geometrically; no order exists.
    NoOverlap,
    /// Face `i` lies above face `j`.
    Above,
    /// Face `i` lies below face `j`.
    Below,
    /// The faces overlap but their order is not decided yet.
    Unresolved,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::NoOverlap,
        Relation::Above,
        Relation::Below,
        Relation::Unresolved,
    ];

    /// The value stored at `(j, i)` when `self` is stored at `(i, j)`.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Relation::Above => Relation::Below,
            Relation::Below => Relation::Above,
            other => other,
        }
    }

    /// Above or below.
    #[inline]
    pub fn is_definite(self) -> bool {
        matches!(self, Relation::Above | Relation::Below)
    }

    /// Stable byte code: `NoOverlap = 0`, `Above = 1`, `Below = 2`, `Unresolved = 3`.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Relation::NoOverlap => 0,
            Relation::Above => 1,
            Relation::Below => 2,
            Relation::Unresolved => 3,
        }
    }

    /// Inverse of [`Relation::code`]; any other byte is outside the domain.
    #[inline]
    pub fn from_code(code: u8) -> Result<Self, MatrixError> {
        match code {
            0 => Ok(Relation::NoOverlap),
            1 => Ok(Relation::Above),
            2 => Ok(Relation::Below),
            3 => Ok(Relation::Unresolved),
            other => Err(MatrixError::invalid(format!(
                "relation code {other} is not one of 0..=3"
            ))),
        }
    }
}

impl TryFrom<u8> for Relation {
    type Error = MatrixError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Relation::from_code(code)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::NoOverlap => "no-overlap",
            Relation::Above => "above",
            Relation::Below => "below",
            Relation::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

/// Outcome of [`crate::OverlapRelation::set_if_possible`] and of applying a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationResult {
    /// An unresolved cell was claimed.
    Changed,
    /// The cell already held the requested value.
    NotChanged,
    /// The cell held the opposite definite value; the hypothesis is physically invalid.
    Unfoldable,
}

impl PropagationResult {
    /// Combine outcomes of several writes: `Unfoldable` dominates, then `Changed`.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        use PropagationResult::*;
        match (self, other) {
            (Unfoldable, _) | (_, Unfoldable) => Unfoldable,
            (Changed, _) | (_, Changed) => Changed,
            _ => NotChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_pairs_above_with_below() {
        assert_eq!(Relation::Above.inverse(), Relation::Below);
        assert_eq!(Relation::Below.inverse(), Relation::Above);
        assert_eq!(Relation::NoOverlap.inverse(), Relation::NoOverlap);
        assert_eq!(Relation::Unresolved.inverse(), Relation::Unresolved);
        for r in Relation::ALL {
            assert_eq!(r.inverse().inverse(), r);
        }
    }

    #[test]
    fn codes_roundtrip_and_reject_outside_domain() {
        for r in Relation::ALL {
            assert_eq!(Relation::from_code(r.code()), Ok(r));
        }
        assert!(matches!(
            Relation::try_from(4u8),
            Err(MatrixError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn merge_prefers_unfoldable_then_changed() {
        use PropagationResult::*;
        assert_eq!(NotChanged.merge(NotChanged), NotChanged);
        assert_eq!(NotChanged.merge(Changed), Changed);
        assert_eq!(Changed.merge(Unfoldable), Unfoldable);
        assert_eq!(Unfoldable.merge(NotChanged), Unfoldable);
    }
}
