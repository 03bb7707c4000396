//! Box identities for the six-box ocean
//!
//! The ocean is divided into six well-mixed boxes with a fixed order. The order is used as the
//! first axis of every per-box output array, so it is part of the public contract:
//!
//! | index | region                       |
//! |-------|------------------------------|
//! | 0     | [`SixBoxRegion::NorthA`]     |
//! | 1     | [`SixBoxRegion::NorthP`]     |
//! | 2     | [`SixBoxRegion::South`]      |
//! | 3     | [`SixBoxRegion::LowA`]       |
//! | 4     | [`SixBoxRegion::LowPI`]      |
//! | 5     | [`SixBoxRegion::Deep`]       |
//!
//! # Examples
//!
//! ```rust
//! use rbamocs_core::spatial::{SixBoxRegion, LOW_A_IDX};
//!
//! let idx: usize = SixBoxRegion::LowA.into();
//! assert_eq!(idx, LOW_A_IDX);
//! assert_eq!(SixBoxRegion::try_from(5).unwrap(), SixBoxRegion::Deep);
//! ```

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of boxes in the model
pub const N_BOXES: usize = 6;

pub const NORTH_A_IDX: usize = 0;
pub const NORTH_P_IDX: usize = 1;
pub const SOUTH_IDX: usize = 2;
pub const LOW_A_IDX: usize = 3;
pub const LOW_PI_IDX: usize = 4;
pub const DEEP_IDX: usize = 5;

/// Region enum for the six-box grid
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SixBoxRegion {
    /// North Atlantic surface box (deep water formation region)
    NorthA = 0,
    /// North Pacific surface box
    NorthP = 1,
    /// Southern Ocean surface box
    South = 2,
    /// Low-latitude Atlantic, above the pycnocline
    LowA = 3,
    /// Low-latitude Pacific and Indian, above the pycnocline
    LowPI = 4,
    /// Deep ocean below all other boxes
    Deep = 5,
}

impl SixBoxRegion {
    /// All regions in index order
    pub const ALL: [SixBoxRegion; N_BOXES] = [
        SixBoxRegion::NorthA,
        SixBoxRegion::NorthP,
        SixBoxRegion::South,
        SixBoxRegion::LowA,
        SixBoxRegion::LowPI,
        SixBoxRegion::Deep,
    ];

    /// Boxes in contact with the atmosphere
    pub const UPPER: [SixBoxRegion; 5] = [
        SixBoxRegion::NorthA,
        SixBoxRegion::NorthP,
        SixBoxRegion::South,
        SixBoxRegion::LowA,
        SixBoxRegion::LowPI,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable name, used in summaries and error messages
    pub fn name(self) -> &'static str {
        match self {
            SixBoxRegion::NorthA => "North Atlantic",
            SixBoxRegion::NorthP => "North Pacific",
            SixBoxRegion::South => "South",
            SixBoxRegion::LowA => "Low Atlantic",
            SixBoxRegion::LowPI => "Low Pacific/Indian",
            SixBoxRegion::Deep => "Deep",
        }
    }
}

impl From<SixBoxRegion> for usize {
    fn from(r: SixBoxRegion) -> usize {
        r as usize
    }
}

impl TryFrom<usize> for SixBoxRegion {
    type Error = ConfigurationError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        SixBoxRegion::ALL.get(index).copied().ok_or_else(|| {
            ConfigurationError::new(
                "box_index",
                format!("Invalid box index: {}. Must be 0-{}.", index, N_BOXES - 1),
            )
        })
    }
}

impl fmt::Display for SixBoxRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_fixed() {
        assert_eq!(usize::from(SixBoxRegion::NorthA), NORTH_A_IDX);
        assert_eq!(usize::from(SixBoxRegion::NorthP), NORTH_P_IDX);
        assert_eq!(usize::from(SixBoxRegion::South), SOUTH_IDX);
        assert_eq!(usize::from(SixBoxRegion::LowA), LOW_A_IDX);
        assert_eq!(usize::from(SixBoxRegion::LowPI), LOW_PI_IDX);
        assert_eq!(usize::from(SixBoxRegion::Deep), DEEP_IDX);

        for (i, region) in SixBoxRegion::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn invalid_index() {
        let err = SixBoxRegion::try_from(6).unwrap_err();
        assert_eq!(err.field, "box_index");
    }

    #[test]
    fn upper_boxes_exclude_deep() {
        assert!(!SixBoxRegion::UPPER.contains(&SixBoxRegion::Deep));
        assert_eq!(SixBoxRegion::UPPER.len(), N_BOXES - 1);
    }
}
