use crate::math::{Scalar, Vector3};

use std::fmt;
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-line `origin + t * direction`, `t >= 0`. The direction is not required to be unit
/// length; hit distances are measured in multiples of it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Ray {
        Ray {origin, direction}
    }

    pub fn at(&self, k: Scalar) -> Vector3 {
        self.origin + self.direction * k
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ray {{origin: {}, direction: {}}}", self.origin, self.direction)
    }
}
