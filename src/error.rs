//! Error types for the checked entry points.

use thiserror::Error;

/// Errors reported by the checked variants of operations whose unchecked forms clamp or
/// produce non-finite numbers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The matrix determinant is zero (or not finite), so it has no inverse.
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// A face index past the end of the mesh.
    #[error("face index {index} out of range for mesh with {count} faces")]
    FaceOutOfRange { index: usize, count: usize },

    /// A triangle refers to a vertex position that does not exist.
    #[error("triangle {triangle} refers to vertex {index}, but only {count} positions were given")]
    VertexOutOfRange { triangle: usize, index: usize, count: usize },
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = Error::FaceOutOfRange { index: 7, count: 3 };
        assert_eq!(e.to_string(), "face index 7 out of range for mesh with 3 faces");
        assert_eq!(Error::SingularMatrix.to_string(), "matrix is singular and cannot be inverted");
    }
}
