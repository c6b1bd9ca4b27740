use crate::math::Real;
use crate::transformation::DecompositionError;

/// Error raised when a shape is built from invalid parameters.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// A polygon needs at least three vertices.
    #[error("a polygon needs at least 3 vertices, got {0}.")]
    TooFewPoints(usize),
    /// The polygon has a zero area, or all its points are collinear.
    #[error("the polygon is degenerate (zero area or collinear vertices).")]
    DegeneratePolygon,
    /// The vertex loop given to a convex polygon constructor has a reflex vertex.
    #[error("the vertex {0} of the polygon is reflex.")]
    NotConvex(usize),
    /// Radii must be strictly positive.
    #[error("the radius must be strictly positive, got {0}.")]
    NonPositiveRadius(Real),
    /// Ellipse half-axes must be strictly positive.
    #[error("the half-axes must be strictly positive, got ({0}, {1}).")]
    NonPositiveHalfAxes(Real, Real),
}

/// Error raised while building a [`MeshShape`](crate::shape::MeshShape).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum MeshError {
    /// A mesh must contain at least one triangle.
    #[error("a mesh must contain at least one triangle.")]
    Empty,
    /// The triangle at the given index has a zero area.
    #[error("the triangle {0} is degenerate.")]
    DegenerateTriangle(usize),
    /// The convex decomposition produced a piece with a zero area.
    #[error("the convex piece {0} of the decomposition is degenerate.")]
    DegeneratePiece(usize),
    /// The outline could not be decomposed into convex pieces.
    #[error("convex decomposition failed: {0}")]
    Decomposition(#[from] DecompositionError),
}
