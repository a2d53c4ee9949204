/// Errors raised while packing triangles into batches.
///
/// The intersection kernel itself never fails; every degenerate case it meets
/// is a lane rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("a triangle batch holds at most 4 triangles, got {count}")]
    TooManyTriangles { count: usize },

    #[error("triangle {index} has a non-finite vertex")]
    NonFiniteVertex { index: usize },
}
