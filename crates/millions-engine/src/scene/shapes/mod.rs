pub(crate) mod cap;
pub(crate) mod line;
pub(crate) mod triangle;

pub use cap::LineCap;
pub use line::{Line, LinePoint};
pub use triangle::{Triangle, TrianglePoint};
