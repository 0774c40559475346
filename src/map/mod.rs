//! Level layouts: directions, parsing raw boards, and rendering a world back to text.

pub mod direction;
pub mod parser;
pub mod render;
