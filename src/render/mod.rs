pub mod board;

pub use board::Renderer;
