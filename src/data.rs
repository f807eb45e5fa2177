pub mod filter;
pub mod loader;
pub mod point;
