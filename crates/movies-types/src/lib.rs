pub mod config;
pub mod lang;

pub use lang::Lang;
