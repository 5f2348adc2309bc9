pub mod analyzer;
pub mod formatter;
pub mod quiz_generator;

pub use analyzer::*;
pub use formatter::*;
pub use quiz_generator::*;
