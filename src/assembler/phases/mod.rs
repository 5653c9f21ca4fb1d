pub mod types;

pub mod parse;
pub mod resolve;
pub mod tokenize;

pub use parse::parse;
pub use resolve::resolve;
pub use tokenize::tokenize;
