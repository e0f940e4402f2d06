pub mod files;
pub mod parse;
