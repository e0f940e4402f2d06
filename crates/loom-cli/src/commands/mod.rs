pub mod comment;
pub mod dispatch;
pub mod generate;
pub mod project;
pub mod refine;
pub mod share;
pub mod shared;
pub mod user;
pub mod version;
