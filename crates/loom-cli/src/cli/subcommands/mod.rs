mod comment;
mod project;
mod refine;
mod share;
mod user;
mod version;

pub use comment::CommentCommands;
pub use project::ProjectCommands;
pub use refine::RefineCommands;
pub use share::ShareCommands;
pub use user::UserCommands;
pub use version::VersionCommands;
