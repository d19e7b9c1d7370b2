pub mod get;
pub mod list;

pub use get::GetFileQuery;
pub use list::ListFilesQuery;
