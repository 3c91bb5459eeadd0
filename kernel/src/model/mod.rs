pub mod book;
pub mod id;
pub mod list;
