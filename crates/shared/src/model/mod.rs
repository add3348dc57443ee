pub mod author;
pub mod posts;
