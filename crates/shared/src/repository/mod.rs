mod author;
mod posts;

pub use self::author::AuthorRepository;
pub use self::posts::PostRepository;
