mod author;
mod posts;

pub use self::author::{AuthorRepositoryTrait, DynAuthorRepository};
pub use self::posts::{
    DynPostsRepository, DynPostsService, PostsRepositoryTrait, PostsServiceTrait,
};
