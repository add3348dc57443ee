mod validate;

pub use self::validate::{SimplePath, SimpleQuery, SimpleValidatedJson};
