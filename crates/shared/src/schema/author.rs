use sea_query::Iden;

#[derive(Iden)]
pub enum Authors {
    Table,
    Id,
    Name,
    Email,
}
