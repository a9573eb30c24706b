use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipes::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Recipes::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Recipes::Text).text().not_null())
                    .col(ColumnDef::new(Recipes::Image).string().not_null())
                    .col(
                        ColumnDef::new(Recipes::CookingTime)
                            .integer()
                            .not_null()
                            .check(Expr::col(Recipes::CookingTime).gte(1)),
                    )
                    .col(
                        ColumnDef::new(Recipes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Recipes::Table, Recipes::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    AuthorId,
    Name,
    Text,
    Image,
    CookingTime,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
