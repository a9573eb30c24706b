use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RecipeTags::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeTags::TagId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeTags::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(RecipeTags::RecipeId)
                            .col(RecipeTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RecipeTags::Table, RecipeTags::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RecipeTags::Table, RecipeTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeTags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    RecipeId,
    TagId,
    Position,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
}
