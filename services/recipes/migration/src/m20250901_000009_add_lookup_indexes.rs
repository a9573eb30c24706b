use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::AuthorId)
                    .name("idx_recipes_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::CreatedAt)
                    .name("idx_recipes_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RecipeTags::Table)
                    .col(RecipeTags::TagId)
                    .name("idx_recipe_tags_tag_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Ingredients::Table)
                    .col(Ingredients::Name)
                    .name("idx_ingredients_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ingredients_name").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipe_tags_tag_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipes_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipes_author_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    AuthorId,
    CreatedAt,
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    TagId,
}

#[derive(Iden)]
enum Ingredients {
    Table,
    Name,
}
