use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(pk_auto(Rating::Id))
                    .col(string_len(Rating::Ip, 45))
                    .col(decimal_len(Rating::Rating, 3, 1))
                    .col(date(Rating::ViewedDate))
                    .col(integer(Rating::MovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_movie")
                            .from(Rating::Table, Rating::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One rating per submitter per movie; the submission upsert
        // depends on this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_ip_movie")
                    .table(Rating::Table)
                    .col(Rating::Ip)
                    .col(Rating::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rating_movie")
                    .table(Rating::Table)
                    .col(Rating::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(pk_auto(Feedback::Id))
                    .col(string(Feedback::Email))
                    .col(string_len(Feedback::Name, 20))
                    .col(string_len(Feedback::Surname, 60))
                    .col(text(Feedback::Feed))
                    .col(integer(Feedback::MovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_movie")
                            .from(Feedback::Table, Feedback::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_movie")
                    .table(Feedback::Table)
                    .col(Feedback::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Feedback::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Rating::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Rating {
    Table,
    Id,
    Ip,
    Rating,
    ViewedDate,
    MovieId,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    Email,
    Name,
    Surname,
    Feed,
    MovieId,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
}
