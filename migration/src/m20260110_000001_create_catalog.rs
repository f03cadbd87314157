use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlaceResidence::Table)
                    .if_not_exists()
                    .col(pk_auto(PlaceResidence::Id))
                    .col(string_len(PlaceResidence::Country, 40))
                    .col(string_len(PlaceResidence::City, 40))
                    .col(string_len(PlaceResidence::Street, 40))
                    .col(string_len(PlaceResidence::Number, 10))
                    .col(string(PlaceResidence::MapCoordinate).default("https://www.google.com/maps"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Director::Table)
                    .if_not_exists()
                    .col(pk_auto(Director::Id))
                    .col(string_len(Director::FirstName, 100))
                    .col(string_len(Director::LastName, 100))
                    .col(string(Director::Email))
                    .col(string(Director::Slug))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_director_slug")
                    .table(Director::Table)
                    .col(Director::Slug)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string_len(Genre::Name, 40))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(pk_auto(Actor::Id))
                    .col(string_len(Actor::FirstName, 100))
                    .col(string_len(Actor::LastName, 100))
                    .col(string_len(Actor::Gender, 10).default("male"))
                    .col(integer_null(Actor::ResidenceId))
                    .col(string(Actor::Slug))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_residence")
                            .from(Actor::Table, Actor::ResidenceId)
                            .to(PlaceResidence::Table, PlaceResidence::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actor_slug")
                    .table(Actor::Table)
                    .col(Actor::Slug)
                    .to_owned(),
            )
            .await?;

        // A residence belongs to at most one actor; NULLs are exempt.
        manager
            .create_index(
                Index::create()
                    .name("idx_actor_residence")
                    .table(Actor::Table)
                    .col(Actor::ResidenceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string_len(Movie::Name, 50))
                    .col(string_len(Movie::OriginalName, 50))
                    .col(integer(Movie::Year))
                    .col(integer(Movie::Length))
                    .col(decimal_len(Movie::RatingImdb, 3, 1))
                    .col(text(Movie::Description))
                    .col(string(Movie::Slug))
                    .col(string_null(Movie::Picture))
                    .col(integer_null(Movie::DirectorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_director")
                            .from(Movie::Table, Movie::DirectorId)
                            .to(Director::Table, Director::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_slug")
                    .table(Movie::Table)
                    .col(Movie::Slug)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_year")
                    .table(Movie::Table)
                    .col(Movie::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenre::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieGenre::Id))
                    .col(integer(MovieGenre::MovieId))
                    .col(integer(MovieGenre::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_movie")
                            .from(MovieGenre::Table, MovieGenre::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_genre")
                            .from(MovieGenre::Table, MovieGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre_pair")
                    .table(MovieGenre::Table)
                    .col(MovieGenre::MovieId)
                    .col(MovieGenre::GenreId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre_genre")
                    .table(MovieGenre::Table)
                    .col(MovieGenre::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieActor::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieActor::Id))
                    .col(integer(MovieActor::MovieId))
                    .col(integer(MovieActor::ActorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_actor_movie")
                            .from(MovieActor::Table, MovieActor::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_actor_actor")
                            .from(MovieActor::Table, MovieActor::ActorId)
                            .to(Actor::Table, Actor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actor_pair")
                    .table(MovieActor::Table)
                    .col(MovieActor::MovieId)
                    .col(MovieActor::ActorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actor_actor")
                    .table(MovieActor::Table)
                    .col(MovieActor::ActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieActor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieGenre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Director::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PlaceResidence::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PlaceResidence {
    Table,
    Id,
    Country,
    City,
    Street,
    Number,
    MapCoordinate,
}

#[derive(DeriveIden)]
enum Director {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Slug,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    Id,
    FirstName,
    LastName,
    Gender,
    ResidenceId,
    Slug,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Name,
    OriginalName,
    Year,
    Length,
    RatingImdb,
    Description,
    Slug,
    Picture,
    DirectorId,
}

#[derive(DeriveIden)]
enum MovieGenre {
    Table,
    Id,
    MovieId,
    GenreId,
}

#[derive(DeriveIden)]
enum MovieActor {
    Table,
    Id,
    MovieId,
    ActorId,
}
