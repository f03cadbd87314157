pub mod actor;
pub mod director;
pub mod feedback;
pub mod genre;
pub mod movie;
pub mod movie_actor;
pub mod movie_genre;
pub mod place_residence;
pub mod rating;
