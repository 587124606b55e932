pub use super::genres::Entity as Genres;
pub use super::show_genres::Entity as ShowGenres;
pub use super::tv_shows::Entity as TvShows;
