pub mod prelude;

pub mod genres;
pub mod show_genres;
pub mod tv_shows;
