mod film;
mod reference;
mod user;

pub use film::{
    dedup_ids, earliest_release_date, Film, FilmId, FilmRow, FilmUpdate, IdRef, NewFilm,
    MAX_DESCRIPTION_LENGTH,
};
pub use reference::{default_genres, default_mpa_ratings, Genre, GenreId, MpaId, MpaRating};
pub use user::{NewUser, User, UserId, UserUpdate};
