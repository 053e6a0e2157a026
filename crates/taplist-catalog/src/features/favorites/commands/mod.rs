pub mod favorite;
pub mod unfavorite;
