pub mod beers;
pub mod breweries;
pub mod favorites;
pub mod opinions;
