pub mod feed_fetcher;
pub mod rotation;
pub mod weather_service;

pub use feed_fetcher::{FeedFetcher, NewsFetcher};
pub use rotation::RotationController;
pub use weather_service::{WeatherReadout, WeatherService};
