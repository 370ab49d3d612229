pub mod traits;
pub mod payload;
pub mod endpoint;
pub mod newsapi;
pub mod weather;
pub mod registry;

pub use traits::{NewsSource, SourceKind};
pub use endpoint::EndpointSource;
pub use newsapi::NewsApiSource;
pub use weather::{HttpWeatherSource, WeatherSource};
pub use registry::source_from_config;
