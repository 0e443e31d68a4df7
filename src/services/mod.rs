pub mod forecast;

pub use forecast::ForecastStore;
