pub mod finnhub;

pub use finnhub::FinnhubClient;
