pub mod http;
pub mod provider;

pub use http::HttpPlayerSource;
pub use provider::PlayerSource;

#[cfg(test)]
pub use provider::MockPlayerSource;
