pub mod models;
pub mod queries;
mod startgg_client;

pub use startgg_client::StartGgClient;
