pub mod configuration;
pub mod database;
pub mod server;

pub use server::config::configure_app;
