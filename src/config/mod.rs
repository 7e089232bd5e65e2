pub mod env;
mod loader;

pub use env::{ApiConfig, AppConfig, DirectoryConfig, UploadConfig};
pub use loader::load_config;
#[cfg(test)]
pub use loader::parse_base_url;
