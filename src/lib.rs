pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

#[cfg(test)]
pub mod test_utils;
