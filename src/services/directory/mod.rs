pub mod errors;
pub mod ldap;
#[cfg(test)]
pub mod mock_directory;
pub mod models;
pub mod service;
