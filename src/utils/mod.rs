pub mod csrf;
pub mod jwt;
