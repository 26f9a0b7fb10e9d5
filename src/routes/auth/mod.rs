pub mod claims;
pub mod oidc_login;
pub mod session;

pub use oidc_login::{oidc_callback, oidc_login, oidc_logout};
pub use session::AuthSession;
