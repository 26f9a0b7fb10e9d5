// services/directory/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("no directory member found for uid '{0}'")]
    MemberNotFound(String),
    #[error("directory returned {count} entries for uid '{uid}'")]
    AmbiguousMember { uid: String, count: usize },
    #[error("LDAP error: {0}")]
    Ldap(#[from] ldap3::LdapError),
}
