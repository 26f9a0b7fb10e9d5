// services/directory/service.rs

use async_trait::async_trait;

use super::{
    errors::DirectoryError,
    models::{Member, MemberAttribute},
};

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Looks up a member by their unique username.
    async fn get_member(&self, uid: &str) -> Result<Member, DirectoryError>;

    /// Replaces one attribute on the member's record. `None` removes the
    /// attribute, and removing an attribute that is not set succeeds.
    async fn set_attribute(
        &self,
        member: &Member,
        attribute: MemberAttribute,
        value: Option<&str>,
    ) -> Result<(), DirectoryError>;
}
