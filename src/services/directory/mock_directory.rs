use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    errors::DirectoryError,
    models::{Member, MemberAttribute},
    service::MemberDirectory,
};

/// In-memory directory that records every write.
#[derive(Default)]
pub struct InMemoryDirectory {
    members: Mutex<HashMap<String, Member>>,
    writes: Mutex<Vec<(String, MemberAttribute, Option<String>)>>,
}

impl InMemoryDirectory {
    pub fn with_member(self, member: Member) -> Self {
        self.members
            .lock()
            .unwrap()
            .insert(member.uid.clone(), member);
        self
    }

    pub fn member(&self, uid: &str) -> Option<Member> {
        self.members.lock().unwrap().get(uid).cloned()
    }

    pub fn writes(&self) -> Vec<(String, MemberAttribute, Option<String>)> {
        self.writes.lock().unwrap().clone()
    }
}

pub fn member(uid: &str) -> Member {
    Member {
        uid: uid.to_string(),
        dn: format!("uid={},cn=users,dc=example,dc=com", uid),
        slack_uid: None,
        github: None,
    }
}

#[async_trait]
impl MemberDirectory for InMemoryDirectory {
    async fn get_member(&self, uid: &str) -> Result<Member, DirectoryError> {
        self.member(uid)
            .ok_or_else(|| DirectoryError::MemberNotFound(uid.to_string()))
    }

    async fn set_attribute(
        &self,
        member: &Member,
        attribute: MemberAttribute,
        value: Option<&str>,
    ) -> Result<(), DirectoryError> {
        let mut members = self.members.lock().unwrap();
        let stored = members
            .get_mut(&member.uid)
            .ok_or_else(|| DirectoryError::MemberNotFound(member.uid.clone()))?;

        let value = value.map(str::to_string);
        match attribute {
            MemberAttribute::SlackUid => stored.slack_uid = value.clone(),
            MemberAttribute::GitHub => stored.github = value.clone(),
        }
        self.writes
            .lock()
            .unwrap()
            .push((member.uid.clone(), attribute, value));
        Ok(())
    }
}
