// services/directory/models.rs

/// A member record as read from the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    pub uid: String,
    pub dn: String,
    pub slack_uid: Option<String>,
    pub github: Option<String>,
}

/// Member attributes this service is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberAttribute {
    SlackUid,
    GitHub,
}

impl MemberAttribute {
    pub fn ldap_name(self) -> &'static str {
        match self {
            MemberAttribute::SlackUid => "slackUID",
            MemberAttribute::GitHub => "github",
        }
    }
}
