// services/github_org/models.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgMembershipAction {
    Add,
    Remove,
}

impl fmt::Display for OrgMembershipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgMembershipAction::Add => write!(f, "add"),
            OrgMembershipAction::Remove => write!(f, "remove"),
        }
    }
}

/// What GitHub answered to an organization membership change.
///
/// GitHub's answer does not gate the directory update, so callers log this
/// with enough context to reconcile the two systems by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMembershipOutcome {
    pub action: OrgMembershipAction,
    pub org: String,
    pub login: String,
    pub status: u16,
    /// `state` of the membership (`pending`/`active`) when GitHub returns one.
    pub membership_state: Option<String>,
    /// GitHub's error `message` for non-success responses.
    pub message: Option<String>,
}

impl OrgMembershipOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
