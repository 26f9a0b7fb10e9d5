// services/directory/ldap.rs

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use ldap3::{ldap_escape, Ldap, LdapConnAsync, LdapConnSettings, Mod, Scope, SearchEntry};
use tracing::{debug, warn};

use super::{
    errors::DirectoryError,
    models::{Member, MemberAttribute},
    service::MemberDirectory,
};
use crate::config::LdapSettings;

const MEMBER_ATTRIBUTES: [&str; 3] = ["uid", "slackUID", "github"];

/// Directory backed by an LDAP server. Every operation runs on its own
/// bound connection, which is unbound once the operation completes.
#[derive(Clone)]
pub struct LdapDirectory {
    settings: LdapSettings,
    timeout: Duration,
}

impl LdapDirectory {
    pub fn new(settings: LdapSettings, timeout: Duration) -> Self {
        Self { settings, timeout }
    }

    async fn connect(&self) -> Result<Ldap, DirectoryError> {
        let conn_settings = LdapConnSettings::new().set_conn_timeout(self.timeout);
        let (conn, mut ldap) =
            LdapConnAsync::with_settings(conn_settings, &self.settings.url).await?;

        tokio::spawn(async move {
            if let Err(error) = conn.drive().await {
                warn!(%error, "LDAP connection closed with an error");
            }
        });

        ldap.with_timeout(self.timeout)
            .simple_bind(&self.settings.bind_dn, &self.settings.bind_secret)
            .await?
            .success()?;

        Ok(ldap)
    }

    async fn release(mut ldap: Ldap) {
        if let Err(error) = ldap.unbind().await {
            debug!(%error, "LDAP unbind failed");
        }
    }
}

#[async_trait]
impl MemberDirectory for LdapDirectory {
    async fn get_member(&self, uid: &str) -> Result<Member, DirectoryError> {
        let mut ldap = self.connect().await?;
        let filter = member_filter(uid);

        let result = ldap
            .with_timeout(self.timeout)
            .search(
                &self.settings.user_base,
                Scope::Subtree,
                &filter,
                MEMBER_ATTRIBUTES.to_vec(),
            )
            .await;
        Self::release(ldap).await;

        let (entries, _) = result?.success()?;
        match entries.len() {
            0 => Err(DirectoryError::MemberNotFound(uid.to_string())),
            1 => {
                let entry = entries
                    .into_iter()
                    .next()
                    .map(SearchEntry::construct)
                    .ok_or_else(|| DirectoryError::MemberNotFound(uid.to_string()))?;
                Ok(member_from_attrs(uid, entry.dn, &entry.attrs))
            }
            count => Err(DirectoryError::AmbiguousMember {
                uid: uid.to_string(),
                count,
            }),
        }
    }

    async fn set_attribute(
        &self,
        member: &Member,
        attribute: MemberAttribute,
        value: Option<&str>,
    ) -> Result<(), DirectoryError> {
        let mut ldap = self.connect().await?;

        // Replace with an empty set removes the attribute, and is a no-op when it is absent.
        let values: HashSet<&str> = value.into_iter().collect();
        let result = ldap
            .with_timeout(self.timeout)
            .modify(&member.dn, vec![Mod::Replace(attribute.ldap_name(), values)])
            .await;
        Self::release(ldap).await;

        result?.success()?;
        debug!(
            uid = %member.uid,
            attribute = attribute.ldap_name(),
            cleared = value.is_none(),
            "Directory attribute updated"
        );
        Ok(())
    }
}

pub(crate) fn member_filter(uid: &str) -> String {
    format!("(uid={})", ldap_escape(uid))
}

pub(crate) fn member_from_attrs(
    uid: &str,
    dn: String,
    attrs: &HashMap<String, Vec<String>>,
) -> Member {
    let first = |name: &str| {
        attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first().cloned())
    };

    Member {
        uid: first("uid").unwrap_or_else(|| uid.to_string()),
        dn,
        slack_uid: first(MemberAttribute::SlackUid.ldap_name()),
        github: first(MemberAttribute::GitHub.ldap_name()),
    }
}
