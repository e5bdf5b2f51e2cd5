use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use crate::lookup::{GitHubUser, ProfileLookup};
use crate::profile::{
    new_record_id, Metric, ProfileRecord, SearchQuery, ACTIVE_STATS,
    NO_PUBLIC_BIO, PENDING_FOLLOWERS,
};

/// Builds [`ProfileRecord`]s from search queries, enriching GitHub
/// handles through a [`ProfileLookup`].
pub struct ProfileFactory<L> {
    lookup: L,
    timeout: Duration,
}

impl ProfileRecord {
    /// Record usable right away, before any remote data arrived.
    pub fn placeholder(query: &SearchQuery) -> Self {
        let platform = query.platform();
        let username = query.username();
        Self {
            id: new_record_id(),
            username: username.to_owned(),
            platform,
            platform_icon: platform.icon().to_owned(),
            input_type: query.input_type(),
            base_link: platform.base_link().to_owned(),
            avatar: None,
            display_name: None,
            bio: format!("Scanning {platform} for {username}..."),
            followers: Metric::status(PENDING_FOLLOWERS),
            stats: Metric::status(ACTIVE_STATS),
            scan_date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl<L: ProfileLookup> ProfileFactory<L> {
    pub fn new(lookup: L, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// Build the record for `query`. Never fails: a lookup that errors or
    /// runs past the timeout leaves the placeholder fields in place.
    pub async fn create(&self, query: &SearchQuery) -> ProfileRecord {
        let mut record = ProfileRecord::placeholder(query);
        if !query.wants_lookup() {
            return record;
        }

        let lookup = self.lookup.fetch_user(query.username());
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(user)) => {
                log::info!(
                    "enriched {} from {}",
                    record.username,
                    record.platform
                );
                apply(&mut record, user);
            }
            Ok(Err(err)) => {
                log::warn!("lookup of {} failed: {}", record.username, err);
            }
            Err(_) => {
                log::warn!(
                    "lookup of {} timed out after {:?}",
                    record.username,
                    self.timeout
                );
            }
        }
        record
    }
}

fn apply(record: &mut ProfileRecord, user: GitHubUser) {
    record.avatar = user.avatar_url;
    record.display_name = user.name.filter(|name| !name.trim().is_empty());
    record.bio = user
        .bio
        .filter(|bio| !bio.trim().is_empty())
        .unwrap_or_else(|| NO_PUBLIC_BIO.to_owned());
    record.followers = Metric::Count(user.followers);
    record.stats = Metric::Count(user.public_repos);
}
