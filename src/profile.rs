use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::platform::Platform;
use crate::{Result, VaultError};

pub const PENDING_FOLLOWERS: &str = "Pending";
pub const ACTIVE_STATS: &str = "Active";
pub const NO_PUBLIC_BIO: &str = "No public bio.";

/// How the `username` of a record is to be interpreted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Username,
    Email,
    Phone,
    Link,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputType::Username => "username",
            InputType::Email => "email",
            InputType::Phone => "phone",
            InputType::Link => "link",
        })
    }
}

impl std::str::FromStr for InputType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "username" => Ok(InputType::Username),
            "email" => Ok(InputType::Email),
            "phone" => Ok(InputType::Phone),
            "link" | "url" => Ok(InputType::Link),
            other => Err(VaultError::InvalidQuery(format!(
                "unknown input type `{other}`"
            ))),
        }
    }
}

/// A loosely typed status figure: either a raw count or a status word.
///
/// Older data stored pre-formatted strings such as `"12 follower"`;
/// those load as [`Metric::Status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Count(u64),
    Status(String),
}

impl Metric {
    pub fn status(status: &str) -> Self {
        Metric::Status(status.to_owned())
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            Metric::Count(n) => Some(*n),
            Metric::Status(_) => None,
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Status(String::new())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Count(n) => write!(f, "{n}"),
            Metric::Status(s) => f.write_str(s),
        }
    }
}

/// Identifier made of the creation time in milliseconds and random bits.
pub fn new_record_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{millis}-{:08x}", fastrand::u32(..))
}

/// Validated user input for a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    username: String,
    platform: Platform,
    input_type: InputType,
}

impl SearchQuery {
    /// Trim the raw input and check it can be searched at all.
    ///
    /// Handles lose a leading `@`. A query needs a platform and some text.
    pub fn new(
        input: &str,
        platform: Platform,
        input_type: InputType,
    ) -> Result<Self> {
        if platform.is_none() {
            return Err(VaultError::InvalidQuery(
                "select a platform first".to_owned(),
            ));
        }
        let trimmed = input.trim();
        let username = match input_type {
            InputType::Username => trimmed.trim_start_matches('@').trim(),
            _ => trimmed,
        };
        if username.is_empty() {
            return Err(VaultError::InvalidQuery("input is empty".to_owned()));
        }
        Ok(Self {
            username: username.to_owned(),
            platform,
            input_type,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    /// Only GitHub handles can be enriched.
    pub fn wants_lookup(&self) -> bool {
        self.platform.supports_lookup()
            && self.input_type == InputType::Username
    }
}

/// One lookup result, saved or in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default = "new_record_id")]
    pub id: String,
    pub username: String,
    pub platform: Platform,
    #[serde(default)]
    pub platform_icon: String,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default)]
    pub base_link: String,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Public display name, known only after enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers: Metric,
    #[serde(default)]
    pub stats: Metric,
    #[serde(default)]
    pub scan_date: String,
}

impl ProfileRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::Profile {
            username: self.username.clone(),
            platform: self.platform,
        }
    }

    pub fn same_profile(&self, username: &str, platform: Platform) -> bool {
        self.username == username && self.platform == platform
    }

    /// Where the saved profile can be opened: `mailto:`, `tel:` or `https://`.
    pub fn outbound_link(&self) -> Result<Url> {
        let target = match self.input_type {
            InputType::Email => format!("mailto:{}", self.username),
            InputType::Phone => {
                let number: String = self
                    .username
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                format!("tel:{number}")
            }
            InputType::Link if self.username.starts_with("http") => {
                self.username.clone()
            }
            InputType::Link => format!("https://{}", self.username),
            InputType::Username => {
                format!("https://{}{}", self.base_link, self.username)
            }
        };
        Ok(Url::parse(&target)?)
    }

    pub fn followers_label(&self) -> String {
        match &self.followers {
            Metric::Count(1) => "1 follower".to_owned(),
            Metric::Count(n) => format!("{n} followers"),
            Metric::Status(s) => s.clone(),
        }
    }

    pub fn stats_label(&self) -> String {
        match &self.stats {
            Metric::Count(n) => format!("{n} Repos"),
            Metric::Status(s) => s.clone(),
        }
    }
}

/// Addresses a stored record, either by its id or by the profile it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Id(String),
    Profile { username: String, platform: Platform },
}

impl RecordKey {
    pub fn profile(username: impl Into<String>, platform: Platform) -> Self {
        RecordKey::Profile {
            username: username.into(),
            platform,
        }
    }

    pub fn matches(&self, record: &ProfileRecord) -> bool {
        match self {
            RecordKey::Id(id) => &record.id == id,
            RecordKey::Profile { username, platform } => {
                record.same_profile(username, *platform)
            }
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "#{id}"),
            RecordKey::Profile { username, platform } => {
                write!(f, "{username}@{platform}")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) fn record(username: &str, platform: Platform) -> ProfileRecord {
        ProfileRecord {
            id: new_record_id(),
            username: username.to_owned(),
            platform,
            platform_icon: platform.icon().to_owned(),
            input_type: InputType::Username,
            base_link: platform.base_link().to_owned(),
            avatar: None,
            display_name: None,
            bio: format!("Scanning {platform} for {username}..."),
            followers: Metric::status(PENDING_FOLLOWERS),
            stats: Metric::status(ACTIVE_STATS),
            scan_date: "2024-05-01T10:00:00Z".to_owned(),
        }
    }

    #[rstest]
    #[case("  @octocat ", InputType::Username, "octocat")]
    #[case("octocat", InputType::Username, "octocat")]
    #[case(" jane@example.com ", InputType::Email, "jane@example.com")]
    #[case("github.com/@me", InputType::Link, "github.com/@me")]
    fn query_is_normalized(
        #[case] input: &str,
        #[case] input_type: InputType,
        #[case] expected: &str,
    ) {
        let query =
            SearchQuery::new(input, Platform::GitHub, input_type).unwrap();
        assert_eq!(query.username(), expected);
    }

    #[rstest]
    #[case("", Platform::GitHub)]
    #[case("   ", Platform::GitHub)]
    #[case(" @ ", Platform::GitHub)]
    #[case("octocat", Platform::None)]
    fn query_preconditions(#[case] input: &str, #[case] platform: Platform) {
        assert!(matches!(
            SearchQuery::new(input, platform, InputType::Username),
            Err(VaultError::InvalidQuery(_))
        ));
    }

    #[test]
    fn only_github_handles_are_looked_up() {
        let q = SearchQuery::new("octocat", Platform::GitHub, InputType::Username)
            .unwrap();
        assert!(q.wants_lookup());
        let q = SearchQuery::new("octocat", Platform::GitHub, InputType::Link)
            .unwrap();
        assert!(!q.wants_lookup());
        let q =
            SearchQuery::new("octocat", Platform::Twitter, InputType::Username)
                .unwrap();
        assert!(!q.wants_lookup());
    }

    #[rstest]
    #[case(InputType::Username, "octocat", "https://github.com/octocat")]
    #[case(InputType::Email, "jane@example.com", "mailto:jane@example.com")]
    #[case(InputType::Phone, "+1 555 0100", "tel:+15550100")]
    #[case(InputType::Link, "https://example.com/me", "https://example.com/me")]
    #[case(InputType::Link, "example.com/me", "https://example.com/me")]
    fn outbound_links(
        #[case] input_type: InputType,
        #[case] username: &str,
        #[case] expected: &str,
    ) {
        let mut r = record(username, Platform::GitHub);
        r.input_type = input_type;
        assert_eq!(r.outbound_link().unwrap().as_str(), expected);
    }

    #[test]
    fn stored_layout_uses_app_field_names() {
        let mut r = record("octocat", Platform::GitHub);
        r.followers = Metric::Count(12);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "username");
        assert_eq!(json["platformIcon"], "github");
        assert_eq!(json["baseLink"], "github.com/");
        assert_eq!(json["followers"], 12);
        assert_eq!(json["stats"], "Active");
        assert!(json["avatar"].is_null());
        assert!(json.get("scanDate").is_some());
        assert!(json.get("displayName").is_none());

        r.display_name = Some("The Octocat".to_owned());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["displayName"], "The Octocat");
    }

    #[test]
    fn sparse_legacy_record_loads() {
        let json = r#"{"username":"octocat","platform":"GitHub",
            "avatar":"https://avatars.example/u/1","followers":"12 follower"}"#;
        let r: ProfileRecord = serde_json::from_str(json).unwrap();
        assert!(!r.id.is_empty());
        assert_eq!(r.input_type, InputType::Username);
        assert_eq!(r.followers, Metric::status("12 follower"));
        assert_eq!(r.avatar.as_deref(), Some("https://avatars.example/u/1"));
    }

    #[test]
    fn labels_format_counts() {
        let mut r = record("octocat", Platform::GitHub);
        assert_eq!(r.followers_label(), "Pending");
        r.followers = Metric::Count(1);
        r.stats = Metric::Count(8);
        assert_eq!(r.followers_label(), "1 follower");
        assert_eq!(r.stats_label(), "8 Repos");
    }

    #[test]
    fn key_display() {
        assert_eq!(
            RecordKey::profile("octocat", Platform::GitHub).to_string(),
            "octocat@GitHub"
        );
    }
}
