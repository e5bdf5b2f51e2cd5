use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::LookupConfig;
use crate::{Result, VaultError};

/// Public user information returned by the GitHub users endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub public_repos: u64,
    pub name: Option<String>,
}

/// Remote source of public profile data.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn fetch_user(&self, handle: &str) -> Result<GitHubUser>;
}

#[async_trait]
impl<L: ProfileLookup + ?Sized> ProfileLookup for std::sync::Arc<L> {
    async fn fetch_user(&self, handle: &str) -> Result<GitHubUser> {
        (**self).fetch_user(handle).await
    }
}

/// Client for `GET {api_base}/users/{handle}`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: Url,
}

impl GitHubClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let mut header = HeaderMap::new();
        // GitHub refuses requests without a user agent.
        header.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|_| {
                VaultError::Config(format!(
                    "invalid user agent `{}`",
                    config.user_agent
                ))
            })?,
        );
        header.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let api_base = Url::parse(&config.api_base)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                VaultError::Config(format!(
                    "invalid api base `{}`",
                    config.api_base
                ))
            })?;
        let client = reqwest::Client::builder()
            .default_headers(header)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// `{api_base}/users/{handle}` with `handle` as one encoded segment.
    fn user_url(&self, handle: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                VaultError::Config(format!(
                    "invalid api base `{}`",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .push("users")
            .push(handle);
        Ok(url)
    }
}

#[async_trait]
impl ProfileLookup for GitHubClient {
    async fn fetch_user(&self, handle: &str) -> Result<GitHubUser> {
        let handle = handle.trim();
        if handle.is_empty() || handle.contains('/') {
            return Err(VaultError::Lookup(format!(
                "`{handle}` is not a GitHub handle"
            )));
        }
        let url = self.user_url(handle)?;
        log::debug!("fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VaultError::Lookup(format!(
                "{url} answered {status}"
            )));
        }
        let user: GitHubUser = response.json().await?;
        if !user.login.eq_ignore_ascii_case(handle) {
            return Err(VaultError::Lookup(format!(
                "{url} answered for `{}` instead of `{handle}`",
                user.login
            )));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        let config = LookupConfig {
            api_base: server.uri(),
            timeout_secs: 2,
            ..LookupConfig::default()
        };
        GitHubClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn fetches_public_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "avatar_url": "https://avatars.example/u/583231",
                "bio": null,
                "followers": 4000,
                "public_repos": 8,
                "name": "The Octocat",
                "html_url": "https://github.com/octocat",
                "site_admin": false
            })))
            .mount(&server)
            .await;

        let user = client_for(&server).fetch_user("octocat").await.unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.followers, 4000);
        assert_eq!(user.public_repos, 8);
        assert_eq!(user.bio, None);
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
    }

    #[tokio::test]
    async fn handle_is_sent_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "login": "octocat" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_user("octocat?evil=1")
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Lookup(_)));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/users/octocat%3Fevil=1");
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn answer_for_another_login_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "login": "octocat" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/OctoCat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "login": "octocat" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch_user("ghost").await.unwrap_err();
        assert!(matches!(err, VaultError::Lookup(_)));
        let user = client.fetch_user("OctoCat").await.unwrap();
        assert_eq!(user.login, "octocat");
    }

    #[test]
    fn api_base_keeps_its_path() {
        let config = LookupConfig {
            api_base: "https://ghe.example/api/v3/".to_owned(),
            ..LookupConfig::default()
        };
        let client = GitHubClient::new(&config).unwrap();
        assert_eq!(
            client.user_url("octocat").unwrap().as_str(),
            "https://ghe.example/api/v3/users/octocat"
        );

        let config = LookupConfig {
            api_base: "not a url".to_owned(),
            ..LookupConfig::default()
        };
        assert!(matches!(
            GitHubClient::new(&config),
            Err(VaultError::Config(_))
        ));
    }

    #[tokio::test]
    async fn not_found_is_a_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/nobody"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "message": "Not Found" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_user("nobody")
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Lookup(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        assert!(client_for(&server).fetch_user("octocat").await.is_err());
    }

    #[tokio::test]
    async fn path_like_handle_is_refused_locally() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .fetch_user("../orgs/rust-lang")
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Lookup(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
