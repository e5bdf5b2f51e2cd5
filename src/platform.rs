use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VaultError;

/// Platforms a profile can be looked up on.
///
/// Serialized as the display name, which is also what older saved data
/// contains in its `platform` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    None,
    GitHub,
    Facebook,
    Instagram,
    LinkedIn,
    Twitter,
    YouTube,
    Neurootix,
    GlobalDatabase,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::None,
        Platform::GitHub,
        Platform::Facebook,
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::YouTube,
        Platform::Neurootix,
        Platform::GlobalDatabase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::None => "None",
            Platform::GitHub => "GitHub",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter/X",
            Platform::YouTube => "YouTube",
            Platform::Neurootix => "Neurootix",
            Platform::GlobalDatabase => "Global Database",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::None => "ban",
            Platform::GitHub => "github",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
            Platform::Twitter => "twitter",
            Platform::YouTube => "youtube",
            Platform::Neurootix => "globe",
            Platform::GlobalDatabase => "database",
        }
    }

    /// Prefix of a profile URL, without scheme.
    pub fn base_link(&self) -> &'static str {
        match self {
            Platform::None => "",
            Platform::GitHub => "github.com/",
            Platform::Facebook => "facebook.com/",
            Platform::Instagram => "instagram.com/",
            Platform::LinkedIn => "linkedin.com/in/",
            Platform::Twitter => "x.com/",
            Platform::YouTube => "youtube.com/@",
            Platform::Neurootix => "neurootix.com/",
            Platform::GlobalDatabase => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Platform::None)
    }

    /// Whether a public lookup exists for handles on this platform.
    pub fn supports_lookup(&self) -> bool {
        matches!(self, Platform::GitHub)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "x" | "twitter" | "x (twitter)" => Some(Platform::Twitter),
            "global" => Some(Platform::GlobalDatabase),
            _ => None,
        };
        alias
            .or_else(|| {
                Platform::ALL
                    .into_iter()
                    .find(|p| p.name().to_lowercase() == wanted)
            })
            .ok_or_else(|| VaultError::UnknownPlatform(s.to_owned()))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GitHub", Platform::GitHub)]
    #[case("github", Platform::GitHub)]
    #[case(" LinkedIn ", Platform::LinkedIn)]
    #[case("Twitter/X", Platform::Twitter)]
    #[case("Twitter", Platform::Twitter)]
    #[case("X (Twitter)", Platform::Twitter)]
    #[case("Global Database", Platform::GlobalDatabase)]
    #[case("None", Platform::None)]
    fn parses_names_and_aliases(#[case] raw: &str, #[case] expected: Platform) {
        assert_eq!(raw.parse::<Platform>().unwrap(), expected);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            "MySpace".parse::<Platform>(),
            Err(VaultError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Platform::GlobalDatabase).unwrap();
        assert_eq!(json, "\"Global Database\"");
        let back: Platform = serde_json::from_str("\"Twitter\"").unwrap();
        assert_eq!(back, Platform::Twitter);
    }

    #[test]
    fn every_platform_round_trips_its_name() {
        for platform in Platform::ALL {
            assert_eq!(platform.name().parse::<Platform>().unwrap(), platform);
        }
    }
}
