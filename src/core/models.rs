use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Query-string or form parameters sent with a request.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Facebook,
    Instagram,
    Tumblr,
    Twitter,
    Github,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::Facebook,
        Provider::Instagram,
        Provider::Tumblr,
        Provider::Twitter,
        Provider::Github,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Facebook => "facebook",
            Provider::Instagram => "instagram",
            Provider::Tumblr => "tumblr",
            Provider::Twitter => "twitter",
            Provider::Github => "github",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Facebook => "https://graph.facebook.com",
            Provider::Instagram => "https://api.instagram.com",
            Provider::Tumblr => "https://api.tumblr.com",
            Provider::Twitter => "https://api.twitter.com",
            Provider::Github => "https://api.github.com",
        }
    }

    pub fn default_api_version(&self) -> Option<&'static str> {
        match self {
            Provider::Facebook => Some("v2.9"),
            Provider::Instagram => Some("v1"),
            Provider::Tumblr => Some("v2"),
            Provider::Twitter => Some("1.1"),
            Provider::Github => None,
        }
    }

    pub fn supports_streaming(&self) -> bool {
        matches!(
            self,
            Provider::Facebook | Provider::Instagram | Provider::Tumblr
        )
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
