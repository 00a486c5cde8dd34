use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Everything the site renders, bundled so it can be parsed from one
/// embedded asset and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub events: Vec<Event>,
    pub faqs: Vec<Faq>,
    pub skills: SkillSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub languages: Vec<String>,
    pub links: ProfileLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub linkedin: Url,
    pub github: Url,
    /// `mailto:` fallback surfaced in failure messages.
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub full_description: Vec<String>,
    pub technologies: Vec<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<Url>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    pub date: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Url>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Conference,
    Hackathon,
    Community,
    Professional,
}

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conference => "conference",
            Self::Hackathon => "hackathon",
            Self::Community => "community",
            Self::Professional => "professional",
        }
    }
}

/// Category selection including the `all` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventCategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0:?}")]
pub struct ParseEventCategoryFilterError(pub String);

impl FromStr for EventCategoryFilter {
    type Err = ParseEventCategoryFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "conference" => Ok(Self::Only(EventCategory::Conference)),
            "hackathon" => Ok(Self::Only(EventCategory::Hackathon)),
            "community" => Ok(Self::Only(EventCategory::Community)),
            "professional" => Ok(Self::Only(EventCategory::Professional)),
            other => Err(ParseEventCategoryFilterError(other.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub technical: Vec<SkillGroup>,
    pub professional: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}
