use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Science,
    Politics,
    Philosophy,
    Art,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Science,
        Category::Politics,
        Category::Philosophy,
        Category::Art,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Science => "science",
            Category::Politics => "politics",
            Category::Philosophy => "philosophy",
            Category::Art => "art",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}' (expected one of: science, politics, philosophy, art)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

/// A persona shown in the sidebar. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub id: String,
    pub name: String,
    /// Avatar image URL. Displayed as-is, never fetched.
    pub avatar: String,
    pub description: String,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub expertise: Vec<String>,
    pub era: Option<String>,
    pub languages: Vec<String>,
    pub achievements: Vec<String>,
    /// Teaser line shown under the description in the list.
    pub last_message: Option<String>,
}

impl Personality {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            description: description.into(),
            category: None,
            status: None,
            expertise: Vec::new(),
            era: None,
            languages: Vec::new(),
            achievements: Vec::new(),
            last_message: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_online(&self) -> bool {
        !matches!(self.status, Some(Status::Offline))
    }
}
