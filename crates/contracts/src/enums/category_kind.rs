use serde::{Deserialize, Serialize};

/// Top-level content categories of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Cols,
    Programs,
    Nutrition,
    Challenges,
}

impl CategoryKind {
    /// Key used in URLs and API paths
    pub fn code(&self) -> &'static str {
        match self {
            CategoryKind::Cols => "cols",
            CategoryKind::Programs => "programs",
            CategoryKind::Nutrition => "nutrition",
            CategoryKind::Challenges => "challenges",
        }
    }

    pub fn all() -> Vec<CategoryKind> {
        vec![
            CategoryKind::Cols,
            CategoryKind::Programs,
            CategoryKind::Nutrition,
            CategoryKind::Challenges,
        ]
    }

    /// Parses a URL key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "cols" => Some(CategoryKind::Cols),
            "programs" => Some(CategoryKind::Programs),
            "nutrition" => Some(CategoryKind::Nutrition),
            "challenges" => Some(CategoryKind::Challenges),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
