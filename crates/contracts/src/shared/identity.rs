use serde::{Deserialize, Serialize};

/// Who is browsing. Consumers receive it explicitly; when no auth provider
/// is available the caller uses `Identity::Guest`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Authenticated {
        user_id: String,
        display_name: String,
    },
    #[default]
    Guest,
}

impl Identity {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { user_id, .. } => Some(user_id),
            Identity::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn display_name(&self) -> &str {
        match self {
            Identity::Authenticated { display_name, .. } => display_name,
            Identity::Guest => "Invité",
        }
    }
}
