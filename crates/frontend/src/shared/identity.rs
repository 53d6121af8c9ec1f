use contracts::shared::identity::Identity;
use leptos::prelude::*;

/// Identity of the visitor. Nothing provides it yet (no auth in this app),
/// so pages see `Identity::Guest`.
pub fn use_identity() -> Identity {
    use_context::<Identity>().unwrap_or_default()
}
