pub mod category_page;
pub mod filters;
pub mod home;
pub mod item_card;
pub mod item_page;
pub mod related_panel;
pub mod seo_head;

use contracts::enums::Language;

/// Inline UI string in both languages
pub fn tr(lang: Language, fr: &'static str, en: &'static str) -> &'static str {
    match lang {
        Language::Fr => fr,
        Language::En => en,
    }
}
