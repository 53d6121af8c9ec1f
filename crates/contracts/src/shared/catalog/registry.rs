//! Category configuration registry
//!
//! Static description of every catalog category: labels, filters, sort
//! options and sub-navigation. Pure lookup, no I/O.

use std::collections::HashSet;

use super::filter::{FilterDefinition, FilterOption};
use crate::enums::CategoryKind;
use crate::shared::localized::LocalizedLabel as L;

pub const DEFAULT_SORT: &str = "featured";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortOption {
    pub key: &'static str,
    pub label: L,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subcategory {
    pub key: &'static str,
    pub label: L,
    pub description: L,
}

/// Configuration of one category (static version)
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    pub kind: CategoryKind,
    pub label: L,
    pub description: L,
    pub filters: &'static [FilterDefinition],
    pub sort_options: &'static [SortOption],
    pub subcategories: &'static [Subcategory],
    pub default_sort: &'static str,
}

impl CategoryConfig {
    pub fn key(&self) -> &'static str {
        self.kind.code()
    }

    pub fn filter(&self, key: &str) -> Option<&'static FilterDefinition> {
        self.filters.iter().find(|f| f.key() == key)
    }

    pub fn subcategory(&self, key: &str) -> Option<&'static Subcategory> {
        self.subcategories.iter().find(|s| s.key == key)
    }

    pub fn has_sort(&self, key: &str) -> bool {
        self.sort_options.iter().any(|s| s.key == key)
    }

    /// Keys whose URL value is a comma-separated list
    pub fn multi_select_keys(&self) -> Vec<&'static str> {
        self.filters
            .iter()
            .filter(|f| f.is_multi_select())
            .map(|f| f.key())
            .collect()
    }

    /// Filter keys and sort keys are unique within the category
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for filter in self.filters {
            for key in filter.state_keys() {
                if !seen.insert(key.clone()) {
                    return Err(format!("{}: duplicate filter key '{}'", self.key(), key));
                }
            }
        }
        let mut sorts = HashSet::new();
        for option in self.sort_options {
            if !sorts.insert(option.key) {
                return Err(format!("{}: duplicate sort key '{}'", self.key(), option.key));
            }
        }
        if !self.has_sort(self.default_sort) {
            return Err(format!(
                "{}: default sort '{}' is not a sort option",
                self.key(),
                self.default_sort
            ));
        }
        Ok(())
    }
}

/// Lookup by URL key; `None` means "render a minimal header, no filters"
pub fn get_category_config(key: &str) -> Option<&'static CategoryConfig> {
    let kind = CategoryKind::from_code(key)?;
    Some(config_for(kind))
}

pub fn config_for(kind: CategoryKind) -> &'static CategoryConfig {
    match kind {
        CategoryKind::Cols => &COLS,
        CategoryKind::Programs => &PROGRAMS,
        CategoryKind::Nutrition => &NUTRITION,
        CategoryKind::Challenges => &CHALLENGES,
    }
}

pub fn all_categories() -> Vec<&'static CategoryConfig> {
    CategoryKind::all().into_iter().map(config_for).collect()
}

// ============================================================================
// Shared pieces
// ============================================================================

const SEARCH: FilterDefinition = FilterDefinition::Search {
    key: "search",
    label: L::new("Rechercher", "Search"),
};

const SORT_FEATURED: SortOption = SortOption {
    key: "featured",
    label: L::new("À la une", "Featured"),
};
const SORT_NAME_ASC: SortOption = SortOption {
    key: "name_asc",
    label: L::new("Nom (A-Z)", "Name (A-Z)"),
};
const SORT_NAME_DESC: SortOption = SortOption {
    key: "name_desc",
    label: L::new("Nom (Z-A)", "Name (Z-A)"),
};
const SORT_DATE_DESC: SortOption = SortOption {
    key: "date_desc",
    label: L::new("Plus récents", "Newest"),
};
const SORT_DATE_ASC: SortOption = SortOption {
    key: "date_asc",
    label: L::new("Plus anciens", "Oldest"),
};
const SORT_DIFFICULTY: SortOption = SortOption {
    key: "difficulty",
    label: L::new("Difficulté", "Difficulty"),
};

const DIFFICULTY_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "1", label: L::new("Facile", "Easy") },
    FilterOption { value: "2", label: L::new("Modéré", "Moderate") },
    FilterOption { value: "3", label: L::new("Difficile", "Hard") },
    FilterOption { value: "4", label: L::new("Très difficile", "Very hard") },
    FilterOption { value: "5", label: L::new("Extrême", "Extreme") },
];

// ============================================================================
// Cols
// ============================================================================

static COLS: CategoryConfig = CategoryConfig {
    kind: CategoryKind::Cols,
    label: L::new("Cols", "Mountain passes"),
    description: L::new(
        "Les cols mythiques d'Europe : profils, altitudes et difficultés.",
        "Europe's legendary climbs: profiles, altitudes and difficulty.",
    ),
    filters: &[
        SEARCH,
        FilterDefinition::Select {
            key: "country",
            label: L::new("Pays", "Country"),
            options: &[
                FilterOption { value: "france", label: L::new("France", "France") },
                FilterOption { value: "italy", label: L::new("Italie", "Italy") },
                FilterOption { value: "spain", label: L::new("Espagne", "Spain") },
                FilterOption { value: "switzerland", label: L::new("Suisse", "Switzerland") },
            ],
        },
        FilterDefinition::Select {
            key: "difficulty",
            label: L::new("Difficulté", "Difficulty"),
            options: DIFFICULTY_OPTIONS,
        },
        FilterDefinition::Range {
            key: "altitude",
            label: L::new("Altitude", "Altitude"),
            min: 0.0,
            max: 3000.0,
            step: 100.0,
            unit: Some("m"),
        },
        FilterDefinition::Range {
            key: "length",
            label: L::new("Longueur", "Length"),
            min: 0.0,
            max: 50.0,
            step: 1.0,
            unit: Some("km"),
        },
        FilterDefinition::Range {
            key: "gradient",
            label: L::new("Pente moyenne", "Average gradient"),
            min: 0.0,
            max: 15.0,
            step: 0.5,
            unit: Some("%"),
        },
        FilterDefinition::MultiSelect {
            key: "features",
            label: L::new("Caractéristiques", "Features"),
            options: &[
                FilterOption { value: "panorama", label: L::new("Panorama", "Scenic views") },
                FilterOption { value: "historic", label: L::new("Historique", "Historic") },
                FilterOption { value: "tour_de_france", label: L::new("Tour de France", "Tour de France") },
                FilterOption { value: "hairpins", label: L::new("Lacets", "Hairpins") },
                FilterOption { value: "gravel", label: L::new("Portions non goudronnées", "Gravel sections") },
            ],
        },
    ],
    sort_options: &[
        SORT_FEATURED,
        SORT_NAME_ASC,
        SORT_NAME_DESC,
        SortOption { key: "altitude", label: L::new("Altitude", "Altitude") },
        SORT_DIFFICULTY,
        SortOption { key: "gradient", label: L::new("Pente", "Gradient") },
        SORT_DATE_DESC,
    ],
    subcategories: &[
        Subcategory {
            key: "alpes",
            label: L::new("Alpes", "Alps"),
            description: L::new("Les géants alpins", "The alpine giants"),
        },
        Subcategory {
            key: "pyrenees",
            label: L::new("Pyrénées", "Pyrenees"),
            description: L::new("Cols pyrénéens", "Pyrenean passes"),
        },
        Subcategory {
            key: "vosges",
            label: L::new("Vosges", "Vosges"),
            description: L::new("Ballons et cols vosgiens", "Vosges ballons and passes"),
        },
        Subcategory {
            key: "massif-central",
            label: L::new("Massif central", "Massif Central"),
            description: L::new("Volcans et plateaux", "Volcanoes and plateaus"),
        },
        Subcategory {
            key: "dolomites",
            label: L::new("Dolomites", "Dolomites"),
            description: L::new("Les passi italiens", "Italian passi"),
        },
    ],
    default_sort: DEFAULT_SORT,
};

// ============================================================================
// Training programs
// ============================================================================

static PROGRAMS: CategoryConfig = CategoryConfig {
    kind: CategoryKind::Programs,
    label: L::new("Programmes d'entraînement", "Training programs"),
    description: L::new(
        "Plans structurés pour préparer vos ascensions.",
        "Structured plans to prepare your climbs.",
    ),
    filters: &[
        SEARCH,
        FilterDefinition::Select {
            key: "level",
            label: L::new("Niveau", "Level"),
            options: &[
                FilterOption { value: "beginner", label: L::new("Débutant", "Beginner") },
                FilterOption { value: "intermediate", label: L::new("Intermédiaire", "Intermediate") },
                FilterOption { value: "advanced", label: L::new("Avancé", "Advanced") },
                FilterOption { value: "elite", label: L::new("Élite", "Elite") },
            ],
        },
        FilterDefinition::Range {
            key: "duration",
            label: L::new("Durée", "Duration"),
            min: 1.0,
            max: 24.0,
            step: 1.0,
            unit: Some("sem."),
        },
        FilterDefinition::Range {
            key: "sessions_per_week",
            label: L::new("Séances par semaine", "Sessions per week"),
            min: 1.0,
            max: 7.0,
            step: 1.0,
            unit: None,
        },
        FilterDefinition::MultiSelect {
            key: "goals",
            label: L::new("Objectifs", "Goals"),
            options: &[
                FilterOption { value: "endurance", label: L::new("Endurance", "Endurance") },
                FilterOption { value: "climbing", label: L::new("Grimpe", "Climbing") },
                FilterOption { value: "sprint", label: L::new("Sprint", "Sprint") },
                FilterOption { value: "weight_loss", label: L::new("Perte de poids", "Weight loss") },
                FilterOption { value: "gran_fondo", label: L::new("Cyclosportive", "Gran fondo") },
            ],
        },
    ],
    sort_options: &[
        SORT_FEATURED,
        SORT_NAME_ASC,
        SORT_NAME_DESC,
        SortOption { key: "duration_asc", label: L::new("Durée (courte)", "Duration (short)") },
        SORT_DIFFICULTY,
        SORT_DATE_DESC,
    ],
    subcategories: &[
        Subcategory {
            key: "endurance",
            label: L::new("Endurance", "Endurance"),
            description: L::new("Construire le foncier", "Build your base"),
        },
        Subcategory {
            key: "climbing",
            label: L::new("Montagne", "Climbing"),
            description: L::new("Spécial cols", "Built for the mountains"),
        },
        Subcategory {
            key: "competition",
            label: L::new("Compétition", "Racing"),
            description: L::new("Préparation aux courses", "Race preparation"),
        },
    ],
    default_sort: DEFAULT_SORT,
};

// ============================================================================
// Nutrition
// ============================================================================

static NUTRITION: CategoryConfig = CategoryConfig {
    kind: CategoryKind::Nutrition,
    label: L::new("Nutrition", "Nutrition"),
    description: L::new(
        "Recettes, hydratation et stratégies pour la montagne.",
        "Recipes, hydration and fueling strategies for the mountains.",
    ),
    filters: &[
        SEARCH,
        FilterDefinition::Select {
            key: "type",
            label: L::new("Type", "Type"),
            options: &[
                FilterOption { value: "recipe", label: L::new("Recette", "Recipe") },
                FilterOption { value: "guide", label: L::new("Guide", "Guide") },
                FilterOption { value: "supplement", label: L::new("Complément", "Supplement") },
            ],
        },
        FilterDefinition::Select {
            key: "timing",
            label: L::new("Moment", "Timing"),
            options: &[
                FilterOption { value: "before", label: L::new("Avant l'effort", "Before the ride") },
                FilterOption { value: "during", label: L::new("Pendant l'effort", "During the ride") },
                FilterOption { value: "after", label: L::new("Récupération", "Recovery") },
            ],
        },
        FilterDefinition::Range {
            key: "calories",
            label: L::new("Calories", "Calories"),
            min: 0.0,
            max: 1500.0,
            step: 50.0,
            unit: Some("kcal"),
        },
        FilterDefinition::MultiSelect {
            key: "dietary",
            label: L::new("Régime", "Dietary"),
            options: &[
                FilterOption { value: "vegetarian", label: L::new("Végétarien", "Vegetarian") },
                FilterOption { value: "vegan", label: L::new("Végan", "Vegan") },
                FilterOption { value: "gluten_free", label: L::new("Sans gluten", "Gluten free") },
                FilterOption { value: "lactose_free", label: L::new("Sans lactose", "Lactose free") },
            ],
        },
    ],
    sort_options: &[
        SORT_FEATURED,
        SORT_NAME_ASC,
        SORT_NAME_DESC,
        SortOption { key: "calories_asc", label: L::new("Calories (croissant)", "Calories (low first)") },
        SORT_DATE_DESC,
        SORT_DATE_ASC,
    ],
    subcategories: &[
        Subcategory {
            key: "recipes",
            label: L::new("Recettes", "Recipes"),
            description: L::new("À préparer avant la sortie", "To prepare before the ride"),
        },
        Subcategory {
            key: "hydration",
            label: L::new("Hydratation", "Hydration"),
            description: L::new("Boire juste en altitude", "Drinking right at altitude"),
        },
        Subcategory {
            key: "guides",
            label: L::new("Guides", "Guides"),
            description: L::new("Stratégies nutritionnelles", "Fueling strategies"),
        },
    ],
    default_sort: DEFAULT_SORT,
};

// ============================================================================
// Challenges
// ============================================================================

static CHALLENGES: CategoryConfig = CategoryConfig {
    kind: CategoryKind::Challenges,
    label: L::new("Défis", "Challenges"),
    description: L::new(
        "Collections de cols à gravir : les 7 majeurs et bien d'autres.",
        "Collections of climbs to conquer: the 7 majors and more.",
    ),
    filters: &[
        SEARCH,
        FilterDefinition::Select {
            key: "difficulty",
            label: L::new("Difficulté", "Difficulty"),
            options: DIFFICULTY_OPTIONS,
        },
        FilterDefinition::Range {
            key: "cols_count",
            label: L::new("Nombre de cols", "Number of climbs"),
            min: 1.0,
            max: 20.0,
            step: 1.0,
            unit: None,
        },
        FilterDefinition::MultiSelect {
            key: "regions",
            label: L::new("Régions", "Regions"),
            options: &[
                FilterOption { value: "alpes", label: L::new("Alpes", "Alps") },
                FilterOption { value: "pyrenees", label: L::new("Pyrénées", "Pyrenees") },
                FilterOption { value: "vosges", label: L::new("Vosges", "Vosges") },
                FilterOption { value: "dolomites", label: L::new("Dolomites", "Dolomites") },
            ],
        },
    ],
    sort_options: &[
        SORT_FEATURED,
        SORT_NAME_ASC,
        SORT_NAME_DESC,
        SORT_DIFFICULTY,
        SORT_DATE_DESC,
    ],
    subcategories: &[
        Subcategory {
            key: "seven-majors",
            label: L::new("Les 7 Majeurs", "The 7 Majors"),
            description: L::new("Les sept cols emblématiques", "The seven iconic climbs"),
        },
        Subcategory {
            key: "regional",
            label: L::new("Défis régionaux", "Regional challenges"),
            description: L::new("Un massif, plusieurs cols", "One range, many climbs"),
        },
    ],
    default_sort: DEFAULT_SORT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_are_valid() {
        for config in all_categories() {
            assert_eq!(config.validate(), Ok(()), "category {}", config.key());
        }
    }

    #[test]
    fn test_unknown_category_is_none() {
        assert!(get_category_config("routes").is_none());
        assert!(get_category_config("").is_none());
    }

    #[test]
    fn test_lookup() {
        let cols = get_category_config("cols").unwrap();
        assert_eq!(cols.kind, CategoryKind::Cols);
        assert_eq!(cols.multi_select_keys(), vec!["features"]);
        assert!(cols.subcategory("pyrenees").is_some());
        assert!(cols.filter("altitude").is_some());
        assert_eq!(cols.default_sort, "featured");
    }

    #[test]
    fn test_duplicate_keys_are_reported() {
        static BROKEN: CategoryConfig = CategoryConfig {
            kind: CategoryKind::Cols,
            label: L::new("x", "x"),
            description: L::new("x", "x"),
            filters: &[
                FilterDefinition::Range {
                    key: "altitude",
                    label: L::new("a", "a"),
                    min: 0.0,
                    max: 1.0,
                    step: 1.0,
                    unit: None,
                },
                FilterDefinition::Select {
                    key: "altitude_min",
                    label: L::new("b", "b"),
                    options: &[],
                },
            ],
            sort_options: &[SORT_FEATURED],
            subcategories: &[],
            default_sort: DEFAULT_SORT,
        };
        assert!(BROKEN.validate().unwrap_err().contains("altitude_min"));
    }
}
