//! Tagging rule tables.
//!
//! All tables are static and ordered. A [`Selector`] picks foods either by a
//! fragment of their key (`lentil` selects `lentils-brown-puy`) or by one of
//! the categories on their food record.

use crate::model::MealType;

/// Picks foods by key fragment or by category.
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    pub fragments: &'static [&'static str],
    pub categories: &'static [&'static str],
}

impl Selector {
    const fn new(fragments: &'static [&'static str], categories: &'static [&'static str]) -> Self {
        Self {
            fragments,
            categories,
        }
    }

    /// Whether the food `key` with `categories` is selected.
    pub fn selects(&self, key: &str, categories: &[String]) -> bool {
        self.fragments.iter().any(|f| key.contains(f))
            || categories
                .iter()
                .any(|c| self.categories.contains(&c.as_str()))
    }
}

// ── Meal type ────────────────────────────────────────────────────────────

/// Name keywords per meal type. First match wins; no match means dinner.
pub static MEAL_TYPE_RULES: &[(MealType, &[&str])] = &[
    (
        MealType::Breakfast,
        &[
            "breakfast", "oatmeal", "porridge", "smoothie", "granola", "muffin", "pancake",
            "waffle",
        ],
    ),
    (
        MealType::Dessert,
        &[
            "cake", "brownie", "pudding", "cookie", "crumble", "tart", "ice cream", "sorbet",
            "fudge", "truffle",
        ],
    ),
    (
        MealType::Dinner,
        &["pasta", "linguine", "spaghetti", "penne", "gemelli", "mac", "noodle"],
    ),
    (
        MealType::Lunch,
        &["salad", "sandwich", "wrap", "soup", "antipasto", "slaw", "toast", "bowl"],
    ),
    (
        MealType::Snack,
        &["dip", "hummus", "snack", "crackers", "chips", "bites"],
    ),
    (
        MealType::Dinner,
        &[
            "stew", "curry", "roasted", "stuffed", "braised", "piccata", "pie", "chilli",
            "chili", "dal", "tempeh", "burger", "risotto", "tacos",
        ],
    ),
];

pub const DEFAULT_MEAL_TYPE: MealType = MealType::Dinner;

// ── Daily Dozen ──────────────────────────────────────────────────────────

/// `(label, selector)` for each Daily Dozen item.
pub static DAILY_DOZEN_RULES: &[(&str, Selector)] = &[
    (
        "beans",
        Selector::new(
            &["bean", "lentil", "chickpea", "tempeh", "edamame", "peas", "dal"],
            &["rich-in-legumes", "legumes", "beans"],
        ),
    ),
    // by category only: rye-berries-whole is a grain
    ("berries", Selector::new(&[], &["berries"])),
    (
        "other-fruits",
        Selector::new(&[], &["rich-in-fruits", "fruits"]),
    ),
    (
        "cruciferous-vegetables",
        Selector::new(&[], &["cruciferous"]),
    ),
    ("greens", Selector::new(&[], &["greens", "rich-in-greens"])),
    (
        "other-vegetables",
        Selector::new(&[], &["rich-in-vegetables", "vegetables"]),
    ),
    ("flaxseeds", Selector::new(&["flaxseed"], &[])),
    (
        "nuts-and-seeds",
        Selector::new(&[], &["nuts-and-seeds", "nuts", "seeds"]),
    ),
    (
        "herbs-and-spices",
        Selector::new(&[], &["herbs-and-spices", "herbs-spices", "herbs", "spices"]),
    ),
    (
        "whole-grains",
        Selector::new(&[], &["rich-in-whole-grains", "whole-grains"]),
    ),
    ("beverages", Selector::new(&["tea"], &["beverages"])),
];

// ── Tweaks ───────────────────────────────────────────────────────────────

/// A tweak fires on a selected food, or on a keyword in the recipe text.
#[derive(Debug, Clone, Copy)]
pub struct TweakRule {
    pub label: &'static str,
    pub select: Selector,
    pub text_keywords: &'static [&'static str],
    /// Matched against the recipe name instead of the text.
    pub name_keywords: &'static [&'static str],
}

const fn tweak(
    label: &'static str,
    select: Selector,
    text_keywords: &'static [&'static str],
) -> TweakRule {
    TweakRule {
        label,
        select,
        text_keywords,
        name_keywords: &[],
    }
}

pub static TWEAK_RULES: &[TweakRule] = &[
    tweak("vinegar", Selector::new(&["vinegar"], &[]), &["vinegar"]),
    tweak("cumin-boost", Selector::new(&["cumin"], &[]), &[]),
    tweak("black-cumin", Selector::new(&["nigella"], &[]), &[]),
    tweak("garlic-powder", Selector::new(&["garlic-powder"], &[]), &[]),
    tweak(
        "ginger-and-cayenne",
        Selector::new(&["ginger", "cayenne"], &[]),
        &[],
    ),
    tweak(
        "nutritional-yeast",
        Selector::new(&["nutritional-yeast"], &[]),
        &[],
    ),
    tweak(
        "anti-inflammatory",
        Selector::new(&["turmeric", "ginger", "garlic"], &["anti-inflammatory"]),
        &[],
    ),
    tweak(
        "fiber",
        Selector::new(&["bean", "lentil"], &["high-fiber"]),
        &[],
    ),
    tweak(
        "preload-vegetables",
        Selector::new(
            &["lettuce", "cucumber", "greens-low-oxalate", "celery"],
            &["negative-calorie", "high-water-rich"],
        ),
        &[],
    ),
    tweak(
        "deflour",
        Selector::new(&["groat", "quinoa", "barley", "rye-berries", "whole-grain"], &[]),
        &[],
    ),
    tweak(
        "weight-loss-boosters",
        Selector::new(&[], &["weight-loss-booster"]),
        &[],
    ),
    TweakRule {
        label: "meal-timing-breakfast",
        select: Selector::new(&[], &[]),
        text_keywords: &[],
        name_keywords: &["breakfast"],
    },
];

// ── Synergy pairs ────────────────────────────────────────────────────────

/// Fires when one matched food satisfies `left` and a different one `right`.
#[derive(Debug, Clone, Copy)]
pub struct SynergyRule {
    pub left: Selector,
    pub right: Selector,
    pub benefit: &'static str,
}

/// Most foods listed on one synergy.
pub const MAX_SYNERGY_FOODS: usize = 4;

pub static SYNERGY_RULES: &[SynergyRule] = &[
    SynergyRule {
        left: Selector::new(&["kale", "cavolo-nero", "collard"], &["greens"]),
        right: Selector::new(&["bean", "lentil", "chickpea"], &[]),
        benefit: "Greens + beans: Enhanced iron absorption from vitamin C in greens",
    },
    SynergyRule {
        left: Selector::new(&["kale", "cavolo-nero", "spinach"], &["greens"]),
        right: Selector::new(&["vinegar"], &[]),
        benefit: "Greens + vinegar: Improved mineral absorption",
    },
    SynergyRule {
        left: Selector::new(&["turmeric"], &[]),
        right: Selector::new(&["black-pepper"], &[]),
        benefit: "Turmeric + black pepper: 2000% increase in curcumin absorption",
    },
    SynergyRule {
        left: Selector::new(&["bean", "lentil"], &[]),
        right: Selector::new(&["quinoa", "barley", "groat", "whole-grain"], &["whole-grains"]),
        benefit: "Beans + whole grains: Complete protein with complementary amino acids",
    },
    SynergyRule {
        left: Selector::new(&["mushroom", "portobello"], &[]),
        right: Selector::new(&["garlic", "onion"], &[]),
        benefit: "Mushrooms + alliums: Enhanced immune-boosting properties",
    },
    SynergyRule {
        left: Selector::new(&["tomato"], &[]),
        right: Selector::new(&["avocado"], &[]),
        benefit: "Tomatoes + healthy fats: Increased lycopene absorption",
    },
    SynergyRule {
        left: Selector::new(&["cauliflower", "broccoli", "cabbage", "brussels"], &["cruciferous"]),
        right: Selector::new(&["turmeric"], &[]),
        benefit: "Cruciferous + turmeric: Synergistic anti-cancer effects",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn selector_matches_fragment_or_category() {
        let sel = Selector::new(&["lentil"], &["rich-in-legumes"]);
        assert!(sel.selects("lentils-brown-puy", &[]));
        assert!(sel.selects("tofu", &["rich-in-legumes".to_string()]));
        assert!(!sel.selects("kale", &["greens".to_string()]));
    }

    #[test]
    fn labels_are_unique() {
        let dozen: HashSet<_> = DAILY_DOZEN_RULES.iter().map(|(l, _)| *l).collect();
        assert_eq!(dozen.len(), DAILY_DOZEN_RULES.len());
        let tweaks: HashSet<_> = TWEAK_RULES.iter().map(|r| r.label).collect();
        assert_eq!(tweaks.len(), TWEAK_RULES.len());
    }

    #[test]
    fn meal_keywords_are_lowercase() {
        for (_, words) in MEAL_TYPE_RULES {
            for w in *words {
                assert_eq!(*w, w.to_lowercase());
            }
        }
    }
}
