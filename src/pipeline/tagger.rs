//! Tag derivation: meal type, Daily Dozen coverage, tweaks and synergies.
//!
//! Pure lookups over the rule tables in [`crate::rules`]; the catalogue only
//! supplies each matched food's categories, name and declared synergies.

use super::matcher::{contains_word, normalise};
use crate::model::{MealType, Synergy};
use crate::rules::{
    Selector, DAILY_DOZEN_RULES, DEFAULT_MEAL_TYPE, MAX_SYNERGY_FOODS, MEAL_TYPE_RULES,
    SYNERGY_RULES, TWEAK_RULES,
};
use crate::store::FoodCatalog;
use std::collections::BTreeSet;

/// Everything derived for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub meal_type: MealType,
    pub daily_dozen: Vec<String>,
    pub tweaks: Vec<String>,
    pub synergies: Vec<Synergy>,
}

/// Derive every tag for a recipe named `name` whose block `text` matched `foods`.
pub fn derive_tags(
    name: &str,
    text: &str,
    foods: &BTreeSet<String>,
    catalog: &FoodCatalog,
) -> TagSet {
    TagSet {
        meal_type: meal_type(name),
        daily_dozen: daily_dozen(foods, catalog),
        tweaks: tweaks(name, text, foods, catalog),
        synergies: synergies(foods, catalog),
    }
}

/// First meal-type rule with a keyword in the name.
pub fn meal_type(name: &str) -> MealType {
    let name = normalise(name);
    MEAL_TYPE_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_word(&name, w)))
        .map_or(DEFAULT_MEAL_TYPE, |(meal, _)| *meal)
}

fn any_selected(select: &Selector, foods: &BTreeSet<String>, catalog: &FoodCatalog) -> bool {
    foods
        .iter()
        .any(|key| select.selects(key, catalog.categories_of(key)))
}

pub fn daily_dozen(foods: &BTreeSet<String>, catalog: &FoodCatalog) -> Vec<String> {
    let labels: BTreeSet<&str> = DAILY_DOZEN_RULES
        .iter()
        .filter(|(_, select)| any_selected(select, foods, catalog))
        .map(|(label, _)| *label)
        .collect();
    labels.into_iter().map(str::to_string).collect()
}

pub fn tweaks(
    name: &str,
    text: &str,
    foods: &BTreeSet<String>,
    catalog: &FoodCatalog,
) -> Vec<String> {
    let name = normalise(name);
    let text = normalise(text);
    let labels: BTreeSet<&str> = TWEAK_RULES
        .iter()
        .filter(|rule| {
            any_selected(&rule.select, foods, catalog)
                || rule.text_keywords.iter().any(|w| text.contains(w))
                || rule.name_keywords.iter().any(|w| contains_word(&name, w))
        })
        .map(|rule| rule.label)
        .collect();
    labels.into_iter().map(str::to_string).collect()
}

/// Rule-table pairs followed by synergies the food records declare.
pub fn synergies(foods: &BTreeSet<String>, catalog: &FoodCatalog) -> Vec<Synergy> {
    let mut out: Vec<Synergy> = Vec::new();

    for rule in SYNERGY_RULES {
        let left: BTreeSet<&String> = foods
            .iter()
            .filter(|k| rule.left.selects(k, catalog.categories_of(k)))
            .collect();
        let right: BTreeSet<&String> = foods
            .iter()
            .filter(|k| rule.right.selects(k, catalog.categories_of(k)))
            .collect();
        let union: BTreeSet<&String> = left.union(&right).copied().collect();
        if left.is_empty() || right.is_empty() || union.len() < 2 {
            continue;
        }
        out.push(Synergy {
            foods: union
                .into_iter()
                .take(MAX_SYNERGY_FOODS)
                .cloned()
                .collect(),
            benefit: rule.benefit.to_string(),
        });
    }

    let mut declared: BTreeSet<(&str, &str)> = BTreeSet::new();
    for key in foods {
        let Some(food) = catalog.get(key) else {
            continue;
        };
        for reference in &food.synergies {
            let Some(other) = catalog.resolve(reference) else {
                continue;
            };
            if other == key.as_str() || !foods.contains(other) {
                continue;
            }
            let pair = if key.as_str() < other {
                (key.as_str(), other)
            } else {
                (other, key.as_str())
            };
            declared.insert(pair);
        }
    }
    for (a, b) in declared {
        out.push(Synergy {
            foods: vec![a.to_string(), b.to_string()],
            benefit: format!("{} + {}", catalog.name_of(a), catalog.name_of(b)),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Food;

    fn food(name: &str, categories: &[&str], synergies: &[&str]) -> Food {
        Food {
            id: "food-1".into(),
            name: name.into(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            synergies: synergies.iter().map(|s| s.to_string()).collect(),
            ..Food::default()
        }
    }

    fn catalog() -> FoodCatalog {
        FoodCatalog::from_foods([
            ("kale".to_string(), food("Kale", &["greens", "cruciferous"], &[])),
            (
                "white-beans-cannellini".to_string(),
                food("White Beans", &["rich-in-legumes", "high-fiber"], &["Kale"]),
            ),
            ("turmeric".to_string(), food("Turmeric", &["herbs-and-spices"], &["black-pepper"])),
            ("black-pepper".to_string(), food("Black Pepper", &["herbs-and-spices"], &[])),
            ("vinegar-all-types".to_string(), food("Vinegar", &[], &[])),
            (
                "rye-berries-whole".to_string(),
                food("Rye Berries", &["rich-in-whole-grains"], &[]),
            ),
            ("cranberries-dried".to_string(), food("Cranberries", &["berries"], &[])),
        ])
    }

    fn keys(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn meal_type_first_match_wins() {
        assert_eq!(meal_type("Kale Salad"), MealType::Lunch);
        assert_eq!(meal_type("Breakfast Salad"), MealType::Breakfast);
        assert_eq!(meal_type("Mac and Greens"), MealType::Dinner);
        assert_eq!(meal_type("Lentil Shepherd's Pie"), MealType::Dinner);
        assert_eq!(meal_type("White Bean Dip"), MealType::Snack);
        assert_eq!(meal_type("Chocolate Pudding"), MealType::Dessert);
        assert_eq!(meal_type("Lemony Greens"), MealType::Dinner);
        // "tart" must not fire inside "start"
        assert_eq!(meal_type("Quick Start Greens"), MealType::Dinner);
    }

    #[test]
    fn daily_dozen_from_categories_and_fragments() {
        let dozen = daily_dozen(&keys(&["kale", "white-beans-cannellini", "turmeric"]), &catalog());
        assert_eq!(
            dozen,
            vec!["beans", "cruciferous-vegetables", "greens", "herbs-and-spices"]
        );
        assert!(daily_dozen(&BTreeSet::new(), &catalog()).is_empty());
    }

    #[test]
    fn grain_berries_are_not_berries() {
        assert_eq!(
            daily_dozen(&keys(&["rye-berries-whole"]), &catalog()),
            vec!["whole-grains"]
        );
        assert_eq!(
            daily_dozen(&keys(&["cranberries-dried"]), &catalog()),
            vec!["berries"]
        );
    }

    #[test]
    fn tweaks_from_foods_text_and_name() {
        let foods = keys(&["white-beans-cannellini", "turmeric"]);
        let t = tweaks("Breakfast Beans", "a splash of vinegar", &foods, &catalog());
        assert_eq!(
            t,
            vec!["anti-inflammatory", "fiber", "meal-timing-breakfast", "vinegar"]
        );
    }

    #[test]
    fn rule_synergies_need_two_distinct_foods() {
        let syn = synergies(&keys(&["turmeric", "black-pepper"]), &catalog());
        assert!(syn.iter().any(|s| s.benefit.starts_with("Turmeric + black pepper")
            && s.foods == vec!["black-pepper", "turmeric"]));

        let syn = synergies(&keys(&["turmeric"]), &catalog());
        assert!(syn.is_empty());
    }

    #[test]
    fn declared_synergies_by_key_or_name() {
        let syn = synergies(&keys(&["kale", "white-beans-cannellini"]), &catalog());
        let declared: Vec<&Synergy> = syn.iter().filter(|s| s.benefit == "Kale + White Beans").collect();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].foods, vec!["kale", "white-beans-cannellini"]);
        // the rule table also pairs greens with beans
        assert!(syn.iter().any(|s| s.benefit.starts_with("Greens + beans")));
    }

    #[test]
    fn synergy_lists_at_most_four_foods() {
        let foods = keys(&[
            "kale",
            "spinach",
            "cavolo-nero",
            "black-beans",
            "white-beans-cannellini",
            "lentils-brown-puy",
        ]);
        let syn = synergies(&foods, &catalog());
        let greens_beans = syn
            .iter()
            .find(|s| s.benefit.starts_with("Greens + beans"))
            .unwrap();
        assert_eq!(greens_beans.foods.len(), MAX_SYNERGY_FOODS);
    }
}
