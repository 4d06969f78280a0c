//! # Ingredient Knowledge Table
//!
//! Static bilingual (German/English) table mapping ingredient categories to
//! exemplar names and dietary properties, plus the allergen keyword overrides
//! and the English noun vocabulary used by the keyword segmentation fallback.
//!
//! Category order matters: the classifier takes the first category with a
//! matching exemplar, so produce categories come before dairy, meat and fish.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ingredient category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Herbs,
    Spices,
    Grains,
    Oils,
    Dairy,
    Meat,
    Fish,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Herbs => "herbs",
            Category::Spices => "spices",
            Category::Grains => "grains",
            Category::Oils => "oils",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Fish => "fish",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dietary property vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryProperty {
    Vegetarian,
    Vegan,
}

impl DietaryProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryProperty::Vegetarian => "vegetarian",
            DietaryProperty::Vegan => "vegan",
        }
    }
}

impl fmt::Display for DietaryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allergens detected by keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allergen {
    Gluten,
    Dairy,
    Nuts,
}

impl Allergen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Dairy => "dairy",
            Allergen::Nuts => "nuts",
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of exemplar names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
}

impl Language {
    /// Guess the language of an utterance; umlauts, ß or common German words mean German
    pub fn detect(text: &str) -> Language {
        let lower = text.to_lowercase();
        if lower.chars().any(|c| matches!(c, 'ä' | 'ö' | 'ü' | 'ß')) {
            return Language::De;
        }
        let german_words = ["pro", "je", "und", "stück", "kilo", "normale", "bio"];
        if lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| german_words.contains(&word))
        {
            return Language::De;
        }
        Language::En
    }

    /// The other supported language
    pub fn other(&self) -> Language {
        match self {
            Language::De => Language::En,
            Language::En => Language::De,
        }
    }
}

/// One category row of the knowledge table
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub category: Category,
    /// German exemplar names, lowercase
    pub german: Vec<&'static str>,
    /// English exemplar names, lowercase
    pub english: Vec<&'static str>,
    pub dietary: Vec<DietaryProperty>,
}

impl CategoryEntry {
    pub fn exemplars(&self, language: Language) -> &[&'static str] {
        match language {
            Language::De => &self.german,
            Language::En => &self.english,
        }
    }
}

/// Keywords that force an allergen regardless of category
#[derive(Debug, Clone)]
pub struct AllergenKeyword {
    pub allergen: Allergen,
    pub keywords: Vec<&'static str>,
}

/// Immutable classification data
#[derive(Debug, Clone)]
pub struct KnowledgeTable {
    pub categories: Vec<CategoryEntry>,
    pub allergens: Vec<AllergenKeyword>,
    /// Common English ingredient nouns for the keyword segmentation fallback
    pub ingredient_nouns: Vec<&'static str>,
}

const PLANT_BASED: [DietaryProperty; 2] = [DietaryProperty::Vegetarian, DietaryProperty::Vegan];

lazy_static! {
    static ref BUILTIN: KnowledgeTable = KnowledgeTable::build_default();
}

impl KnowledgeTable {
    /// Shared built-in table
    pub fn builtin() -> &'static KnowledgeTable {
        &BUILTIN
    }

    fn build_default() -> Self {
        let categories = vec![
            CategoryEntry {
                category: Category::Vegetables,
                german: vec![
                    "tomate", "tomaten", "kartoffel", "kartoffeln", "zwiebel", "zwiebeln",
                    "karotte", "karotten", "möhre", "möhren", "paprika", "gurke", "gurken",
                    "salat", "spinat", "brokkoli", "blumenkohl", "zucchini", "aubergine",
                    "knoblauch", "porree", "sellerie", "kohl", "champignon", "champignons",
                    "pilze", "erbsen", "bohnen", "kürbis", "rucola", "avocado", "avocados",
                    "spargel", "rote bete", "radieschen",
                ],
                english: vec![
                    "tomato", "tomatoes", "potato", "potatoes", "onion", "onions", "carrot",
                    "carrots", "bell pepper", "cucumber", "lettuce", "spinach", "broccoli",
                    "cauliflower", "zucchini", "eggplant", "garlic", "leek", "celery",
                    "cabbage", "mushroom", "mushrooms", "peas", "beans", "pumpkin", "arugula",
                    "avocado", "avocados", "asparagus", "beetroot", "radish",
                ],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Fruits,
                german: vec![
                    "apfel", "äpfel", "birne", "banane", "bananen", "zitrone", "zitronen",
                    "limette", "orange", "orangen", "erdbeere", "erdbeeren", "himbeeren",
                    "heidelbeeren", "preiselbeeren", "trauben", "kirschen", "mango", "ananas",
                    "pfirsich",
                ],
                english: vec![
                    "apple", "apples", "pear", "banana", "bananas", "lemon", "lemons", "lime",
                    "limes", "strawberry", "strawberries", "raspberries", "blueberries",
                    "grapes", "cherries", "mango", "pineapple", "peach",
                ],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Herbs,
                german: vec![
                    "basilikum", "petersilie", "schnittlauch", "dill", "thymian", "rosmarin",
                    "oregano", "minze", "koriander", "salbei", "estragon",
                ],
                english: vec![
                    "basil", "parsley", "chives", "dill", "thyme", "rosemary", "oregano",
                    "mint", "cilantro", "sage", "tarragon",
                ],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Spices,
                german: vec![
                    "salz", "pfeffer", "zimt", "muskat", "kümmel", "kreuzkümmel", "curry",
                    "kurkuma", "ingwer", "nelken", "vanille", "chili",
                ],
                english: vec![
                    "salt", "pepper", "cinnamon", "nutmeg", "cumin", "curry", "turmeric",
                    "ginger", "cloves", "vanilla", "chili",
                ],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Grains,
                german: vec![
                    "mehl", "weizenmehl", "reis", "nudeln", "pasta", "brot", "haferflocken",
                    "hafer", "weizen", "dinkel", "gerste", "couscous", "quinoa", "bulgur",
                    "grieß",
                ],
                english: vec![
                    "flour", "rice", "noodles", "pasta", "bread", "oats", "wheat", "spelt",
                    "barley", "couscous", "quinoa", "bulgur", "semolina",
                ],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Oils,
                german: vec![
                    "olivenöl", "rapsöl", "sonnenblumenöl", "sesamöl", "öl", "essig",
                ],
                english: vec!["olive oil", "canola oil", "sunflower oil", "oil", "vinegar"],
                dietary: PLANT_BASED.to_vec(),
            },
            CategoryEntry {
                category: Category::Dairy,
                german: vec![
                    "milch", "käse", "butter", "sahne", "joghurt", "quark", "schmand",
                    "mozzarella", "parmesan", "frischkäse", "mascarpone",
                ],
                english: vec![
                    "milk", "cheese", "butter", "cream", "yogurt", "yoghurt", "mozzarella",
                    "parmesan", "mascarpone",
                ],
                dietary: vec![DietaryProperty::Vegetarian],
            },
            CategoryEntry {
                category: Category::Meat,
                german: vec![
                    "fleisch", "rind", "rindfleisch", "schwein", "schweinefleisch", "hähnchen",
                    "huhn", "pute", "speck", "schinken", "wurst", "hackfleisch", "lamm",
                ],
                english: vec![
                    "beef", "pork", "chicken", "turkey", "bacon", "ham", "sausage", "lamb",
                    "meat",
                ],
                dietary: Vec::new(),
            },
            CategoryEntry {
                category: Category::Fish,
                german: vec![
                    "fisch", "lachs", "thunfisch", "forelle", "kabeljau", "garnelen",
                    "muscheln", "hering",
                ],
                english: vec![
                    "fish", "salmon", "tuna", "trout", "cod", "shrimp", "prawns", "mussels",
                    "herring",
                ],
                dietary: Vec::new(),
            },
        ];

        let allergens = vec![
            AllergenKeyword {
                allergen: Allergen::Gluten,
                keywords: vec![
                    "gluten", "weizen", "wheat", "mehl", "flour", "dinkel", "spelt", "gerste",
                    "barley", "roggen", "rye",
                ],
            },
            AllergenKeyword {
                allergen: Allergen::Dairy,
                keywords: vec![
                    "milch", "milk", "käse", "cheese", "butter", "sahne", "cream", "joghurt",
                    "yogurt", "quark",
                ],
            },
            AllergenKeyword {
                allergen: Allergen::Nuts,
                keywords: vec![
                    "nuss", "nüsse", "nut", "mandel", "almond", "haselnuss", "hazelnut",
                    "walnuss", "walnut", "cashew", "pistazie", "pistachio",
                ],
            },
        ];

        let ingredient_nouns = vec![
            "tomato", "tomatoes", "onion", "onions", "potato", "potatoes", "avocado",
            "avocados", "carrot", "carrots", "garlic", "lettuce", "cucumber", "cucumbers",
            "pepper", "peppers", "mushroom", "mushrooms", "spinach", "broccoli", "apple",
            "apples", "banana", "bananas", "lemon", "lemons", "lime", "limes", "cheese", "milk",
            "butter", "cream", "flour", "rice", "pasta", "bread", "chicken", "beef", "pork",
            "bacon", "salmon", "tuna", "fish", "oil", "salt", "sugar", "eggs", "basil",
            "parsley",
        ];

        Self {
            categories,
            allergens,
            ingredient_nouns,
        }
    }

    /// Check if a single word is in the ingredient noun vocabulary
    pub fn is_ingredient_noun(&self, word: &str) -> bool {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        !word.is_empty() && self.ingredient_nouns.contains(&word.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exemplars_are_lowercase() {
        let table = KnowledgeTable::builtin();
        for entry in &table.categories {
            for name in entry.german.iter().chain(entry.english.iter()) {
                assert_eq!(*name, name.to_lowercase(), "Exemplar '{}' not lowercase", name);
            }
        }
    }

    #[test]
    fn test_dietary_properties_per_category() {
        let table = KnowledgeTable::builtin();
        let dairy = table
            .categories
            .iter()
            .find(|e| e.category == Category::Dairy)
            .unwrap();
        assert_eq!(dairy.dietary, vec![DietaryProperty::Vegetarian]);

        let meat = table
            .categories
            .iter()
            .find(|e| e.category == Category::Meat)
            .unwrap();
        assert!(meat.dietary.is_empty());
    }

    #[test]
    fn test_ingredient_noun_lookup() {
        let table = KnowledgeTable::builtin();
        assert!(table.is_ingredient_noun("Tomatoes"));
        assert!(table.is_ingredient_noun("onions,"));
        assert!(!table.is_ingredient_noun("market"));
        assert!(!table.is_ingredient_noun("2"));
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::detect("Käse 3 Euro"), Language::De);
        assert_eq!(Language::detect("Tomaten 4.50 pro kg"), Language::De);
        assert_eq!(Language::detect("avocados 2 euro tomatoes 1.20"), Language::En);
        assert_eq!(Language::detect("tomatoes 1.20 per kilogram"), Language::En);
    }
}
