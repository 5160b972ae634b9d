//! Category weights and their redistribution
//!
//! Weights are normalized over the categories that apply to one item in one
//! call: `w_c = nominal_c / sum(nominal of applicable categories)`. A prompt-only
//! request therefore still reaches 100 with keywords and content alone.

use serde::Deserialize;
use skillscope_types::Category;

/// Nominal per-category weights
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CategoryWeights {
    /// Keyword category weight
    pub keywords: u32,
    /// File-pattern category weight
    pub files: u32,
    /// Content-pattern category weight
    pub content: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            keywords: 40,
            files: 30,
            content: 30,
        }
    }
}

impl CategoryWeights {
    /// Nominal weight for one category
    #[must_use]
    pub fn nominal(&self, category: Category) -> u32 {
        match category {
            Category::Keywords => self.keywords,
            Category::Files => self.files,
            Category::Content => self.content,
        }
    }

    /// Redistribute over `applicable`. Inapplicable categories get 0.
    ///
    /// If nothing applies, or every applicable weight is 0, all weights are 0.
    #[must_use]
    pub fn normalized(&self, applicable: &[Category]) -> NormalizedWeights {
        let mut active = [false; 3];
        for category in applicable {
            active[index(*category)] = true;
        }

        let total: u32 = Category::ALL
            .iter()
            .filter(|c| active[index(**c)])
            .map(|c| self.nominal(*c))
            .sum();

        let mut weights = [0.0; 3];
        if total > 0 {
            for category in Category::ALL {
                if active[index(category)] {
                    weights[index(category)] =
                        f64::from(self.nominal(category)) / f64::from(total);
                }
            }
        }

        NormalizedWeights { weights }
    }
}

/// Weights summing to 1.0 over the applicable categories (or all 0.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    weights: [f64; 3],
}

impl NormalizedWeights {
    /// Normalized weight for one category
    #[must_use]
    pub fn get(&self, category: Category) -> f64 {
        self.weights[index(category)]
    }

    /// Sum of all weights; 1.0 unless nothing applied
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

fn index(category: Category) -> usize {
    match category {
        Category::Keywords => 0,
        Category::Files => 1,
        Category::Content => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_all_applicable_keeps_nominal_ratio() {
        let w = CategoryWeights::default().normalized(&Category::ALL);
        assert!(approx(w.get(Category::Keywords), 0.4));
        assert!(approx(w.get(Category::Files), 0.3));
        assert!(approx(w.get(Category::Content), 0.3));
        assert!(approx(w.total(), 1.0));
    }

    #[test]
    fn test_files_redistributed_when_missing() {
        let w = CategoryWeights::default().normalized(&[Category::Keywords, Category::Content]);
        assert!(approx(w.get(Category::Keywords), 40.0 / 70.0));
        assert!(approx(w.get(Category::Content), 30.0 / 70.0));
        assert!(approx(w.get(Category::Files), 0.0));
        assert!(approx(w.total(), 1.0));
    }

    #[test]
    fn test_single_category_gets_everything() {
        let w = CategoryWeights::default().normalized(&[Category::Keywords]);
        assert!(approx(w.get(Category::Keywords), 1.0));
    }

    #[test]
    fn test_nothing_applicable() {
        let w = CategoryWeights::default().normalized(&[]);
        assert!(approx(w.total(), 0.0));

        let zero = CategoryWeights {
            keywords: 0,
            files: 0,
            content: 0,
        };
        assert!(approx(zero.normalized(&Category::ALL).total(), 0.0));
    }

    #[test]
    fn test_duplicate_categories_counted_once() {
        let w = CategoryWeights::default()
            .normalized(&[Category::Files, Category::Files, Category::Content]);
        assert!(approx(w.get(Category::Files), 0.5));
        assert!(approx(w.total(), 1.0));
    }
}
