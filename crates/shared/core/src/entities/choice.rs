use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::values::Cash;

/// One reward option offered at a choice branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Commit-style label, e.g. `feat: add-caching-layer`
    pub label: String,
    /// Cash added when this option is picked
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Cash,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, reward: Cash) -> Self {
        Self {
            label: label.into(),
            reward,
        }
    }
}

impl std::fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (+${})", self.label, self.reward)
    }
}

/// Fixed, ordered set of reward options
///
/// The catalog itself never changes; `sample` shuffles a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceCatalog {
    options: Vec<ChoiceOption>,
}

impl ChoiceCatalog {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Shuffle a copy of the catalog and take the first `count` entries
    ///
    /// Entries are drawn without replacement, so the result never holds
    /// the same catalog entry twice.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<ChoiceOption> {
        let mut shuffled = self.options.clone();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        shuffled
    }
}

impl Default for ChoiceCatalog {
    fn default() -> Self {
        Self::new(vec![
            ChoiceOption::new("refactor: optimize-loop", dec!(150)),
            ChoiceOption::new("feat: add-caching-layer", dec!(300)),
            ChoiceOption::new("fix: handle-edge-case", dec!(200)),
            ChoiceOption::new("chore: update-dependencies", dec!(100)),
            ChoiceOption::new("test: implement-unit-tests", dec!(250)),
        ])
    }
}
