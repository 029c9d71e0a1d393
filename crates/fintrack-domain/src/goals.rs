//! Budget goals: an optional monthly income target and per-category limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::transaction::{validate_amount, Category};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// Absent goals and limits are represented as absent, never as zero.
pub struct BudgetGoals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income_goal: Option<f64>,
    #[serde(default)]
    pub category_limits: BTreeMap<Category, f64>,
}

impl BudgetGoals {
    pub fn has_limit(&self, category: Category) -> bool {
        self.category_limits.contains_key(&category)
    }

    pub fn limit(&self, category: Category) -> Option<f64> {
        self.category_limits.get(&category).copied()
    }

    pub fn set_limit(&mut self, category: Category, amount: f64) -> Result<(), DomainError> {
        validate_amount(amount)?;
        self.category_limits.insert(category, amount);
        Ok(())
    }

    /// Removes the limit for a category, returning whether one was set.
    pub fn remove_limit(&mut self, category: Category) -> bool {
        self.category_limits.remove(&category).is_some()
    }

    /// `false` when no limit is configured for the category.
    pub fn is_limit_exceeded(&self, category: Category, current_spending: f64) -> bool {
        match self.limit(category) {
            Some(limit) => current_spending > limit,
            None => false,
        }
    }

    pub fn has_income_goal(&self) -> bool {
        self.monthly_income_goal.is_some()
    }

    pub fn set_income_goal(&mut self, amount: f64) -> Result<(), DomainError> {
        validate_amount(amount)?;
        self.monthly_income_goal = Some(amount);
        Ok(())
    }

    pub fn clear_income_goal(&mut self) {
        self.monthly_income_goal = None;
    }

    /// Progress toward the income goal, clamped to `0.0..=1.0`.
    /// `None` when no goal is configured.
    pub fn income_goal_progress(&self, current_income: f64) -> Option<f64> {
        let goal = self.monthly_income_goal?;
        Some((current_income / goal).clamp(0.0, 1.0))
    }
}
