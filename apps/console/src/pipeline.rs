//! Filter, sort and aggregate the loaded activities.
//!
//! Everything here is a pure function of the collection and the current
//! [`FilterCriteria`]; components call [`derive`] from a memo and never keep
//! derived data in application state.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Activity;

pub const ALL_CATEGORIES: &str = "All";
pub const ALL_DATES: &str = "all";
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Unknown values fall back to newest-first.
    pub fn from_selection(value: &str) -> Self {
        match value.trim() {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn as_selection(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    fn matches(&self, activity: &Activity) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => activity.category == *category,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    All,
    On(String),
}

impl DateFilter {
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_DATES || value.is_empty() {
            Self::All
        } else {
            Self::On(value.to_string())
        }
    }

    pub fn as_selection(&self) -> &str {
        match self {
            Self::All => ALL_DATES,
            Self::On(date) => date,
        }
    }

    fn matches(&self, activity: &Activity) -> bool {
        match self {
            Self::All => true,
            Self::On(date) => activity.date == *date,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub date: DateFilter,
    pub sort: SortOrder,
}

impl FilterCriteria {
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty()
            && self.category == CategoryFilter::All
            && self.date == DateFilter::All
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.matches_search(activity) && self.category.matches(activity) && self.date.matches(activity)
    }

    fn matches_search(&self, activity: &Activity) -> bool {
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }

        let needle = needle.to_lowercase();
        activity.name.to_lowercase().contains(&needle)
            || activity
                .description
                .as_ref()
                .map(|description| description.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: String,
    pub count: usize,
    pub minutes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateStat {
    pub date: String,
    pub count: usize,
    pub minutes: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_count: usize,
    pub total_minutes: u64,
    /// Descending by minutes, ties by category name.
    pub by_category: Vec<CategoryStat>,
    /// Descending by date.
    pub by_date: Vec<DateStat>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Derived {
    pub visible: Vec<Activity>,
    pub stats: Statistics,
}

pub fn derive(items: &[Activity], criteria: &FilterCriteria) -> Derived {
    let mut visible: Vec<Activity> = items
        .iter()
        .filter(|activity| criteria.matches(activity))
        .cloned()
        .collect();

    // `sort_by` is stable: equal dates keep collection order in both directions.
    match criteria.sort {
        SortOrder::Asc => visible.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Desc => visible.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    let stats = summarize(&visible);
    Derived { visible, stats }
}

pub fn summarize(visible: &[Activity]) -> Statistics {
    let mut categories: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    let mut dates: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    let mut total_minutes = 0;

    for activity in visible {
        let minutes = activity.minutes();
        total_minutes += minutes;

        let category = match activity.category.trim() {
            "" => UNCATEGORIZED,
            _ => activity.category.as_str(),
        };
        let entry = categories.entry(category).or_default();
        entry.0 += 1;
        entry.1 += minutes;

        let entry = dates.entry(activity.date.as_str()).or_default();
        entry.0 += 1;
        entry.1 += minutes;
    }

    let mut by_category: Vec<CategoryStat> = categories
        .into_iter()
        .map(|(category, (count, minutes))| CategoryStat {
            category: category.to_string(),
            count,
            minutes,
        })
        .collect();
    by_category.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    let by_date = dates
        .into_iter()
        .rev()
        .map(|(date, (count, minutes))| DateStat {
            date: date.to_string(),
            count,
            minutes,
        })
        .collect();

    Statistics {
        total_count: visible.len(),
        total_minutes,
        by_category,
        by_date,
    }
}

/// Distinct categories of the whole collection, alphabetical. The `"All"`
/// sentinel is not included.
pub fn category_options(items: &[Activity]) -> Vec<String> {
    items
        .iter()
        .map(|activity| activity.category.as_str())
        .filter(|category| !category.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct dates of the whole collection, newest first.
pub fn date_options(items: &[Activity]) -> Vec<String> {
    items
        .iter()
        .map(|activity| activity.date.as_str())
        .filter(|date| !date.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(str::to_string)
        .collect()
}
