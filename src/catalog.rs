//! Filtering and area indexing over the cached demand list.
//!
//! Both functions are pure and cheap; callers recompute them whenever the
//! filter, the search term, or the demand list changes.

use std::collections::HashSet;

use crate::models::demand::Demand;

/// Area selection in the demand list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AreaFilter {
    /// No area restriction.
    #[default]
    All,
    /// Only demands whose `needs` contain this exact label.
    Area(String),
}

impl AreaFilter {
    /// Parse the console's area selector; `"all"` and empty mean [`AreaFilter::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "all" => Self::All,
            label => Self::Area(label.to_owned()),
        }
    }

    fn admits(&self, demand: &Demand) -> bool {
        match self {
            Self::All => true,
            Self::Area(label) => demand.needs.iter().any(|need| need == label),
        }
    }
}

/// Whether `demand` matches an already trimmed and lower-cased search term.
fn matches_term(demand: &Demand, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(term);

    hit(&demand.subject)
        || demand.needs.iter().any(|need| hit(need))
        || demand
            .requester
            .as_ref()
            .is_some_and(|requester| hit(&requester.name))
        || demand.involved.iter().any(|person| hit(&person.name))
}

/// Narrow `demands` to those matching `area` and `term`, preserving order.
///
/// The term is trimmed and matched case-insensitively as a substring of the
/// subject, any need, the requester's name, or any assigned person's name.
#[must_use]
pub fn filter_demands<'a, I>(demands: I, area: &AreaFilter, term: &str) -> Vec<&'a Demand>
where
    I: IntoIterator<Item = &'a Demand>,
{
    let term = term.trim().to_lowercase();
    demands
        .into_iter()
        .filter(|demand| area.admits(demand) && matches_term(demand, &term))
        .collect()
}

/// Distinct area labels appearing in any demand's `needs`.
#[must_use]
pub fn build_area_index<'a, I>(demands: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a Demand>,
{
    demands
        .into_iter()
        .flat_map(|demand| demand.needs.iter().cloned())
        .collect()
}
