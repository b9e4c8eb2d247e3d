use std::collections::BTreeSet;

use crate::errors::{ViewError, ViewResult};

/// Years offered for filtering, newest first, with the selected one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearChoices {
    years: Vec<i32>,
    selected: Option<i32>,
}

impl YearChoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Rebuilds the set from `years` plus `current_year` and selects the
    /// current year.
    pub fn set_choice(&mut self, years: impl IntoIterator<Item = i32>, current_year: i32) {
        let mut unique: BTreeSet<i32> = years.into_iter().collect();
        unique.insert(current_year);
        self.years = unique.into_iter().rev().collect();
        self.selected = Some(current_year);
    }

    /// Adds `year` if missing; the selection is left alone.
    pub fn insert(&mut self, year: i32) -> bool {
        match self.years.binary_search_by(|probe| year.cmp(probe)) {
            Ok(_) => false,
            Err(index) => {
                self.years.insert(index, year);
                true
            }
        }
    }

    pub fn select(&mut self, year: i32) -> ViewResult<()> {
        if !self.contains(year) {
            return Err(ViewError::UnknownYear(year));
        }
        self.selected = Some(year);
        Ok(())
    }
}
