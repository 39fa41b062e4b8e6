use super::{EntityList, ListKind};
use crate::model::rating::Rating;
use serde::{Deserialize, Serialize};

/// Ratings keyed by the exact title of the rated book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingList {
    ratings: Vec<Rating>,
}

impl EntityList for RatingList {
    type Item = Rating;

    const KIND: ListKind = ListKind::Rating;

    fn items(&self) -> &[Rating] {
        &self.ratings
    }

    fn items_mut(&mut self) -> &mut Vec<Rating> {
        &mut self.ratings
    }
}

impl RatingList {
    pub fn is_rated(&self, title: &str) -> bool {
        self.find_by_title(title).is_some()
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Rating> {
        self.ratings.iter().find(|rating| rating.title == title)
    }

    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut Rating> {
        self.ratings.iter_mut().find(|rating| rating.title == title)
    }

    /// Removes the rating keyed on `title`, if any.
    pub fn remove_by_title(&mut self, title: &str) -> Option<Rating> {
        let index = self.ratings.iter().position(|rating| rating.title == title)?;
        Some(self.ratings.remove(index))
    }
}
