use super::{contains_keyword, EntityList, ListKind};
use crate::model::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};

/// Categories keyed by unique, case-sensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryList {
    categories: Vec<Category>,
}

impl EntityList for CategoryList {
    type Item = Category;

    const KIND: ListKind = ListKind::Category;

    fn items(&self) -> &[Category] {
        &self.categories
    }

    fn items_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }
}

impl CategoryList {
    pub fn exists(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.name == name)
    }

    pub fn find_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.id == id)
    }

    /// Returns the id of `name`, creating an empty category when absent.
    pub fn get_or_create(&mut self, name: &str) -> (CategoryId, bool) {
        if let Some(category) = self.find_by_name(name) {
            return (category.id, false);
        }
        let category = Category::new(name);
        let id = category.id;
        self.categories.push(category);
        (id, true)
    }

    pub fn filter_by_keyword(&self, keyword: &str) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|category| contains_keyword(&category.name, keyword))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryList;
    use crate::list::EntityList;

    #[test]
    fn get_or_create_is_idempotent_by_name() {
        let mut categories = CategoryList::default();
        let (first, created) = categories.get_or_create("fantasy");
        assert!(created);
        let (second, created_again) = categories.get_or_create("fantasy");
        assert!(!created_again);
        assert_eq!(first, second);
        assert_eq!(categories.len(), 1);
    }
}
