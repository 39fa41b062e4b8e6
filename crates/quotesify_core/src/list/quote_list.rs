use super::{contains_keyword, EntityList, ListKind};
use crate::model::category::CategoryId;
use crate::model::quote::{Quote, QuoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteList {
    quotes: Vec<Quote>,
}

impl EntityList for QuoteList {
    type Item = Quote;

    const KIND: ListKind = ListKind::Quote;

    fn items(&self) -> &[Quote] {
        &self.quotes
    }

    fn items_mut(&mut self) -> &mut Vec<Quote> {
        &mut self.quotes
    }
}

impl QuoteList {
    pub fn find_by_id(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: QuoteId) -> Option<&mut Quote> {
        self.quotes.iter_mut().find(|quote| quote.id == id)
    }

    /// Quotes paired with their 1-based position.
    pub fn filter_by_keyword(&self, keyword: &str) -> Vec<(usize, Quote)> {
        self.numbered(|quote| {
            contains_keyword(&quote.text, keyword)
                || quote
                    .author
                    .as_ref()
                    .is_some_and(|author| contains_keyword(&author.name, keyword))
                || quote
                    .reference
                    .as_deref()
                    .is_some_and(|reference| contains_keyword(reference, keyword))
        })
    }

    pub fn filter_by_category(&self, category: CategoryId) -> Vec<(usize, Quote)> {
        self.numbered(|quote| quote.category == Some(category))
    }

    pub fn numbered_all(&self) -> Vec<(usize, Quote)> {
        self.numbered(|_| true)
    }

    fn numbered(&self, keep: impl Fn(&Quote) -> bool) -> Vec<(usize, Quote)> {
        self.quotes
            .iter()
            .enumerate()
            .filter(|(_, quote)| keep(quote))
            .map(|(index, quote)| (index + 1, quote.clone()))
            .collect()
    }
}
