use std::ops::Range;

use crate::contract::SearchResults;
use crate::model::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Recent,
    Notes,
    Tags,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Notes => "Notes",
            Self::Tags => "Tags",
        }
    }
}

/// The navigable candidate list plus the section boundaries it is presented in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    items: Vec<Candidate>,
    sections: Vec<(SectionKind, Range<usize>)>,
}

impl Aggregate {
    /// History verbatim for an empty (trimmed) query, else notes followed by tags.
    pub fn build(query: &str, results: &SearchResults, history: &[Candidate]) -> Self {
        if query.trim().is_empty() {
            Self::from_history(history)
        } else {
            Self::from_results(results)
        }
    }

    pub fn from_history(history: &[Candidate]) -> Self {
        let mut aggregate = Self::default();
        aggregate.push_section(SectionKind::Recent, history.iter().cloned());
        aggregate
    }

    pub fn from_results(results: &SearchResults) -> Self {
        let mut aggregate = Self::default();
        aggregate.push_section(
            SectionKind::Notes,
            results.notes.iter().cloned().map(Candidate::Note),
        );
        aggregate.push_section(
            SectionKind::Tags,
            results.tags.iter().cloned().map(Candidate::Tag),
        );
        aggregate
    }

    pub fn active_list(&self) -> &[Candidate] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Non-empty sections in presentation order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &[Candidate])> + '_ {
        self.sections
            .iter()
            .map(|(kind, range)| (*kind, &self.items[range.clone()]))
    }

    fn push_section(&mut self, kind: SectionKind, items: impl Iterator<Item = Candidate>) {
        let start = self.items.len();
        self.items.extend(items);
        let end = self.items.len();
        if end > start {
            self.sections.push((kind, start..end));
        }
    }
}
