use crate::aggregator::{Aggregate, SectionKind};
use crate::model::Candidate;
use crate::selection::SelectionCursor;
use crate::snippet::{highlighted_snippet_with, SnippetOptions};

const TAG_SUBTITLE: &str = "Tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIcon {
    Note,
    Archived,
    Trashed,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub candidate: Candidate,
    pub icon: RowIcon,
    /// May contain `<mark>` highlight tags.
    pub title: String,
    /// May contain `<mark>` highlight tags.
    pub subtitle: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub kind: SectionKind,
    pub title: &'static str,
    pub rows: Vec<ResultRow>,
}

pub fn present(
    aggregate: &Aggregate,
    cursor: &SelectionCursor,
    options: SnippetOptions,
) -> Vec<SectionView> {
    aggregate
        .sections()
        .map(|(kind, items)| SectionView {
            kind,
            title: kind.title(),
            rows: items
                .iter()
                .map(|candidate| result_row(candidate, cursor.is_selected(candidate), options))
                .collect(),
        })
        .collect()
}

pub fn result_row(candidate: &Candidate, selected: bool, options: SnippetOptions) -> ResultRow {
    ResultRow {
        candidate: candidate.clone(),
        icon: row_icon(candidate),
        title: candidate.display_title().to_string(),
        subtitle: row_subtitle(candidate, options),
        selected,
    }
}

fn row_icon(candidate: &Candidate) -> RowIcon {
    match candidate {
        Candidate::Tag(_) => RowIcon::Tag,
        Candidate::Note(note) if note.is_archived => RowIcon::Archived,
        Candidate::Note(note) if note.is_deleted => RowIcon::Trashed,
        Candidate::Note(_) => RowIcon::Note,
    }
}

fn row_subtitle(candidate: &Candidate, options: SnippetOptions) -> String {
    match candidate {
        Candidate::Tag(_) => TAG_SUBTITLE.to_string(),
        Candidate::Note(note) => {
            if let Some(highlighted) = note.highlighted_content.as_deref().filter(|v| !v.is_empty())
            {
                return highlighted_snippet_with(highlighted, options).into_owned();
            }
            note.content.clone().unwrap_or_default()
        }
    }
}
