use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::{Candidate, NoteRef, TagRef};

/// Handle for one issued search request. Responses are matched back to the
/// controller through `seq`; only the most recently issued ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// One search response, split by category.
///
/// Entries are decoded through `Candidate`, the same path stored history
/// takes, so an entry lacking an identity field or carrying both is refused,
/// as is a tag found in `notes` or a note found in `tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResultLists", into = "ResultLists")]
pub struct SearchResults {
    pub notes: Vec<NoteRef>,
    pub tags: Vec<TagRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsShapeError {
    TagInNotes { index: usize, tag_id: i64 },
    NoteInTags { index: usize, note_id: i64 },
}

impl Display for ResultsShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TagInNotes { index, tag_id } => {
                write!(f, "notes[{index}] is a tag (tagId {tag_id})")
            }
            Self::NoteInTags { index, note_id } => {
                write!(f, "tags[{index}] is a note (noteId {note_id})")
            }
        }
    }
}

impl std::error::Error for ResultsShapeError {}

impl SearchResults {
    pub fn new(notes: Vec<NoteRef>, tags: Vec<TagRef>) -> Self {
        Self { notes, tags }
    }

    /// Splits already-decoded candidates back into their lists, refusing any
    /// entry whose category does not match the list it came in.
    pub fn try_from_lists(
        notes: Vec<Candidate>,
        tags: Vec<Candidate>,
    ) -> Result<Self, ResultsShapeError> {
        let notes = notes
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| match candidate {
                Candidate::Note(note) => Ok(note),
                Candidate::Tag(tag) => Err(ResultsShapeError::TagInNotes {
                    index,
                    tag_id: tag.tag_id,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tags = tags
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| match candidate {
                Candidate::Tag(tag) => Ok(tag),
                Candidate::Note(note) => Err(ResultsShapeError::NoteInTags {
                    index,
                    note_id: note.note_id,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { notes, tags })
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len() + self.tags.len()
    }

    /// Notes first, then tags, each in service order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.notes
            .iter()
            .cloned()
            .map(Candidate::Note)
            .chain(self.tags.iter().cloned().map(Candidate::Tag))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ResultLists {
    #[serde(default)]
    notes: Vec<Candidate>,
    #[serde(default)]
    tags: Vec<Candidate>,
}

impl TryFrom<ResultLists> for SearchResults {
    type Error = ResultsShapeError;

    fn try_from(lists: ResultLists) -> Result<Self, Self::Error> {
        Self::try_from_lists(lists.notes, lists.tags)
    }
}

impl From<SearchResults> for ResultLists {
    fn from(value: SearchResults) -> Self {
        Self {
            notes: value.notes.into_iter().map(Candidate::Note).collect(),
            tags: value.tags.into_iter().map(Candidate::Tag).collect(),
        }
    }
}

pub fn decode_search_response(payload: &str) -> Result<SearchResults, serde_json::Error> {
    serde_json::from_str(payload)
}

pub fn decode_history(payload: &str) -> Result<Vec<Candidate>, serde_json::Error> {
    serde_json::from_str(payload)
}

pub fn encode_history(entries: &[Candidate]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}
