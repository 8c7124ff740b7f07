use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateId {
    Note(i64),
    Tag(i64),
}

// Notes and tags are only ever decoded through `Candidate`, so the identity
// checks below apply to search responses and stored history alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRef {
    pub note_id: i64,
    pub title: String,
    pub highlighted_title: Option<String>,
    pub content: Option<String>,
    pub highlighted_content: Option<String>,
    pub is_archived: bool,
    pub is_deleted: bool,
}

impl NoteRef {
    pub fn new(note_id: i64, title: &str) -> Self {
        Self {
            note_id,
            title: title.to_string(),
            highlighted_title: None,
            content: None,
            highlighted_content: None,
            is_archived: false,
            is_deleted: false,
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_highlights(mut self, title: Option<&str>, content: Option<&str>) -> Self {
        self.highlighted_title = title.map(str::to_string);
        self.highlighted_content = content.map(str::to_string);
        self
    }

    pub fn with_status(mut self, is_archived: bool, is_deleted: bool) -> Self {
        self.is_archived = is_archived;
        self.is_deleted = is_deleted;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub tag_id: i64,
    pub name: String,
    pub highlighted_name: Option<String>,
}

impl TagRef {
    pub fn new(tag_id: i64, name: &str) -> Self {
        Self {
            tag_id,
            name: name.to_string(),
            highlighted_name: None,
        }
    }

    pub fn with_highlighted_name(mut self, highlighted: &str) -> Self {
        self.highlighted_name = Some(highlighted.to_string());
        self
    }
}

/// A single search or history item.
///
/// The category is fixed when the item is decoded: a payload carrying both
/// `noteId` and `tagId`, or neither, is rejected instead of being guessed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCandidate", into = "RawCandidate")]
pub enum Candidate {
    Note(NoteRef),
    Tag(TagRef),
}

impl Candidate {
    pub fn id(&self) -> CandidateId {
        match self {
            Self::Note(note) => CandidateId::Note(note.note_id),
            Self::Tag(tag) => CandidateId::Tag(tag.tag_id),
        }
    }

    pub fn same_identity(&self, other: &Candidate) -> bool {
        self.id() == other.id()
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    /// Plain title for notes, name for tags.
    pub fn title(&self) -> &str {
        match self {
            Self::Note(note) => &note.title,
            Self::Tag(tag) => &tag.name,
        }
    }

    /// Highlighted title when the search service marked one up, else the plain title.
    pub fn display_title(&self) -> &str {
        let highlighted = match self {
            Self::Note(note) => note.highlighted_title.as_deref(),
            Self::Tag(tag) => tag.highlighted_name.as_deref(),
        };
        highlighted
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.title())
    }
}

impl From<NoteRef> for Candidate {
    fn from(value: NoteRef) -> Self {
        Self::Note(value)
    }
}

impl From<TagRef> for Candidate {
    fn from(value: TagRef) -> Self {
        Self::Tag(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateShapeError {
    MissingIdentity,
    AmbiguousIdentity { note_id: i64, tag_id: i64 },
}

impl std::fmt::Display for CandidateShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIdentity => write!(f, "candidate has neither noteId nor tagId"),
            Self::AmbiguousIdentity { note_id, tag_id } => write!(
                f,
                "candidate has both noteId ({note_id}) and tagId ({tag_id})"
            ),
        }
    }
}

impl std::error::Error for CandidateShapeError {}

// Flat wire shape shared by search responses and persisted history entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highlighted_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highlighted_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highlighted_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_deleted: Option<bool>,
}

impl TryFrom<RawCandidate> for Candidate {
    type Error = CandidateShapeError;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        match (raw.note_id, raw.tag_id) {
            (Some(note_id), None) => Ok(Self::Note(NoteRef {
                note_id,
                title: raw.title.or(raw.name).unwrap_or_default(),
                highlighted_title: raw.highlighted_title,
                content: raw.content,
                highlighted_content: raw.highlighted_content,
                is_archived: raw.is_archived.unwrap_or(false),
                is_deleted: raw.is_deleted.unwrap_or(false),
            })),
            (None, Some(tag_id)) => Ok(Self::Tag(TagRef {
                tag_id,
                name: raw.name.or(raw.title).unwrap_or_default(),
                highlighted_name: raw.highlighted_name.or(raw.highlighted_title),
            })),
            (Some(note_id), Some(tag_id)) => {
                Err(CandidateShapeError::AmbiguousIdentity { note_id, tag_id })
            }
            (None, None) => Err(CandidateShapeError::MissingIdentity),
        }
    }
}

impl From<Candidate> for RawCandidate {
    fn from(value: Candidate) -> Self {
        match value {
            Candidate::Note(note) => Self {
                note_id: Some(note.note_id),
                title: Some(note.title),
                highlighted_title: note.highlighted_title,
                content: note.content,
                highlighted_content: note.highlighted_content,
                is_archived: Some(note.is_archived),
                is_deleted: Some(note.is_deleted),
                ..Self::default()
            },
            Candidate::Tag(tag) => Self {
                tag_id: Some(tag.tag_id),
                name: Some(tag.name),
                highlighted_name: tag.highlighted_name,
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Candidate, CandidateId, CandidateShapeError, NoteRef, TagRef};

    #[test]
    fn decodes_category_from_identity_field() {
        let note: Candidate =
            serde_json::from_str(r#"{"noteId":7,"title":"Groceries","isArchived":true}"#).unwrap();
        let tag: Candidate = serde_json::from_str(r#"{"tagId":7,"name":"home"}"#).unwrap();

        assert_eq!(note.id(), CandidateId::Note(7));
        assert_eq!(tag.id(), CandidateId::Tag(7));
        assert!(!note.same_identity(&tag));
        match note {
            Candidate::Note(note) => assert!(note.is_archived),
            other => panic!("expected note, got {other:?}"),
        }
    }

    #[test]
    fn rejects_ambiguous_or_missing_identity() {
        let both = serde_json::from_str::<Candidate>(r#"{"noteId":1,"tagId":2}"#);
        let neither = serde_json::from_str::<Candidate>(r#"{"title":"orphan"}"#);

        let both_error = both.unwrap_err().to_string();
        assert!(both_error.contains("both noteId"), "{both_error}");
        assert!(neither.is_err());
        assert_eq!(
            CandidateShapeError::MissingIdentity.to_string(),
            "candidate has neither noteId nor tagId"
        );
    }

    #[test]
    fn serializes_to_camel_case_wire_shape() {
        let note = Candidate::from(NoteRef::new(3, "Plans").with_content("draft"));
        let encoded = serde_json::to_string(&note).unwrap();

        assert!(encoded.contains("\"noteId\":3"));
        assert!(encoded.contains("\"content\":\"draft\""));
        assert!(!encoded.contains("tagId"));

        let tag = Candidate::from(TagRef::new(4, "work"));
        let encoded = serde_json::to_string(&tag).unwrap();
        assert_eq!(encoded, r#"{"tagId":4,"name":"work"}"#);
    }

    #[test]
    fn display_title_prefers_highlight() {
        let plain = Candidate::from(NoteRef::new(1, "Cat facts"));
        let marked = Candidate::from(
            NoteRef::new(1, "Cat facts").with_highlights(Some("<mark>Cat</mark> facts"), None),
        );

        assert_eq!(plain.display_title(), "Cat facts");
        assert_eq!(marked.display_title(), "<mark>Cat</mark> facts");
    }
}
