use std::fmt::{Display, Formatter};

use crate::model::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Note(i64),
    TaggedNotes(i64),
}

impl Route {
    pub fn for_candidate(candidate: &Candidate) -> Self {
        match candidate {
            Candidate::Note(note) => Self::Note(note.note_id),
            Candidate::Tag(tag) => Self::TaggedNotes(tag.tag_id),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Note(id) => format!("/notes/{id}"),
            Self::TaggedNotes(id) => format!("/?tagId={id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Whatever shows the overlay: receives the route of a committed candidate
/// and the signal that the search interaction is over.
pub trait OverlayHost {
    fn navigate(&mut self, route: &Route);
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Navigate(Route),
    Close,
}

/// Host that records what it was asked to do, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn routes(&self) -> Vec<Route> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Navigate(route) => Some(*route),
                HostEvent::Close => None,
            })
            .collect()
    }

    pub fn was_closed(&self) -> bool {
        self.events.contains(&HostEvent::Close)
    }
}

impl OverlayHost for RecordingHost {
    fn navigate(&mut self, route: &Route) {
        self.events.push(HostEvent::Navigate(*route));
    }

    fn close(&mut self) {
        self.events.push(HostEvent::Close);
    }
}
