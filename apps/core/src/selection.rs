use crate::model::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The selected candidate, held by value.
///
/// Its position is recomputed by identity against whatever list is active,
/// so a list swapped out between keystrokes never leaves a stale index behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<Candidate>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, candidate: &Candidate) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.same_identity(candidate))
    }

    pub fn position(&self, active: &[Candidate]) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        active
            .iter()
            .position(|candidate| candidate.same_identity(selected))
    }

    pub fn reseed(&mut self, active: &[Candidate]) {
        self.selected = active.first().cloned();
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn advance(&mut self, active: &[Candidate]) {
        self.step(active, Direction::Next);
    }

    pub fn retreat(&mut self, active: &[Candidate]) {
        self.step(active, Direction::Previous);
    }

    pub fn step(&mut self, active: &[Candidate], direction: Direction) {
        if active.is_empty() {
            self.selected = None;
            return;
        }

        let index = next_index(self.position(active), active.len(), direction);
        self.selected = Some(active[index].clone());
    }
}

fn next_index(current: Option<usize>, len: usize, direction: Direction) -> usize {
    let last = len - 1;
    match (direction, current) {
        (Direction::Next, Some(index)) if index < last => index + 1,
        (Direction::Next, _) => 0,
        (Direction::Previous, Some(index)) if index > 0 => index - 1,
        (Direction::Previous, _) => last,
    }
}
