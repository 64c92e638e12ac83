//! Deterministic cyclic navigation for flashcard review.

/// Index of the following card. `len` must be at least 1; the empty
/// notebook shows a placeholder instead of entering review.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Index of the preceding card, wrapping from 0 to `len - 1`.
pub fn previous_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Review position plus the transient flip state of the visible card.
/// Flip state belongs to the index, so any navigation resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudySession {
    index: usize,
    flipped: bool,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = next_index(self.index, len);
        self.flipped = false;
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = previous_index(self.index, len);
        self.flipped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_back_to_start() {
        let len = 5;
        let mut index = 0;
        for _ in 0..len {
            index = next_index(index, len);
        }
        assert_eq!(index, 0);
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        assert_eq!(previous_index(0, 7), 6);
        assert_eq!(previous_index(3, 7), 2);
    }

    #[test]
    fn single_card_always_stays_at_zero() {
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(previous_index(0, 1), 0);
    }

    #[test]
    fn navigation_resets_flip() {
        let mut session = StudySession::new();
        session.flip();
        assert!(session.flipped());

        session.next(3);
        assert_eq!(session.index(), 1);
        assert!(!session.flipped());

        session.flip();
        session.previous(3);
        assert_eq!(session.index(), 0);
        assert!(!session.flipped());
    }
}
