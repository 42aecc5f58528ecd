//! Span selection over a single document's text.
//!
//! The engine tracks two cursor positions, `anchor` and `point`, measured in
//! Unicode scalar values so a move never lands inside a multi-byte character.
//! Outside extend mode the two are always equal. In extend mode `point` moves
//! and `anchor` stays put; `point` can grow forward freely but can only shrink
//! back as far as `anchor`.
//!
//! Confirmed spans are appended to the document's excerpt. Confirming is
//! additive: confirming the same span twice appends it twice.

/// A discrete text-selection command issued by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommand {
    MoveForward,
    MoveBackward,
    EnterExtendMode,
    ExitExtendMode,
    ConfirmSpan,
}

/// The text split around the active range, for rendering.
///
/// `highlighted` is `None` when the cursor is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSpans<'a> {
    pub before: &'a str,
    pub highlighted: Option<&'a str>,
    pub after: &'a str,
}

#[derive(Debug, Clone)]
pub struct SelectionEngine {
    text: String,
    /// Byte offset of every char boundary, including the end of the text.
    boundaries: Vec<usize>,
    anchor: usize,
    point: usize,
    extending: bool,
    excerpt: String,
}

impl SelectionEngine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            anchor: 0,
            point: 0,
            extending: false,
            excerpt: String::new(),
        }
    }

    pub fn apply(&mut self, command: SelectionCommand) {
        match command {
            SelectionCommand::MoveForward => self.move_forward(),
            SelectionCommand::MoveBackward => self.move_backward(),
            SelectionCommand::EnterExtendMode => self.enter_extend_mode(),
            SelectionCommand::ExitExtendMode => self.exit_extend_mode(),
            SelectionCommand::ConfirmSpan => self.confirm_span(),
        }
        self.check_invariants();
    }

    pub fn move_forward(&mut self) {
        if self.point < self.len() {
            self.point += 1;
        }
        if !self.extending {
            self.anchor = self.point;
        }
    }

    pub fn move_backward(&mut self) {
        if self.extending {
            if self.point > self.anchor {
                self.point -= 1;
            }
        } else {
            self.point = self.point.saturating_sub(1);
            self.anchor = self.point;
        }
    }

    pub fn enter_extend_mode(&mut self) {
        self.extending = true;
    }

    /// Leave extend mode, discarding the unconfirmed range.
    pub fn exit_extend_mode(&mut self) {
        self.extending = false;
        self.point = self.anchor;
    }

    pub fn confirm_span(&mut self) {
        let selected = self.selected_text().to_owned();
        self.excerpt.push_str(&selected);
    }

    /// Number of characters in the text.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn point(&self) -> usize {
        self.point
    }

    pub fn is_extending(&self) -> bool {
        self.extending
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    /// The active range as `(start, end)` character indices, `start <= end`.
    pub fn span(&self) -> (usize, usize) {
        (self.anchor.min(self.point), self.anchor.max(self.point))
    }

    pub fn selected_text(&self) -> &str {
        let (start, end) = self.span();
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }

    pub fn visible_spans(&self) -> VisibleSpans<'_> {
        let (start, end) = self.span();
        let (start, end) = (self.boundaries[start], self.boundaries[end]);
        VisibleSpans {
            before: &self.text[..start],
            highlighted: (start != end).then(|| &self.text[start..end]),
            after: &self.text[end..],
        }
    }

    fn check_invariants(&self) {
        debug_assert!(self.anchor <= self.len(), "anchor out of bounds");
        debug_assert!(self.point <= self.len(), "point out of bounds");
        debug_assert!(
            self.extending || self.anchor == self.point,
            "collapsed cursor expected outside extend mode"
        );
        debug_assert!(self.point >= self.anchor, "point moved behind anchor");
    }
}
