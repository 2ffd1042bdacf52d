//! Single-line edit buffer for the URL prompt.

/// Edit state with a byte-offset cursor that always sits on a `char`
/// boundary, so multi-byte input survives arrow keys and backspace.
#[derive(Debug, Default)]
pub struct InputLine {
    buf: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn insert(&mut self, ch: char) {
        self.buf.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut prev = self.cursor.saturating_sub(1);
        while prev > 0 && !self.buf.is_char_boundary(prev) {
            prev -= 1;
        }
        self.buf.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        let start = self.cursor;
        let mut end = start + 1;
        while end < self.buf.len() && !self.buf.is_char_boundary(end) {
            end += 1;
        }
        self.buf.drain(start..end);
    }

    pub fn left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while self.cursor > 0 && !self.buf.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        self.cursor += 1;
        while self.cursor < self.buf.len() && !self.buf.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buf.len();
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Take the buffer for submission, leaving the prompt empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buf)
    }
}
