//! Message composer.
//!
//! Input buffer and cursor for the thread view. Owned by the App so send
//! and revert can manipulate it: the buffer is cleared when a send is
//! issued and the sent text may be restored after a failure.

/// Text input buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    /// Buffer contents.
    buffer: String,
    /// Byte offset of the cursor, always on a char boundary.
    cursor: usize,
}

impl Composer {
    /// Create an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters (for terminal cursor placement).
    pub fn cursor_chars(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// True when the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Move the cursor one character left.
    pub fn left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    /// Move the cursor one character right.
    pub fn right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Take the buffer contents, leaving the composer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Replace the contents, cursor at the end.
    pub fn set(&mut self, text: String) {
        self.cursor = text.len();
        self.buffer = text;
    }

    /// Discard contents and reset the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}
