/// Cosmetic text buffer driven by the typing animation
///
/// Holds characters and a single cursor offset measured in chars.
/// The text is never read back as input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl TypingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Number of lines, counting the (possibly empty) line after the last newline
    pub fn line_count(&self) -> usize {
        self.chars.iter().filter(|c| **c == '\n').count() + 1
    }

    /// Insert at the cursor and advance past the new char
    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Insert a whole string at the cursor
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert(ch);
        }
    }

    /// Delete the char before the cursor
    ///
    /// Refused at the start of the buffer and at the start of the current
    /// line, so a correction never eats into a finished line. Returns
    /// whether a char was removed.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 || self.chars[self.cursor - 1] == '\n' {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Scroll-to-bottom: put the cursor after the last char
    pub fn move_to_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Replace the whole content, leaving the cursor at the end
    pub fn replace(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.replace("");
    }
}
