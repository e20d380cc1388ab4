//! Editing state for a single-line text value.
//!
//! Used directly by text fields and embedded as the search input of the
//! multiselect combobox. All cursor arithmetic is char-boundary safe.

#[derive(Debug, Default)]
pub struct TextInputState {
    pub text: String,
    pub cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Replace the whole value, cursor at the end. The text is stored
    /// verbatim; no trimming.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_multibyte() {
        let mut input = TextInputState::new();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text, "héllo");
        input.delete_back();
        assert_eq!(input.text, "héll");
        input.move_home();
        input.move_right();
        input.delete_forward();
        assert_eq!(input.text, "hll");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_delete_word_back() {
        let mut input = TextInputState::new();
        input.set_text("one two  ");
        input.delete_word_back();
        assert_eq!(input.text, "one ");
        input.delete_word_back();
        assert_eq!(input.text, "");
    }

    #[test]
    fn test_set_text_places_cursor_at_end() {
        let mut input = TextInputState::new();
        input.set_text("abc");
        assert_eq!(input.cursor, 3);
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
    }
}
