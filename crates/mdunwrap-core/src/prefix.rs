//! Line-prefix bookkeeping for nested container blocks

/// Stack of per-container line prefixes.
///
/// One entry is pushed for every open container block (a list item's
/// continuation indent, a blockquote's `"> "` marker) and popped when the
/// block closes, so the stack depth always matches the number of open
/// containers on the path from the document root.
#[derive(Debug, Default)]
pub struct PrefixStack {
    entries: Vec<String>,
}

impl PrefixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prefix: impl Into<String>) {
        self.entries.push(prefix.into());
    }

    pub fn pop(&mut self) {
        self.entries.pop();
    }

    /// The full prefix for a content line: all entries concatenated in
    /// stack order.
    pub fn current(&self) -> String {
        self.entries.concat()
    }

    /// The prefix for a separator (blank) line.
    ///
    /// Scanning from the innermost entry outward, the first entry whose
    /// right-trimmed form is non-empty is kept right-trimmed; entries
    /// outward of it are kept verbatim and entries inward of it are
    /// dropped. A blank line under `"> "` thus renders as `>` with no
    /// trailing space, while indentation-only entries contribute nothing.
    pub fn for_blank_line(&self) -> String {
        for (i, entry) in self.entries.iter().enumerate().rev() {
            let trimmed = entry.trim_end();
            if !trimmed.is_empty() {
                let mut line = self.entries[..i].concat();
                line.push_str(trimmed);
                return line;
            }
        }
        String::new()
    }
}
