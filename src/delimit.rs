/// Open and close markers around a placeholder.
#[derive(Debug, Clone, Copy)]
pub struct Delimiters {
    open: &'static str,
    close: &'static str,
}

/// The `{{` / `}}` pair used by every template asset.
pub const PLACEHOLDER: Delimiters = Delimiters {
    open: "{{",
    close: "}}",
};

impl Delimiters {
    #[must_use]
    pub fn open(&self) -> &'static str {
        self.open
    }

    #[must_use]
    pub fn sizes(&self) -> (usize, usize) {
        (self.open.len(), self.close.len())
    }

    /// Absolute byte offset of the first open marker at or after `from`.
    #[must_use]
    pub fn find_start(&self, contents: &str, from: usize) -> Option<usize> {
        find_in(contents, self.open, from)
    }

    /// Absolute byte offset of the first close marker at or after `from`.
    #[must_use]
    pub fn find_end(&self, contents: &str, from: usize) -> Option<usize> {
        find_in(contents, self.close, from)
    }
}

fn find_in(slice: &str, needle: &str, from: usize) -> Option<usize> {
    if slice.is_empty() || slice.len() < from {
        return None;
    };

    slice[from..].find(needle).map(|i| i + from)
}
