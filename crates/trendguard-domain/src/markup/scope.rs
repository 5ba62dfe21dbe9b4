//! Per-concern scope trackers fed from the token stream.

/// Open-count for one kind of element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestingScope {
    depth: u32,
}

impl NestingScope {
    pub fn open(&mut self) {
        self.depth += 1;
    }

    /// Returns true when this close balanced an open element.
    pub fn close(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        true
    }

    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// Accumulates text from an opening element up to its matching close.
///
/// Same-name elements opened inside the capture are counted so that only the
/// balancing close ends it. Call [`TextCapture::on_start`] for every start tag
/// before a possible [`TextCapture::begin`].
#[derive(Clone, Debug, Default)]
pub struct TextCapture {
    element: Option<String>,
    depth: u32,
    buf: String,
}

impl TextCapture {
    /// Start capturing at `element`. Ignored while a capture is already active.
    pub fn begin(&mut self, element: &str) {
        if self.element.is_some() {
            return;
        }
        self.element = Some(element.to_string());
        self.depth = 1;
        self.buf.clear();
    }

    /// Start capturing at `element`, dropping any capture still open.
    pub fn restart(&mut self, element: &str) {
        self.element = Some(element.to_string());
        self.depth = 1;
        self.buf.clear();
    }

    pub fn is_active(&self) -> bool {
        self.element.is_some()
    }

    pub fn on_start(&mut self, name: &str) {
        if self.element.as_deref() == Some(name) {
            self.depth += 1;
        }
    }

    pub fn on_text(&mut self, text: &str) {
        if self.element.is_some() {
            self.buf.push_str(text);
        }
    }

    /// Returns the captured text when `name` closes the capture.
    pub fn on_end(&mut self, name: &str) -> Option<String> {
        if self.element.as_deref() != Some(name) {
            return None;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return None;
        }
        self.element = None;
        Some(std::mem::take(&mut self.buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_scope_saturates() {
        let mut s = NestingScope::default();
        assert!(!s.close());
        s.open();
        s.open();
        assert_eq!(s.depth(), 2);
        assert!(s.close());
        assert!(s.is_open());
        assert!(s.close());
        assert!(!s.is_open());
        assert!(!s.close());
    }

    #[test]
    fn capture_ends_at_balancing_close() {
        let mut c = TextCapture::default();
        c.on_start("span");
        c.begin("span");
        c.on_text("a");
        c.on_start("span");
        c.on_text("b");
        assert_eq!(c.on_end("span"), None);
        c.on_text("c");
        assert_eq!(c.on_end("span").as_deref(), Some("abc"));
        assert!(!c.is_active());
        c.on_text("ignored");
        assert_eq!(c.on_end("span"), None);
    }

    #[test]
    fn capture_ignores_other_elements_and_restarts_clean() {
        let mut c = TextCapture::default();
        c.begin("h2");
        c.on_start("em");
        c.on_text("x");
        assert_eq!(c.on_end("em"), None);
        assert_eq!(c.on_end("h2").as_deref(), Some("x"));

        c.begin("h2");
        c.begin("h2");
        c.on_text("y");
        assert_eq!(c.on_end("h2").as_deref(), Some("y"));
    }

    #[test]
    fn restart_discards_unclosed_capture() {
        let mut c = TextCapture::default();
        c.on_start("h2");
        c.begin("h2");
        c.on_text("stale");
        c.on_start("h2");
        c.restart("h2");
        c.on_text("fresh");
        assert_eq!(c.on_end("h2").as_deref(), Some("fresh"));
        assert!(!c.is_active());
    }
}
