/// Capture buffer for one example invocation.
///
/// A pushed string containing newlines becomes several lines, so
/// `line("a\nb")` and `line("a"); line("b")` produce the same transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.contains('\n') {
            self.lines.extend(text.split('\n').map(str::to_string));
        } else {
            self.lines.push(text);
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Appends `text` to the last line instead of starting a new one.
    pub fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) => last.push_str(text),
            None => self.lines.push(text.to_string()),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
