//! One-line input prompt
//!
//! Shown in the status line for Find, Open and Save As.

/// What the prompt's answer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Find,
    Open,
    SaveAs,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Find => "Find:",
            PromptKind::Open => "Open:",
            PromptKind::SaveAs => "Save as:",
        }
    }
}

/// An active prompt and its input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    /// Prompt pre-filled with an initial answer
    pub fn with_input(kind: PromptKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    /// Append pasted text, keeping only the first line
    pub fn push_str(&mut self, s: &str) {
        let line = s.lines().next().unwrap_or("");
        self.input.extend(line.chars().filter(|c| !c.is_control()));
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Label and input as shown in the status line
    pub fn display(&self) -> String {
        format!("{} {}", self.kind.label(), self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut prompt = Prompt::new(PromptKind::Find);
        prompt.push('a');
        prompt.push('\u{7}');
        prompt.push('é');
        assert_eq!(prompt.input(), "aé");
        prompt.pop();
        assert_eq!(prompt.display(), "Find: a");
    }

    #[test]
    fn test_paste_keeps_first_line() {
        let mut prompt = Prompt::with_input(PromptKind::Open, "/tmp/");
        prompt.push_str("notes.md\nsecond line");
        assert_eq!(prompt.input(), "/tmp/notes.md");
        assert_eq!(prompt.kind.label(), "Open:");
    }
}
