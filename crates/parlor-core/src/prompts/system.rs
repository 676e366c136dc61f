/// Assembles a character brief: an opening line, a bullet list of
/// behaviours, an optional word limit and any extra titled sections.
pub struct SystemPromptBuilder {
    intro: String,
    guidelines: Vec<String>,
    word_limit: Option<usize>,
    sections: Vec<String>,
}

impl SystemPromptBuilder {
    pub fn new(intro: impl Into<String>) -> Self {
        Self {
            intro: intro.into(),
            guidelines: Vec::new(),
            word_limit: None,
            sections: Vec::new(),
        }
    }
    pub fn guideline(mut self, line: impl Into<String>) -> Self {
        self.guidelines.push(line.into());
        self
    }
    pub fn guidelines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guidelines.extend(lines.into_iter().map(Into::into));
        self
    }
    pub fn word_limit(mut self, words: usize) -> Self {
        self.word_limit = Some(words);
        self
    }
    pub fn with_section(mut self, title: &str, content: &str) -> Self {
        self.sections.push(format!("## {}\n{}", title, content));
        self
    }
    pub fn build(self) -> String {
        let mut out = self.intro;
        for g in &self.guidelines {
            out.push_str("\n- ");
            out.push_str(g);
        }
        if let Some(n) = self.word_limit {
            out.push_str(&format!("\nKeep responses under {n} words."));
        }
        if !self.sections.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.sections.join("\n\n"));
        }
        out
    }
}
