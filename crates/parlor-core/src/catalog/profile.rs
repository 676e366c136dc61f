use crate::providers::GenerationParams;
use regex::Regex;

/// Post-processing applied to raw model text before it is shown.
///
/// Models playing a character like to open with `"Einstein: ..."`; the
/// formatter removes one such leading echo and trims whitespace.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    prefix: Regex,
}

impl ResponseFormatter {
    /// Strip whichever of `prefixes` the reply starts with. Earlier entries
    /// win when several could match.
    pub fn strip_prefixes<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, regex::Error> {
        let alternation = prefixes
            .iter()
            .map(|p| regex::escape(p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            prefix: Regex::new(&format!("^(?:{alternation})"))?,
        })
    }

    pub fn apply(&self, raw: &str) -> String {
        self.prefix.replace(raw, "").trim().to_string()
    }
}

/// Model-facing settings for one personality.
#[derive(Debug, Clone)]
pub struct PersonalityConfig {
    pub system_prompt: String,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub formatter: Option<ResponseFormatter>,
}

impl PersonalityConfig {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            temperature: None,
            top_k: None,
            top_p: None,
            formatter: None,
        }
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn formatter(mut self, formatter: Option<ResponseFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn generation_params(&self, max_output_tokens: u32) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens,
        }
    }

    pub fn format(&self, raw: &str) -> String {
        match &self.formatter {
            Some(f) => f.apply(raw),
            None => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn einstein() -> ResponseFormatter {
        ResponseFormatter::strip_prefixes(&["Einstein:", "Albert Einstein:"]).unwrap()
    }

    #[test]
    fn strips_leading_name_echo() {
        let f = einstein();
        assert_eq!(
            f.apply("Einstein: Relativity is fascinating, mein Freund."),
            "Relativity is fascinating, mein Freund."
        );
        assert_eq!(f.apply("Albert Einstein:  Hello "), "Hello");
    }

    #[test]
    fn leaves_inner_mentions_alone() {
        let f = einstein();
        assert_eq!(
            f.apply("As Einstein: said once"),
            "As Einstein: said once"
        );
    }

    #[test]
    fn prefixes_with_regex_metacharacters_are_literal() {
        let f = ResponseFormatter::strip_prefixes(&["Dr. Who?:"]).unwrap();
        assert_eq!(f.apply("Dr. Who?: Allons-y"), "Allons-y");
        assert_eq!(f.apply("DrX WhoX: Allons-y"), "DrX WhoX: Allons-y");
    }

    #[test]
    fn config_without_formatter_returns_raw_text() {
        let cfg = PersonalityConfig::new("prompt");
        assert_eq!(cfg.format("  Einstein: hi "), "  Einstein: hi ");
    }

    #[test]
    fn generation_params_carry_sampling_settings() {
        let mut cfg = PersonalityConfig::new("prompt").temperature(0.8);
        cfg.top_p = Some(0.9);
        let p = cfg.generation_params(200);
        assert_eq!(p.temperature, Some(0.8));
        assert_eq!(p.top_k, None);
        assert_eq!(p.top_p, Some(0.9));
        assert_eq!(p.max_output_tokens, 200);
    }
}
