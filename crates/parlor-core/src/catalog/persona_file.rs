use super::personality::{Category, Personality, Status};
use super::profile::{PersonalityConfig, ResponseFormatter};
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// YAML frontmatter accepted at the top of a personality file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Frontmatter {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    avatar: Option<String>,
    category: Option<Category>,
    status: Option<Status>,
    era: Option<String>,
    expertise: Vec<String>,
    languages: Vec<String>,
    achievements: Vec<String>,
    greeting: Option<String>,
    temperature: Option<f32>,
    top_k: Option<u32>,
    top_p: Option<f32>,
    strip_prefixes: Vec<String>,
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves.
fn split_frontmatter(content: &str) -> Result<(Frontmatter, String)> {
    let Some(stripped) = content.strip_prefix("---") else {
        return Ok((Frontmatter::default(), content.to_string()));
    };
    let after_open = stripped.trim_start_matches(['\r', '\n']);
    let Some(end) = after_open.find("\n---") else {
        return Ok((Frontmatter::default(), content.to_string()));
    };
    let yaml_str = &after_open[..end];
    let body = after_open[end + 4..].trim_start_matches(['\r', '\n']).to_string();
    let fm = if yaml_str.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_str)?
    };
    Ok((fm, body))
}

/// Parse one `.md` personality file.
///
/// The markdown body becomes the system prompt. `id` defaults to the file
/// stem and `name` to the id. Without explicit `strip_prefixes` the
/// formatter removes a leading `"<name>:"`.
pub fn parse(path: &Path) -> Result<(Personality, PersonalityConfig)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid filename: {:?}", path))?
        .to_string();

    let content = std::fs::read_to_string(path)?;
    let (fm, body) = split_frontmatter(&content)?;
    let system_prompt = body.trim().to_string();
    if system_prompt.is_empty() {
        anyhow::bail!("personality file has an empty system prompt");
    }

    let id = fm.id.unwrap_or(stem);
    let name = fm.name.unwrap_or_else(|| id.clone());
    let prefixes = if fm.strip_prefixes.is_empty() {
        vec![format!("{name}:")]
    } else {
        fm.strip_prefixes
    };

    let personality = Personality {
        avatar: fm.avatar.unwrap_or_default(),
        category: fm.category,
        status: fm.status,
        expertise: fm.expertise,
        era: fm.era,
        languages: fm.languages,
        achievements: fm.achievements,
        last_message: fm.greeting,
        ..Personality::new(id, name, fm.description.unwrap_or_default())
    };
    let config = PersonalityConfig {
        system_prompt,
        temperature: fm.temperature,
        top_k: fm.top_k,
        top_p: fm.top_p,
        formatter: Some(ResponseFormatter::strip_prefixes(&prefixes)?),
    };
    Ok((personality, config))
}

/// Scan `dir` for `*.md` files and parse each one, skipping bad files with a
/// warning. Returns entries sorted by id; a missing directory yields nothing.
pub fn discover(dir: &Path) -> Vec<(Personality, PersonalityConfig)> {
    if !dir.exists() {
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read personalities directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        match parse(&path) {
            Ok(pair) => found.push(pair),
            Err(e) => warn!("Skipping personality at {:?}: {}", path, e),
        }
    }

    found.sort_by(|a, b| a.0.id.cmp(&b.0.id));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_frontmatter_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lovelace.md");
        fs::write(
            &path,
            "---\nid: ada\nname: Ada Lovelace\ndescription: First programmer\ncategory: science\ntemperature: 0.6\ntop_k: 32\nexpertise: [Mathematics, Analytical Engine]\n---\nYou are Ada Lovelace.\n",
        )
        .unwrap();

        let (p, cfg) = parse(&path).unwrap();
        assert_eq!(p.id, "ada");
        assert_eq!(p.name, "Ada Lovelace");
        assert_eq!(p.category, Some(Category::Science));
        assert_eq!(p.expertise.len(), 2);
        assert_eq!(cfg.system_prompt, "You are Ada Lovelace.");
        assert_eq!(cfg.temperature, Some(0.6));
        assert_eq!(cfg.top_k, Some(32));
        assert_eq!(cfg.format("Ada Lovelace: Numbers!"), "Numbers!");
    }

    #[test]
    fn plain_markdown_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("socrates.md");
        fs::write(&path, "You are Socrates. Answer with questions.").unwrap();

        let (p, cfg) = parse(&path).unwrap();
        assert_eq!(p.id, "socrates");
        assert_eq!(p.name, "socrates");
        assert!(p.category.is_none());
        assert_eq!(cfg.system_prompt, "You are Socrates. Answer with questions.");
        assert_eq!(cfg.format("socrates: Why?"), "Why?");
    }

    #[test]
    fn explicit_strip_prefixes_replace_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lincoln.md");
        fs::write(
            &path,
            "---\nname: Abraham Lincoln\nstrip_prefixes: [\"Lincoln:\", \"Abe:\"]\n---\nYou are Lincoln.",
        )
        .unwrap();
        let (_, cfg) = parse(&path).unwrap();
        assert_eq!(cfg.format("Abe: Four score"), "Four score");
        assert_eq!(cfg.format("Abraham Lincoln: hi"), "Abraham Lincoln: hi");
    }

    #[test]
    fn empty_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.md");
        fs::write(&path, "---\nname: Blank\n---\n   \n").unwrap();
        assert!(parse(&path).is_err());
    }

    #[test]
    fn discover_skips_bad_files_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "You are B.").unwrap();
        fs::write(dir.path().join("a.md"), "You are A.").unwrap();
        fs::write(dir.path().join("broken.md"), "---\ncategory: [not, a, category]\n---\nbody").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let found = discover(dir.path());
        let ids: Vec<_> = found.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn discover_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope")).is_empty());
    }
}
