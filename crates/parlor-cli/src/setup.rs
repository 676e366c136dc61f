use anyhow::Result;
use parlor_core::config::DEFAULT_MODEL;
use parlor_core::providers::gemini::DEFAULT_BASE_URL;
use parlor_core::Credentials;
use std::io::{self, BufRead, Write};

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn run_setup() -> Result<Credentials> {
    println!("\nWelcome to parlor");
    println!("Let's connect a model.\n");
    println!("Choose a provider:");
    println!("  [1] Gemini          (generativelanguage.googleapis.com)");
    println!("  [2] OpenAI-compatible endpoint");
    println!("  [3] Ollama          (localhost, no key needed)");

    let choice = read_line("\n> ")?;

    let (provider, base_url, default_model) = match choice.as_str() {
        "2" => {
            let url = read_line("Enter base URL [https://api.openai.com/v1]: ")?;
            let url = if url.is_empty() {
                "https://api.openai.com/v1".to_string()
            } else {
                url
            };
            ("openai", url, "gpt-4o-mini".to_string())
        }
        "3" => (
            "ollama",
            "http://localhost:11434/v1".to_string(),
            "llama3.2".to_string(),
        ),
        "1" | "" => ("gemini", DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string()),
        _ => {
            println!("Invalid choice, defaulting to Gemini.");
            ("gemini", DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
        }
    };

    let api_key = if provider == "ollama" {
        String::new()
    } else {
        print!("Enter API key: ");
        io::stdout().flush()?;
        let key = rpassword::read_password()?;
        key.trim().to_string()
    };

    let m = read_line(&format!("Model [{}]: ", default_model))?;
    let model = if m.is_empty() { default_model } else { m };

    let creds = Credentials {
        provider: provider.to_string(),
        api_key,
        base_url,
        model,
    };
    creds.save()?;
    println!("Saved to {}\n", Credentials::path().display());

    Ok(creds)
}
