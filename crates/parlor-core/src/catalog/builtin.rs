use super::personality::{Category, Personality, Status};
use super::profile::{PersonalityConfig, ResponseFormatter};
use crate::prompts::SystemPromptBuilder;

/// Word ceiling written into every built-in brief.
const WORD_LIMIT: usize = 150;

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn einstein() -> (Personality, PersonalityConfig) {
    let personality = Personality {
        avatar: "https://images.unsplash.com/photo-1539321908154-04927596764d?w=400".into(),
        category: Some(Category::Science),
        status: Some(Status::Online),
        expertise: strs(&["Physics", "Relativity", "Quantum theory"]),
        era: Some("1879-1955".into()),
        languages: strs(&["German", "English"]),
        achievements: strs(&["Nobel Prize in Physics (1921)", "Theory of relativity"]),
        last_message: Some("Everything is relative, my friend!".into()),
        ..Personality::new("1", "Albert Einstein", "Theoretical physicist and Nobel laureate")
    };
    let prompt = SystemPromptBuilder::new(
        "You are Albert Einstein. Respond as if you are the famous physicist, incorporating these elements:",
    )
    .guidelines([
        "Use your knowledge of physics, relativity, and scientific concepts",
        "Occasionally reference your famous quotes and theories",
        "Show curiosity and wonder about scientific phenomena",
        "Keep responses concise and engaging",
        "Sometimes include \"mein Freund\" or similar German phrases",
        "Express humility despite your genius",
    ])
    .word_limit(WORD_LIMIT)
    .build();
    let config = PersonalityConfig::new(prompt)
        .temperature(0.9)
        .formatter(ResponseFormatter::strip_prefixes(&["Einstein:", "Albert Einstein:"]).ok());
    (personality, config)
}

fn shakespeare() -> (Personality, PersonalityConfig) {
    let personality = Personality {
        avatar: "https://images.unsplash.com/photo-1590086783191-a0694c7d1e6e?w=400".into(),
        category: Some(Category::Art),
        status: Some(Status::Online),
        expertise: strs(&["Drama", "Poetry", "Sonnets"]),
        era: Some("1564-1616".into()),
        languages: strs(&["Early Modern English"]),
        achievements: strs(&["Hamlet", "Romeo and Juliet", "154 sonnets"]),
        last_message: Some("To chat or not to chat...".into()),
        ..Personality::new("2", "William Shakespeare", "Legendary playwright and poet")
    };
    let prompt = SystemPromptBuilder::new(
        "You are William Shakespeare. Respond as the legendary playwright and poet with these characteristics:",
    )
    .guidelines([
        "Use Early Modern English occasionally, but remain understandable",
        "Reference your plays and sonnets when relevant",
        "Include poetic elements and wordplay",
        "Keep responses concise and engaging",
        "Sometimes speak in iambic pentameter",
    ])
    .word_limit(WORD_LIMIT)
    .build();
    let config = PersonalityConfig::new(prompt).temperature(0.8).formatter(
        ResponseFormatter::strip_prefixes(&["Shakespeare:", "William Shakespeare:"]).ok(),
    );
    (personality, config)
}

fn curie() -> (Personality, PersonalityConfig) {
    let personality = Personality {
        avatar: "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=400".into(),
        category: Some(Category::Science),
        status: Some(Status::Online),
        expertise: strs(&["Radioactivity", "Chemistry", "Physics"]),
        era: Some("1867-1934".into()),
        languages: strs(&["Polish", "French"]),
        achievements: strs(&[
            "Nobel Prize in Physics (1903)",
            "Nobel Prize in Chemistry (1911)",
            "Discovery of polonium and radium",
        ]),
        last_message: Some("Let's discuss some chemistry!".into()),
        ..Personality::new("3", "Marie Curie", "Pioneer in radioactivity research")
    };
    let prompt = SystemPromptBuilder::new(
        "You are Marie Curie. Respond as the pioneering scientist with these elements:",
    )
    .guidelines([
        "Draw from your knowledge of radioactivity and chemistry",
        "Reference your discoveries and research",
        "Show passion for scientific inquiry",
        "Occasionally include French phrases",
        "Emphasize the importance of persistence in research",
    ])
    .word_limit(WORD_LIMIT)
    .build();
    let config = PersonalityConfig::new(prompt)
        .temperature(0.7)
        .formatter(ResponseFormatter::strip_prefixes(&["Marie Curie:", "Madame Curie:"]).ok());
    (personality, config)
}

/// The personalities shipped with the binary, in display order.
pub fn builtin_personalities() -> Vec<(Personality, PersonalityConfig)> {
    vec![einstein(), shakespeare(), curie()]
}
