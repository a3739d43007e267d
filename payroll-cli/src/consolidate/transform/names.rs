//! Full-name splitting

/// Splits a combined full name into (given names, surnames)
pub trait NameSplitter {
    fn split(&self, full_name: &str) -> (String, String);
}

/// Lowercase connectors that belong to the word after them
const PARTICLES: &[&str] = &[
    "de", "del", "la", "las", "los", "y", "da", "das", "do", "dos", "san", "van", "von",
];

/// Word-count heuristic with particle grouping.
///
/// Particles are glued to the following word ("de la Cruz" counts as one
/// word), then:
/// - 1 word: given name only
/// - 2 words: 1 given name + 1 surname
/// - 3 words: 1 given name + 2 surnames
/// - 4+ words: 2 given names + the rest as surnames
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNameSplitter;

impl NameSplitter for HeuristicNameSplitter {
    fn split(&self, full_name: &str) -> (String, String) {
        let words = group_particles(full_name);

        match words.len() {
            0 => (String::new(), String::new()),
            1 => (words[0].clone(), String::new()),
            2 | 3 => (words[0].clone(), words[1..].join(" ")),
            _ => (words[..2].join(" "), words[2..].join(" ")),
        }
    }
}

fn group_particles(full_name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for token in full_name.split_whitespace() {
        pending.push(token);
        if !PARTICLES.contains(&token.to_lowercase().as_str()) {
            words.push(pending.join(" "));
            pending.clear();
        }
    }

    // Trailing particles with nothing to attach to
    if !pending.is_empty() {
        match words.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(&pending.join(" "));
            }
            None => words.push(pending.join(" ")),
        }
    }

    words
}
