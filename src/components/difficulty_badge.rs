use leptos::prelude::*;

/// Difficulty label reported by the question server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Difficulty::Easy => "difficulty-badge difficulty-easy",
            Difficulty::Medium => "difficulty-badge difficulty-medium",
            Difficulty::Hard => "difficulty-badge difficulty-hard",
            Difficulty::Unknown => "difficulty-badge difficulty-unknown",
        }
    }
}

#[component]
pub fn DifficultyBadge(
    /// Label as sent by the server, e.g. "Medium"
    #[prop(into)]
    difficulty: String,
) -> impl IntoView {
    let class = Difficulty::parse(&difficulty).class();

    view! { <span class=class>{difficulty}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::parse(" MEDIUM "), Difficulty::Medium);
        assert_eq!(Difficulty::parse("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse("Expert"), Difficulty::Unknown);
    }
}
