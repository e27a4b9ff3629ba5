#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Win,
    Loss,
}

impl ResultClass {
    pub fn label(self) -> &'static str {
        match self {
            ResultClass::Win => "Win",
            ResultClass::Loss => "Loss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakSummary {
    pub tokens: Vec<String>,
    pub latest: String,
    pub class: ResultClass,
    pub wins: usize,
    pub losses: usize,
}

/// Parses a comma-separated `W`/`L` streak, oldest result first.
///
/// Anything other than an exact `W` as the final token classifies as a loss,
/// including empty input and unknown tokens. Unknown tokens count toward
/// neither wins nor losses.
pub fn parse_streak(raw: &str) -> StreakSummary {
    let tokens: Vec<String> = raw.split(',').map(|t| t.trim().to_string()).collect();
    // `split` always yields at least one piece.
    let latest = tokens.last().cloned().unwrap_or_default();
    let class = if latest == "W" {
        ResultClass::Win
    } else {
        ResultClass::Loss
    };
    let wins = tokens.iter().filter(|t| t.as_str() == "W").count();
    let losses = tokens.iter().filter(|t| t.as_str() == "L").count();

    StreakSummary {
        tokens,
        latest,
        class,
        wins,
        losses,
    }
}
