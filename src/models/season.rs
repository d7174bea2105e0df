use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Spring, Season::Summer, Season::Autumn, Season::Winter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Lowercase words that name this season in free text.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Season::Spring => &["printemps", "spring"],
            Season::Summer => &["été", "summer"],
            Season::Autumn => &["automne", "autumn"],
            Season::Winter => &["hiver", "winter"],
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spring" | "printemps" => Some(Season::Spring),
            "summer" | "été" | "ete" => Some(Season::Summer),
            "autumn" | "fall" | "automne" => Some(Season::Autumn),
            "winter" | "hiver" => Some(Season::Winter),
            _ => None,
        }
    }

    /// Meteorological season for a month (1-12), northern hemisphere.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn current() -> Self {
        use chrono::Datelike;
        Self::from_month(chrono::Local::now().month())
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_from_str_accepts_french_and_english() {
        assert_eq!(Season::from_str("été"), Some(Season::Summer));
        assert_eq!(Season::from_str("Summer"), Some(Season::Summer));
        assert_eq!(Season::from_str("PRINTEMPS"), Some(Season::Spring));
        assert_eq!(Season::from_str("fall"), Some(Season::Autumn));
        assert_eq!(Season::from_str("hiver"), Some(Season::Winter));
        assert_eq!(Season::from_str("monsoon"), None);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for season in Season::all() {
            assert_eq!(Season::from_str(&season.to_string()), Some(*season));
        }
    }

    #[test]
    fn season_from_month() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
    }
}
