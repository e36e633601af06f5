use phf::phf_map;
use std::fmt;

/// Lowercased aliases users type for a team, mapped to the abbreviation the
/// stats API uses in schedules
static TEAM_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "gnjd" => "NJD",
    "ducks" => "ANA",
    "coyotes" => "ARI",
    "bruins" => "BOS",
    "sabres" => "BUF",
    "flames" => "CGY",
    "hurricanes" => "CAR",
    "canes" => "CAR",
    "blackhawks" => "CHI",
    "hawks" => "CHI",
    "avalanche" => "COL",
    "avs" => "COL",
    "bluejackets" => "CBJ",
    "stars" => "DAL",
    "redwings" => "DET",
    "oilers" => "EDM",
    "panthers" => "FLA",
    "kings" => "LAK",
    "la" => "LAK",
    "wild" => "MIN",
    "canadiens" => "MTL",
    "habs" => "MTL",
    "predators" => "NSH",
    "preds" => "NSH",
    "devils" => "NJD",
    "nj" => "NJD",
    "islanders" => "NYI",
    "rangers" => "NYR",
    "senators" => "OTT",
    "sens" => "OTT",
    "flyers" => "PHI",
    "penguins" => "PIT",
    "pens" => "PIT",
    "sharks" => "SJS",
    "sj" => "SJS",
    "kraken" => "SEA",
    "blues" => "STL",
    "lightning" => "TBL",
    "bolts" => "TBL",
    "tb" => "TBL",
    "mapleleafs" => "TOR",
    "leafs" => "TOR",
    "canucks" => "VAN",
    "goldenknights" => "VGK",
    "knights" => "VGK",
    "capitals" => "WSH",
    "caps" => "WSH",
    "jets" => "WPG",
};

/// Team argument of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Team {
    /// No team given; matches any game
    All,
    Abbrev(String),
}

impl Team {
    /// Normalize a user token: known aliases map to their abbreviation,
    /// anything else is uppercased as-is
    pub fn parse(token: &str) -> Team {
        let lower = token.to_lowercase();
        if lower == "all" {
            return Team::All;
        }
        match TEAM_ALIASES.get(lower.as_str()) {
            Some(abbrev) => Team::Abbrev((*abbrev).to_string()),
            None => Team::Abbrev(token.to_uppercase()),
        }
    }

    pub fn matches(&self, abbrev: &str) -> bool {
        match self {
            Team::All => true,
            Team::Abbrev(team) => team.eq_ignore_ascii_case(abbrev),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::All => write!(f, "all"),
            Team::Abbrev(abbrev) => write!(f, "{}", abbrev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abbrev_uppercases() {
        assert_eq!(Team::parse("bos"), Team::Abbrev("BOS".to_string()));
        assert_eq!(Team::parse("TOR"), Team::Abbrev("TOR".to_string()));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Team::parse("GNJD"), Team::Abbrev("NJD".to_string()));
        assert_eq!(Team::parse("Bruins"), Team::Abbrev("BOS".to_string()));
        assert_eq!(Team::parse("habs"), Team::Abbrev("MTL".to_string()));
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(Team::parse("ALL"), Team::All);
        assert!(Team::All.matches("BOS"));
    }

    #[test]
    fn test_matches_is_exact() {
        let team = Team::parse("NJ");
        assert!(team.matches("NJD"));
        assert!(!Team::parse("NY").matches("NYR"));
    }
}
