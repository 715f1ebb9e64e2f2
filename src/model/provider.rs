use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote playlist service a definition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// YouTube playlists (Google account)
    Google,

    /// Spotify playlists
    Spotify,
}

impl Provider {
    /// Wire name used in definition files
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Spotify => "spotify",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "youtube" => Ok(Provider::Google),
            "spotify" => Ok(Provider::Spotify),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!("google".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!("YouTube".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!("spotify".parse::<Provider>().unwrap(), Provider::Spotify);
        assert!("tidal".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Provider::Spotify).unwrap(),
            "\"spotify\""
        );
    }
}
