use std::fs;
use std::path::Path;

use log::debug;

use super::{RateFeed, RateHistory};

pub struct LoadedHistory {
    pub history: RateHistory,
    /// User-visible notice about the rates being possibly outdated
    pub advisory: Option<String>,
}

impl LoadedHistory {
    fn fallback(advisory: String) -> LoadedHistory {
        debug!("Falling back to the built-in interest rates.");
        LoadedHistory {
            history: RateHistory::fallback(),
            advisory: Some(advisory),
        }
    }
}

/// Loads the rate history from the specified feed file, falling back to the built-in history if the
/// file is not specified or can't be used. Never fails and never returns an empty history: the failure
/// is reported through the advisory which is up to the caller to show.
pub fn load_history(feed: &dyn RateFeed, path: Option<&Path>) -> LoadedHistory {
    let Some(path) = path else {
        return LoadedHistory::fallback(
            "Interest rate feed is not configured. Using built-in rates which may be stale".to_owned());
    };

    debug!("Loading {} interest rates from {:?}...", feed.name(), path);

    match fs::read_to_string(path) {
        Ok(data) => load_history_from(feed, &data),
        Err(e) => LoadedHistory::fallback(format!(
            "Failed to read {:?}: {}. Using built-in rates which may be stale", path, e)),
    }
}

pub fn load_history_from(feed: &dyn RateFeed, data: &str) -> LoadedHistory {
    match RateHistory::build(feed, data) {
        Ok(history) => {
            debug!("Loaded {} interest rate changes.", history.len());
            LoadedHistory {history, advisory: None}
        },
        Err(e) => LoadedHistory::fallback(format!(
            "{}. Using built-in rates which may be stale", e)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;
    use tempfile::NamedTempFile;

    use crate::rates::{BankRatesFeed, CentralBankFeed};

    use super::*;

    #[test]
    fn from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(indoc!("
            date,bank,rate
            2024-01-01,Auður,7.50
            2024-06-01,Auður,7.00
        ").as_bytes()).unwrap();

        let loaded = load_history(&BankRatesFeed, Some(file.path()));
        assert!(loaded.advisory.is_none());
        assert_eq!(loaded.history.len(), 2);
        assert_eq!(loaded.history.rate_as_of(date!(2024, 7, 1)), dec!(7.00));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_history(&CentralBankFeed::default(), Some(&dir.path().join("rates.csv")));
        assert!(loaded.advisory.unwrap().contains("may be stale"));
        assert_eq!(loaded.history, RateHistory::fallback());
    }

    #[test]
    fn not_configured() {
        let loaded = load_history(&CentralBankFeed::default(), None);
        assert!(loaded.advisory.is_some());
        assert_eq!(loaded.history, RateHistory::fallback());
    }

    #[test]
    fn malformed_feed() {
        let loaded = load_history_from(&CentralBankFeed::default(), "date,rate\n01.01.2024,7\n");
        assert!(loaded.advisory.unwrap().starts_with("Malformed interest rate feed"));
        assert!(!loaded.history.is_empty());
    }
}
