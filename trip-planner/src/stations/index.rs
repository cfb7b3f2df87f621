//! Typo-tolerant station name index.

use strsim::levenshtein;

use crate::domain::StationId;
use crate::network::Network;

use super::error::LookupError;

/// Words ignored when matching individual name tokens.
const FILLER_WORDS: &[&str] = &[
    "a", "as", "da", "das", "de", "do", "dos", "e", "estação", "o", "os", "of", "station", "the",
];

/// Edit distance allowed on a whole name, as a fraction of the query length.
const NAME_TOLERANCE: f64 = 0.60;

/// Edit distance allowed on a single name token.
const TOKEN_TOLERANCE: f64 = 0.70;

/// A station matching a lookup query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMatch {
    pub id: StationId,
    pub name: String,

    /// Edit distance between the query and the name (or best token).
    pub distance: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    id: StationId,
    name: String,
    folded: String,
    tokens: Vec<String>,
}

impl Entry {
    fn to_match(&self, distance: usize) -> StationMatch {
        StationMatch {
            id: self.id,
            name: self.name.clone(),
            distance,
        }
    }
}

/// Station names of a network, prepared for lookup.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    entries: Vec<Entry>,
}

impl StationIndex {
    /// Index every station of a network.
    pub fn from_network(network: &Network) -> Self {
        let entries = network
            .stations()
            .map(|station| {
                let folded = fold(station.name());
                Entry {
                    id: station.id(),
                    name: station.name().to_string(),
                    tokens: tokenize(&folded),
                    folded,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stations matching `query`, closest first, at most `limit` of them.
    ///
    /// Tries case-insensitive substring matching, then edit distance on
    /// the whole name, then edit distance on name tokens; the first
    /// strategy with any result wins.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<StationMatch>, LookupError> {
        let query = fold(query.trim());
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let mut matches = self.substring_matches(&query);
        if matches.is_empty() {
            matches = self.name_matches(&query);
        }
        if matches.is_empty() {
            matches = self.token_matches(&query);
        }

        matches.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(limit);
        Ok(matches)
    }

    /// Resolve a query to a single station.
    ///
    /// An exact (case-insensitive) name wins outright; otherwise the query
    /// must match exactly one station.
    pub fn resolve(&self, query: &str) -> Result<StationId, LookupError> {
        let folded = fold(query.trim());
        if folded.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        if let Some(entry) = self.entries.iter().find(|e| e.folded == folded) {
            return Ok(entry.id);
        }

        let matches = self.search(query, usize::MAX)?;
        match matches.as_slice() {
            [] => Err(LookupError::NotFound(query.trim().to_string())),
            [only] => Ok(only.id),
            many => Err(LookupError::Ambiguous {
                query: query.trim().to_string(),
                candidates: many.iter().take(5).map(|m| m.name.clone()).collect(),
            }),
        }
    }

    fn substring_matches(&self, query: &str) -> Vec<StationMatch> {
        self.entries
            .iter()
            .filter(|e| e.folded.contains(query))
            .map(|e| e.to_match(levenshtein(query, &e.folded)))
            .collect()
    }

    fn name_matches(&self, query: &str) -> Vec<StationMatch> {
        let max = tolerance(query, NAME_TOLERANCE);
        self.entries
            .iter()
            .filter_map(|e| {
                let distance = levenshtein(query, &e.folded);
                (distance <= max).then(|| e.to_match(distance))
            })
            .collect()
    }

    fn token_matches(&self, query: &str) -> Vec<StationMatch> {
        let max = tolerance(query, TOKEN_TOLERANCE);
        let query_len = query.chars().count();

        self.entries
            .iter()
            .filter_map(|e| {
                e.tokens
                    .iter()
                    .filter(|t| t.chars().count().abs_diff(query_len) <= 1)
                    .map(|t| levenshtein(query, t))
                    .filter(|d| *d <= max)
                    .min()
                    .map(|distance| e.to_match(distance))
            })
            .collect()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Split a folded name into words, dropping filler words.
fn tokenize(folded: &str) -> Vec<String> {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !FILLER_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn tolerance(query: &str, fraction: f64) -> usize {
    (query.chars().count() as f64 * fraction) as usize
}
