use clap::ValueEnum;

use crate::candidates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Arcana {
    /// Both major and minor arcana
    All,
    /// The 22 trumps
    Major,
    /// The four suits
    Minor,
}

impl Arcana {
    pub fn includes(self, other: Arcana) -> bool {
        self == Arcana::All || self == other
    }
}

/// How the names to try are derived for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidatePolicy {
    /// Run the source name through the candidate generator
    Expanded,
    /// Only the source name itself
    Exact,
    /// A hand-picked list, tried in order
    Fixed(&'static [&'static str]),
}

/// One card of a deck: where it lives remotely and where it is saved
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub arcana: Arcana,
    /// Suit name for minor arcana, `Major` for trumps
    pub category: &'static str,
    /// 1-based rank within the suit, 0-21 for trumps
    pub rank: usize,
    /// Canonical remote file name
    pub source: String,
    /// Local file name
    pub output: String,
    pub policy: CandidatePolicy,
}

impl ManifestEntry {
    /// Name used in console lines and failure records.
    ///
    /// Cards with a hand-picked list are reported by their bare stem
    /// (`Wands09`) since the canonical file name is not what gets tried.
    pub fn label(&self) -> &str {
        match self.policy {
            CandidatePolicy::Fixed(_) => self
                .source
                .rsplit_once('.')
                .map_or(self.source.as_str(), |(stem, _)| stem),
            _ => &self.source,
        }
    }

    /// Text inside the parentheses of a `DL:` line
    pub fn used_note(&self, used: &str) -> String {
        match self.policy {
            CandidatePolicy::Fixed(_) => format!("special:{}", used),
            _ => used.to_string(),
        }
    }

    pub fn candidates(&self) -> Vec<String> {
        match &self.policy {
            CandidatePolicy::Expanded => candidates::generate(&self.source),
            CandidatePolicy::Exact => vec![self.source.clone()],
            CandidatePolicy::Fixed(names) => names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

pub mod rws;
