//! Rider-Waite-Smith deck as hosted on Wikimedia Commons
//!
//! Minor arcana scans are named `{Suit}{rank:02}.jpg` (`Cups01.jpg`,
//! `Pents14.jpg`). Trumps use `RWS Tarot {nn} {Title}.jpg` and are fetched
//! by that exact name only.

use super::{Arcana, CandidatePolicy, ManifestEntry};

/// Rank slugs in suit order, ace through king
const RANKS: [&str; 14] = [
    "ace", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "page",
    "knight", "queen", "king",
];

/// (Commons prefix, suit slug used in local file names)
const SUITS: [(&str, &str); 4] = [
    ("Cups", "cups"),
    ("Wands", "wands"),
    ("Swords", "swords"),
    // Commons abbreviates pentacles
    ("Pents", "pentacles"),
];

/// Nine of Wands was re-uploaded under several names
const NINE_OF_WANDS: &[&str] = &[
    "Wands09.jpg",
    "WANDS09.jpg",
    "WANDS09-1.jpg",
    "Tarot Nine of Wands.jpg",
    "RWS1909 - Wands 09.jpeg",
];

const MAJORS: [(&str, &str); 22] = [
    ("RWS Tarot 00 Fool.jpg", "the-fool.jpg"),
    ("RWS Tarot 01 Magician.jpg", "the-magician.jpg"),
    ("RWS Tarot 02 High Priestess.jpg", "the-high-priestess.jpg"),
    ("RWS Tarot 03 Empress.jpg", "the-empress.jpg"),
    ("RWS Tarot 04 Emperor.jpg", "the-emperor.jpg"),
    ("RWS Tarot 05 Hierophant.jpg", "the-hierophant.jpg"),
    ("RWS Tarot 06 Lovers.jpg", "the-lovers.jpg"),
    ("RWS Tarot 07 Chariot.jpg", "the-chariot.jpg"),
    ("RWS Tarot 08 Strength.jpg", "strength.jpg"),
    ("RWS Tarot 09 Hermit.jpg", "the-hermit.jpg"),
    ("RWS Tarot 10 Wheel of Fortune.jpg", "wheel-of-fortune.jpg"),
    ("RWS Tarot 11 Justice.jpg", "justice.jpg"),
    ("RWS Tarot 12 Hanged Man.jpg", "the-hanged-man.jpg"),
    ("RWS Tarot 13 Death.jpg", "death.jpg"),
    ("RWS Tarot 14 Temperance.jpg", "temperance.jpg"),
    ("RWS Tarot 15 Devil.jpg", "the-devil.jpg"),
    ("RWS Tarot 16 Tower.jpg", "the-tower.jpg"),
    ("RWS Tarot 17 Star.jpg", "the-star.jpg"),
    ("RWS Tarot 18 Moon.jpg", "the-moon.jpg"),
    ("RWS Tarot 19 Sun.jpg", "the-sun.jpg"),
    ("RWS Tarot 20 Judgement.jpg", "judgement.jpg"),
    ("RWS Tarot 21 World.jpg", "the-world.jpg"),
];

fn minor_arcana() -> impl Iterator<Item = ManifestEntry> {
    SUITS.into_iter().flat_map(|(prefix, suit)| {
        RANKS.into_iter().enumerate().map(move |(idx, rank_slug)| {
            let rank = idx + 1;
            let policy = if prefix == "Wands" && rank == 9 {
                CandidatePolicy::Fixed(NINE_OF_WANDS)
            } else {
                CandidatePolicy::Expanded
            };

            ManifestEntry {
                arcana: Arcana::Minor,
                category: prefix,
                rank,
                source: format!("{}{:02}.jpg", prefix, rank),
                output: format!("{}-of-{}.jpg", rank_slug, suit),
                policy,
            }
        })
    })
}

fn major_arcana() -> impl Iterator<Item = ManifestEntry> {
    MAJORS
        .into_iter()
        .enumerate()
        .map(|(rank, (source, output))| ManifestEntry {
            arcana: Arcana::Major,
            category: "Major",
            rank,
            source: source.to_string(),
            output: output.to_string(),
            policy: CandidatePolicy::Exact,
        })
}

/// Full deck in download order: suits first, then the trumps
pub fn manifest() -> Vec<ManifestEntry> {
    minor_arcana().chain(major_arcana()).collect()
}

/// Deck entries restricted to the requested arcana
pub fn select(arcana: Arcana) -> Vec<ManifestEntry> {
    manifest()
        .into_iter()
        .filter(|entry| arcana.includes(entry.arcana))
        .collect()
}
