//! Cache admission ranking.

use crate::extract::Section;
use serde::{Deserialize, Serialize};

/// Trustworthiness rank of a cached RRSet, condensed from RFC 2181 §5.4.1
/// to the three levels this cache distinguishes.
///
/// The derived order runs weakest to strongest, so `a > b` means `a` is
/// more trustworthy than `b`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Ranking {
    /// Data from the additional section, or from the authority section of a
    /// non-authoritative reply.
    Additional,

    /// Answer-section data of a non-authoritative reply.
    Answer,

    /// Answer-section data of a reply with the authoritative-answer flag set.
    AuthAnswer,
}

impl Ranking {
    /// Returns the rank cached data from a reply section carries, or `None`
    /// if that section is not cached at all.
    ///
    /// Authority-section data of an *authoritative* reply is excluded: a
    /// server authoritative for the answer is not thereby authoritative for
    /// whatever it puts in the authority section, and caching it would open
    /// an injection hole.
    pub fn for_section(section: Section, authoritative: bool) -> Option<Ranking> {
        match (section, authoritative) {
            (Section::Answer, true) => Some(Ranking::AuthAnswer),
            (Section::Answer, false) => Some(Ranking::Answer),
            (Section::Authority, true) => None,
            (Section::Authority, false) => Some(Ranking::Additional),
            (Section::Additional, _) => Some(Ranking::Additional),
        }
    }

    /// Returns true if data at this rank may displace an entry at `current`.
    ///
    /// Equal ranks do not displace, which keeps the cache monotone under
    /// concurrent arrivals of the same key.
    #[inline]
    pub fn supersedes(self, current: Ranking) -> bool {
        self > current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        assert!(Ranking::AuthAnswer > Ranking::Answer);
        assert!(Ranking::Answer > Ranking::Additional);
    }

    #[test]
    fn equal_rank_does_not_supersede() {
        assert!(Ranking::AuthAnswer.supersedes(Ranking::Answer));
        assert!(Ranking::Answer.supersedes(Ranking::Additional));
        assert!(!Ranking::Answer.supersedes(Ranking::Answer));
        assert!(!Ranking::Additional.supersedes(Ranking::AuthAnswer));
    }

    #[test]
    fn section_table() {
        assert_eq!(
            Ranking::for_section(Section::Answer, true),
            Some(Ranking::AuthAnswer)
        );
        assert_eq!(
            Ranking::for_section(Section::Answer, false),
            Some(Ranking::Answer)
        );
        assert_eq!(Ranking::for_section(Section::Authority, true), None);
        assert_eq!(
            Ranking::for_section(Section::Authority, false),
            Some(Ranking::Additional)
        );
        assert_eq!(
            Ranking::for_section(Section::Additional, true),
            Some(Ranking::Additional)
        );
        assert_eq!(
            Ranking::for_section(Section::Additional, false),
            Some(Ranking::Additional)
        );
    }
}
