//! Section extractor.
//!
//! Classifies the records of a reply's sections per RFC 2181 §5.4.1,
//! assigns the section's [`Ranking`], and assembles the records into
//! cacheable RRSets.

use crate::key::CName;
use crate::ranking::Ranking;
use crate::rrset::{take_rrset, CachedRRSet, RejectedRRSet};
use alder_proto::{Class, Message, ResourceRecord, Type};
use std::collections::HashMap;

/// A reply's three record sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The answer section.
    Answer,
    /// The authority section.
    Authority,
    /// The additional section.
    Additional,
}

/// The cacheable outcome of one section of a reply.
#[derive(Debug, Clone)]
pub struct SectionRRSets {
    /// The ranking every accepted RRSet carries.
    pub ranking: Ranking,
    /// Accepted RRSets, in first-appearance order.
    pub rrsets: Vec<CachedRRSet>,
    /// Groups that failed assembly, for the caller to log.
    pub rejected: Vec<RejectedRRSet>,
}

/// Extracts the cacheable RRSets of one section of a reply.
///
/// Returns `None` when the section yields no cacheable data: the authority
/// section of an authoritative reply (see [`Ranking::for_section`]), or an
/// empty section. Records are stably grouped by (name, type, class) before
/// assembly, so one bad group does not poison its neighbors.
pub fn extract_section(msg: &Message, section: Section) -> Option<SectionRRSets> {
    let ranking = Ranking::for_section(section, msg.is_authoritative())?;
    let records = match section {
        Section::Answer => msg.answers(),
        Section::Authority => msg.authority(),
        Section::Additional => msg.additional(),
    };
    if records.is_empty() {
        return None;
    }

    let mut rrsets = Vec::new();
    let mut rejected = Vec::new();
    for group in group_records(records) {
        match take_rrset(&group) {
            Ok(rrset) => rrsets.push(rrset),
            Err(reject) => rejected.push(reject),
        }
    }

    Some(SectionRRSets {
        ranking,
        rrsets,
        rejected,
    })
}

/// Stably groups records by (name, type, class), preserving the order in
/// which each group first appears.
fn group_records(records: &[ResourceRecord]) -> Vec<Vec<ResourceRecord>> {
    let mut index: HashMap<(CName, Type, Class), usize> = HashMap::new();
    let mut groups: Vec<Vec<ResourceRecord>> = Vec::new();

    for rr in records {
        let id = (CName::from(rr.name()), rr.rtype(), rr.rclass());
        let slot = *index.entry(id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(rr.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crset::CRSet;
    use alder_proto::{Header, Name};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn reply(authoritative: bool) -> Message {
        let mut header = Header::new(1);
        header.flags |= alder_proto::HeaderFlags::QR;
        header.set_authoritative(authoritative);
        Message::new(header)
    }

    #[test]
    fn authoritative_answer_section() {
        let mut msg = reply(true);
        msg.add_answer(ResourceRecord::a(
            name("example.com"),
            300,
            Ipv4Addr::new(1, 2, 3, 4),
        ));
        msg.add_answer(ResourceRecord::a(
            name("example.com"),
            300,
            Ipv4Addr::new(5, 6, 7, 8),
        ));

        let out = extract_section(&msg, Section::Answer).unwrap();
        assert_eq!(out.ranking, Ranking::AuthAnswer);
        assert_eq!(out.rrsets.len(), 1);
        assert!(out.rejected.is_empty());
        assert_eq!(out.rrsets[0].crset.len(), 2);
    }

    #[test]
    fn authority_of_authoritative_reply_not_cached() {
        let mut msg = reply(true);
        msg.add_authority(ResourceRecord::ns(
            name("example.com"),
            3600,
            name("ns1.example.com"),
        ));
        assert!(extract_section(&msg, Section::Authority).is_none());
    }

    #[test]
    fn authority_of_nonauthoritative_reply_is_additional() {
        let mut msg = reply(false);
        msg.add_authority(ResourceRecord::ns(
            name("example.com"),
            3600,
            name("ns1.example.com"),
        ));
        let out = extract_section(&msg, Section::Authority).unwrap();
        assert_eq!(out.ranking, Ranking::Additional);
        assert_eq!(out.rrsets.len(), 1);
        assert!(matches!(out.rrsets[0].crset, CRSet::NS(_)));
    }

    #[test]
    fn empty_section_yields_nothing() {
        let msg = reply(false);
        assert!(extract_section(&msg, Section::Answer).is_none());
    }

    #[test]
    fn bad_group_does_not_poison_neighbors() {
        let mut msg = reply(false);
        // Good A group.
        msg.add_answer(ResourceRecord::a(
            name("good.example.com"),
            300,
            Ipv4Addr::new(1, 2, 3, 4),
        ));
        // Bad group: mixed TTLs under one key.
        msg.add_answer(ResourceRecord::a(
            name("bad.example.com"),
            300,
            Ipv4Addr::new(5, 6, 7, 8),
        ));
        msg.add_answer(ResourceRecord::a(
            name("bad.example.com"),
            600,
            Ipv4Addr::new(9, 10, 11, 12),
        ));

        let out = extract_section(&msg, Section::Answer).unwrap();
        assert_eq!(out.rrsets.len(), 1);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].records.len(), 2);
    }

    #[test]
    fn grouping_is_stable_and_interleaving_safe() {
        let mut msg = reply(false);
        // Interleave two groups.
        msg.add_answer(ResourceRecord::a(
            name("a.example.com"),
            60,
            Ipv4Addr::new(1, 1, 1, 1),
        ));
        msg.add_answer(ResourceRecord::a(
            name("b.example.com"),
            60,
            Ipv4Addr::new(2, 2, 2, 2),
        ));
        msg.add_answer(ResourceRecord::a(
            name("a.example.com"),
            60,
            Ipv4Addr::new(3, 3, 3, 3),
        ));

        let out = extract_section(&msg, Section::Answer).unwrap();
        assert_eq!(out.rrsets.len(), 2);
        // First-appearance order.
        assert_eq!(out.rrsets[0].key.name.to_name(), name("a.example.com"));
        assert_eq!(out.rrsets[0].crset.len(), 2);
        assert_eq!(out.rrsets[1].key.name.to_name(), name("b.example.com"));
    }
}
