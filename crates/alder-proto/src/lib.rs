//! # Alder DNS Record Model
//!
//! The in-memory DNS data model shared by the alder resolver components:
//! domain names, record types and classes, RDATA variants, resource records,
//! and messages with their header flags and record sections.
//!
//! Wire-format parsing and serialization live in the resolver's I/O layer;
//! this crate is the representation that layer produces and the rest of the
//! system (notably the shared cache) consumes.
//!
//! ## Example
//!
//! ```rust
//! use alder_proto::{Name, ResourceRecord};
//! use std::str::FromStr;
//!
//! let rr = ResourceRecord::a(
//!     Name::from_str("example.com.").unwrap(),
//!     300,
//!     "192.0.2.1".parse().unwrap(),
//! );
//! assert_eq!(rr.ttl(), 300);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod rdata;
pub mod record;
pub mod rtype;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use error::{Error, Result};
pub use header::{Header, HeaderFlags, OpCode, ResponseCode};
pub use message::{Message, Question};
pub use name::Name;
pub use rdata::RData;
pub use record::ResourceRecord;
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (63 bytes per RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a domain name (255 bytes per RFC 1035)
pub const MAX_NAME_LENGTH: usize = 255;
