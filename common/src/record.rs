//! # OUI Record Model
//!
//! An organizationally unique identifier (OUI) is a 24-bit prefix purchased from the
//! IEEE Registration Authority by a vendor, manufacturer or other organization.
//!
//! Only assignments from the **MA-L** registry mint new OUIs. The other registries
//! (MA-M, MA-S, IAB, CID) are finer-grained sub-delegations or company identifiers.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::Serialize;

use crate::network::mac;

/// An IEEE public OUI listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Registry {
    #[serde(rename = "CID")]
    Cid,
    #[serde(rename = "IAB")]
    Iab,
    #[serde(rename = "MA-L")]
    MaL,
    #[serde(rename = "MA-M")]
    MaM,
    #[serde(rename = "MA-S")]
    MaS,
}

impl Registry {
    pub const ALL: [Registry; 5] = [
        Registry::MaL,
        Registry::Cid,
        Registry::Iab,
        Registry::MaM,
        Registry::MaS,
    ];

    /// The literal tag used in the first CSV column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Registry::MaL => "MA-L",
            Registry::MaM => "MA-M",
            Registry::MaS => "MA-S",
            Registry::Iab => "IAB",
            Registry::Cid => "CID",
        }
    }

    /// The official IEEE listing for this registry. Only served over plain HTTP.
    pub fn url(&self) -> &'static str {
        match self {
            Registry::MaL => "http://standards-oui.ieee.org/oui/oui.csv",
            Registry::Cid => "http://standards-oui.ieee.org/cid/cid.csv",
            Registry::Iab => "http://standards-oui.ieee.org/iab/iab.csv",
            Registry::MaM => "http://standards-oui.ieee.org/oui28/mam.csv",
            Registry::MaS => "http://standards-oui.ieee.org/oui36/oui36.csv",
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Registry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::ALL
            .into_iter()
            .find(|registry| registry.as_str() == s)
            .ok_or_else(|| format!("unknown registry: {s:?}"))
    }
}

/// The hexadecimal prefix assigned to an organization within a registry.
///
/// Always uppercase with no separators. Never parsed as a number: a 28-bit MA-M
/// block and a 24-bit MA-L block differ only in length.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Assignment(String);

impl Assignment {
    pub fn new(raw: &str) -> Self {
        Self(mac::normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if this assignment is a prefix of an already normalized address.
    pub fn is_prefix_of(&self, normalized_addr: &str) -> bool {
        !self.0.is_empty() && normalized_addr.starts_with(&self.0)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Assignment {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A single OUI-to-organization entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub registry: Registry,
    pub assignment: Assignment,
    pub organization_name: String,
    pub organization_address: String,
}

impl Record {
    pub fn new(
        registry: Registry,
        assignment: impl Into<Assignment>,
        organization_name: impl Into<String>,
        organization_address: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            assignment: assignment.into(),
            organization_name: organization_name.into(),
            organization_address: organization_address.into().trim().to_string(),
        }
    }

    /// The four CSV columns in their fixed order.
    pub fn to_row(&self) -> [&str; 4] {
        [
            self.registry.as_str(),
            self.assignment.as_str(),
            &self.organization_name,
            &self.organization_address,
        ]
    }
}

/// An ordered collection of records. Order is insertion order unless sorted explicitly.
///
/// Records only grow by appending; existing entries cannot be edited in place.
///
/// ```compile_fail
/// use manuf_common::Records;
///
/// let mut records = Records::new();
/// for record in records.iter_mut() {
///     record.organization_name.clear();
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Records(Vec<Record>);

impl Records {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<Record> {
        self.0
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Stable sort by registry tag, so entries within a registry keep their listing order.
    pub fn sort_by_registry(&mut self) {
        self.0.sort_by(|a, b| a.registry.as_str().cmp(b.registry.as_str()));
    }
}

impl Deref for Records {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Record>> for Records {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Record> for Records {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
