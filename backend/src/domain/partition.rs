//! Partition naming.
//!
//! Each accepted registrant owns one partition of voter records. The name is
//! derived from the identity with an injective escape scheme so that two
//! distinct identities never share a partition and the result is always a
//! safe storage identifier:
//!
//! - `[a-z0-9]` are kept verbatim;
//! - every other byte of the UTF-8 identity, `_` included, becomes `_xx`
//!   (two lower-case hex digits).
//!
//! Escaping `_` is what keeps the mapping injective: a decoder reading the
//! encoded segment left to right always knows whether it is looking at a
//! literal or the start of an escape.

use std::fmt;
use std::fmt::Write as _;

use super::Identity;

const PREFIX: &str = "user_";
const SUFFIX: &str = "_collection";

/// Storage name of a registrant's voter partition.
///
/// # Examples
/// ```
/// use voter_registry::domain::{Identity, PartitionName};
///
/// let name = PartitionName::for_identity(&Identity::new("adminA").unwrap());
/// assert_eq!(name.as_ref(), "user_admin_41_collection");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionName(String);

impl PartitionName {
    /// Derive the partition name owned by `identity`.
    pub fn for_identity(identity: &Identity) -> Self {
        let raw = identity.as_ref();
        let mut name = String::with_capacity(PREFIX.len() + raw.len() * 3 + SUFFIX.len());
        name.push_str(PREFIX);
        for byte in raw.bytes() {
            if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
                name.push(char::from(byte));
            } else {
                // Writing to a String cannot fail.
                let _ = write!(name, "_{byte:02x}");
            }
        }
        name.push_str(SUFFIX);
        Self(name)
    }
}

impl AsRef<str> for PartitionName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PartitionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name(raw: &str) -> String {
        PartitionName::for_identity(&Identity::new(raw).expect("identity")).to_string()
    }

    #[rstest]
    #[case("bob", "user_bob_collection")]
    #[case("Bob", "user__42ob_collection")]
    #[case("a_b", "user_a_5fb_collection")]
    #[case("a.b", "user_a_2eb_collection")]
    #[case("é", "user__c3_a9_collection")]
    fn encodes_identity(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(name(raw), expected);
    }

    #[rstest]
    #[case("a_5fb", "a_b")]
    #[case("Bob", "bob")]
    #[case("x y", "x_y")]
    #[case("a_2e", "a.")]
    fn distinct_identities_never_collide(#[case] left: &str, #[case] right: &str) {
        assert_ne!(name(left), name(right));
    }

    #[rstest]
    fn output_is_a_safe_identifier() {
        let encoded = name("Robert'); DROP TABLE voters;--");
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        );
    }
}
