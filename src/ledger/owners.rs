//! Owner set and confirmation threshold
//!
//! The owner set is fixed at construction: an ordered list of distinct
//! addresses and the number of confirmations required before a transaction
//! may execute.

use crate::ledger::address::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing an owner set
#[derive(Error, Debug)]
pub enum OwnerSetError {
    #[error("owner set must not be empty")]
    NoOwners,
    #[error("duplicate owner: {0}")]
    DuplicateOwner(Address),
    #[error("required confirmations {required} out of range for {owners} owner(s)")]
    InvalidThreshold { required: usize, owners: usize },
}

/// An ordered set of distinct owners with a confirmation threshold
///
/// Immutable once constructed; owner rotation is a governance action
/// outside this ledger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OwnerSet {
    owners: Vec<Address>,
    required: usize,
}

impl OwnerSet {
    /// Validate and build an owner set
    ///
    /// # Errors
    /// Fails if `owners` is empty, contains duplicates, or `required` is
    /// not within `1..=owners.len()`.
    pub fn new(owners: Vec<Address>, required: usize) -> Result<Self, OwnerSetError> {
        if owners.is_empty() {
            return Err(OwnerSetError::NoOwners);
        }

        if required == 0 || required > owners.len() {
            return Err(OwnerSetError::InvalidThreshold {
                required,
                owners: owners.len(),
            });
        }

        // Check for duplicates
        let mut sorted = owners.clone();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(OwnerSetError::DuplicateOwner(pair[0]));
            }
        }

        Ok(Self { owners, required })
    }

    /// The owners in construction order
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Number of owners (N)
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// True if the set holds no owners (never the case after construction)
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Confirmations required to execute (M)
    pub fn required_confirmations(&self) -> usize {
        self.required
    }

    /// Check whether an address is an owner
    pub fn is_owner(&self, address: &Address) -> bool {
        self.owners.contains(address)
    }

    /// Position of an owner within the set, if present
    ///
    /// Confirmation slots are indexed by this position.
    pub fn position(&self, address: &Address) -> Option<usize> {
        self.owners.iter().position(|o| o == address)
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<Address> {
        vec![
            "0x00000000000000000000000000000000000000a1".parse().unwrap(),
            "0x00000000000000000000000000000000000000b2".parse().unwrap(),
            "0x00000000000000000000000000000000000000c3".parse().unwrap(),
        ]
    }

    #[test]
    fn test_owner_set_creation() {
        let set = OwnerSet::new(sample_owners(), 2).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.required_confirmations(), 2);
        assert_eq!(set.description(), "2-of-3");
    }

    #[test]
    fn test_validation() {
        // Empty owner list
        assert!(matches!(
            OwnerSet::new(vec![], 1),
            Err(OwnerSetError::NoOwners)
        ));

        // Zero threshold
        assert!(matches!(
            OwnerSet::new(sample_owners(), 0),
            Err(OwnerSetError::InvalidThreshold { .. })
        ));

        // Threshold above owner count
        assert!(matches!(
            OwnerSet::new(sample_owners(), 4),
            Err(OwnerSetError::InvalidThreshold { .. })
        ));

        // Duplicate owners
        let dup = sample_owners()[0];
        assert!(matches!(
            OwnerSet::new(vec![dup, dup], 1),
            Err(OwnerSetError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_single_owner_wallet() {
        // 1-of-1 is the smallest valid configuration
        let owner = sample_owners()[0];
        let set = OwnerSet::new(vec![owner], 1).unwrap();
        assert_eq!(set.description(), "1-of-1");
        assert!(set.is_owner(&owner));
    }

    #[test]
    fn test_membership_and_position() {
        let owners = sample_owners();
        let set = OwnerSet::new(owners.clone(), 2).unwrap();

        assert!(set.is_owner(&owners[1]));
        assert_eq!(set.position(&owners[1]), Some(1));

        let stranger: Address = "0x00000000000000000000000000000000000000d4".parse().unwrap();
        assert!(!set.is_owner(&stranger));
        assert_eq!(set.position(&stranger), None);
    }

    #[test]
    fn test_order_preserved() {
        let owners = sample_owners();
        let set = OwnerSet::new(owners.clone(), 1).unwrap();
        assert_eq!(set.owners(), owners.as_slice());
    }
}
