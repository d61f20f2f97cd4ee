//! Account-grouped aggregation of confirmed uploads
//!
//! Exactly one group exists per normalized debit-account key. Group order is
//! first-appearance order and record order within a group is confirmation
//! order; both are user-visible (tables render top to bottom) and must stay
//! stable across merges.

use crate::model::{AccountGroup, SupplierRecord};

/// The set of account-grouped tables accumulated across confirmed uploads.
#[derive(Debug, Clone, Default)]
pub struct AggregationStore {
    groups: Vec<AccountGroup>,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a confirmed batch under `account_key`.
    ///
    /// Appends to the existing group when the key is already known, otherwise
    /// creates a new group at the end of the ordering. Never re-sorts.
    pub fn merge(&mut self, account_key: &str, new_records: Vec<SupplierRecord>) {
        match self
            .groups
            .iter_mut()
            .find(|group| group.account_key == account_key)
        {
            Some(group) => group.records.extend(new_records),
            None => self.groups.push(AccountGroup {
                account_key: account_key.to_string(),
                records: new_records,
            }),
        }
    }

    /// Ordered view of the accumulated groups.
    pub fn groups(&self) -> &[AccountGroup] {
        &self.groups
    }

    /// Owned copy of the current groups, for assembling a generation payload.
    pub fn snapshot(&self) -> Vec<AccountGroup> {
        self.groups.clone()
    }

    /// True when at least one group holds a record.
    pub fn has_records(&self) -> bool {
        self.groups.iter().any(|group| !group.records.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SupplierRecord {
        SupplierRecord {
            name: name.to_string(),
            tax_id: "00.000.000/0001-00".to_string(),
            bank: "001".to_string(),
            branch: "0001".to_string(),
            account: "1-1".to_string(),
            net_amount: "10,00".to_string(),
            source: None,
            discount: None,
        }
    }

    #[test]
    fn test_merge_same_key_appends_instead_of_duplicating() {
        let mut store = AggregationStore::new();
        store.merge("123-4", vec![record("a"), record("b")]);
        store.merge("123-4", vec![record("c")]);

        assert_eq!(store.groups().len(), 1);
        let names: Vec<_> = store.groups()[0]
            .records
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_group_order_is_first_appearance_order() {
        let mut store = AggregationStore::new();
        store.merge("10-1", vec![record("a")]);
        store.merge("20-2", vec![record("b")]);
        store.merge("10-1", vec![record("c")]);

        let keys: Vec<_> = store
            .groups()
            .iter()
            .map(|g| g.account_key.as_str())
            .collect();
        assert_eq!(keys, ["10-1", "20-2"]);
    }

    #[test]
    fn test_merge_is_associative_in_effect() {
        let b1 = vec![record("a"), record("b")];
        let b2 = vec![record("c")];

        let mut sequential = AggregationStore::new();
        sequential.merge("k-1", b1.clone());
        sequential.merge("k-1", b2.clone());

        let mut concatenated = AggregationStore::new();
        let mut combined = b1;
        combined.extend(b2);
        concatenated.merge("k-1", combined);

        assert_eq!(
            sequential.groups()[0].records,
            concatenated.groups()[0].records
        );
    }

    #[test]
    fn test_has_records() {
        let mut store = AggregationStore::new();
        assert!(!store.has_records());

        store.merge("1-1", vec![]);
        assert!(!store.is_empty());
        assert!(!store.has_records());

        store.merge("1-1", vec![record("a")]);
        assert!(store.has_records());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_merges() {
        let mut store = AggregationStore::new();
        store.merge("1-1", vec![record("a")]);
        let snapshot = store.snapshot();

        store.merge("1-1", vec![record("b")]);
        assert_eq!(snapshot[0].records.len(), 1);
        assert_eq!(store.groups()[0].records.len(), 2);
    }
}
