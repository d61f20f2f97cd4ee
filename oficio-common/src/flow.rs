//! Upload confirmation state machine
//!
//! One extraction round-trip at a time: submit, await extraction, present the
//! normalized account for human review, then commit into the aggregation
//! store or discard. The machine is the sole gate on the pending-extraction
//! slot, so at most one extraction is in flight and at most one unconfirmed
//! result exists at any moment.

use crate::account;
use crate::aggregation::AggregationStore;
use crate::model::{ExtractionResponse, SupplierRecord};
use crate::{Error, Result};

/// Unconfirmed result of one upload round-trip. Exists only between
/// extraction completion and confirm/cancel; discarded either way.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExtraction {
    /// Canonicalized debit account, editable by the operator before commit
    pub normalized_account: String,
    pub records: Vec<SupplierRecord>,
    /// Extraction saw a surplus funding source somewhere in the document
    pub surplus_flagged: bool,
}

/// Machine states. `Committed`/`Cancelled` are instantaneous and collapse
/// straight back to `Idle`, so only the durable states are represented.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Submitting,
    AwaitingConfirmation(PendingExtraction),
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Account key the records were merged under
    pub account: String,
    /// How many records the commit appended
    pub merged_records: usize,
    /// Raised at most once per commit; presentation decides how to show it
    pub surplus_advisory: bool,
}

/// Coordinates one extraction round-trip with human confirmation.
#[derive(Debug, Default)]
pub struct UploadFlow {
    state: UploadState,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, UploadState::Idle)
    }

    /// Enter `Submitting`. Rejected while an extraction is in flight or an
    /// unconfirmed result is waiting for the operator.
    pub fn begin_submit(&mut self) -> Result<()> {
        match self.state {
            UploadState::Idle => {
                self.state = UploadState::Submitting;
                Ok(())
            }
            UploadState::Submitting => Err(Error::Validation(
                "an extraction is already in flight".to_string(),
            )),
            UploadState::AwaitingConfirmation(_) => Err(Error::Validation(
                "a pending extraction awaits confirmation".to_string(),
            )),
        }
    }

    /// Capture a completed extraction for human review.
    ///
    /// The raw debit account is canonicalized here; an account the backend
    /// could not find arrives as the empty string and normalizes to the
    /// empty key rather than failing.
    pub fn extraction_succeeded(
        &mut self,
        response: ExtractionResponse,
    ) -> Result<&PendingExtraction> {
        if self.state != UploadState::Submitting {
            return Err(Error::Internal(
                "extraction completed without a submission".to_string(),
            ));
        }

        self.state = UploadState::AwaitingConfirmation(PendingExtraction {
            normalized_account: account::normalize(&response.debit_account),
            records: response.records,
            surplus_flagged: response.surplus_alert,
        });

        match &self.state {
            UploadState::AwaitingConfirmation(pending) => Ok(pending),
            _ => unreachable!(),
        }
    }

    /// The extraction round-trip failed. Return to `Idle` retaining nothing;
    /// the operator may retry by resubmitting.
    pub fn extraction_failed(&mut self) {
        self.state = UploadState::Idle;
    }

    /// Replace the pending account with the operator's correction. The edited
    /// value is taken verbatim; only extracted values pass the normalizer.
    pub fn edit_account(&mut self, account: String) -> Result<()> {
        match &mut self.state {
            UploadState::AwaitingConfirmation(pending) => {
                pending.normalized_account = account;
                Ok(())
            }
            _ => Err(Error::Validation(
                "no pending extraction to edit".to_string(),
            )),
        }
    }

    /// Commit: merge the pending records into `store` under the (possibly
    /// edited) account and return to `Idle`.
    pub fn confirm(&mut self, store: &mut AggregationStore) -> Result<CommitOutcome> {
        match std::mem::take(&mut self.state) {
            UploadState::AwaitingConfirmation(pending) => {
                let merged_records = pending.records.len();
                store.merge(&pending.normalized_account, pending.records);
                Ok(CommitOutcome {
                    account: pending.normalized_account,
                    merged_records,
                    surplus_advisory: pending.surplus_flagged,
                })
            }
            other => {
                self.state = other;
                Err(Error::Validation(
                    "no pending extraction to confirm".to_string(),
                ))
            }
        }
    }

    /// Cancel: discard the pending extraction unconditionally. No aggregation
    /// side effect.
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            UploadState::AwaitingConfirmation(_) => {
                self.state = UploadState::Idle;
                Ok(())
            }
            _ => Err(Error::Validation(
                "no pending extraction to cancel".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(account: &str, names: &[&str], alert: bool) -> ExtractionResponse {
        ExtractionResponse {
            debit_account: account.to_string(),
            records: names
                .iter()
                .map(|name| SupplierRecord {
                    name: name.to_string(),
                    tax_id: "00.000.000/0001-00".to_string(),
                    bank: "001".to_string(),
                    branch: "0001".to_string(),
                    account: "1-1".to_string(),
                    net_amount: "10,00".to_string(),
                    source: None,
                    discount: None,
                })
                .collect(),
            surplus_alert: alert,
        }
    }

    #[test]
    fn test_happy_path_normalizes_account() {
        let mut flow = UploadFlow::new();
        flow.begin_submit().unwrap();

        let pending = flow
            .extraction_succeeded(response("000123-4", &["a"], false))
            .unwrap();
        assert_eq!(pending.normalized_account, "123-4");
        assert_eq!(pending.records.len(), 1);
    }

    #[test]
    fn test_submit_rejected_while_busy() {
        let mut flow = UploadFlow::new();
        flow.begin_submit().unwrap();
        assert!(flow.begin_submit().is_err());

        flow.extraction_succeeded(response("1-1", &[], false))
            .unwrap();
        assert!(flow.begin_submit().is_err());
    }

    #[test]
    fn test_failure_returns_to_idle_with_nothing_retained() {
        let mut flow = UploadFlow::new();
        flow.begin_submit().unwrap();
        flow.extraction_failed();

        assert!(flow.is_idle());
        // Retry is possible immediately
        flow.begin_submit().unwrap();
    }

    #[test]
    fn test_confirm_merges_and_raises_advisory_once() {
        let mut flow = UploadFlow::new();
        let mut store = AggregationStore::new();

        flow.begin_submit().unwrap();
        flow.extraction_succeeded(response("000123-4", &["a", "b"], true))
            .unwrap();

        let outcome = flow.confirm(&mut store).unwrap();
        assert!(outcome.surplus_advisory);
        assert_eq!(outcome.account, "123-4");
        assert_eq!(outcome.merged_records, 2);
        assert!(flow.is_idle());
        assert_eq!(store.groups().len(), 1);

        // The slot is consumed; a second confirm has nothing to commit
        assert!(flow.confirm(&mut store).is_err());
        assert_eq!(store.groups()[0].records.len(), 2);
    }

    #[test]
    fn test_edited_account_is_used_verbatim_on_commit() {
        let mut flow = UploadFlow::new();
        let mut store = AggregationStore::new();

        flow.begin_submit().unwrap();
        flow.extraction_succeeded(response("000123-4", &["a"], false))
            .unwrap();
        flow.edit_account("00099-9".to_string()).unwrap();

        let outcome = flow.confirm(&mut store).unwrap();
        assert_eq!(outcome.account, "00099-9");
        assert_eq!(store.groups()[0].account_key, "00099-9");
    }

    #[test]
    fn test_cancel_discards_without_side_effects() {
        let mut flow = UploadFlow::new();
        let mut store = AggregationStore::new();

        flow.begin_submit().unwrap();
        flow.extraction_succeeded(response("1-1", &["a"], true))
            .unwrap();
        flow.cancel().unwrap();

        assert!(flow.is_idle());
        assert!(store.is_empty());
    }

    #[test]
    fn test_guards_outside_awaiting_confirmation() {
        let mut flow = UploadFlow::new();
        let mut store = AggregationStore::new();

        assert!(flow.edit_account("1-1".to_string()).is_err());
        assert!(flow.confirm(&mut store).is_err());
        assert!(flow.cancel().is_err());
    }

    #[test]
    fn test_missing_account_becomes_empty_key() {
        let mut flow = UploadFlow::new();
        flow.begin_submit().unwrap();
        let pending = flow
            .extraction_succeeded(response("", &[], false))
            .unwrap();
        assert_eq!(pending.normalized_account, "");
    }
}
