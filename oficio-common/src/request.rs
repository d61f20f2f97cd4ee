//! Generation request assembly
//!
//! Pure assembly of the rendering-backend payload from the current
//! aggregation snapshot, the chosen signatory names and the letter number.
//! No network or I/O happens here.

use crate::model::{AccountGroup, GenerationRequest, SignatoryProfile};

/// False when there is nothing to put in the letter: no groups, or every
/// group's record list is empty.
pub fn can_build(groups: &[AccountGroup]) -> bool {
    groups.iter().any(|group| !group.records.is_empty())
}

/// Assemble the payload for the rendering backend.
///
/// Signatory name slots are carried by value as resolved at selection time;
/// renaming a profile afterwards does not change an already-chosen slot.
pub fn build(
    letter_number: &str,
    signatory1: &str,
    signatory2: &str,
    groups: Vec<AccountGroup>,
    signatories: Vec<SignatoryProfile>,
) -> GenerationRequest {
    GenerationRequest {
        letter_number: letter_number.to_string(),
        signatory1: signatory1.to_string(),
        signatory2: signatory2.to_string(),
        groups,
        signatories,
    }
}

/// Download name for the rendered document.
pub fn download_filename(letter_number: &str) -> String {
    format!("OFICIO {letter_number} - AUTORIZAÇÃO DE PAGAMENTO.docx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SupplierRecord;

    fn record() -> SupplierRecord {
        SupplierRecord {
            name: "FORNECEDOR".to_string(),
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
    fn test_can_build_requires_at_least_one_record() {
        assert!(!can_build(&[]));
        assert!(!can_build(&[AccountGroup {
            account_key: "1-1".to_string(),
            records: vec![],
        }]));
        assert!(can_build(&[
            AccountGroup {
                account_key: "1-1".to_string(),
                records: vec![],
            },
            AccountGroup {
                account_key: "2-2".to_string(),
                records: vec![record()],
            },
        ]));
    }

    #[test]
    fn test_build_carries_names_by_value() {
        let request = build("77/2025", "NAME ONE", "NAME TWO", vec![], vec![]);
        assert_eq!(request.letter_number, "77/2025");
        assert_eq!(request.signatory1, "NAME ONE");
        assert_eq!(request.signatory2, "NAME TWO");
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("123/2025"),
            "OFICIO 123/2025 - AUTORIZAÇÃO DE PAGAMENTO.docx"
        );
    }
}
