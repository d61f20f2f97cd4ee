//! Data model for the payment-authorization letter workflow
//!
//! Wire field names are the Portuguese names fixed by the extraction and
//! rendering backends; Rust field names stay idiomatic via serde renames.

use serde::{Deserialize, Serialize};

/// One beneficiary payment line, as extracted from a scanned authorization.
///
/// Immutable once produced by extraction; aggregation copies records into
/// groups and never mutates fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Beneficiary name
    #[serde(rename = "nome")]
    pub name: String,

    /// CNPJ/CPF, opaque string (not validated here)
    #[serde(rename = "cnpj")]
    pub tax_id: String,

    /// Credit-destination bank code
    #[serde(rename = "banco")]
    pub bank: String,

    /// Credit-destination branch
    #[serde(rename = "agencia")]
    pub branch: String,

    /// Credit-destination account
    #[serde(rename = "conta")]
    pub account: String,

    /// Locale-formatted decimal amount, kept verbatim so formatting
    /// round-trips exactly. Never parsed to a number by this core.
    #[serde(rename = "valorLiquido")]
    pub net_amount: String,

    /// Funding-source code, digits possibly interleaved with separators
    #[serde(rename = "fonte", default)]
    pub source: Option<String>,

    /// Discount amount in the same decimal format, or a textual zero
    #[serde(rename = "desconto", default)]
    pub discount: Option<String>,
}

/// One aggregation bucket: all records confirmed under the same normalized
/// debit account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountGroup {
    /// Normalized debit-account identifier; the group's identity
    #[serde(rename = "conta")]
    pub account_key: String,

    /// Records in upload-confirmation order, preserved across merges
    #[serde(rename = "fornecedores")]
    pub records: Vec<SupplierRecord>,
}

/// A named office-holder whose name, role and decree appear on the letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatoryProfile {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "cargo")]
    pub role: String,

    #[serde(rename = "decreto")]
    pub decree: String,
}

/// Response of the extraction backend for one uploaded document.
///
/// Missing fields degrade to defaults rather than erroring: an absent
/// account is the empty string, absent suppliers are an empty list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionResponse {
    #[serde(rename = "conta_debito", default)]
    pub debit_account: String,

    #[serde(rename = "fornecedores", default)]
    pub records: Vec<SupplierRecord>,

    #[serde(rename = "fonte_alerta", default)]
    pub surplus_alert: bool,
}

/// Payload for the rendering backend. Built fresh on each generation action;
/// never persisted.
///
/// The two signatory slots carry plain name strings resolved at selection
/// time, not references into the signatory list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    #[serde(rename = "numeroOficio")]
    pub letter_number: String,

    #[serde(rename = "assinatura1")]
    pub signatory1: String,

    #[serde(rename = "assinatura2")]
    pub signatory2: String,

    #[serde(rename = "tabelas")]
    pub groups: Vec<AccountGroup>,

    #[serde(rename = "assinaturas")]
    pub signatories: Vec<SignatoryProfile>,
}
