//! Tagged JSON envelopes that keep a transaction's concrete case through
//! serialization.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{LedgerError, LedgerResult},
    ledger::transaction::{Payment, PaymentFields, Transaction, Transfer, TransferFields},
};

/// Concrete transaction case named in an envelope's `CLASSNAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantTag {
    IncomingTransfer,
    OutgoingTransfer,
    Transfer,
    Payment,
}

impl VariantTag {
    pub const ALL: [VariantTag; 4] = [
        VariantTag::IncomingTransfer,
        VariantTag::OutgoingTransfer,
        VariantTag::Transfer,
        VariantTag::Payment,
    ];

    pub fn of(transaction: &Transaction) -> Self {
        match transaction {
            Transaction::IncomingTransfer(_) => VariantTag::IncomingTransfer,
            Transaction::OutgoingTransfer(_) => VariantTag::OutgoingTransfer,
            Transaction::Transfer(_) => VariantTag::Transfer,
            Transaction::Payment(_) => VariantTag::Payment,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariantTag::IncomingTransfer => "IncomingTransfer",
            VariantTag::OutgoingTransfer => "OutgoingTransfer",
            VariantTag::Transfer => "Transfer",
            VariantTag::Payment => "Payment",
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantTag {
    type Err = LedgerError;

    fn from_str(value: &str) -> LedgerResult<Self> {
        VariantTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| LedgerError::UnknownVariant(value.to_string()))
    }
}

/// `{"CLASSNAME": tag, "INSTANCE": fields}` wrapper around one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "CLASSNAME")]
    pub class_name: String,
    #[serde(rename = "INSTANCE")]
    pub instance: Value,
}

/// Borrowed envelope that serializes the instance straight from its struct,
/// so written fields keep declaration order.
#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "CLASSNAME")]
    class_name: &'static str,
    #[serde(rename = "INSTANCE")]
    instance: InstanceRef<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum InstanceRef<'a> {
    Transfer(&'a Transfer),
    Payment(&'a Payment),
}

impl<'a> From<&'a Transaction> for EnvelopeRef<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        let instance = match transaction {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => InstanceRef::Transfer(transfer),
            Transaction::Payment(payment) => InstanceRef::Payment(payment),
        };
        EnvelopeRef {
            class_name: VariantTag::of(transaction).as_str(),
            instance,
        }
    }
}

pub fn encode(transaction: &Transaction) -> LedgerResult<Envelope> {
    let instance = match transaction {
        Transaction::Transfer(transfer)
        | Transaction::IncomingTransfer(transfer)
        | Transaction::OutgoingTransfer(transfer) => serde_json::to_value(transfer)?,
        Transaction::Payment(payment) => serde_json::to_value(payment)?,
    };
    Ok(Envelope {
        class_name: VariantTag::of(transaction).as_str().to_string(),
        instance,
    })
}

/// Rebuilds a transaction from its envelope, re-running the case's validation.
pub fn decode(envelope: &Envelope) -> LedgerResult<Transaction> {
    let tag: VariantTag = envelope.class_name.parse()?;
    let transaction = match tag {
        VariantTag::Payment => {
            let fields: PaymentFields = serde_json::from_value(envelope.instance.clone())?;
            Transaction::Payment(Payment::try_from(fields)?)
        }
        VariantTag::Transfer | VariantTag::IncomingTransfer | VariantTag::OutgoingTransfer => {
            let fields: TransferFields = serde_json::from_value(envelope.instance.clone())?;
            let transfer = Transfer::try_from(fields)?;
            match tag {
                VariantTag::IncomingTransfer => Transaction::IncomingTransfer(transfer),
                VariantTag::OutgoingTransfer => Transaction::OutgoingTransfer(transfer),
                _ => Transaction::Transfer(transfer),
            }
        }
    };
    Ok(transaction)
}

/// Encodes a whole account as a pretty-printed JSON array of envelopes.
pub fn encode_all(transactions: &[Transaction]) -> LedgerResult<String> {
    let envelopes: Vec<EnvelopeRef<'_>> = transactions.iter().map(EnvelopeRef::from).collect();
    Ok(serde_json::to_string_pretty(&envelopes)?)
}

/// Parses a JSON array of envelopes; the first bad entry fails the document.
pub fn decode_all(json: &str) -> LedgerResult<Vec<Transaction>> {
    let envelopes: Vec<Envelope> = serde_json::from_str(json)?;
    envelopes.iter().map(decode).collect()
}
