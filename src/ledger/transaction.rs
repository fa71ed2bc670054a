use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Money moved between two parties. The direction (if any) is carried by the
/// [`Transaction`] case wrapping it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    date: String,
    description: String,
    amount: f64,
    sender: Option<String>,
    recipient: Option<String>,
}

impl Transfer {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> LedgerResult<Self> {
        let mut transfer = Self::without_parties(date, description, amount)?;
        transfer.sender = Some(sender.into());
        transfer.recipient = Some(recipient.into());
        Ok(transfer)
    }

    /// Creates a transfer whose sender and recipient are not yet known.
    pub fn without_parties(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> LedgerResult<Self> {
        validate_transfer_amount(amount)?;
        Ok(Self {
            date: date.into(),
            description: description.into(),
            amount,
            sender: None,
            recipient: None,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Rejects negative amounts and keeps the previous value on failure.
    pub fn set_amount(&mut self, amount: f64) -> LedgerResult<()> {
        validate_transfer_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    pub fn set_sender(&mut self, sender: Option<String>) {
        self.sender = sender;
    }

    pub fn set_recipient(&mut self, recipient: Option<String>) {
        self.recipient = recipient;
    }

    pub fn validate(&self) -> LedgerResult<()> {
        validate_transfer_amount(self.amount)
    }
}

/// A deposit or withdrawal that is charged interest on settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    date: String,
    description: String,
    amount: f64,
    incoming_interest: f64,
    outgoing_interest: f64,
}

impl Payment {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        incoming_interest: f64,
        outgoing_interest: f64,
    ) -> LedgerResult<Self> {
        let mut payment = Self::without_interest(date, description, amount)?;
        payment.set_incoming_interest(incoming_interest)?;
        payment.set_outgoing_interest(outgoing_interest)?;
        Ok(payment)
    }

    /// Creates a payment with both interests at zero.
    pub fn without_interest(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> LedgerResult<Self> {
        validate_payment_amount(amount)?;
        Ok(Self {
            date: date.into(),
            description: description.into(),
            amount,
            incoming_interest: 0.0,
            outgoing_interest: 0.0,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn incoming_interest(&self) -> f64 {
        self.incoming_interest
    }

    pub fn outgoing_interest(&self) -> f64 {
        self.outgoing_interest
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Rejects a zero amount and keeps the previous value on failure.
    pub fn set_amount(&mut self, amount: f64) -> LedgerResult<()> {
        validate_payment_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    pub fn set_incoming_interest(&mut self, interest: f64) -> LedgerResult<()> {
        self.incoming_interest = validate_interest("incoming", interest)?;
        Ok(())
    }

    pub fn set_outgoing_interest(&mut self, interest: f64) -> LedgerResult<()> {
        self.outgoing_interest = validate_interest("outgoing", interest)?;
        Ok(())
    }

    pub fn validate(&self) -> LedgerResult<()> {
        validate_payment_amount(self.amount)?;
        validate_interest("incoming", self.incoming_interest)?;
        validate_interest("outgoing", self.outgoing_interest)?;
        Ok(())
    }

    fn settle(&self) -> f64 {
        if self.amount > 0.0 {
            self.amount - self.amount * self.incoming_interest
        } else if self.amount < 0.0 {
            self.amount + self.amount * self.outgoing_interest
        } else {
            0.0
        }
    }
}

/// One financial event held by a ledger account.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Transfer(Transfer),
    IncomingTransfer(Transfer),
    OutgoingTransfer(Transfer),
    Payment(Payment),
}

impl Transaction {
    pub fn transfer(transfer: Transfer) -> Self {
        Transaction::Transfer(transfer)
    }

    pub fn incoming(transfer: Transfer) -> Self {
        Transaction::IncomingTransfer(transfer)
    }

    pub fn outgoing(transfer: Transfer) -> Self {
        Transaction::OutgoingTransfer(transfer)
    }

    /// Signed effect of the transaction on its account's balance.
    pub fn settle(&self) -> f64 {
        match self {
            Transaction::Transfer(transfer) | Transaction::IncomingTransfer(transfer) => {
                transfer.amount
            }
            Transaction::OutgoingTransfer(transfer) => -transfer.amount,
            Transaction::Payment(payment) => payment.settle(),
        }
    }

    pub fn validate(&self) -> LedgerResult<()> {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.validate(),
            Transaction::Payment(payment) => payment.validate(),
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.date(),
            Transaction::Payment(payment) => payment.date(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.description(),
            Transaction::Payment(payment) => payment.description(),
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.amount,
            Transaction::Payment(payment) => payment.amount,
        }
    }

    /// Applies the amount rule of the concrete case.
    pub fn set_amount(&mut self, amount: f64) -> LedgerResult<()> {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.set_amount(amount),
            Transaction::Payment(payment) => payment.set_amount(amount),
        }
    }

    pub fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => Some(transfer),
            Transaction::Payment(_) => None,
        }
    }

    pub fn as_payment(&self) -> Option<&Payment> {
        match self {
            Transaction::Payment(payment) => Some(payment),
            _ => None,
        }
    }
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Transaction::Payment(payment)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date())?;
        writeln!(f, "Description: {}", self.description())?;
        writeln!(f, "Amount: {:?}", self.amount())?;
        writeln!(f, "Calculated amount: {:?}", self.settle())?;
        match self {
            Transaction::Payment(payment) => {
                writeln!(f, "Incoming Interest: {:?}", payment.incoming_interest)?;
                writeln!(f, "Outgoing Interest: {:?}", payment.outgoing_interest)
            }
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => {
                writeln!(f, "Sender: {}", transfer.sender().unwrap_or("-"))?;
                writeln!(f, "Recipient: {}", transfer.recipient().unwrap_or("-"))
            }
        }
    }
}

/// Field layout of a persisted transfer, validated on conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferFields {
    date: String,
    description: String,
    amount: f64,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
}

impl TryFrom<TransferFields> for Transfer {
    type Error = LedgerError;

    fn try_from(fields: TransferFields) -> LedgerResult<Self> {
        let mut transfer =
            Transfer::without_parties(fields.date, fields.description, fields.amount)?;
        transfer.sender = fields.sender;
        transfer.recipient = fields.recipient;
        Ok(transfer)
    }
}

/// Field layout of a persisted payment, validated on conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentFields {
    date: String,
    description: String,
    amount: f64,
    #[serde(default)]
    incoming_interest: f64,
    #[serde(default)]
    outgoing_interest: f64,
}

impl TryFrom<PaymentFields> for Payment {
    type Error = LedgerError;

    fn try_from(fields: PaymentFields) -> LedgerResult<Self> {
        Payment::new(
            fields.date,
            fields.description,
            fields.amount,
            fields.incoming_interest,
            fields.outgoing_interest,
        )
    }
}

fn validate_transfer_amount(amount: f64) -> LedgerResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidValue(format!(
            "transfer amount must be finite and not negative, got {amount}"
        )));
    }
    Ok(())
}

fn validate_payment_amount(amount: f64) -> LedgerResult<()> {
    if amount == 0.0 {
        return Err(LedgerError::InvalidAttribute(
            "payment amount must not be zero".into(),
        ));
    }
    if !amount.is_finite() {
        return Err(LedgerError::InvalidValue(format!(
            "payment amount must be finite, got {amount}"
        )));
    }
    Ok(())
}

/// Checks that an interest rate lies in `[0, 1]`.
pub(crate) fn validate_interest(label: &str, interest: f64) -> LedgerResult<f64> {
    if (0.0..=1.0).contains(&interest) {
        Ok(interest)
    } else {
        Err(LedgerError::InvalidValue(format!(
            "{label} interest must lie within [0, 1], got {interest}"
        )))
    }
}
