use crate::domain::money::Amount;
use crate::error::ClientError;
use std::fmt;

/// Whether a transfer pulls funds toward the creator or pushes them away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Request,
    Send,
}

impl TransferKind {
    pub fn wire_id(self) -> i32 {
        match self {
            Self::Request => 1,
            Self::Send => 2,
        }
    }
}

impl TryFrom<i32> for TransferKind {
    type Error = ClientError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Request),
            2 => Ok(Self::Send),
            other => Err(ClientError::Validation(format!(
                "unknown transfer type id {other}"
            ))),
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "Request"),
            Self::Send => write!(f, "Send"),
        }
    }
}

/// Lifecycle state of a transfer. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
}

impl TransferStatus {
    pub fn wire_id(self) -> i32 {
        match self {
            Self::Pending => 1,
            Self::Approved => 2,
            Self::Rejected => 3,
        }
    }
}

impl TryFrom<i32> for TransferStatus {
    type Error = ClientError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pending),
            2 => Ok(Self::Approved),
            3 => Ok(Self::Rejected),
            other => Err(ClientError::Validation(format!(
                "unknown transfer status id {other}"
            ))),
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A recorded fund movement between two accounts.
///
/// `from_account` is the paying side. For a `Send` that is the creator's own
/// account; for a `Request` it is the counterparty being asked to pay.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub id: i64,
    pub kind: TransferKind,
    pub status: TransferStatus,
    pub from_account: i64,
    pub to_account: i64,
    pub amount: Amount,
}

impl Transfer {
    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    pub fn involves(&self, account_id: i64) -> bool {
        self.from_account == account_id || self.to_account == account_id
    }

    /// Marks the transfer approved. Fails unless the transfer is pending.
    pub fn approve(&mut self) -> Result<(), ClientError> {
        self.transition(TransferStatus::Approved)
    }

    /// Marks the transfer rejected. Fails unless the transfer is pending.
    pub fn reject(&mut self) -> Result<(), ClientError> {
        self.transition(TransferStatus::Rejected)
    }

    fn transition(&mut self, next: TransferStatus) -> Result<(), ClientError> {
        if self.is_pending() {
            self.status = next;
            Ok(())
        } else {
            Err(ClientError::TransferNotPending(self.id))
        }
    }
}

/// The fields needed to create a transfer. The backend assigns the id, and
/// the initial status follows from the kind: a `Send` settles immediately,
/// a `Request` starts out pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransfer {
    pub kind: TransferKind,
    pub from_account: i64,
    pub to_account: i64,
    pub amount: Amount,
}

impl NewTransfer {
    pub fn initial_status(&self) -> TransferStatus {
        match self.kind {
            TransferKind::Send => TransferStatus::Approved,
            TransferKind::Request => TransferStatus::Pending,
        }
    }
}
