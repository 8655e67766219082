use crate::domain::account::{AuthenticatedUser, User};
use crate::domain::money::{Amount, Balance};
use crate::domain::ports::{AccountApi, TransferApi};
use crate::domain::transfer::{NewTransfer, Transfer, TransferKind, TransferStatus};
use crate::error::{ClientError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// Which way a transfer moves funds relative to the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming => write!(f, "incoming"),
            Self::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// One line of the transfer history, resolved against the session user:
/// direction plus the counterparty's username.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRow {
    pub transfer_id: i64,
    pub direction: Direction,
    pub counterparty: String,
    pub kind: TransferKind,
    pub status: TransferStatus,
    pub amount: Amount,
}

/// Full detail view of a single transfer, with both usernames resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDetails {
    pub transfer_id: i64,
    pub from_username: String,
    pub to_username: String,
    pub kind: TransferKind,
    pub status: TransferStatus,
    pub amount: Amount,
}

/// The workflows available to a logged-in user.
///
/// `Session` holds the backend ports and the user's own account id, and runs
/// the client-side guard checks before handing an operation to the backend.
/// The backend enforces the same rules again.
pub struct Session<'a> {
    accounts: &'a dyn AccountApi,
    transfers: &'a dyn TransferApi,
    user: AuthenticatedUser,
    account_id: i64,
}

impl<'a> Session<'a> {
    /// Opens a session for a logged-in user, resolving their account id once.
    pub async fn open(
        accounts: &'a dyn AccountApi,
        transfers: &'a dyn TransferApi,
        user: AuthenticatedUser,
    ) -> Result<Session<'a>> {
        let account = accounts.account_for_user(user.user.id).await?;
        Ok(Session {
            accounts,
            transfers,
            user,
            account_id: account.account_id,
        })
    }

    pub fn username(&self) -> &str {
        &self.user.user.username
    }

    pub fn user_id(&self) -> i64 {
        self.user.user.id
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }

    pub async fn balance(&self) -> Result<Balance> {
        self.accounts.balance(self.user.user.id).await
    }

    /// Everyone except the session user, as candidates to send to or
    /// request from.
    pub async fn other_users(&self) -> Result<Vec<User>> {
        let mut users = self.accounts.all_users().await?;
        users.retain(|user| user.id != self.user.user.id);
        Ok(users)
    }

    /// Sends TE Bucks to another user. The transfer settles immediately.
    ///
    /// Guards: the recipient must not be the sender, the amount must be at
    /// least $0.01, and the sender's balance must cover it.
    pub async fn send_bucks(&self, to_user: i64, amount: Decimal) -> Result<Transfer> {
        let amount = Amount::new(amount)?;
        if to_user == self.user.user.id {
            return Err(ClientError::Validation(
                "cannot send TE Bucks to yourself".to_string(),
            ));
        }
        if amount.value() < Amount::minimum_send() {
            return Err(ClientError::Validation(
                "transfer amount must be at least $0.01".to_string(),
            ));
        }
        let balance = self.balance().await?;
        if Balance::from(amount) > balance {
            return Err(ClientError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }
        let to_account = self.accounts.account_for_user(to_user).await?;

        let transfer = self
            .transfers
            .create(NewTransfer {
                kind: TransferKind::Send,
                from_account: self.account_id,
                to_account: to_account.account_id,
                amount,
            })
            .await?;
        tracing::debug!(transfer_id = transfer.id, to_user, "sent {amount}");
        Ok(transfer)
    }

    /// Requests TE Bucks from another user. Creates a pending transfer with
    /// the counterparty on the paying side; no funds move until they approve.
    pub async fn request_bucks(&self, from_user: i64, amount: Decimal) -> Result<Transfer> {
        let amount = Amount::new(amount)?;
        if from_user == self.user.user.id {
            return Err(ClientError::Validation(
                "cannot request TE Bucks from yourself".to_string(),
            ));
        }
        let from_account = self.accounts.account_for_user(from_user).await?;

        let transfer = self
            .transfers
            .create(NewTransfer {
                kind: TransferKind::Request,
                from_account: from_account.account_id,
                to_account: self.account_id,
                amount,
            })
            .await?;
        tracing::debug!(transfer_id = transfer.id, from_user, "requested {amount}");
        Ok(transfer)
    }

    pub async fn transfer_history(&self) -> Result<Vec<Transfer>> {
        self.transfers.history_for_account(self.account_id).await
    }

    /// Pending requests awaiting this user's decision, i.e. pending
    /// transfers where the session user is the paying side.
    pub async fn pending_requests(&self) -> Result<Vec<Transfer>> {
        let mut pending = self.transfers.pending_for_account(self.account_id).await?;
        pending.retain(|transfer| transfer.from_account == self.account_id);
        Ok(pending)
    }

    /// Approves a pending request, settling the funds.
    ///
    /// Guards: the transfer must still be pending, the session user must be
    /// the paying side, and their balance must cover the amount.
    pub async fn approve(&self, transfer_id: i64) -> Result<Transfer> {
        let transfer = self.transfers.transfer_by_id(transfer_id).await?;
        if !transfer.is_pending() {
            return Err(ClientError::TransferNotPending(transfer_id));
        }
        if transfer.from_account != self.account_id {
            return Err(ClientError::Validation(
                "only the paying account can approve a request".to_string(),
            ));
        }
        let balance = self.balance().await?;
        if Balance::from(transfer.amount) > balance {
            return Err(ClientError::InsufficientFunds {
                balance,
                requested: transfer.amount,
            });
        }
        self.transfers
            .update_status(transfer_id, TransferStatus::Approved)
            .await
    }

    /// Rejects a pending request. No funds move.
    pub async fn reject(&self, transfer_id: i64) -> Result<Transfer> {
        let transfer = self.transfers.transfer_by_id(transfer_id).await?;
        if !transfer.is_pending() {
            return Err(ClientError::TransferNotPending(transfer_id));
        }
        if transfer.from_account != self.account_id {
            return Err(ClientError::Validation(
                "only the paying account can reject a request".to_string(),
            ));
        }
        self.transfers
            .update_status(transfer_id, TransferStatus::Rejected)
            .await
    }

    /// Resolves a transfer into a history line for the session user.
    pub async fn transfer_row(&self, transfer: &Transfer) -> Result<TransferRow> {
        let (direction, counterparty_account) = if transfer.from_account == self.account_id {
            (Direction::Outgoing, transfer.to_account)
        } else {
            (Direction::Incoming, transfer.from_account)
        };
        let account = self.accounts.account_by_id(counterparty_account).await?;
        let user = self.accounts.user_by_id(account.user_id).await?;
        Ok(TransferRow {
            transfer_id: transfer.id,
            direction,
            counterparty: user.username,
            kind: transfer.kind,
            status: transfer.status,
            amount: transfer.amount,
        })
    }

    pub async fn history_rows(&self) -> Result<Vec<TransferRow>> {
        let transfers = self.transfer_history().await?;
        let mut rows = Vec::with_capacity(transfers.len());
        for transfer in &transfers {
            rows.push(self.transfer_row(transfer).await?);
        }
        Ok(rows)
    }

    pub async fn pending_rows(&self) -> Result<Vec<TransferRow>> {
        let transfers = self.pending_requests().await?;
        let mut rows = Vec::with_capacity(transfers.len());
        for transfer in &transfers {
            rows.push(self.transfer_row(transfer).await?);
        }
        Ok(rows)
    }

    pub async fn transfer_details(&self, transfer_id: i64) -> Result<TransferDetails> {
        let transfer = self.transfers.transfer_by_id(transfer_id).await?;
        let from = self.username_for_account(transfer.from_account).await?;
        let to = self.username_for_account(transfer.to_account).await?;
        Ok(TransferDetails {
            transfer_id: transfer.id,
            from_username: from,
            to_username: to,
            kind: transfer.kind,
            status: transfer.status,
            amount: transfer.amount,
        })
    }

    async fn username_for_account(&self, account_id: i64) -> Result<String> {
        let account = self.accounts.account_by_id(account_id).await?;
        let user = self.accounts.user_by_id(account.user_id).await?;
        Ok(user.username)
    }
}
