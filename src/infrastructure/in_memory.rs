use crate::domain::account::{Account, AuthenticatedUser, User, UserCredentials};
use crate::domain::money::Balance;
use crate::domain::ports::{AccountApi, AuthApi, TransferApi};
use crate::domain::transfer::{NewTransfer, Transfer, TransferStatus};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const FIRST_USER_ID: i64 = 1001;
const FIRST_ACCOUNT_ID: i64 = 2001;
const FIRST_TRANSFER_ID: i64 = 3001;

/// Every new account starts with 1000.00 TE Bucks.
fn opening_balance() -> Balance {
    Balance::new(Decimal::new(100_000, 2))
}

struct StoredUser {
    user: User,
    password: String,
}

struct State {
    users: Vec<StoredUser>,
    accounts: HashMap<i64, Account>,
    transfers: HashMap<i64, Transfer>,
    next_user_id: i64,
    next_account_id: i64,
    next_transfer_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            accounts: HashMap::new(),
            transfers: HashMap::new(),
            next_user_id: FIRST_USER_ID,
            next_account_id: FIRST_ACCOUNT_ID,
            next_transfer_id: FIRST_TRANSFER_ID,
        }
    }
}

/// An in-process backend with the same semantics as the remote API.
///
/// Uses `Arc<RwLock<State>>` to allow shared concurrent access; every
/// mutating operation runs under a single write lock, so a `Send` or an
/// approval settles atomically. Serves `--offline` mode and the tests.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    state: Arc<RwLock<State>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthApi for InMemoryBackend {
    async fn register(&self, credentials: &UserCredentials) -> Result<()> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(ClientError::Validation(
                "username and password must not be empty".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.user.username == username) {
            return Err(ClientError::Validation(format!(
                "username '{username}' is already taken"
            )));
        }

        let user_id = state.next_user_id;
        state.next_user_id += 1;
        let account_id = state.next_account_id;
        state.next_account_id += 1;

        state.users.push(StoredUser {
            user: User {
                id: user_id,
                username: username.to_string(),
            },
            password: credentials.password.clone(),
        });
        state
            .accounts
            .insert(account_id, Account::new(account_id, user_id, opening_balance()));
        Ok(())
    }

    async fn login(&self, credentials: &UserCredentials) -> Result<AuthenticatedUser> {
        let state = self.state.read().await;
        let stored = state
            .users
            .iter()
            .find(|u| u.user.username == credentials.username.trim())
            .ok_or(ClientError::AuthenticationFailed)?;
        if stored.password != credentials.password {
            return Err(ClientError::AuthenticationFailed);
        }
        Ok(AuthenticatedUser {
            user: stored.user.clone(),
            token: format!("offline-{}", stored.user.id),
        })
    }
}

#[async_trait]
impl AccountApi for InMemoryBackend {
    async fn account_for_user(&self, user_id: i64) -> Result<Account> {
        let state = self.state.read().await;
        state
            .accounts
            .values()
            .find(|account| account.user_id == user_id)
            .cloned()
            .ok_or(ClientError::UnknownUser(user_id))
    }

    async fn account_by_id(&self, account_id: i64) -> Result<Account> {
        let state = self.state.read().await;
        state
            .accounts
            .get(&account_id)
            .cloned()
            .ok_or(ClientError::UnknownAccount(account_id))
    }

    async fn balance(&self, user_id: i64) -> Result<Balance> {
        Ok(self.account_for_user(user_id).await?.balance)
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.iter().map(|u| u.user.clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn user_by_id(&self, user_id: i64) -> Result<User> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .map(|u| &u.user)
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or(ClientError::UnknownUser(user_id))
    }
}

#[async_trait]
impl TransferApi for InMemoryBackend {
    async fn create(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        if new_transfer.from_account == new_transfer.to_account {
            return Err(ClientError::Validation(
                "a transfer must involve two distinct accounts".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        for account_id in [new_transfer.from_account, new_transfer.to_account] {
            if !state.accounts.contains_key(&account_id) {
                return Err(ClientError::UnknownAccount(account_id));
            }
        }

        let status = new_transfer.initial_status();
        if status == TransferStatus::Approved {
            // A Send settles on creation: debit first so a failed withdrawal
            // leaves no trace of the transfer.
            let from = state
                .accounts
                .get_mut(&new_transfer.from_account)
                .ok_or(ClientError::UnknownAccount(new_transfer.from_account))?;
            from.withdraw(new_transfer.amount)?;
            let to = state
                .accounts
                .get_mut(&new_transfer.to_account)
                .ok_or(ClientError::UnknownAccount(new_transfer.to_account))?;
            to.deposit(new_transfer.amount);
        }

        let id = state.next_transfer_id;
        state.next_transfer_id += 1;
        let transfer = Transfer {
            id,
            kind: new_transfer.kind,
            status,
            from_account: new_transfer.from_account,
            to_account: new_transfer.to_account,
            amount: new_transfer.amount,
        };
        state.transfers.insert(id, transfer.clone());
        Ok(transfer)
    }

    async fn transfer_by_id(&self, transfer_id: i64) -> Result<Transfer> {
        let state = self.state.read().await;
        state
            .transfers
            .get(&transfer_id)
            .cloned()
            .ok_or(ClientError::UnknownTransfer(transfer_id))
    }

    async fn history_for_account(&self, account_id: i64) -> Result<Vec<Transfer>> {
        let state = self.state.read().await;
        let mut transfers: Vec<Transfer> = state
            .transfers
            .values()
            .filter(|transfer| transfer.involves(account_id))
            .cloned()
            .collect();
        transfers.sort_by_key(|transfer| transfer.id);
        Ok(transfers)
    }

    async fn pending_for_account(&self, account_id: i64) -> Result<Vec<Transfer>> {
        let state = self.state.read().await;
        let mut transfers: Vec<Transfer> = state
            .transfers
            .values()
            .filter(|transfer| transfer.is_pending() && transfer.involves(account_id))
            .cloned()
            .collect();
        transfers.sort_by_key(|transfer| transfer.id);
        Ok(transfers)
    }

    async fn update_status(&self, transfer_id: i64, status: TransferStatus) -> Result<Transfer> {
        let mut state = self.state.write().await;
        let stored = state
            .transfers
            .get(&transfer_id)
            .ok_or(ClientError::UnknownTransfer(transfer_id))?;
        if !stored.is_pending() {
            return Err(ClientError::TransferNotPending(transfer_id));
        }
        let (from_id, to_id, amount) = (stored.from_account, stored.to_account, stored.amount);

        match status {
            TransferStatus::Pending => {
                return Err(ClientError::Validation(
                    "a transfer cannot be reset to pending".to_string(),
                ));
            }
            TransferStatus::Approved => {
                // Settle before flipping the status; an overdraw aborts with
                // the transfer still pending.
                let from = state
                    .accounts
                    .get_mut(&from_id)
                    .ok_or(ClientError::UnknownAccount(from_id))?;
                from.withdraw(amount)?;
                let to = state
                    .accounts
                    .get_mut(&to_id)
                    .ok_or(ClientError::UnknownAccount(to_id))?;
                to.deposit(amount);
            }
            TransferStatus::Rejected => {}
        }

        let transfer = state
            .transfers
            .get_mut(&transfer_id)
            .ok_or(ClientError::UnknownTransfer(transfer_id))?;
        if status == TransferStatus::Approved {
            transfer.approve()?;
        } else {
            transfer.reject()?;
        }
        Ok(transfer.clone())
    }
}
