use super::account::{Account, AuthenticatedUser, User, UserCredentials};
use super::money::Balance;
use super::transfer::{NewTransfer, Transfer, TransferStatus};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, credentials: &UserCredentials) -> Result<()>;
    async fn login(&self, credentials: &UserCredentials) -> Result<AuthenticatedUser>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn account_for_user(&self, user_id: i64) -> Result<Account>;
    async fn account_by_id(&self, account_id: i64) -> Result<Account>;
    async fn balance(&self, user_id: i64) -> Result<Balance>;
    async fn all_users(&self) -> Result<Vec<User>>;
    async fn user_by_id(&self, user_id: i64) -> Result<User>;
}

#[async_trait]
pub trait TransferApi: Send + Sync {
    async fn create(&self, new_transfer: NewTransfer) -> Result<Transfer>;
    async fn transfer_by_id(&self, transfer_id: i64) -> Result<Transfer>;
    async fn history_for_account(&self, account_id: i64) -> Result<Vec<Transfer>>;
    async fn pending_for_account(&self, account_id: i64) -> Result<Vec<Transfer>>;
    async fn update_status(&self, transfer_id: i64, status: TransferStatus) -> Result<Transfer>;
}

pub type AuthApiBox = Box<dyn AuthApi>;
pub type AccountApiBox = Box<dyn AccountApi>;
pub type TransferApiBox = Box<dyn TransferApi>;
