use crate::domain::money::{Amount, Balance};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// A user's fund pool.
///
/// Tracks the owning user and the current balance. The balance never drops
/// below zero: debits go through [`Account::withdraw`], which refuses to
/// overdraw.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The unique identifier of the account.
    pub account_id: i64,
    /// The user that owns this account.
    pub user_id: i64,
    /// Current funds.
    pub balance: Balance,
}

impl Account {
    pub fn new(account_id: i64, user_id: i64, opening: Balance) -> Self {
        Self {
            account_id,
            user_id,
            balance: opening,
        }
    }

    /// Credits funds to the balance.
    pub fn deposit(&mut self, amount: Amount) {
        self.balance += amount.into();
    }

    /// Debits funds if the balance covers the amount.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), ClientError> {
        let debit = Balance::from(amount);
        if self.balance >= debit {
            self.balance -= debit;
            Ok(())
        } else {
            Err(ClientError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })
        }
    }
}

/// A registered user, as returned by the backend.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Credentials collected at the login prompt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

/// A logged-in user together with the bearer token issued at login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_deposit() {
        let mut account = Account::new(2001, 1001, Balance::ZERO);
        account.deposit(Amount::new(dec!(10.0)).unwrap());
        assert_eq!(account.balance, Balance::new(dec!(10.0)));
    }

    #[test]
    fn test_account_withdraw_success() {
        let mut account = Account::new(2001, 1001, Balance::new(dec!(10.0)));

        let result = account.withdraw(Amount::new(dec!(5.0)).unwrap());
        assert!(result.is_ok());
        assert_eq!(account.balance, Balance::new(dec!(5.0)));
    }

    #[test]
    fn test_account_withdraw_insufficient() {
        let mut account = Account::new(2001, 1001, Balance::new(dec!(10.0)));

        let result = account.withdraw(Amount::new(dec!(20.0)).unwrap());
        assert!(matches!(
            result,
            Err(ClientError::InsufficientFunds { .. })
        ));
        assert_eq!(account.balance, Balance::new(dec!(10.0)));
    }

    #[test]
    fn test_account_withdraw_entire_balance() {
        let mut account = Account::new(2001, 1001, Balance::new(dec!(10.0)));

        let result = account.withdraw(Amount::new(dec!(10.0)).unwrap());
        assert!(result.is_ok());
        assert_eq!(account.balance, Balance::ZERO);
    }
}
