use crate::domain::account::{Account, AuthenticatedUser, User, UserCredentials};
use crate::domain::money::Balance;
use crate::domain::ports::{AccountApi, AuthApi, TransferApi};
use crate::domain::transfer::{NewTransfer, Transfer, TransferStatus};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The remote TE Bucks API, spoken as JSON over REST.
///
/// Holds a reqwest client, the base URL and the bearer token issued at
/// login. Clones share the token, so the same backend instance can be boxed
/// once per port trait. Requests are not retried: a failure surfaces
/// directly and the user retries from the menu.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferDto {
    transfer_id: i64,
    transfer_type_id: i32,
    transfer_status_id: i32,
    account_from: i64,
    account_to: i64,
    amount: Decimal,
}

impl TryFrom<TransferDto> for Transfer {
    type Error = ClientError;

    fn try_from(dto: TransferDto) -> Result<Self> {
        Ok(Transfer {
            id: dto.transfer_id,
            kind: dto.transfer_type_id.try_into()?,
            status: dto.transfer_status_id.try_into()?,
            from_account: dto.account_from,
            to_account: dto.account_to,
            amount: dto.amount.try_into()?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTransferDto {
    transfer_type_id: i32,
    transfer_status_id: i32,
    account_from: i64,
    account_to: i64,
    amount: Decimal,
}

impl From<&NewTransfer> for NewTransferDto {
    fn from(new_transfer: &NewTransfer) -> Self {
        Self {
            transfer_type_id: new_transfer.kind.wire_id(),
            transfer_status_id: new_transfer.initial_status().wire_id(),
            account_from: new_transfer.from_account,
            account_to: new_transfer.to_account,
            amount: new_transfer.amount.value(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTransferStatusDto {
    transfer_status_id: i32,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let request = self.authorize(self.client.get(self.url(path))).await;
        Self::decode(request.send().await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "POST");
        let request = self.authorize(self.client.post(self.url(path)).json(body)).await;
        Self::decode(request.send().await?).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "PUT");
        let request = self.authorize(self.client.put(self.url(path)).json(body)).await;
        Self::decode(request.send().await?).await
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::AuthenticationFailed);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn register(&self, credentials: &UserCredentials) -> Result<()> {
        tracing::debug!("POST register");
        let response = self
            .client
            .post(self.url("register"))
            .json(credentials)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(&self, credentials: &UserCredentials) -> Result<AuthenticatedUser> {
        tracing::debug!("POST login");
        let response = self
            .client
            .post(self.url("login"))
            .json(credentials)
            .send()
            .await?;
        let auth: AuthResponse = Self::decode(response).await?;
        *self.token.write().await = Some(auth.token.clone());
        Ok(AuthenticatedUser {
            user: auth.user,
            token: auth.token,
        })
    }
}

#[async_trait]
impl AccountApi for HttpBackend {
    async fn account_for_user(&self, user_id: i64) -> Result<Account> {
        self.get_json(&format!("accounts/user/{user_id}")).await
    }

    async fn account_by_id(&self, account_id: i64) -> Result<Account> {
        self.get_json(&format!("accounts/{account_id}")).await
    }

    async fn balance(&self, user_id: i64) -> Result<Balance> {
        Ok(self.account_for_user(user_id).await?.balance)
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        self.get_json("users").await
    }

    async fn user_by_id(&self, user_id: i64) -> Result<User> {
        self.get_json(&format!("users/{user_id}")).await
    }
}

#[async_trait]
impl TransferApi for HttpBackend {
    async fn create(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        let dto: TransferDto = self
            .post_json("transfers", &NewTransferDto::from(&new_transfer))
            .await?;
        dto.try_into()
    }

    async fn transfer_by_id(&self, transfer_id: i64) -> Result<Transfer> {
        let dto: TransferDto = self.get_json(&format!("transfers/{transfer_id}")).await?;
        dto.try_into()
    }

    async fn history_for_account(&self, account_id: i64) -> Result<Vec<Transfer>> {
        let dtos: Vec<TransferDto> = self
            .get_json(&format!("transfers/account/{account_id}"))
            .await?;
        dtos.into_iter().map(Transfer::try_from).collect()
    }

    async fn pending_for_account(&self, account_id: i64) -> Result<Vec<Transfer>> {
        let dtos: Vec<TransferDto> = self
            .get_json(&format!("transfers/account/{account_id}/pending"))
            .await?;
        dtos.into_iter().map(Transfer::try_from).collect()
    }

    async fn update_status(&self, transfer_id: i64, status: TransferStatus) -> Result<Transfer> {
        let dto: TransferDto = self
            .put_json(
                &format!("transfers/{transfer_id}/status"),
                &UpdateTransferStatusDto {
                    transfer_status_id: status.wire_id(),
                },
            )
            .await?;
        dto.try_into()
    }
}
