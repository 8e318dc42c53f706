//! Asynchronous client for the RouteMind REST backend.
//!
//! - Attaches the session's bearer token to every request.
//! - On a 401, rotates the access token once through `token/refresh/` and
//!   retries; a failed refresh clears the session. Refreshes are serialised:
//!   requests rejected with the same token share one refresh call.
//! - Decodes the backend's serializer shapes (integer foreign keys, decimal
//!   strings, nested `*_details` objects) into the domain entities.
//! - Keeps the destination rate table in a TTL cache with stale fallback.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{
    outstanding_balance, Client as Customer, Currency, Invoice, InvoiceStatus, PaymentMethod,
    PaymentRecord, RateTable, Shipment, ShipmentHistoryEvent, ShipmentStatus,
};
use crate::util::{
    serde_ext::{
        f64_from_json, option_f64_from_json, option_string_from_json, string_from_json,
        vec_string_from_json,
    },
    today_iso,
    version::user_agent,
};

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Collection paths, relative to the versioned API root.
pub mod endpoints {
    pub const LOGIN: &str = "token/";
    pub const REFRESH: &str = "token/refresh/";
    pub const USERS: &str = "users/";
    pub const SHIPMENTS: &str = "shipments/";
    pub const DESTINATIONS: &str = "destinations/";
    pub const ROUTES: &str = "routes/";
    pub const VEHICLES: &str = "vehicles/";
    pub const DRIVERS: &str = "drivers/";
    pub const CLIENTS: &str = "clients/";
    pub const COMPLAINTS: &str = "complaints/";
    pub const AUDIT_LOGS: &str = "audit-logs/";
    pub const INVOICES: &str = "invoices/";
    pub const PAYMENTS: &str = "payments/";
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("not authenticated")]
    Unauthorized,
    #[error("unexpected payload: {0}")]
    Decode(String),
}

/// Access/refresh token pair. Owned by the caller and handed to the client,
/// which updates it in place on refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl Session {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.is_some()
    }

    fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<Mutex<Session>>,
    /// Held for the whole token refresh round trip.
    refresh_lock: Arc<Mutex<()>>,
    rates: Arc<Mutex<Option<Cached<RateTable>>>>,
    ttl: Duration,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let base_url = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self {
            http,
            base_url,
            session: Arc::new(Mutex::new(Session::default())),
            refresh_lock: Arc::new(Mutex::new(())),
            rates: Arc::new(Mutex::new(None)),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_session(self, session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            ..self
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Snapshot of the current tokens, e.g. for persisting after a refresh.
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn logout(&self) {
        self.session.lock().await.clear();
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.url(endpoints::LOGIN)?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(email, "login rejected");
            return Err(ApiError::Unauthorized);
        }

        let pair: TokenPairDto = check_status(response).await?.json().await?;
        let mut session = self.session.lock().await;
        session.access = Some(pair.access);
        session.refresh = pair.refresh;
        tracing::info!(email, "logged in");
        Ok(session.clone())
    }

    /// Exchanges the refresh token for a new access token. Any failure clears
    /// the session and reports `Unauthorized`.
    pub async fn refresh_access(&self) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        self.rotate_tokens().await
    }

    /// Refreshes only if `rejected` is still the current access token. A
    /// request that waited on another refresh just retries with the new token.
    async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.session.lock().await.access.clone();
        if current.is_some() && current.as_deref() != rejected {
            tracing::debug!("access token already rotated by a concurrent request");
            return Ok(());
        }
        self.rotate_tokens().await
    }

    /// Callers must hold `refresh_lock`.
    async fn rotate_tokens(&self) -> Result<(), ApiError> {
        let refresh = self.session.lock().await.refresh.clone();
        let Some(refresh) = refresh else {
            self.logout().await;
            return Err(ApiError::Unauthorized);
        };

        let url = self.url(endpoints::REFRESH)?;
        let pair = match self
            .http
            .post(url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                response.json::<TokenPairDto>().await.ok()
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "token refresh rejected");
                None
            }
            Err(err) => {
                tracing::warn!("token refresh failed: {err}");
                None
            }
        };

        let mut session = self.session.lock().await;
        match pair {
            Some(pair) => {
                session.access = Some(pair.access);
                if let Some(rotated) = pair.refresh {
                    session.refresh = Some(rotated);
                }
                tracing::debug!("access token refreshed");
                Ok(())
            }
            None => {
                session.clear();
                Err(ApiError::Unauthorized)
            }
        }
    }

    pub async fn list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let response = self.send(Method::GET, endpoint, None).await?;
        let raw: serde_json::Value = response.json().await?;
        parse_collection(raw)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, id: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, &item_path(endpoint, id), None).await?;
        Ok(response.json().await?)
    }

    pub async fn create<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.send(Method::POST, endpoint, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn update<B, T>(&self, endpoint: &str, id: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self
            .send(Method::PUT, &item_path(endpoint, id), Some(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, endpoint: &str, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &item_path(endpoint, id), None)
            .await?;
        Ok(())
    }

    pub async fn destination_rates(&self) -> Result<CachedPayload<RateTable>, ApiError> {
        if let Some(payload) = self.cached_rates().await {
            return Ok(payload);
        }

        match self.list(endpoints::DESTINATIONS).await {
            Ok(rates) => {
                let table = RateTable::new(rates);
                tracing::debug!(rates = table.len(), "fetched destination rates");
                Ok(self.store_rates(table).await)
            }
            Err(error) => {
                if let Some(stale) = self.cached_rates_stale().await {
                    tracing::warn!("serving stale destination rates: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn clear_cache(&self) {
        *self.rates.lock().await = None;
    }

    pub async fn shipments(&self) -> Result<Vec<Shipment>, ApiError> {
        let rows: Vec<ShipmentDto> = self.list(endpoints::SHIPMENTS).await?;
        Ok(rows.into_iter().map(Shipment::from).collect())
    }

    pub async fn shipment(&self, id: &str) -> Result<Shipment, ApiError> {
        let row: ShipmentDto = self.get(endpoints::SHIPMENTS, id).await?;
        Ok(row.into())
    }

    pub async fn invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let rows: Vec<InvoiceDto> = self.list(endpoints::INVOICES).await?;
        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    pub async fn payments(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        let rows: Vec<PaymentDto> = self.list(endpoints::PAYMENTS).await?;
        Ok(rows.into_iter().map(PaymentRecord::from).collect())
    }

    pub async fn clients(&self) -> Result<Vec<Customer>, ApiError> {
        let rows: Vec<ClientDto> = self.list(endpoints::CLIENTS).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    pub async fn update_shipment(&self, shipment: &Shipment) -> Result<Shipment, ApiError> {
        let row: ShipmentDto = self
            .update(
                endpoints::SHIPMENTS,
                &shipment.id,
                &ShipmentWriteDto::from(shipment),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_invoice(&self, invoice: &Invoice) -> Result<Invoice, ApiError> {
        let row: InvoiceDto = self
            .update(endpoints::INVOICES, &invoice.id, &InvoiceWriteDto::from(invoice))
            .await?;
        Ok(row.into())
    }

    pub async fn create_payment(&self, payment: &PaymentRecord) -> Result<PaymentRecord, ApiError> {
        let row: PaymentDto = self
            .create(endpoints::PAYMENTS, &PaymentWriteDto::from(payment))
            .await?;
        Ok(PaymentRecord {
            currency: payment.currency,
            notes: payment.notes.clone(),
            ..PaymentRecord::from(row)
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        let (response, used) = self
            .dispatch(method.clone(), url.clone(), body.as_ref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response).await;
        }

        tracing::warn!(%url, "unauthorized; refreshing access token");
        self.refresh_after_rejection(used.as_deref()).await?;

        let (retry, _) = self.dispatch(method, url, body.as_ref()).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            self.logout().await;
            return Err(ApiError::Unauthorized);
        }
        check_status(retry).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<(Response, Option<String>), ApiError> {
        let token = self.session.lock().await.access.clone();
        let mut builder = self.http.request(method, url);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok((builder.send().await?, token))
    }

    async fn cached_rates(&self) -> Option<CachedPayload<RateTable>> {
        let cache = self.rates.lock().await;
        cache.as_ref().and_then(|entry| entry.if_fresh(self.ttl))
    }

    async fn cached_rates_stale(&self) -> Option<CachedPayload<RateTable>> {
        let cache = self.rates.lock().await;
        cache.as_ref().map(Cached::stale)
    }

    async fn store_rates(&self, table: RateTable) -> CachedPayload<RateTable> {
        let fetched_at = SystemTime::now();
        let payload = CachedPayload::new(table.clone(), fetched_at, CacheStatus::Fresh);
        *self.rates.lock().await = Some(Cached::new(table, fetched_at));
        payload
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[derive(Debug, Deserialize)]
struct TokenPairDto {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

/// Nested user as rendered by the backend's user serializer.
#[derive(Debug, Default, Deserialize)]
struct UserDetailsDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "option_f64_from_json")]
    balance: Option<f64>,
}

impl UserDetailsDto {
    fn display_name(&self) -> Option<String> {
        [&self.first_name, &self.name, &self.username]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .cloned()
    }
}

#[derive(Debug, Deserialize)]
struct DestinationDetailsDto {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ShipmentDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(deserialize_with = "string_from_json")]
    client: String,
    #[serde(default)]
    client_details: Option<UserDetailsDto>,
    #[serde(default, deserialize_with = "option_string_from_json")]
    destination: Option<String>,
    #[serde(default)]
    destination_details: Option<DestinationDetailsDto>,
    #[serde(deserialize_with = "f64_from_json")]
    weight: f64,
    #[serde(deserialize_with = "f64_from_json")]
    volume: f64,
    #[serde(deserialize_with = "f64_from_json")]
    price: f64,
    #[serde(default)]
    status: ShipmentStatus,
    #[serde(rename = "dateCreated", default)]
    date_created: Option<String>,
    #[serde(rename = "estimatedDelivery", default)]
    estimated_delivery: Option<String>,
    #[serde(default)]
    history: Option<Vec<ShipmentHistoryEvent>>,
    #[serde(rename = "routeId", default, deserialize_with = "option_string_from_json")]
    route_id: Option<String>,
    #[serde(rename = "isLocked", default)]
    is_locked: Option<bool>,
}

/// Keeps the date part of an ISO timestamp.
fn date_part(value: &str) -> String {
    value.split('T').next().unwrap_or_default().to_string()
}

impl From<ShipmentDto> for Shipment {
    fn from(dto: ShipmentDto) -> Self {
        let route_id = dto.route_id;
        Self {
            id: dto.id,
            client_id: dto.client,
            client_name: dto
                .client_details
                .as_ref()
                .and_then(UserDetailsDto::display_name)
                .unwrap_or_else(|| "Unknown".to_string()),
            destination_id: dto.destination.unwrap_or_default(),
            destination: dto
                .destination_details
                .map(|details| details.name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            weight: dto.weight,
            volume: dto.volume,
            price: dto.price,
            currency: None,
            status: dto.status,
            date_created: dto
                .date_created
                .as_deref()
                .map(date_part)
                .unwrap_or_else(today_iso),
            estimated_delivery: dto
                .estimated_delivery
                .as_deref()
                .map(date_part)
                .unwrap_or_default(),
            history: dto.history.unwrap_or_default(),
            is_locked: dto.is_locked.unwrap_or(route_id.is_some()),
            route_id,
            driver_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ShipmentWriteDto<'a> {
    client: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    weight: f64,
    volume: f64,
    price: String,
    status: ShipmentStatus,
    #[serde(rename = "estimatedDelivery")]
    estimated_delivery: Option<&'a str>,
    history: &'a [ShipmentHistoryEvent],
}

impl<'a> From<&'a Shipment> for ShipmentWriteDto<'a> {
    fn from(shipment: &'a Shipment) -> Self {
        Self {
            client: &shipment.client_id,
            destination: Some(shipment.destination_id.as_str()).filter(|id| !id.is_empty()),
            weight: shipment.weight,
            volume: shipment.volume,
            price: decimal(shipment.price),
            status: shipment.status,
            estimated_delivery: Some(shipment.estimated_delivery.as_str())
                .filter(|date| !date.is_empty()),
            history: &shipment.history,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InvoiceDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(deserialize_with = "string_from_json")]
    client: String,
    #[serde(default, deserialize_with = "vec_string_from_json")]
    shipments: Vec<String>,
    #[serde(deserialize_with = "f64_from_json")]
    amount_ht: f64,
    #[serde(deserialize_with = "f64_from_json")]
    tva: f64,
    #[serde(deserialize_with = "f64_from_json")]
    amount_ttc: f64,
    #[serde(default, deserialize_with = "option_f64_from_json")]
    paid_amount: Option<f64>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    status: InvoiceStatus,
    #[serde(default)]
    currency: Option<Currency>,
}

impl From<InvoiceDto> for Invoice {
    fn from(dto: InvoiceDto) -> Self {
        let paid_amount = dto.paid_amount.unwrap_or_default();
        Self {
            id: dto.id,
            client_id: dto.client,
            shipment_ids: dto.shipments,
            amount_ht: dto.amount_ht,
            tva: dto.tva,
            amount_ttc: dto.amount_ttc,
            paid_amount,
            outstanding_balance: outstanding_balance(dto.amount_ttc, paid_amount),
            date: dto.date,
            status: dto.status,
            currency: dto.currency,
        }
    }
}

#[derive(Debug, Serialize)]
struct InvoiceWriteDto<'a> {
    client: &'a str,
    shipments: &'a [String],
    amount_ht: String,
    tva: String,
    amount_ttc: String,
    paid_amount: String,
    date: &'a str,
    status: InvoiceStatus,
}

impl<'a> From<&'a Invoice> for InvoiceWriteDto<'a> {
    fn from(invoice: &'a Invoice) -> Self {
        Self {
            client: &invoice.client_id,
            shipments: &invoice.shipment_ids,
            amount_ht: decimal(invoice.amount_ht),
            tva: decimal(invoice.tva),
            amount_ttc: decimal(invoice.amount_ttc),
            paid_amount: decimal(invoice.paid_amount),
            date: &invoice.date,
            status: invoice.status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PaymentDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(deserialize_with = "string_from_json")]
    invoice: String,
    #[serde(deserialize_with = "f64_from_json")]
    amount: f64,
    #[serde(default)]
    date: String,
    #[serde(default)]
    method: String,
}

impl From<PaymentDto> for PaymentRecord {
    fn from(dto: PaymentDto) -> Self {
        let method = PaymentMethod::parse(&dto.method).unwrap_or_else(|| {
            tracing::debug!(method = %dto.method, "unknown payment method; assuming transfer");
            PaymentMethod::default()
        });
        Self {
            id: dto.id,
            invoice_id: dto.invoice,
            amount: dto.amount,
            date: dto.date,
            currency: Currency::default(),
            method,
            notes: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PaymentWriteDto<'a> {
    invoice: &'a str,
    amount: String,
    date: &'a str,
    method: &'static str,
}

impl<'a> From<&'a PaymentRecord> for PaymentWriteDto<'a> {
    fn from(payment: &'a PaymentRecord) -> Self {
        Self {
            invoice: &payment.invoice_id,
            amount: decimal(payment.amount),
            date: &payment.date,
            method: payment.method.label(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClientDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(default)]
    user_details: Option<UserDetailsDto>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "option_f64_from_json")]
    balance: Option<f64>,
}

impl From<ClientDto> for Customer {
    fn from(dto: ClientDto) -> Self {
        let user = dto.user_details.unwrap_or_default();
        let pick = |own: Option<String>, nested: &Option<String>| {
            own.filter(|value| !value.is_empty())
                .or_else(|| nested.clone())
                .unwrap_or_default()
        };
        Self {
            id: dto.id,
            name: dto
                .name
                .filter(|value| !value.is_empty())
                .or_else(|| user.display_name())
                .unwrap_or_else(|| "Unknown".to_string()),
            email: pick(dto.email, &user.email),
            phone: pick(dto.phone, &user.phone),
            address: pick(dto.address, &user.address),
            balance: dto.balance.or(user.balance).unwrap_or_default(),
        }
    }
}

/// Decimal fields accept at most two places.
fn decimal(value: f64) -> String {
    format!("{value:.2}")
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn item_path(endpoint: &str, id: &str) -> String {
    format!("{}/{id}/", endpoint.trim_end_matches('/'))
}

/// Collections come back either as a bare array or as a paginated page.
fn parse_collection<T: DeserializeOwned>(value: serde_json::Value) -> Result<Vec<T>, ApiError> {
    if value.is_array() {
        return serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()));
    }

    serde_json::from_value::<Page<T>>(value)
        .map(|page| page.results)
        .map_err(|err| ApiError::Decode(err.to_string()))
}
