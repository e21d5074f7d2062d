//! HTTP client for the inventory / POS REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    credentials::{AuthTokens, CredentialProvider},
    query::{ProductQuery, PurchaseOrderQuery, Query, SalesQuery, SalesReportQuery},
    types::{
        BatchInput, LoginRequest, ProductInput, PurchaseOrderInput, RefreshRequest, SaleRequest,
        Session, SupplierInput,
    },
    Error,
};

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the inventory API.
///
/// Every request carries the bearer token currently held by the injected
/// [`CredentialProvider`]. Response bodies are returned as raw JSON because
/// the server does not use one envelope shape across endpoints; unwrapping and
/// normalization happen in the layer above.
///
/// A 401 triggers one token refresh and a replay of the request. If that is
/// impossible the stored tokens are cleared and [`Error::Unauthorized`] is returned.
pub struct Client {
    base_api_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl Client {
    /// Creates a client for the given base URL with the default 30-second timeout.
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Result<Self, Error> {
        Self::with_timeout(base_url, credentials, REQUEST_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
            credentials,
        })
    }

    /// The credential store this client reads tokens from.
    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let mut request = self
            .http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*");
        if let Some(token) = self.credentials.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })
    }

    async fn read_body(&self, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Session rejected by server, clearing stored credentials");
            self.credentials.clear();
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str::<Value>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }

    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value, Error> {
        let resp = self
            .dispatch(method.clone(), url.clone(), body.as_ref())
            .await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return self.read_body(resp).await;
        }

        tracing::info!("Access token rejected, attempting refresh");
        self.refresh().await.map_err(|e| match e {
            Error::MissingRefreshToken => Error::Unauthorized,
            other => other,
        })?;
        let resp = self.dispatch(method, url, body.as_ref()).await?;
        self.read_body(resp).await
    }

    async fn get(&self, url: Url) -> Result<Value, Error> {
        self.send(Method::GET, url, None).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, Error> {
        let url = self.get_url(path)?;
        self.send(Method::POST, url, Some(to_json(body)?)).await
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, Error> {
        let url = self.get_url(path)?;
        self.send(Method::PUT, url, Some(to_json(body)?)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, Error> {
        let url = self.get_url(path)?;
        self.send(Method::DELETE, url, None).await
    }

    // -- Auth --

    /// Logs in and stores the issued tokens with the credential provider.
    ///
    /// Fails with [`Error::Unauthorized`] when the server answers without a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, Error> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let url = self.get_url("/auth/login")?;
        let resp = self
            .dispatch(Method::POST, url, Some(&to_json(&request)?))
            .await?;
        let payload = self.read_body(resp).await?;
        let payload = record_payload(&payload);

        let Some(tokens) = tokens_from(payload) else {
            tracing::warn!("Login response carried no token");
            return Err(Error::Unauthorized);
        };
        self.credentials.store(&tokens);

        Ok(Session {
            username: payload
                .get("username")
                .and_then(Value::as_str)
                .unwrap_or(username)
                .to_string(),
            role: payload
                .get("role")
                .and_then(Value::as_str)
                .unwrap_or("USER")
                .to_string(),
        })
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// On any failure the stored credentials are cleared.
    pub async fn refresh(&self) -> Result<String, Error> {
        let Some(refresh_token) = self.credentials.refresh_token() else {
            self.credentials.clear();
            return Err(Error::MissingRefreshToken);
        };
        let url = self.get_url("/auth/refresh")?;
        let body = to_json(&RefreshRequest { refresh_token })?;
        let resp = self.dispatch(Method::POST, url, Some(&body)).await?;
        let payload = match self.read_body(resp).await {
            Ok(payload) => payload,
            Err(e) => {
                self.credentials.clear();
                return Err(match e {
                    Error::HttpStatus { .. } => Error::Unauthorized,
                    other => other,
                });
            }
        };
        match tokens_from(record_payload(&payload)) {
            Some(tokens) => {
                self.credentials.store(&tokens);
                Ok(tokens.token)
            }
            None => {
                tracing::warn!("Refresh response carried no token");
                self.credentials.clear();
                Err(Error::Unauthorized)
            }
        }
    }

    /// Forgets the stored tokens. No request is sent.
    pub fn logout(&self) {
        self.credentials.clear();
    }

    // -- Products --

    /// Fetches a page of products.
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Value, Error> {
        let url = query.add_to_url(&self.get_url("/products")?);
        self.get(url).await
    }

    /// Fetches a single product by id.
    pub async fn get_product(&self, product_id: &str) -> Result<Value, Error> {
        self.get(self.get_url(format!("/products/{}", product_id).as_str())?)
            .await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Value, Error> {
        self.post("/products", input).await
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        input: &ProductInput,
    ) -> Result<Value, Error> {
        self.put(format!("/products/{}", product_id).as_str(), input)
            .await
    }

    // -- Suppliers --

    pub async fn get_suppliers(&self) -> Result<Value, Error> {
        self.get(self.get_url("/suppliers")?).await
    }

    pub async fn create_supplier(&self, input: &SupplierInput) -> Result<Value, Error> {
        self.post("/suppliers", input).await
    }

    pub async fn update_supplier(
        &self,
        supplier_id: &str,
        input: &SupplierInput,
    ) -> Result<Value, Error> {
        self.put(format!("/suppliers/{}", supplier_id).as_str(), input)
            .await
    }

    pub async fn delete_supplier(&self, supplier_id: &str) -> Result<(), Error> {
        self.delete(format!("/suppliers/{}", supplier_id).as_str())
            .await
            .map(|_| ())
    }

    // -- Purchase orders --

    pub async fn get_purchase_orders(&self, query: &PurchaseOrderQuery) -> Result<Value, Error> {
        let url = query.add_to_url(&self.get_url("/purchase-orders")?);
        self.get(url).await
    }

    pub async fn create_purchase_order(&self, input: &PurchaseOrderInput) -> Result<Value, Error> {
        self.post("/purchase-orders", input).await
    }

    pub async fn update_purchase_order(
        &self,
        order_id: &str,
        input: &PurchaseOrderInput,
    ) -> Result<Value, Error> {
        self.put(format!("/purchase-orders/{}", order_id).as_str(), input)
            .await
    }

    pub async fn delete_purchase_order(&self, order_id: &str) -> Result<(), Error> {
        self.delete(format!("/purchase-orders/{}", order_id).as_str())
            .await
            .map(|_| ())
    }

    // -- Stock --

    /// Registers a new stock batch for a product.
    pub async fn create_batch(&self, input: &BatchInput) -> Result<Value, Error> {
        self.post("/api/stock/batch", input).await
    }

    /// Fetches all batches held for one product.
    pub async fn get_stock_by_product(&self, product_id: &str) -> Result<Value, Error> {
        let mut url = self.get_url(format!("/api/stock/{}", product_id).as_str())?;
        url.query_pairs_mut().append_pair("productId", product_id);
        self.get(url).await
    }

    // -- Sales and reports --

    /// Fetches the sales report for an inclusive date range.
    pub async fn get_sales_report(&self, query: &SalesReportQuery) -> Result<Value, Error> {
        let url = query.add_to_url(&self.get_url("/reports/sales")?);
        self.get(url).await
    }

    /// Fetches products at or below their reorder level.
    pub async fn get_low_stock(&self) -> Result<Value, Error> {
        self.get(self.get_url("/reports/low-stock")?).await
    }

    pub async fn get_sales(&self, query: &SalesQuery) -> Result<Value, Error> {
        let url = query.add_to_url(&self.get_url("/api/sales")?);
        self.get(url).await
    }

    pub async fn get_sale(&self, sale_id: &str) -> Result<Value, Error> {
        self.get(self.get_url(format!("/api/sales/{}", sale_id).as_str())?)
            .await
    }

    /// Submits a POS checkout.
    pub async fn create_sale(&self, request: &SaleRequest) -> Result<Value, Error> {
        self.post("/api/sales", request).await
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, Error> {
    serde_json::to_value(body).map_err(|e| {
        tracing::error!("Failed to serialize request body: {}", e);
        Error::RequestFailed
    })
}

/// Auth endpoints answer either `{token, ...}` or `{data: {token, ...}}`.
fn record_payload(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    }
}

fn tokens_from(payload: &Value) -> Option<AuthTokens> {
    let token = payload.get("token").and_then(Value::as_str)?;
    if token.is_empty() {
        return None;
    }
    Some(AuthTokens {
        token: token.to_string(),
        refresh_token: payload
            .get("refreshToken")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
