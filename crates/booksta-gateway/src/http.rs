//! `reqwest` implementation of the gateway traits.

use async_trait::async_trait;
use booksta_model::{
    Book, BookWithReadingStatus, InventoryDraft, InventoryItem, Isbn, MarketplaceListing, Report,
    ReportId, ReportResolution, SellerListing,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::endpoints;
use crate::error::{GatewayError, Result};
use crate::source::{
    CollectionSource, DetailSource, InventoryGateway, RelationshipGateway, RelationshipKind,
    RelationshipTarget, ReportGateway,
};

const USER_AGENT_VALUE: &str = concat!("booksta-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Booksta REST API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockUpdate {
    quantity: u32,
    price_per_unit: f64,
}

#[derive(Deserialize)]
struct FavoriteEntry {
    isbn: Isbn,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| GatewayError::InvalidConfig(format!("invalid access token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Maps non-success statuses onto [`GatewayError`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "request failed: {}", body);
        Err(GatewayError::from_status(status.as_u16(), body))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn is_favorite(&self, isbn: &Isbn) -> Result<bool> {
        let favorites: Vec<FavoriteEntry> = self.get_json(endpoints::FAVORITES).await?;
        Ok(favorites.iter().any(|entry| &entry.isbn == isbn))
    }
}

/// Builds the multipart body of a resolve request: one JSON `data` part.
pub fn resolution_form(resolution: &ReportResolution) -> Result<Form> {
    let data = serde_json::to_string(resolution)?;
    let part = Part::text(data).mime_str("application/json")?;
    Ok(Form::new().part("data", part))
}

#[async_trait]
impl CollectionSource<MarketplaceListing> for HttpGateway {
    async fn fetch_collection(&self) -> Result<Vec<MarketplaceListing>> {
        self.get_json(endpoints::MARKETPLACE_BOOKS).await
    }
}

#[async_trait]
impl DetailSource<Isbn, Vec<SellerListing>> for HttpGateway {
    async fn fetch_detail(&self, isbn: &Isbn) -> Result<Vec<SellerListing>> {
        self.get_json(&endpoints::marketplace_sellers(isbn)).await
    }
}

#[async_trait]
impl CollectionSource<Book> for HttpGateway {
    async fn fetch_collection(&self) -> Result<Vec<Book>> {
        self.get_json(endpoints::BOOKS).await
    }
}

#[async_trait]
impl CollectionSource<InventoryItem> for HttpGateway {
    async fn fetch_collection(&self) -> Result<Vec<InventoryItem>> {
        self.get_json(endpoints::INVENTORY).await
    }
}

#[async_trait]
impl CollectionSource<Report> for HttpGateway {
    async fn fetch_collection(&self) -> Result<Vec<Report>> {
        self.get_json(endpoints::REPORTS).await
    }
}

#[async_trait]
impl CollectionSource<BookWithReadingStatus> for HttpGateway {
    async fn fetch_collection(&self) -> Result<Vec<BookWithReadingStatus>> {
        self.get_json(endpoints::READING_SHELVES).await
    }
}

#[async_trait]
impl RelationshipGateway for HttpGateway {
    async fn mutate_relationship(
        &self,
        kind: RelationshipKind,
        target: &RelationshipTarget,
    ) -> Result<()> {
        let url = self.config.url(&endpoints::relationship(target));
        tracing::debug!(?kind, %target, "mutating relationship");
        let request = match kind {
            RelationshipKind::Follow => self.client.post(&url),
            RelationshipKind::Unfollow => self.client.delete(&url),
        };
        self.send_empty(request).await
    }

    async fn query_relationship_status(&self, target: &RelationshipTarget) -> Result<bool> {
        match target {
            RelationshipTarget::Favorite(isbn) => self.is_favorite(isbn).await,
            RelationshipTarget::Author(_) | RelationshipTarget::Series(_) => {
                self.get_json(&endpoints::relationship(target)).await
            }
        }
    }
}

#[async_trait]
impl InventoryGateway for HttpGateway {
    async fn create_item(&self, draft: &InventoryDraft) -> Result<InventoryItem> {
        let url = self.config.url(endpoints::INVENTORY);
        tracing::debug!(isbn = %draft.book_isbn, "POST {}", url);
        let response = self.client.post(&url).json(draft).send().await?;
        Self::decode(response).await
    }

    async fn update_item(&self, draft: &InventoryDraft) -> Result<InventoryItem> {
        let url = self.config.url(&endpoints::inventory_item(&draft.book_isbn));
        tracing::debug!("PUT {}", url);
        let body = StockUpdate {
            quantity: draft.quantity,
            price_per_unit: draft.price_per_unit,
        };
        let response = self.client.put(&url).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn delete_item(&self, isbn: &Isbn) -> Result<()> {
        let url = self.config.url(&endpoints::inventory_item(isbn));
        tracing::debug!("DELETE {}", url);
        self.send_empty(self.client.delete(&url)).await
    }
}

#[async_trait]
impl ReportGateway for HttpGateway {
    async fn dismiss_report(&self, id: ReportId) -> Result<()> {
        let url = self.config.url(&endpoints::dismiss_report(id));
        tracing::debug!("POST {}", url);
        self.send_empty(self.client.post(&url)).await
    }

    async fn resolve_report(&self, id: ReportId, resolution: &ReportResolution) -> Result<()> {
        let url = self.config.url(&endpoints::resolve_report(id));
        tracing::debug!("POST {}", url);
        let form = resolution_form(resolution)?;
        self.send_empty(self.client.post(&url).multipart(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let config = GatewayConfig {
            base_url: "ftp://booksta".into(),
            ..GatewayConfig::default()
        };
        assert!(matches!(
            HttpGateway::new(config),
            Err(GatewayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_token_with_control_characters() {
        let config = GatewayConfig {
            access_token: Some("abc\ndef".into()),
            ..GatewayConfig::default()
        };
        assert!(matches!(
            HttpGateway::new(config),
            Err(GatewayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn builds_with_token() {
        let config = GatewayConfig {
            access_token: Some("secret".into()),
            ..GatewayConfig::default()
        };
        let gateway = HttpGateway::new(config).unwrap();
        assert_eq!(gateway.config().base_url, "http://localhost:8081/api");
    }

    #[test]
    fn resolution_form_has_data_part() {
        let form = resolution_form(&ReportResolution::MarkResolved).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
