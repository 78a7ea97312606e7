use crate::datastructures::{
    client::TradingClient,
    config::{Config, Credentials},
    order::Order,
    result::ActionResult,
    trade::LatestTradeResponse,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, InvalidHeaderValue, CONTENT_TYPE},
    Client as HttpClient, StatusCode,
};
use tracing::{debug, info, warn};
use url::Url;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct AlpacaClient {
    http_client: HttpClient,
    base_url: String,
    data_url: String,
    credentials: Credentials,
}

impl AlpacaClient {
    pub fn new(config: &Config) -> Self {
        AlpacaClient {
            http_client: HttpClient::new(),
            base_url: config.alpaca_base_url.clone(),
            data_url: config.alpaca_data_url.clone(),
            credentials: config.credentials.clone(),
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", self.credentials.key_id.parse()?);
        headers.insert("APCA-API-SECRET-KEY", self.credentials.secret.parse()?);
        Ok(headers)
    }

    async fn post_order(&self, order: &Order) -> Result<(StatusCode, String), BoxError> {
        let url = endpoint(&self.base_url, &["v2", "orders"])?;
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, "application/json".parse()?);

        debug!(%url, %order, "Submitting order");

        let response = self
            .http_client
            .post(url)
            .headers(headers)
            .json(order)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn get_latest_trade(&self, symbol: &str) -> Result<(StatusCode, String), BoxError> {
        let url = endpoint(&self.data_url, &["v2", "stocks", symbol, "trades", "latest"])?;
        let headers = self.auth_headers()?;

        debug!(%url, "Fetching latest trade");

        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl TradingClient for AlpacaClient {
    /// Docs: https://docs.alpaca.markets/reference/postorder
    async fn submit_order(&self, order: &Order) -> ActionResult {
        match self.post_order(order).await {
            Ok((status, body)) => order_outcome(order, status, &body),
            Err(e) => {
                warn!(%order, error = %e, "Order request did not complete");
                ActionResult::Failure(format!("Error sending order: {e}"))
            }
        }
    }

    /// Docs: https://docs.alpaca.markets/reference/stocklatesttradesingle-1
    async fn fetch_latest_price(&self, symbol: &str) -> Option<f64> {
        match self.get_latest_trade(symbol).await {
            Ok((status, body)) if status == StatusCode::OK => {
                let price = parse_latest_price(&body);
                if price.is_none() {
                    warn!(symbol, body = %body, "Latest trade response has no price");
                }
                price
            }
            Ok((status, body)) => {
                warn!(symbol, %status, body = %body, "Error fetching price");
                None
            }
            Err(e) => {
                warn!(symbol, error = %e, "Exception while fetching price");
                None
            }
        }
    }
}

/// Joins `segments` onto `base`, percent-encoding each one.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, BoxError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Only 200 and 201 count as accepted; any other status reports the body verbatim.
fn order_outcome(order: &Order, status: StatusCode, body: &str) -> ActionResult {
    if status == StatusCode::OK || status == StatusCode::CREATED {
        info!(%order, %status, "Order accepted");
        ActionResult::Success(format!("Order sent successfully: {order}"))
    } else {
        warn!(%order, %status, body, "Order rejected");
        ActionResult::Failure(format!("Failed to send order: {body}"))
    }
}

fn parse_latest_price(body: &str) -> Option<f64> {
    serde_json::from_str::<LatestTradeResponse>(body)
        .ok()
        .and_then(|response| response.price())
}
