use serde::Deserialize;

/// Body of `GET /v2/stocks/{symbol}/trades/latest`.
/// Docs: https://docs.alpaca.markets/reference/stocklatesttradesingle-1
#[derive(Debug, Deserialize)]
pub struct LatestTradeResponse {
    pub trade: Option<Trade>,
}

/// Only the price is read; every other trade field is ignored.
#[derive(Debug, Deserialize)]
pub struct Trade {
    #[serde(rename = "p")]
    pub price: Option<f64>,
}

impl LatestTradeResponse {
    pub fn price(&self) -> Option<f64> {
        self.trade.as_ref().and_then(|trade| trade.price)
    }
}
