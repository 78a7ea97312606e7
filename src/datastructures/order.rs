use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for `POST /v2/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Order {
    pub symbol: String,
    pub qty: u32,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
}

impl Order {
    /// Market order that stays open until cancelled.
    pub fn market(symbol: impl Into<String>, side: OrderSide, qty: u32) -> Self {
        Order {
            symbol: symbol.into(),
            qty,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, {})",
            self.side.as_str(),
            self.qty,
            self.symbol,
            self.order_type.as_str(),
            self.time_in_force.as_str()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
    TrailingStop,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop_limit",
            OrderType::TrailingStop => "trailing_stop",
        }
    }
}

/// Docs: https://docs.alpaca.markets/docs/orders-at-alpaca#time-in-force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    Day,
    Gtc,
    Opg,
    Cls,
    Ioc,
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Day => "day",
            TimeInForce::Gtc => "gtc",
            TimeInForce::Opg => "opg",
            TimeInForce::Cls => "cls",
            TimeInForce::Ioc => "ioc",
            TimeInForce::Fok => "fok",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn market_order_serializes_to_alpaca_body() {
        let order = Order::market("AAPL", OrderSide::Buy, 10);
        let body = serde_json::to_value(&order).unwrap();
        assert_eq!(
            body,
            json!({
                "symbol": "AAPL",
                "qty": 10,
                "side": "buy",
                "type": "market",
                "time_in_force": "gtc"
            })
        );
    }

    #[test]
    fn display_is_readable() {
        let order = Order::market("AAPL", OrderSide::Sell, 1);
        assert_eq!(order.to_string(), "sell 1 AAPL (market, gtc)");
    }

    #[test]
    fn multi_word_order_types_use_snake_case() {
        let value = serde_json::to_value(OrderType::TrailingStop).unwrap();
        assert_eq!(value, json!("trailing_stop"));
        assert_eq!(OrderType::TrailingStop.as_str(), "trailing_stop");
    }
}
