use crate::datastructures::{
    client::TradingClient,
    order::{Order, OrderSide},
    result::ActionResult,
    ui::UserInterface,
};
use tracing::debug;

/// Quantity used by the stubbed sell/close keys.
pub const DEMO_QUANTITY: u32 = 1;

pub const INITIAL_STATUS: &str = "Waiting for key press...";

/// What a single key press does. Every character maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// `b`: prompt for symbol and quantity, confirm at the latest price, buy.
    Buy,
    /// `s`
    Sell,
    /// `c`: stand-in for closing the current position.
    Close,
    /// `p`: stand-in for closing a percentage of the position.
    ClosePercent,
    /// `t`: stand-in for a trailing stop exit.
    TrailingStop,
    Unmapped,
}

impl KeyAction {
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'b' => KeyAction::Buy,
            's' => KeyAction::Sell,
            'c' => KeyAction::Close,
            'p' => KeyAction::ClosePercent,
            't' => KeyAction::TrailingStop,
            _ => KeyAction::Unmapped,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            KeyAction::Buy => "Buy (with confirmation & dynamic price)",
            KeyAction::Sell => "Sell",
            KeyAction::Close => "Close Trade",
            KeyAction::ClosePercent => "Close % of Trade",
            KeyAction::TrailingStop => "Trailing Stop",
            KeyAction::Unmapped => "No action",
        }
    }
}

/// Key bindings in the order they are listed to the user.
pub const BINDINGS: [(char, KeyAction); 5] = [
    ('B', KeyAction::Buy),
    ('S', KeyAction::Sell),
    ('C', KeyAction::Close),
    ('P', KeyAction::ClosePercent),
    ('T', KeyAction::TrailingStop),
];

/// State shared by all key presses: the brokerage client, the UI, and the
/// last status line.
pub struct AppContext<C, U> {
    client: C,
    ui: U,
    demo_symbol: String,
    status: ActionResult,
}

impl<C, U> AppContext<C, U>
where
    C: TradingClient,
    U: UserInterface,
{
    pub fn new(client: C, ui: U, demo_symbol: impl Into<String>) -> Self {
        AppContext {
            client,
            ui,
            demo_symbol: demo_symbol.into(),
            status: ActionResult::Info(INITIAL_STATUS.to_string()),
        }
    }

    pub fn status(&self) -> &ActionResult {
        &self.status
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Runs the action bound to `key` to completion, shows the outcome and
    /// replaces the previous status with it.
    pub async fn handle_key(&mut self, key: char) -> &ActionResult {
        let action = KeyAction::from_key(key);
        debug!(?key, ?action, "Key pressed");

        let result = self.run(action).await;
        self.ui.show_result(&result);
        self.status = result;
        &self.status
    }

    async fn run(&mut self, action: KeyAction) -> ActionResult {
        match action {
            KeyAction::Buy => self.buy().await,
            KeyAction::Sell | KeyAction::Close | KeyAction::ClosePercent | KeyAction::TrailingStop => {
                // Placeholder: all exits sell a fixed demo lot.
                let order = Order::market(self.demo_symbol.as_str(), OrderSide::Sell, DEMO_QUANTITY);
                self.client.submit_order(&order).await
            }
            KeyAction::Unmapped => ActionResult::Info("No action mapped to this key.".to_string()),
        }
    }

    async fn buy(&mut self) -> ActionResult {
        let symbol = match self
            .ui
            .prompt_text("Input", "Enter the symbol you want to buy:")
            .await
        {
            Some(symbol) if !symbol.trim().is_empty() => symbol.trim().to_uppercase(),
            _ => return ActionResult::Failure("Invalid symbol.".to_string()),
        };

        let quantity = self
            .ui
            .prompt_int("Input", &format!("Enter quantity for {symbol}:"), 1)
            .await
            .filter(|qty| *qty >= 1)
            .and_then(|qty| u32::try_from(qty).ok());
        let Some(quantity) = quantity else {
            return ActionResult::Failure("Invalid quantity.".to_string());
        };

        let Some(price) = self.client.fetch_latest_price(&symbol).await else {
            return ActionResult::Failure(format!("Could not fetch price for {symbol}."));
        };

        let info = format!("{symbol}\nCurrent Price: ${price:.2}\nQuantity: {quantity}");
        if !self
            .ui
            .confirm("Confirm Buy Order", &format!("Do you want to BUY?\n\n{info}"))
            .await
        {
            return ActionResult::Info("Buy order cancelled.".to_string());
        }

        let result = self
            .client
            .submit_order(&Order::market(symbol.as_str(), OrderSide::Buy, quantity))
            .await;
        if result.is_success() {
            self.ui.show_result(&ActionResult::Success(format!(
                "Buy order for {quantity} shares of {symbol} at ${price:.2} executed successfully!"
            )));
        }
        result
    }
}
