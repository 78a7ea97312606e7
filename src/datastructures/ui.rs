use super::result::ActionResult;
use async_trait::async_trait;

/// Everything the dispatcher needs from whoever is sitting at the keyboard.
#[async_trait]
pub trait UserInterface: Send {
    /// `None` when the user cancels.
    async fn prompt_text(&mut self, title: &str, prompt: &str) -> Option<String>;
    /// `None` when the user cancels. Implementations may re-ask until the
    /// answer is at least `min`, but callers still validate.
    async fn prompt_int(&mut self, title: &str, prompt: &str, min: i64) -> Option<i64>;
    async fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn show_result(&mut self, result: &ActionResult);
}
