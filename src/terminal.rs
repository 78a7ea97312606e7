use crate::datastructures::{result::ActionResult, ui::UserInterface};
use crate::dispatcher::{BINDINGS, INITIAL_STATUS};
use async_trait::async_trait;
use std::io::{self, Stdout, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Line-oriented terminal front end. One input line is one key press.
pub struct TerminalUi<R, W> {
    lines: Lines<R>,
    out: W,
}

impl TerminalUi<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        TerminalUi::new(BufReader::new(tokio::io::stdin()), io::stdout())
    }
}

impl<R, W> TerminalUi<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, out: W) -> Self {
        TerminalUi {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn show_banner(&mut self, demo_symbol: &str) -> io::Result<()> {
        writeln!(self.out, "Trading Order Executor")?;
        writeln!(self.out)?;
        writeln!(self.out, "Press keys (then Enter) to execute orders.")?;
        writeln!(self.out, "Only the first character of each line is used.")?;
        writeln!(self.out)?;
        for (key, action) in BINDINGS {
            writeln!(self.out, "{key}: {}", action.describe())?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Exit keys sell 1 share of {demo_symbol}.")?;
        writeln!(self.out, "Press any other key for no action.")?;
        writeln!(self.out, "Close input (Ctrl-D) to exit.")?;
        writeln!(self.out)?;
        writeln!(self.out, "Status: {INITIAL_STATUS}")?;
        self.out.flush()
    }

    /// Next key press, skipping blank and undecodable lines. `None` once
    /// input is closed or can no longer be read.
    pub async fn next_key(&mut self) -> Option<char> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(key) = line.trim().chars().next() {
                        return Some(key);
                    }
                }
                Ok(None) => return None,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %e, "Skipping unreadable key line");
                }
                Err(e) => {
                    warn!(error = %e, "Could not read key press, closing input");
                    return None;
                }
            }
        }
    }

    async fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.out, "{prompt} ").and_then(|_| self.out.flush()) {
            warn!(error = %e, "Could not write prompt");
        }
        match self.lines.next_line().await {
            Ok(line) => line.map(|l| l.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "Could not read answer");
                None
            }
        }
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "Could not write to terminal");
        }
    }
}

#[async_trait]
impl<R, W> UserInterface for TerminalUi<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn prompt_text(&mut self, title: &str, prompt: &str) -> Option<String> {
        self.ask(&format!("[{title}] {prompt}")).await
    }

    async fn prompt_int(&mut self, title: &str, prompt: &str, min: i64) -> Option<i64> {
        loop {
            let answer = self.ask(&format!("[{title}] {prompt}")).await?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<i64>() {
                Ok(value) if value >= min => return Some(value),
                Ok(_) => self.say(&format!("The allowed minimum value is {min}. Please try again.")),
                Err(_) => self.say("Not an integer. Please try again."),
            }
        }
    }

    async fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.say(&format!("[{title}]"));
        self.say(message);
        loop {
            let Some(answer) = self.ask("[y/N]").await else {
                return false;
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "" | "n" | "no" => return false,
                _ => self.say("Please answer y or n."),
            }
        }
    }

    fn show_result(&mut self, result: &ActionResult) {
        let tag = match result {
            ActionResult::Success(_) => "Success",
            ActionResult::Failure(_) => "Error",
            ActionResult::Info(_) => "Status",
        };
        self.say(&format!("{tag}: {result}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(input: &'static str) -> TerminalUi<BufReader<&'static [u8]>, Vec<u8>> {
        TerminalUi::new(BufReader::new(input.as_bytes()), Vec::new())
    }

    fn output(ui: TerminalUi<BufReader<&'static [u8]>, Vec<u8>>) -> String {
        String::from_utf8(ui.into_output()).unwrap()
    }

    #[tokio::test]
    async fn keys_are_first_characters_of_non_blank_lines() {
        let mut ui = ui("b\n\n   \n  sell\nx\n");
        assert_eq!(ui.next_key().await, Some('b'));
        assert_eq!(ui.next_key().await, Some('s'));
        assert_eq!(ui.next_key().await, Some('x'));
        assert_eq!(ui.next_key().await, None);
    }

    #[tokio::test]
    async fn undecodable_key_lines_are_skipped() {
        let input: &'static [u8] = b"\xff\xfe\nx\n\xc3\n";
        let mut ui = TerminalUi::new(BufReader::new(input), Vec::new());
        assert_eq!(ui.next_key().await, Some('x'));
        assert_eq!(ui.next_key().await, None);
    }

    #[tokio::test]
    async fn text_prompt_is_cancelled_by_end_of_input() {
        let mut ui = ui(" aapl \n");
        assert_eq!(ui.prompt_text("Input", "Symbol:").await, Some("aapl".to_string()));
        assert_eq!(ui.prompt_text("Input", "Symbol:").await, None);
    }

    #[tokio::test]
    async fn int_prompt_reasks_until_valid() {
        let mut ui = ui("ten\n0\n10\n");
        assert_eq!(ui.prompt_int("Input", "Quantity:", 1).await, Some(10));

        let out = output(ui);
        assert!(out.contains("Not an integer"));
        assert!(out.contains("minimum value is 1"));
    }

    #[tokio::test]
    async fn int_prompt_cancels_on_empty_answer() {
        let mut ui = ui("\n5\n");
        assert_eq!(ui.prompt_int("Input", "Quantity:", 1).await, None);
    }

    #[tokio::test]
    async fn confirm_accepts_yes_and_defaults_to_no() {
        let mut ui = ui("maybe\nYES\n\nn\n");
        assert!(ui.confirm("Confirm", "Buy?").await);
        assert!(!ui.confirm("Confirm", "Buy?").await);
        assert!(!ui.confirm("Confirm", "Buy?").await);
        assert!(!ui.confirm("Confirm", "Buy?").await);
    }

    #[tokio::test]
    async fn results_are_tagged_by_outcome() {
        let mut ui = ui("");
        ui.show_result(&ActionResult::Success("done".to_string()));
        ui.show_result(&ActionResult::Failure("Invalid symbol.".to_string()));
        ui.show_result(&ActionResult::Info("No action mapped to this key.".to_string()));

        assert_eq!(
            output(ui),
            "Success: done\nError: Invalid symbol.\nStatus: No action mapped to this key.\n"
        );
    }

    #[test]
    fn banner_lists_bindings_and_initial_status() {
        let mut ui = ui("");
        ui.show_banner("AAPL").unwrap();

        let out = output(ui);
        for key in ["B:", "S:", "C:", "P:", "T:"] {
            assert!(out.contains(key), "{key}");
        }
        assert!(out.contains("Only the first character of each line is used."));
        assert!(out.contains("Status: Waiting for key press..."));
    }
}
