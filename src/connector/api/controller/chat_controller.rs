use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ChatSession;
use crate::domain::ChatTurn;

use super::super::Container;

const HELP: &str = "Type a message and press Enter. /reset clears the chat, /quit leaves.";

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, url: String, fallback: bool) -> Result<String> {
        let mut session = self.container.chat_session(&url, fallback);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("muu space · {url}\n{HELP}\n");

        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "/quit" | "/exit" => break,
                "/reset" => {
                    session.reset();
                    println!("(chat cleared)\n");
                }
                _ => self.exchange(&mut session, &line).await,
            }
        }

        Ok(format!(
            "Chat ended after {} message(s).",
            session.user_turns()
        ))
    }

    async fn exchange(&self, session: &mut ChatSession, line: &str) {
        match session.send(line).await {
            Ok(Some(turn)) => println!("{}\n", self.format_turn(turn)),
            Ok(None) => {}
            Err(e) => println!("[error] {e}\n"),
        }
    }

    fn format_turn(&self, turn: &ChatTurn) -> String {
        let body = turn
            .text()
            .lines()
            .map(|l| format!("  {l}"))
            .collect::<Vec<_>>()
            .join("\n");
        if turn.is_fallback() {
            format!("muu (offline reply):\n{body}")
        } else {
            format!("muu:\n{body}")
        }
    }
}
