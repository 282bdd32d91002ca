use anyhow::{anyhow, Result};

use crate::domain::TalkMessage;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, message: String) -> Result<String> {
        let message = TalkMessage::parse(Some(&message))?;

        let use_case = self.container.complete_message_use_case();
        match use_case.execute(&message).await {
            Ok(reply) => Ok(reply.into_inner()),
            Err(e) => {
                let mut text = format!("{}: {e}", e.kind());
                if let Some(detail) = e.detail() {
                    text.push_str(&format!("\nDetail: {detail}"));
                }
                Err(anyhow!(text))
            }
        }
    }
}
