//! Line-oriented console transport
//!
//! Each input line is one update for a single console chat:
//!
//! - `/press <label>` presses a button by label
//! - a bare number `N` presses the N-th button of the last keyboard shown
//! - `/contact <phone>` shares a contact
//! - anything else is free text

use crate::adapter::{ChatAdapter, Outbound};
use crate::error::TransportError;
use crate::update::{ChatInfo, Contact, Payload, Update};
use async_trait::async_trait;
use std::sync::Mutex as StdMutex;
use std::sync::PoisonError;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

pub struct ConsoleAdapter<W> {
    chat: ChatInfo,
    out: Mutex<W>,
    honor_typing: bool,
    /// Labels of the last keyboard, flattened in display order
    last_keyboard: StdMutex<Vec<String>>,
}

impl<W: AsyncWrite + Unpin + Send> ConsoleAdapter<W> {
    pub fn new(chat: ChatInfo, out: W, honor_typing: bool) -> Self {
        Self {
            chat,
            out: Mutex::new(out),
            honor_typing,
            last_keyboard: StdMutex::new(Vec::new()),
        }
    }

    pub fn chat(&self) -> &ChatInfo {
        &self.chat
    }

    /// Hand back the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn parse(&self, line: &str) -> Option<Payload> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(label) = line.strip_prefix("/press ") {
            return Some(Payload::ButtonPress(label.trim().to_string()));
        }
        if let Some(phone) = line.strip_prefix("/contact ") {
            return Some(Payload::ContactShare(Contact::new(phone.trim())));
        }
        if let Ok(n) = line.parse::<usize>() {
            let keyboard = self.last_keyboard.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(label) = n.checked_sub(1).and_then(|i| keyboard.get(i)) {
                return Some(Payload::ButtonPress(label.clone()));
            }
        }
        Some(Payload::Text(line.to_string()))
    }

    fn format(&self, message: &Outbound) -> String {
        match message {
            Outbound::Text(text) => format!("{text}\n"),
            Outbound::Typing(_) => "... typing\n".to_string(),
            Outbound::Keyboard { title, rows } => {
                let labels: Vec<String> = rows.iter().flatten().cloned().collect();
                let mut rendered = format!("[{title}]\n");
                let mut n = 0;
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|label| {
                            n += 1;
                            format!("{n}) {label}")
                        })
                        .collect();
                    rendered.push_str("  ");
                    rendered.push_str(&cells.join("   "));
                    rendered.push('\n');
                }
                *self.last_keyboard.lock().unwrap_or_else(PoisonError::into_inner) = labels;
                rendered
            }
            Outbound::ContactRequest { prompt } => format!("{prompt} (/contact <phone>)\n"),
        }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ChatAdapter<String> for ConsoleAdapter<W> {
    fn to_update(&self, native: String) -> Option<Update> {
        self.parse(&native)
            .map(|payload| Update::new(self.chat.clone(), payload))
    }

    async fn send(&self, _chat: &ChatInfo, message: Outbound) -> Result<(), TransportError> {
        let rendered = self.format(&message);
        {
            let mut out = self.out.lock().await;
            out.write_all(rendered.as_bytes())
                .await
                .map_err(|e| TransportError::new(e.to_string()))?;
            out.flush()
                .await
                .map_err(|e| TransportError::new(e.to_string()))?;
        }
        if let Outbound::Typing(duration) = message {
            if self.honor_typing {
                tokio::time::sleep(duration).await;
            }
        }
        Ok(())
    }
}
