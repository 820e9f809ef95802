use std::collections::HashMap;

use futures::future::join_all;

use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::search::filter_by_name;
use crate::types::{Chatbot, Message, RecordId, Subscription};

/// Inline edit state of one chatbot's token limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    View,
    Editing { input: String },
}

#[derive(Debug, Clone)]
struct LimitEdit {
    id: RecordId,
    input: String,
}

/// Chatbot list with token-limit editing and per-chatbot subscriptions.
/// At most one row is in `Editing` at a time.
#[derive(Debug, Default)]
pub struct ChatbotsView {
    chatbots: Vec<Chatbot>,
    editing: Option<LimitEdit>,
    subscriptions: HashMap<RecordId, Subscription>,
}

/// Parse an edited limit. Anything but a whole non-negative number is refused.
pub fn parse_token_limit(input: &str) -> ClientResult<u64> {
    let trimmed = input.trim();
    trimmed.parse::<u64>().map_err(|_| {
        ClientError::validation(format!(
            "Token limit must be a whole number, got '{}'.",
            trimmed
        ))
    })
}

impl ChatbotsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<&[Chatbot]> {
        self.chatbots = api.list_chatbots().await?;
        Ok(&self.chatbots)
    }

    pub fn chatbots(&self) -> &[Chatbot] {
        &self.chatbots
    }

    pub fn search(&self, query: &str) -> Vec<&Chatbot> {
        filter_by_name(&self.chatbots, query)
    }

    pub fn find(&self, id: &RecordId) -> Option<&Chatbot> {
        self.chatbots.iter().find(|c| &c.id == id)
    }

    fn require(&self, id: &RecordId) -> ClientResult<&Chatbot> {
        self.find(id)
            .ok_or_else(|| ClientError::new(ErrorKind::NotFound, format!("Chatbot '{}' not found", id)))
    }

    pub fn row_state(&self, id: &RecordId) -> RowState {
        match &self.editing {
            Some(edit) if &edit.id == id => RowState::Editing {
                input: edit.input.clone(),
            },
            _ => RowState::View,
        }
    }

    /// Start editing `id`, seeded with its current limit. Any other open edit is dropped.
    pub fn begin_edit(&mut self, id: &RecordId) -> ClientResult<()> {
        let seed = match self.require(id)?.token_limit {
            Some(limit) if limit > 0 => limit.to_string(),
            _ => String::new(),
        };
        self.editing = Some(LimitEdit {
            id: id.clone(),
            input: seed,
        });
        Ok(())
    }

    pub fn set_input(&mut self, input: &str) -> ClientResult<()> {
        match self.editing.as_mut() {
            Some(edit) => {
                edit.input = input.to_string();
                Ok(())
            }
            None => Err(ClientError::validation("No token limit is being edited.")),
        }
    }

    /// Drop the edit without touching the server
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the edited limit, then reload the whole list.
    ///
    /// Invalid input and server rejections leave the row in `Editing`.
    pub async fn confirm_edit<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<u64> {
        let edit = self
            .editing
            .clone()
            .ok_or_else(|| ClientError::validation("No token limit is being edited."))?;

        let limit = parse_token_limit(&edit.input)?;
        api.update_token_limit(&edit.id, limit).await?;
        tracing::info!(chatbot = %edit.id, limit, "token limit updated");

        self.editing = None;
        self.refresh(api).await?;
        Ok(limit)
    }

    /// Fetch every chatbot's active subscription concurrently.
    ///
    /// Each response fills only its own slot; a failed lookup is logged and
    /// its slot stays empty.
    pub async fn load_subscriptions<A: AdminApi + ?Sized>(&mut self, api: &A) -> &HashMap<RecordId, Subscription> {
        let lookups = self.chatbots.iter().map(|bot| {
            let id = bot.id.clone();
            async move {
                let result = api.subscription(&id).await;
                (id, result)
            }
        });

        let mut slots = HashMap::new();
        for (id, result) in join_all(lookups).await {
            match result {
                Ok(Some(subscription)) => {
                    slots.insert(id, subscription);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(chatbot = %id, "subscription lookup failed: {}", err),
            }
        }

        self.subscriptions = slots;
        &self.subscriptions
    }

    pub fn subscription(&self, id: &RecordId) -> Option<&Subscription> {
        self.subscriptions.get(id)
    }

    pub async fn messages<A: AdminApi + ?Sized>(&self, api: &A, id: &RecordId) -> ClientResult<Vec<Message>> {
        api.messages(id).await
    }

    pub async fn report<A: AdminApi + ?Sized>(&self, api: &A, id: &RecordId) -> ClientResult<Vec<u8>> {
        let bytes = api.download_report(id).await?;
        if bytes.is_empty() {
            return Err(ClientError::decode(format!("Report for chatbot '{}' was empty", id)));
        }
        Ok(bytes)
    }
}
