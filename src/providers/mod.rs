pub mod auth;
pub mod trello;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{AppConfig, AuthKind};
use crate::model::board::{BoardSummary, Checklist, List, Member};

/// Read-only access to the board service.
#[async_trait]
pub trait BoardClient: Send + Sync {
    fn name(&self) -> &str;
    /// Fails with `ReportError::UserNotFound` when the username is unknown.
    async fn find_member(&self, username: &str) -> Result<Member>;
    async fn boards(&self, member_id: &str) -> Result<Vec<BoardSummary>>;
    /// Lists on the board, in board order, each carrying its open cards.
    async fn lists(&self, board_id: &str) -> Result<Vec<List>>;
    async fn checklists(&self, card_id: &str) -> Result<Vec<Checklist>>;
}


pub fn create_client(config: &AppConfig) -> Box<dyn BoardClient> {
    let trello = &config.trello;
    let policy: Box<dyn auth::AuthPolicy> = match trello.auth {
        AuthKind::Query => Box::new(auth::KeyTokenPolicy::new(
            trello.developer_public_key.clone(),
            trello.member_token.clone(),
        )),
        AuthKind::Header => Box::new(auth::OAuthHeaderPolicy::new(
            trello.developer_public_key.clone(),
            trello.member_token.clone(),
        )),
    };
    Box::new(trello::TrelloClient::new(policy))
}
