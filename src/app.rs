use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::ReportError;
use crate::launcher;
use crate::mailto::build_mailto;
use crate::model::board::Board;
use crate::providers::BoardClient;
use crate::report::{ReportBuilder, ReportWeek};

/// A ready-to-open mail: plain subject and body for display, full `mailto:` URI.
#[derive(Debug, Clone)]
pub struct MailDraft {
    pub subject: String,
    pub body: String,
    pub uri: String,
}

pub struct App {
    config: AppConfig,
    client: Box<dyn BoardClient>,
}

impl App {
    pub fn new(config: AppConfig, client: Box<dyn BoardClient>) -> Self {
        Self { config, client }
    }

    /// Fetch everything for `week` and build the mail. Nothing is launched.
    pub async fn prepare(&self, week: ReportWeek) -> Result<MailDraft> {
        let trello = &self.config.trello;
        let board_name = trello.board_name()?;
        let recipient = self.config.email.recipient()?;

        info!("Searching for user '{}' on {}", trello.username, self.client.name());
        let member = self.client.find_member(&trello.username).await?;

        info!("Getting lists for '{board_name}' board");
        let summary = self
            .client
            .boards(&member.id)
            .await?
            .into_iter()
            .find(|b| b.name == board_name)
            .ok_or_else(|| ReportError::BoardNotFound(board_name.to_string()))?;

        let lists = self.client.lists(&summary.id).await?;
        let mut board = Board::from_summary(summary, lists);

        let include_checklists = self.config.report.include_checklists;
        if include_checklists {
            self.load_checklists(&mut board, &member.id, week).await?;
        }
        debug!(
            board = %serde_json::to_string(&board).unwrap_or_default(),
            "Board snapshot"
        );

        let builder = ReportBuilder::new(&member, &board, week).with_checklists(include_checklists);
        let body = builder.render_body()?;
        let subject = builder.render_subject();

        info!("Preparing email, please wait ...");
        let uri = build_mailto(recipient, &subject, &body, self.config.email.cc());

        Ok(MailDraft {
            subject: builder.plain_subject(),
            body: urlencoding::decode(&body)
                .context("Failed to decode report body")?
                .into_owned(),
            uri,
        })
    }

    /// Only the member's cards in the report lists get their checklists fetched.
    async fn load_checklists(&self, board: &mut Board, member_id: &str, week: ReportWeek) -> Result<()> {
        for name in week.list_names() {
            let list = board
                .list_mut(&name)
                .ok_or_else(|| ReportError::ListNotFound(name.clone()))?;

            for card in list.cards.iter_mut().filter(|c| c.is_assigned_to(member_id)) {
                debug!("Getting checklists for card #{}", card.short_id);
                card.checklists = self.client.checklists(&card.id).await?;
            }
        }
        Ok(())
    }

    /// Build the mail and open it in the configured client, or print the URI
    /// when `dry_run` is set.
    pub async fn export(&self, week: ReportWeek, dry_run: bool) -> Result<()> {
        let draft = self.prepare(week).await?;

        if dry_run {
            println!("{}", draft.uri);
        } else {
            let email = &self.config.email;
            let pid = launcher::launch(&email.client, &email.client_args, &draft.uri)?;
            debug!("Mail client started with pid {pid}");
        }

        debug!("Report body:\n{}", draft.body);
        info!("DONE: {}", draft.subject);
        Ok(())
    }
}
