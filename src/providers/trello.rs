use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::auth::AuthPolicy;
use super::BoardClient;
use crate::error::ReportError;
use crate::model::board::{BoardSummary, Card, CheckItem, CheckItemState, Checklist, List, Member};

const BASE: &str = "https://api.trello.com/1";

pub struct TrelloClient {
    client: reqwest::Client,
    auth: Box<dyn AuthPolicy>,
}

impl TrelloClient {
    pub fn new(auth: Box<dyn AuthPolicy>) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .auth
            .authorize(self.client.get(format!("{BASE}{path}")))
            .query(query)
            .send()
            .await
            .with_context(|| format!("Trello {path} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Trello {path} returned {status}: {}", body.trim());
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to decode Trello {path} response"))
    }
}

#[derive(Deserialize)]
struct TrelloMember {
    id: String,
    username: String,
}

#[derive(Deserialize)]
struct TrelloBoard {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct TrelloList {
    id: String,
    name: String,
    #[serde(default)]
    cards: Vec<TrelloCard>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrelloCard {
    id: String,
    name: String,
    id_short: u64,
    #[serde(default)]
    id_members: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrelloChecklist {
    name: String,
    #[serde(default)]
    check_items: Vec<TrelloCheckItem>,
}

#[derive(Deserialize)]
struct TrelloCheckItem {
    name: String,
    state: String,
    pos: Option<f64>,
}

impl From<TrelloCard> for Card {
    fn from(card: TrelloCard) -> Self {
        Card {
            id: card.id,
            name: card.name,
            short_id: card.id_short,
            member_ids: card.id_members,
            checklists: Vec::new(),
        }
    }
}

impl From<TrelloList> for List {
    fn from(list: TrelloList) -> Self {
        List {
            id: list.id,
            name: list.name,
            cards: list.cards.into_iter().map(Card::from).collect(),
        }
    }
}

impl From<TrelloChecklist> for Checklist {
    fn from(checklist: TrelloChecklist) -> Self {
        let mut items = checklist.check_items;
        // Trello orders check items by `pos`, not by response order
        items.sort_by(|a, b| {
            a.pos
                .unwrap_or_default()
                .total_cmp(&b.pos.unwrap_or_default())
        });
        Checklist {
            name: checklist.name,
            items: items
                .into_iter()
                .map(|item| CheckItem {
                    state: CheckItemState::from_raw(&item.state),
                    name: item.name,
                })
                .collect(),
        }
    }
}

/// 404 on a member lookup means the username does not exist.
fn member_status_error(status: StatusCode, username: &str, path: &str) -> Option<anyhow::Error> {
    match status {
        StatusCode::NOT_FOUND => Some(ReportError::UserNotFound(username.to_string()).into()),
        status if !status.is_success() => Some(anyhow!("Trello {path} returned {status}")),
        _ => None,
    }
}

#[async_trait]
impl BoardClient for TrelloClient {
    fn name(&self) -> &str {
        "Trello"
    }

    async fn find_member(&self, username: &str) -> Result<Member> {
        let path = format!("/members/{}", urlencoding::encode(username));
        let resp = self
            .auth
            .authorize(self.client.get(format!("{BASE}{path}")))
            .query(&[("fields", "id,username")])
            .send()
            .await
            .context("Trello member lookup failed")?;

        if let Some(err) = member_status_error(resp.status(), username, &path) {
            return Err(err);
        }

        let member: TrelloMember = resp
            .json()
            .await
            .with_context(|| format!("Failed to decode Trello {path} response"))?;
        Ok(Member {
            id: member.id,
            username: member.username,
        })
    }

    async fn boards(&self, member_id: &str) -> Result<Vec<BoardSummary>> {
        let boards: Vec<TrelloBoard> = self
            .get(
                &format!("/members/{member_id}/boards"),
                &[("fields", "id,name"), ("filter", "open")],
            )
            .await?;

        Ok(boards
            .into_iter()
            .map(|b| BoardSummary {
                id: b.id,
                name: b.name,
            })
            .collect())
    }

    async fn lists(&self, board_id: &str) -> Result<Vec<List>> {
        let lists: Vec<TrelloList> = self
            .get(
                &format!("/boards/{board_id}/lists"),
                &[
                    ("fields", "id,name"),
                    ("cards", "open"),
                    ("card_fields", "id,name,idShort,idMembers"),
                ],
            )
            .await?;

        Ok(lists.into_iter().map(List::from).collect())
    }

    async fn checklists(&self, card_id: &str) -> Result<Vec<Checklist>> {
        let checklists: Vec<TrelloChecklist> = self
            .get(
                &format!("/cards/{card_id}/checklists"),
                &[("fields", "name"), ("checkItem_fields", "name,state,pos")],
            )
            .await?;

        Ok(checklists.into_iter().map(Checklist::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_lists_with_cards() {
        let json = r#"[
            {"id": "l1", "name": "Done(2024#14)", "cards": []},
            {"id": "l2", "name": "Doing", "cards": [
                {"id": "c1", "name": "Fix bug", "idShort": 42, "idMembers": ["u1", "u2"]},
                {"id": "c2", "name": "Unassigned", "idShort": 43}
            ]}
        ]"#;
        let lists: Vec<List> = serde_json::from_str::<Vec<TrelloList>>(json)
            .unwrap()
            .into_iter()
            .map(List::from)
            .collect();

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].name, "Done(2024#14)");
        let doing = &lists[1];
        assert_eq!(doing.cards[0].short_id, 42);
        assert_eq!(doing.cards[0].member_ids, vec!["u1", "u2"]);
        assert!(doing.cards[1].member_ids.is_empty());
        assert!(doing.cards[1].checklists.is_empty());
    }

    #[test]
    fn list_without_cards_field_decodes_empty() {
        let json = r#"{"id": "l1", "name": "To Do"}"#;
        let list = List::from(serde_json::from_str::<TrelloList>(json).unwrap());
        assert!(list.cards.is_empty());
    }

    #[test]
    fn decodes_checklists_in_position_order() {
        let json = r#"[{
            "name": "Steps",
            "checkItems": [
                {"name": "second", "state": "incomplete", "pos": 32768},
                {"name": "first", "state": "complete", "pos": 16384},
                {"name": "third", "state": "weird", "pos": 49152}
            ]
        }]"#;
        let checklists: Vec<Checklist> = serde_json::from_str::<Vec<TrelloChecklist>>(json)
            .unwrap()
            .into_iter()
            .map(Checklist::from)
            .collect();

        let names: Vec<&str> = checklists[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(checklists[0].items[0].state, CheckItemState::Complete);
        assert_eq!(checklists[0].items[1].state, CheckItemState::Incomplete);
        assert_eq!(
            checklists[0].items[2].state,
            CheckItemState::Other("weird".into())
        );
    }

    #[test]
    fn member_lookup_404_is_user_not_found() {
        let err = member_status_error(StatusCode::NOT_FOUND, "mallory", "/members/mallory").unwrap();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::UserNotFound(name)) if name == "mallory"
        ));
    }

    #[test]
    fn member_lookup_server_error_names_endpoint() {
        let err = member_status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "alice",
            "/members/alice",
        )
        .unwrap();
        assert!(err.downcast_ref::<ReportError>().is_none());
        let msg = err.to_string();
        assert!(msg.contains("/members/alice"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn member_lookup_success_has_no_error() {
        assert!(member_status_error(StatusCode::OK, "alice", "/members/alice").is_none());
    }

    #[test]
    fn client_reports_its_name() {
        let client = TrelloClient::new(Box::new(crate::providers::auth::KeyTokenPolicy::new(
            "k".into(),
            "t".into(),
        )));
        assert_eq!(client.name(), "Trello");
    }
}
