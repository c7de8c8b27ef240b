use serde::Serialize;

/// A Trello member. Cards are matched against `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: String,
    pub username: String,
}

/// Board as listed for a member, before its lists are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub lists: Vec<List>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct List {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub short_id: u64,
    pub member_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checklists: Vec<Checklist>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
    pub name: String,
    pub items: Vec<CheckItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub state: CheckItemState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckItemState {
    Complete,
    Incomplete,
    /// Anything Trello sends that we don't recognise, kept verbatim.
    Other(String),
}

impl CheckItemState {
    pub fn from_raw(state: &str) -> Self {
        match state {
            "complete" => Self::Complete,
            "incomplete" => Self::Incomplete,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Complete => "DONE",
            Self::Incomplete => "WIP",
            Self::Other(raw) => raw,
        }
    }
}

impl Board {
    pub fn from_summary(summary: BoardSummary, lists: Vec<List>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            lists,
        }
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut List> {
        self.lists.iter_mut().find(|l| l.name == name)
    }
}

impl Card {
    pub fn is_assigned_to(&self, member_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == member_id)
    }
}
