use chrono::{Datelike, Local, NaiveDate, Weekday};
use tracing::info;

use crate::error::ReportError;
use crate::mailto::percent_encode;
use crate::model::board::{Board, Card, Member};

/// Board lists the report walks, in output order.
pub const REPORT_LISTS: [&str; 3] = ["Done", "Doing", "To Do"];

const FOOTNOTE: &str = "NOTE: (#<number>) are Trello board card IDs";

/// ISO year and week the report is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWeek {
    pub year: i32,
    pub week: u32,
}

impl ReportWeek {
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Board list names for this week, `REPORT_LISTS` order.
    pub fn list_names(&self) -> Vec<String> {
        REPORT_LISTS
            .iter()
            .map(|l| resolve_list_name(l, self.year, self.week))
            .collect()
    }
}

fn weeks_in_iso_year(year: i32) -> u32 {
    if NaiveDate::from_isoywd_opt(year, 53, Weekday::Mon).is_some() {
        53
    } else {
        52
    }
}

/// Map a logical list to its board name. "Done" lists are archived per week
/// as `Done(<year>#<week>)` and the report covers the previous week; in week 1
/// that is the last week of the previous ISO year.
pub fn resolve_list_name(logical_name: &str, year: i32, week: u32) -> String {
    if logical_name != "Done" {
        return logical_name.to_string();
    }
    if week <= 1 {
        let prev = year - 1;
        format!("Done({prev}#{})", weeks_in_iso_year(prev))
    } else {
        format!("Done({year}#{})", week - 1)
    }
}

/// Cards in `list_name` assigned to `member_id`, in board order.
pub fn fetch_user_cards<'a>(
    board: &'a Board,
    list_name: &str,
    member_id: &str,
) -> Result<Vec<&'a Card>, ReportError> {
    let list = board
        .list(list_name)
        .ok_or_else(|| ReportError::ListNotFound(list_name.to_string()))?;

    Ok(list
        .cards
        .iter()
        .filter(|c| c.is_assigned_to(member_id))
        .collect())
}

/// Checklist breakdown for a card, empty when it has none.
pub fn render_checklists(card: &Card) -> String {
    card.checklists
        .iter()
        .map(|checklist| {
            let mut lines = vec![format!("    {}:", checklist.name)];
            lines.extend(checklist.items.iter().enumerate().map(|(i, item)| {
                format!("    [{}] {} [{}]", i + 1, item.name, item.state.label())
            }));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ReportBuilder<'a> {
    member: &'a Member,
    board: &'a Board,
    week: ReportWeek,
    include_checklists: bool,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(member: &'a Member, board: &'a Board, week: ReportWeek) -> Self {
        Self {
            member,
            board,
            week,
            include_checklists: false,
        }
    }

    pub fn with_checklists(mut self, include: bool) -> Self {
        self.include_checklists = include;
        self
    }

    pub fn plain_subject(&self) -> String {
        format!("A&O Week #{} {}", self.week.week, self.member.username)
    }

    pub fn render_subject(&self) -> String {
        percent_encode(&self.plain_subject()).into_owned()
    }

    /// Report text before encoding.
    pub fn plain_body(&self) -> Result<String, ReportError> {
        let mut body = String::from("Accomplishments:\n");

        for logical in REPORT_LISTS {
            let list_name = resolve_list_name(logical, self.week.year, self.week.week);
            info!("Getting cards for '{list_name}' list");

            for card in fetch_user_cards(self.board, &list_name, &self.member.id)? {
                body.push_str(&format!("- {} (#{})", card.name, card.short_id));
                if logical == "Doing" {
                    body.push_str(" [WIP]");
                }
                body.push('\n');

                if self.include_checklists {
                    let checklists = render_checklists(card);
                    if !checklists.is_empty() {
                        body.push_str(&checklists);
                        body.push('\n');
                    }
                }
            }

            if logical == "Done" {
                body.push_str("\nObjectives:\n");
            }
        }

        body.push_str("\n\n");
        body.push_str(FOOTNOTE);
        Ok(body)
    }

    pub fn render_body(&self) -> Result<String, ReportError> {
        Ok(percent_encode(&self.plain_body()?).into_owned())
    }
}
