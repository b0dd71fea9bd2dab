use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DeckError;

/// Issue as shown in the list. The URL doubles as the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub url: String,
}

impl Issue {
    /// Display number taken from the last path segment of the URL.
    pub fn number(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub const ALL: [IssueState; 2] = [IssueState::Open, IssueState::Closed];

    /// Enum value as spelled by the GraphQL schema
    pub fn as_api_str(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }

    /// The other filter value
    pub fn toggled(&self) -> IssueState {
        match self {
            IssueState::Open => IssueState::Closed,
            IssueState::Closed => IssueState::Open,
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "Open Issues"),
            IssueState::Closed => write!(f, "Closed Issues"),
        }
    }
}

impl FromStr for IssueState {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(IssueState::Open),
            "CLOSED" => Ok(IssueState::Closed),
            other => Err(DeckError::Config(format!("unknown issue state: {}", other))),
        }
    }
}

/// Sort order sent with every query: newest issues first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueOrder {
    #[default]
    CreatedDesc,
}

impl IssueOrder {
    pub fn to_variables(self) -> serde_json::Value {
        match self {
            IssueOrder::CreatedDesc => {
                serde_json::json!({ "field": "CREATED_AT", "direction": "DESC" })
            }
        }
    }
}

/// One page of issues plus the cursor needed to continue past it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub issues: Vec<Issue>,
    pub total_count: u64,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Repository the browser is pinned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoRef::new(owner, name))
            }
            _ => Err(DeckError::Config(format!(
                "expected repository as owner/name, got {:?}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(url: &str) -> Issue {
        Issue {
            title: "t".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn number_is_trailing_segment() {
        assert_eq!(
            issue("https://github.com/reactjs/reactjs.org/issues/4521").number(),
            "4521"
        );
    }

    #[test]
    fn number_ignores_trailing_slash() {
        assert_eq!(issue("https://github.com/o/r/issues/7/").number(), "7");
    }

    #[test]
    fn number_of_bare_string() {
        assert_eq!(issue("42").number(), "42");
    }

    #[test]
    fn state_parses_api_spelling() {
        assert_eq!("OPEN".parse::<IssueState>().unwrap(), IssueState::Open);
        assert_eq!("closed".parse::<IssueState>().unwrap(), IssueState::Closed);
        assert!("MERGED".parse::<IssueState>().is_err());
    }

    #[test]
    fn state_toggles() {
        assert_eq!(IssueState::Open.toggled(), IssueState::Closed);
        assert_eq!(IssueState::Closed.toggled(), IssueState::Open);
    }

    #[test]
    fn order_variables() {
        let v = IssueOrder::CreatedDesc.to_variables();
        assert_eq!(v["field"], "CREATED_AT");
        assert_eq!(v["direction"], "DESC");
    }

    #[test]
    fn repo_ref_parses() {
        let repo: RepoRef = "reactjs/reactjs.org".parse().unwrap();
        assert_eq!(repo, RepoRef::new("reactjs", "reactjs.org"));
        assert_eq!(repo.to_string(), "reactjs/reactjs.org");
    }

    #[test]
    fn repo_ref_rejects_malformed() {
        assert!("reactjs".parse::<RepoRef>().is_err());
        assert!("/name".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
    }
}
