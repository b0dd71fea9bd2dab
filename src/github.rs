use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;

use crate::error::{DeckError, Result};
use crate::source::{IssueQuery, IssueSource};
use crate::types::{Issue, PageResult, RepoRef};

const ISSUES_QUERY: &str = r#"
query GetIssues(
  $owner: String!
  $name: String!
  $first: Int
  $states: [IssueState!]
  $orderBy: IssueOrder
  $after: String
) {
  repository(owner: $owner, name: $name) {
    id
    issues(first: $first, states: $states, orderBy: $orderBy, after: $after) {
      nodes {
        title
        url
      }
      totalCount
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}
"#;

pub struct GitHub {
    client: Octocrab,
    repo: RepoRef,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for DeckError {
    fn from(err: octocrab::Error) -> Self {
        DeckError::Api(err.to_string())
    }
}

impl GitHub {
    pub fn new(token: String, repo: RepoRef) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| DeckError::Auth(e.to_string()))?;

        Ok(Self { client, repo })
    }
}

/// Request body for the issues query
fn payload(repo: &RepoRef, query: &IssueQuery) -> serde_json::Value {
    let states: Vec<&str> = query.states.iter().map(|s| s.as_api_str()).collect();
    serde_json::json!({
        "query": ISSUES_QUERY,
        "variables": {
            "owner": repo.owner,
            "name": repo.name,
            "first": query.page_size,
            "states": states,
            "orderBy": query.order.to_variables(),
            "after": query.after,
        }
    })
}

// Every field below is optional on the wire; anything missing falls back
// to an empty page rather than failing the request.

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<IssuesData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct IssuesData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    issues: Option<IssueConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueConnection {
    nodes: Option<Vec<Option<IssueNode>>>,
    total_count: Option<u64>,
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    title: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: Option<bool>,
}

impl GraphQlResponse {
    fn into_page(self) -> Result<PageResult> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(DeckError::Api(messages.join("; ")));
        }

        let Some(issues) = self
            .data
            .and_then(|d| d.repository)
            .and_then(|r| r.issues)
        else {
            return Ok(PageResult::default());
        };

        let page_info = issues.page_info;
        Ok(PageResult {
            issues: issues
                .nodes
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .filter_map(|node| {
                    Some(Issue {
                        url: node.url?,
                        title: node.title.unwrap_or_default(),
                    })
                })
                .collect(),
            total_count: issues.total_count.unwrap_or(0),
            end_cursor: page_info.as_ref().and_then(|p| p.end_cursor.clone()),
            has_next_page: page_info.and_then(|p| p.has_next_page).unwrap_or(false),
        })
    }
}

#[async_trait]
impl IssueSource for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn fetch_issues(&self, query: &IssueQuery) -> Result<PageResult> {
        let body = payload(&self.repo, query);
        let response: GraphQlResponse = self.client.graphql(&body).await?;
        response.into_page()
    }
}
