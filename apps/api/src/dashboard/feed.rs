//! Project feed filtering — pure predicate composition, no I/O.
//!
//! Filters apply in order: tab → search → verification. Input order is preserved.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::project::{ProjectCategory, ProjectPost};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedTab {
    #[default]
    #[serde(rename = "All Feed")]
    AllFeed,
    Technical,
    #[serde(rename = "Non-Technical")]
    NonTechnical,
    /// Badge-driven feed. Applies no extra filter.
    #[serde(rename = "My Badges")]
    MyBadges,
    /// Only projects the viewer has joined.
    Teams,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedQuery {
    pub tab: FeedTab,
    pub search: String,
    pub verified_only: bool,
    pub unverified_only: bool,
    pub joined_project_ids: Vec<String>,
}

/// Returns the posts visible under `query`, in their original order.
pub fn filter_projects(posts: &[ProjectPost], query: &FeedQuery) -> Vec<ProjectPost> {
    let joined: HashSet<&str> = query
        .joined_project_ids
        .iter()
        .map(String::as_str)
        .collect();
    let needle = query.search.trim().to_lowercase();

    posts
        .iter()
        .filter(|post| matches_tab(post, query.tab, &joined))
        .filter(|post| matches_search(post, &needle))
        .filter(|post| matches_verification(post, query.verified_only, query.unverified_only))
        .cloned()
        .collect()
}

fn matches_tab(post: &ProjectPost, tab: FeedTab, joined: &HashSet<&str>) -> bool {
    match tab {
        FeedTab::AllFeed | FeedTab::MyBadges => true,
        FeedTab::Teams => joined.contains(post.id.as_str()),
        FeedTab::Technical => post.category == ProjectCategory::Technical,
        FeedTab::NonTechnical => post.category == ProjectCategory::NonTechnical,
    }
}

/// `needle` must already be lowercased. Empty matches everything.
fn matches_search(post: &ProjectPost, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(needle)
        || post.summary.to_lowercase().contains(needle)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Checking both boxes, or neither, means "don't care".
fn matches_verification(post: &ProjectPost, verified_only: bool, unverified_only: bool) -> bool {
    match (verified_only, unverified_only) {
        (true, false) => post.is_verified,
        (false, true) => !post.is_verified,
        _ => true,
    }
}
