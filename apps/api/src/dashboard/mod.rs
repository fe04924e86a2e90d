// Dashboard project feed: tab, search and verification filters over project posts.

pub mod feed;
pub mod handlers;
