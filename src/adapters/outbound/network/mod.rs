/// Network adapters for the version-control API
mod github_client;

pub use github_client::GitHubClient;
