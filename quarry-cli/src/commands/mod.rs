pub mod apply;
pub mod destroy;
pub mod validate;

use anyhow::{Context, Result};

use quarry_client::{BitbucketClient, Credentials};

/// Build the platform client from the environment.
///
/// Fails before any remote call when credentials are missing; the API root
/// can be redirected at test servers via `QUARRY_API_URL`.
pub(crate) fn client_from_env() -> Result<BitbucketClient> {
    let username = std::env::var("BITBUCKET_USERNAME")
        .context("BITBUCKET_USERNAME is not set")?;
    let app_password = std::env::var("BITBUCKET_APP_PASSWORD")
        .context("BITBUCKET_APP_PASSWORD is not set")?;
    let credentials = Credentials::new(username, app_password);
    Ok(match std::env::var("QUARRY_API_URL") {
        Ok(url) => BitbucketClient::with_base_url(&credentials, &url),
        Err(_) => BitbucketClient::new(&credentials),
    })
}
