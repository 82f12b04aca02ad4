// src/core/net.rs
// Blocking HTTP GET for listing pages.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::options::FetchOptions;
use crate::error::Result;

/// Status + body of one GET. Non-200 is not an error at this layer.
pub struct Response {
    pub status: u16,
    pub body: String,
}

pub fn client(opts: &FetchOptions) -> Result<Client> {
    let client = Client::builder()
        .user_agent(opts.user_agent.as_str())
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()?;
    Ok(client)
}

pub fn http_get(client: &Client, url: &str) -> Result<Response> {
    tracing::debug!(%url, "GET");
    let resp = client.get(url).send()?;
    let status = resp.status().as_u16();
    let body = resp.text()?;
    Ok(Response { status, body })
}
