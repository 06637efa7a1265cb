use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT, REFERER, USER_AGENT};

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    /// Builds a client that sends the configured browser header set on every request.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, USER_AGENT, &config.user_agent)?;
        insert_header(&mut headers, ACCEPT, &config.accept)?;
        insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;
        insert_header(&mut headers, REFERER, &config.referer)?;
        insert_header(&mut headers, DNT, &config.dnt)?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .gzip(true)
            .deflate(true)
            .build()?;
        Ok(Self { client })
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| ScraperError::Config(format!("Invalid value for header {}: {}", name, e)))?;
    headers.insert(name, value);
    Ok(())
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpGetResult { status, body })
    }
}
