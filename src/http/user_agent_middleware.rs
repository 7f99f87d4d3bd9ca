use http::Extensions;
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

use crate::http::random_headers::{PlatformInfo, random_platform, random_user_agent};

/// Gives every request a browser user agent for one randomly chosen platform.
pub struct UserAgentMiddleware {
    pub platform: PlatformInfo,
}

impl UserAgentMiddleware {
    pub fn random() -> Self {
        UserAgentMiddleware {
            platform: random_platform(),
        }
    }
}

#[async_trait::async_trait]
impl Middleware for UserAgentMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Ok(value) = HeaderValue::from_str(&random_user_agent(&self.platform)) {
            req.headers_mut().insert(USER_AGENT, value);
        }
        let platform = format!("\"{}\"", self.platform.sec_ch_ua_platform);
        if let Ok(value) = HeaderValue::from_str(&platform) {
            req.headers_mut().insert("sec-ch-ua-platform", value);
        }
        next.run(req, extensions).await
    }
}
