use std::time::Duration;

use http::Extensions;
use log::warn;
use reqwest::{Request, Response};
use reqwest_middleware::{Error, Middleware, Next, Result};

/// Retries connection failures, timeouts and 5xx responses with linear back-off.
pub struct RetryMiddleware {
    pub max_retries: u32,
    pub backoff: Duration,
}

fn is_transient(result: &Result<Response>) -> bool {
    match result {
        Ok(response) => response.status().is_server_error(),
        Err(Error::Reqwest(err)) => err.is_connect() || err.is_timeout(),
        Err(_) => false,
    }
}

#[async_trait::async_trait]
impl Middleware for RetryMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            // Streaming bodies cannot be replayed; send those once.
            let Some(this_try) = req.try_clone() else {
                return next.run(req, extensions).await;
            };

            let result = next.clone().run(this_try, extensions).await;
            if attempt >= self.max_retries || !is_transient(&result) {
                return result;
            }

            attempt += 1;
            match &result {
                Ok(response) => warn!(
                    "{} returned {}, retry {}/{}",
                    req.url(),
                    response.status(),
                    attempt,
                    self.max_retries
                ),
                Err(err) => warn!(
                    "{} failed: {}, retry {}/{}",
                    req.url(),
                    err,
                    attempt,
                    self.max_retries
                ),
            }
            tokio::time::sleep(self.backoff * attempt).await;
        }
    }
}
