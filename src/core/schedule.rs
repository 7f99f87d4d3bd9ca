use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use scraper::{Html, Selector};
use tokio::sync::OnceCell;
use url::Url;

use crate::error::scrape::ScrapeError;
use crate::http::retry_middleware::RetryMiddleware;
use crate::http::user_agent_middleware::UserAgentMiddleware;
use crate::model::department::DepartmentQuery;
use crate::model::scrape_config::ScrapeConfig;

/// Postback target of the "show courses" button.
pub const SHOW_COURSES_TARGET: &str = "ctl00$PageBody$btn_ShowScCrs";

const VIEWSTATE: &str = "__VIEWSTATE";
const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

static HIDDEN_INPUTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input[type=hidden][name]").unwrap());

/// Source of department listing pages.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_department(&self, query: &DepartmentQuery) -> Result<String, ScrapeError>;
}

#[async_trait::async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    async fn fetch_department(&self, query: &DepartmentQuery) -> Result<String, ScrapeError> {
        (**self).fetch_department(query).await
    }
}

/// Talks to the ASP.NET schedule form: one GET for the form state, one POST per department.
pub struct ScheduleClient {
    client: ClientWithMiddleware,
    base_url: Url,
    form: OnceCell<HashMap<String, String>>,
}

impl ScheduleClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url)?;

        // The postback only validates with the session cookie from the GET.
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let client = ClientBuilder::new(client)
            .with(UserAgentMiddleware::random())
            .with(RetryMiddleware {
                max_retries: config.retries,
                backoff: Duration::from_millis(500),
            })
            .build();

        Ok(ScheduleClient {
            client,
            base_url,
            form: OnceCell::new(),
        })
    }

    /// Form state of the first GET, shared by every department POST of this client.
    /// All requests go through one cookie jar, so a GET per department would let
    /// concurrent fetches swap the session cookie under each other's form state.
    async fn form_state(&self) -> Result<&HashMap<String, String>, ScrapeError> {
        self.form
            .get_or_try_init(|| async {
                debug!("loading schedule form from {}", self.base_url);
                let response = self.client.get(self.base_url.clone()).send().await?;
                let response = response.error_for_status()?;
                let html = response.text().await?;
                read_form_state(&html)
            })
            .await
    }
}

#[async_trait::async_trait]
impl PageFetcher for ScheduleClient {
    async fn fetch_department(&self, query: &DepartmentQuery) -> Result<String, ScrapeError> {
        let state = self.form_state().await?.clone();
        let payload = form_payload(state, query);

        info!("fetching department {} ({})", query.department, query.department.form_code());
        let response = self
            .client
            .post(self.base_url.clone())
            .form(&payload)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let html = response.text().await?;
        debug!("department {}: {} bytes", query.department, html.len());
        Ok(html)
    }
}

/// Serves a saved schedule page from disk, whatever department is asked for.
pub struct FileFetcher {
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl PageFetcher for FileFetcher {
    async fn fetch_department(&self, query: &DepartmentQuery) -> Result<String, ScrapeError> {
        info!("reading department {} from {}", query.department, self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ScrapeError::with_context(&format!("reading {}", self.path.display()), e))
    }
}

/// Keeps a copy of every fetched page as `<dir>/<department key>.html`.
pub struct SavingFetcher<F> {
    pub inner: F,
    pub dir: PathBuf,
}

impl<F> SavingFetcher<F> {
    pub fn new(inner: F, dir: impl Into<PathBuf>) -> Self {
        SavingFetcher {
            inner,
            dir: dir.into(),
        }
    }

    pub fn page_path(&self, query: &DepartmentQuery) -> PathBuf {
        self.dir.join(format!("{}.html", query.department.key()))
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher> PageFetcher for SavingFetcher<F> {
    async fn fetch_department(&self, query: &DepartmentQuery) -> Result<String, ScrapeError> {
        let html = self.inner.fetch_department(query).await?;

        let path = self.page_path(query);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScrapeError::with_context(&format!("creating {}", self.dir.display()), e))?;
        tokio::fs::write(&path, &html)
            .await
            .map_err(|e| ScrapeError::with_context(&format!("saving {}", path.display()), e))?;
        debug!("saved department {} to {}", query.department, path.display());
        Ok(html)
    }
}

/// Hidden inputs of the schedule form (`__VIEWSTATE`, `__EVENTVALIDATION`, ...).
pub fn read_form_state(html: &str) -> Result<HashMap<String, String>, ScrapeError> {
    let document = Html::parse_document(html);
    let state: HashMap<String, String> = document
        .select(&HIDDEN_INPUTS)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or("");
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    for required in [VIEWSTATE, EVENT_VALIDATION] {
        if !state.contains_key(required) {
            return Err(ScrapeError::new(&format!("schedule form has no {} field", required)));
        }
    }
    Ok(state)
}

/// Form body that asks the schedule page for one department's listing.
pub fn form_payload(
    mut state: HashMap<String, String>,
    query: &DepartmentQuery,
) -> Vec<(String, String)> {
    state.insert("__EVENTTARGET".into(), SHOW_COURSES_TARGET.into());
    state.insert("__EVENTARGUMENT".into(), String::new());
    state.insert("ctl00$PageBody$ddlYear".into(), query.year.clone());
    state.insert("ctl00$PageBody$ddlSess".into(), query.session.form_code().into());
    state.insert("ctl00$PageBody$ddlLevl".into(), query.level.form_code().into());
    state.insert("ctl00$PageBody$ddlDept".into(), query.department.form_code().into());

    let mut payload: Vec<_> = state.into_iter().collect();
    payload.sort();
    payload
}
