use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::driver::{PageDriver, PageElement};
use crate::error::{Result, ScrapeError};

const PRESENCE_POLL: Duration = Duration::from_millis(250);

/// A Chromium session with a single tab, driven over CDP.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    pub async fn launch(headless: bool) -> anyhow::Result<Self> {
        info!("Initializing browser");

        let mut config = BrowserConfig::builder();
        if !headless {
            config = config.with_head();
        }
        config = config
            .window_size(1920, 1080)
            .viewport(None)
            .arg("--disable-gpu")
            .arg("--no-sandbox");

        let browser_config = config
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(e) = h {
                    error!("Browser handler error: {:?}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open a tab: {}", e))?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    pub async fn close(mut self) -> Result<()> {
        info!("Closing browser");
        self.browser.close().await?;
        self.handler.abort();
        Ok(())
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    type Element = ChromiumElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_title(&self) -> Result<String> {
        Ok(self.page.get_title().await?.unwrap_or_default())
    }

    async fn run_script(&mut self, snippet: &str) -> Result<Value> {
        let result = self.page.evaluate(snippet).await?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> Result<ChromiumElement> {
        let start = Instant::now();
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(ChromiumElement(element));
            }
            if start.elapsed() >= timeout {
                return Err(ScrapeError::ElementNotFound {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(PRESENCE_POLL).await;
        }
    }

    async fn click(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for_presence(selector, timeout).await?;
        element.0.click().await?;
        Ok(())
    }

    async fn fill(&mut self, selector: &str, text: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for_presence(selector, timeout).await?;
        element
            .0
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        element.0.click().await?;
        element.0.type_str(text).await?;
        Ok(())
    }
}

pub struct ChromiumElement(Element);

#[async_trait]
impl PageElement for ChromiumElement {
    async fn text(&self) -> Result<String> {
        Ok(self.0.inner_text().await?.unwrap_or_default())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromiumElement>> {
        Ok(self
            .0
            .find_elements(selector)
            .await?
            .into_iter()
            .map(ChromiumElement)
            .collect())
    }
}
