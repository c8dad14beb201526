use anyhow::{anyhow, Result};
use headless_chrome::{Browser as ChromeBrowser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;

pub struct Browser {
    browser: ChromeBrowser,
}

impl Browser {
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| anyhow!("launch options: {e}"))?;

        let browser = ChromeBrowser::new(options)?;

        Ok(Self { browser })
    }

    pub fn new_page(&self) -> Result<Page> {
        let tab = self.browser.new_tab()?;
        Ok(Page { tab })
    }
}

pub struct Page {
    tab: Arc<Tab>,
}

impl Page {
    pub fn goto(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    pub fn text_of(&self, selector: &str) -> Result<String> {
        let element = self.tab.wait_for_element(selector)?;
        Ok(element.get_inner_text()?)
    }

    pub fn click(&self, selector: &str) -> Result<()> {
        let element = self.tab.wait_for_element(selector)?;
        element.click()?;
        Ok(())
    }

    pub fn has_class(&self, selector: &str, class: &str) -> Result<bool> {
        let element = self.tab.wait_for_element(selector)?;
        let classes = element
            .get_attribute_value("class")?
            .unwrap_or_default();
        Ok(classes.split_whitespace().any(|c| c == class))
    }

    /// Evaluate a JS expression and return its string value.
    pub fn eval_string(&self, expression: &str) -> Result<Option<String>> {
        let result = self.tab.evaluate(expression, false)?;
        Ok(result
            .value
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Poll until `check` holds or `timeout` elapses.
    pub fn wait_until(&self, timeout: Duration, check: impl Fn(&Self) -> bool) -> Result<()> {
        let deadline = std::time::Instant::now() + timeout;
        while std::time::Instant::now() < deadline {
            if check(self) {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        Err(anyhow!("condition not met within {timeout:?}"))
    }
}
