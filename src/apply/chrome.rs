use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, Element, LaunchOptionsBuilder, Tab};

use super::page::{FormPage, PageLauncher};
use crate::error::{Error, Result};

const FILE_INPUTS: &str = "input[type='file']";

pub struct ChromeLauncher {
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl PageLauncher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn FormPage>> {
        let options = LaunchOptionsBuilder::default()
            .headless(self.headless)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .map_err(Error::browser)?;

        let browser = Browser::new(options).map_err(Error::browser)?;
        let tab = browser.new_tab().map_err(Error::browser)?;
        Ok(Box::new(ChromePage { _browser: browser, tab }))
    }
}

/// One tab in its own Chrome process; dropping it kills the process.
pub struct ChromePage {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromePage {
    fn elements(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements),
            Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(Vec::new()),
            Err(e) => Err(Error::browser(e)),
        }
    }

    fn nth(&self, selector: &str, index: usize) -> Result<Element<'_>> {
        self.elements(selector)?
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::Browser(format!("{selector} #{index} disappeared")))
    }
}

impl FormPage for ChromePage {
    fn open(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(Error::browser)?;
        Ok(())
    }

    fn input_names(&self) -> Result<Vec<Option<String>>> {
        self.elements("input")?
            .iter()
            .map(|input| input.get_attribute_value("name").map_err(Error::browser))
            .collect()
    }

    fn type_into_input(&self, index: usize, text: &str) -> Result<()> {
        self.nth("input", index)?
            .type_into(text)
            .map_err(Error::browser)?;
        Ok(())
    }

    fn file_input_count(&self) -> Result<usize> {
        Ok(self.elements(FILE_INPUTS)?.len())
    }

    fn attach_file(&self, index: usize, path: &Path) -> Result<()> {
        let path = path.to_string_lossy().into_owned();
        self.nth(FILE_INPUTS, index)?
            .set_input_files(&[path.as_str()])
            .map_err(Error::browser)?;
        Ok(())
    }

    fn button_labels(&self) -> Result<Vec<String>> {
        self.elements("button")?
            .iter()
            .map(|button| button.get_inner_text().map_err(Error::browser))
            .collect()
    }

    fn click_button(&self, index: usize) -> Result<()> {
        self.nth("button", index)?.click().map_err(Error::browser)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.tab.close(true).map_err(Error::browser)?;
        Ok(())
    }
}
