use reqwest::blocking::Client;
use scraper::{Html, Selector};

use super::{absolute_url, text_of, JobSource};
use crate::error::{Error, Result};
use crate::job::{select_matching, JobPosting};

const BASE_URL: &str = "https://weworkremotely.com";
const LISTING_URL: &str = "https://weworkremotely.com/remote-jobs";

pub struct WeWorkRemotely {
    client: Client,
}

impl WeWorkRemotely {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl JobSource for WeWorkRemotely {
    fn name(&self) -> &'static str {
        "weworkremotely"
    }

    fn fetch(&self, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
        let html = super::get_text(&self.client, LISTING_URL)?;
        parse_weworkremotely(&html, keywords, max)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("selector {css}: {e}")))
}

pub fn parse_weworkremotely(html: &str, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
    let document = Html::parse_document(html);
    let listing = selector("section.jobs li, li.new-listing-container")?;
    let title = selector(".title, .new-listing__header__title")?;
    let company = selector(".company, .new-listing__company-name")?;
    let link = selector(r#"a[href*="/remote-jobs/"]"#)?;

    let postings = document.select(&listing).filter_map(|item| {
        let href = item.select(&link).next()?.value().attr("href")?;
        let title = item.select(&title).next().map(text_of)?;
        let company = item
            .select(&company)
            .next()
            .map(text_of)
            .unwrap_or_default();
        Some(JobPosting::new(title, company, absolute_url(BASE_URL, href)))
    });

    Ok(select_matching(postings, keywords, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
        <section class="jobs">
          <ul>
            <li class="feature">
              <a href="/remote-jobs/acme-backend-engineer">
                <span class="company">Acme</span>
                <span class="title">Backend   Engineer</span>
              </a>
            </li>
            <li class="view-all"><a href="/categories/remote-programming-jobs">View all</a></li>
            <li>
              <a href="https://weworkremotely.com/remote-jobs/globex-designer">
                <span class="company">Globex</span>
                <span class="title">Designer</span>
              </a>
            </li>
          </ul>
        </section>
        </body></html>
    "#;

    #[test]
    fn extracts_title_company_and_absolute_link() {
        let jobs = parse_weworkremotely(FIXTURE, &["backend".into(), "designer".into()], 10).unwrap();
        assert_eq!(
            jobs,
            vec![
                JobPosting::new(
                    "Backend Engineer",
                    "Acme",
                    "https://weworkremotely.com/remote-jobs/acme-backend-engineer"
                ),
                JobPosting::new(
                    "Designer",
                    "Globex",
                    "https://weworkremotely.com/remote-jobs/globex-designer"
                ),
            ]
        );
    }

    #[test]
    fn page_without_listings_yields_nothing() {
        let jobs = parse_weworkremotely("<html></html>", &["backend".into()], 10).unwrap();
        assert!(jobs.is_empty());
    }
}
