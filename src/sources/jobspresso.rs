use reqwest::blocking::Client;
use scraper::{Html, Selector};

use super::{text_of, JobSource};
use crate::error::{Error, Result};
use crate::job::{select_matching, JobPosting};

const LISTING_URL: &str = "https://jobspresso.co/remote-work/";

/// Jobspresso runs WP Job Manager; listings are `li.job_listing` cards.
pub struct Jobspresso {
    client: Client,
}

impl Jobspresso {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl JobSource for Jobspresso {
    fn name(&self) -> &'static str {
        "jobspresso"
    }

    fn fetch(&self, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
        let html = super::get_text(&self.client, LISTING_URL)?;
        parse_jobspresso(&html, keywords, max)
    }
}

pub fn parse_jobspresso(html: &str, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
    let parse = |css: &str| {
        Selector::parse(css).map_err(|e| Error::Parse(format!("selector {css}: {e}")))
    };
    let document = Html::parse_document(html);
    let card = parse("li.job_listing")?;
    let link = parse("a[href]")?;
    let title = parse(".job_listing-title, h3")?;
    let company_name = parse(".job_listing-company strong")?;
    let company_block = parse(".job_listing-company")?;

    let postings = document.select(&card).filter_map(|card| {
        let url = card.select(&link).next()?.value().attr("href")?.trim().to_string();
        let title = card.select(&title).next().map(text_of)?;
        let company = card
            .select(&company_name)
            .next()
            .or_else(|| card.select(&company_block).next())
            .map(text_of)
            .unwrap_or_default();
        Some(JobPosting::new(title, company, url))
    });

    Ok(select_matching(postings, keywords, max))
}
