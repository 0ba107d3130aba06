//! Remote schedule source
//!
//! Schedules are JSON files in a folder of a GitHub repository. The contents
//! API lists the folder; each entry carries a `download_url` for the raw file.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::courses::record::{self, CourseRecord};
use crate::error::{Error, Result};

/// Contents API of the repository holding the schedule files
pub const DEFAULT_SCHEDULES_URL: &str = "https://api.github.com/repos/abdonmorales/schedules/contents";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One schedule file offered by the remote
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleFile {
    pub name: String,
    pub download_url: String,
}

/// Where course lists come from
pub trait CourseSource {
    /// Schedule files available for selection
    fn list_available(&self) -> Result<Vec<ScheduleFile>>;

    /// Download and parse one schedule
    fn fetch(&self, file: &ScheduleFile) -> Result<Vec<CourseRecord>>;
}

/// Schedules listed through the GitHub contents API
pub struct GithubSource {
    client: Client,
    listing_url: Url,
}

impl GithubSource {
    /// Source for `folder` under the contents URL `base_url`
    ///
    /// The folder name is percent-encoded (`Spring 2024` becomes
    /// `Spring%202024`).
    pub fn new(base_url: &str, folder: &str) -> Result<Self> {
        let listing_url = listing_url(base_url, folder)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteUnavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl CourseSource for GithubSource {
    fn list_available(&self) -> Result<Vec<ScheduleFile>> {
        let entries: Vec<ListingEntry> = self.get(self.listing_url.as_str())?.json()?;
        let files: Vec<ScheduleFile> = entries
            .into_iter()
            .filter_map(ListingEntry::into_schedule_file)
            .collect();
        tracing::debug!(count = files.len(), "listed schedule files");
        Ok(files)
    }

    fn fetch(&self, file: &ScheduleFile) -> Result<Vec<CourseRecord>> {
        let document: serde_json::Value = self.get(&file.download_url)?.json()?;
        record::parse_schedule(document)
    }
}

/// Raw listing entry; directories have no `download_url`
#[derive(Debug, Deserialize)]
struct ListingEntry {
    name: String,
    download_url: Option<String>,
}

impl ListingEntry {
    fn into_schedule_file(self) -> Option<ScheduleFile> {
        if !self.name.ends_with(".json") {
            return None;
        }
        Some(ScheduleFile {
            name: self.name,
            download_url: self.download_url?,
        })
    }
}

fn listing_url(base_url: &str, folder: &str) -> Result<Url> {
    let invalid = || Error::NotFound(format!("Invalid schedules URL: {}", base_url));

    let mut url = Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push(folder);
    Ok(url)
}
