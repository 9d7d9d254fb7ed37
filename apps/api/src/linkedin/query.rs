//! Typed LinkedIn listing filters, turned into `--flag=value` scraper arguments.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "past month")]
    PastMonth,
    #[serde(rename = "past week")]
    PastWeek,
    #[serde(rename = "24hr")]
    Day,
}

impl DatePosted {
    fn as_arg(self) -> &'static str {
        match self {
            DatePosted::PastMonth => "past month",
            DatePosted::PastWeek => "past week",
            DatePosted::Day => "24hr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Internship,
    #[serde(rename = "entry level")]
    EntryLevel,
    Associate,
    Senior,
    Director,
    Executive,
}

impl ExperienceLevel {
    fn as_arg(self) -> &'static str {
        match self {
            ExperienceLevel::Internship => "internship",
            ExperienceLevel::EntryLevel => "entry level",
            ExperienceLevel::Associate => "associate",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Director => "director",
            ExperienceLevel::Executive => "executive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RemoteFilter {
    #[serde(rename = "on-site", alias = "on site")]
    OnSite,
    #[serde(rename = "remote")]
    Remote,
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl RemoteFilter {
    fn as_arg(self) -> &'static str {
        match self {
            RemoteFilter::OnSite => "on-site",
            RemoteFilter::Remote => "remote",
            RemoteFilter::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum JobType {
    #[serde(rename = "internship")]
    Internship,
    #[serde(rename = "full-time", alias = "full time")]
    FullTime,
    #[serde(rename = "part-time", alias = "part time")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "temporary")]
    Temporary,
    #[serde(rename = "volunteer")]
    Volunteer,
}

impl JobType {
    fn as_arg(self) -> &'static str {
        match self {
            JobType::Internship => "internship",
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Volunteer => "volunteer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Recent,
    Relevant,
}

impl SortBy {
    fn as_arg(self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::Relevant => "relevant",
        }
    }
}

/// Query string of GET /api/linkedin/list. Every filter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub date_since_posted: Option<DatePosted>,
    pub experience_level: Option<ExperienceLevel>,
    pub remote_filter: Option<RemoteFilter>,
    pub job_type: Option<JobType>,
    pub sort_by: Option<SortBy>,
}

impl ListingQuery {
    /// Scraper arguments after the `list` subcommand, in a fixed order.
    pub fn to_args(&self) -> Vec<String> {
        let text = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let pairs: [(&str, Option<String>); 7] = [
            ("--keywords", text(&self.keywords)),
            ("--location", text(&self.location)),
            (
                "--date_since_posted",
                self.date_since_posted.map(|v| v.as_arg().to_string()),
            ),
            (
                "--experience_level",
                self.experience_level.map(|v| v.as_arg().to_string()),
            ),
            (
                "--remote_filter",
                self.remote_filter.map(|v| v.as_arg().to_string()),
            ),
            ("--job_type", self.job_type.map(|v| v.as_arg().to_string())),
            ("--sort_by", self.sort_by.map(|v| v.as_arg().to_string())),
        ];

        // `--flag=value` keeps a value such as "-remote" from parsing as a flag.
        pairs
            .into_iter()
            .filter_map(|(flag, value)| value.map(|v| format!("{flag}={v}")))
            .collect()
    }
}

/// LinkedIn posting ids are numeric; anything else is rejected before it can
/// reach the scraper's argument parser.
pub fn is_valid_posting_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 32 && id.bytes().all(|b| b.is_ascii_digit())
}
