use serde::Deserialize;

/// Default desktop browser user agent sent with crawler and search requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// Main configuration structure for Company-Scout
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub emails: EmailsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// HTTP client configuration shared by the crawler and the search adapter
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// User-Agent header value
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Search engine configuration used by the domain resolver
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchConfig {
    /// HTML search endpoint queried with `?q=<query>`
    pub endpoint: String,

    /// Qualifier appended to every company name (e.g. "UK")
    pub jurisdiction: String,

    /// Number of ranked results considered per company
    pub max_results: usize,

    /// Pause after every search query (milliseconds)
    pub query_delay_ms: u64,

    /// Domains containing any of these substrings are never chosen
    pub blocklist: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            jurisdiction: "UK".to_string(),
            max_results: 5,
            query_delay_ms: 5000,
            blocklist: vec![
                "compan".to_string(),
                "gazette".to_string(),
                "guide".to_string(),
            ],
        }
    }
}

/// Website crawler behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched per website
    pub max_pages_per_site: usize,

    /// Pause after every page fetch attempt (milliseconds)
    pub page_delay_ms: u64,

    /// Longest accepted email candidate (characters)
    pub max_candidate_length: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_site: 2,
            page_delay_ms: 1000,
            max_candidate_length: crate::email::DEFAULT_MAX_CANDIDATE_LENGTH,
        }
    }
}

/// Email discovery workflow input and output
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EmailsConfig {
    /// CSV file with one company per row
    pub input_path: String,

    /// CSV file written with the appended domain and email columns
    pub output_path: String,

    /// Column holding the company name (case-sensitive)
    pub company_column: String,

    /// Only the first N rows are processed; 0 processes all rows
    pub max_companies: usize,
}

impl Default for EmailsConfig {
    fn default() -> Self {
        Self {
            input_path: "companies.csv".to_string(),
            output_path: "companies_with_domains_emails.csv".to_string(),
            company_column: "Company Name".to_string(),
            max_companies: 150,
        }
    }
}

/// Company registry scraping configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RegistryConfig {
    /// Registry site root, used to resolve relative company links
    pub base_url: String,

    /// Advanced search results URL for page 1
    pub search_url: String,

    /// Path prefix that identifies company detail links
    pub detail_path_prefix: String,

    /// Stop once this many company records were collected
    pub max_companies: usize,

    /// Wait after loading a results page (milliseconds)
    pub results_load_delay_ms: u64,

    /// Wait after loading a company detail page (milliseconds)
    pub detail_load_delay_ms: u64,

    /// Pause before moving to the next results page (milliseconds)
    pub page_delay_ms: u64,

    /// Page text fragments that identify a CAPTCHA challenge (case-insensitive)
    pub challenge_phrases: Vec<String>,

    /// CSV file the collected records are written to
    pub output_path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://find-and-update.company-information.service.gov.uk".to_string(),
            search_url: "https://find-and-update.company-information.service.gov.uk/advanced-search/get-results?companyNameIncludes=&registeredOfficeAddress=Manchester&sicCodes=28150".to_string(),
            detail_path_prefix: "/company/".to_string(),
            max_companies: 104,
            results_load_delay_ms: 5000,
            detail_load_delay_ms: 3000,
            page_delay_ms: 2000,
            challenge_phrases: vec![
                "prove you are not a robot".to_string(),
                "enter characters".to_string(),
            ],
            output_path: "companies_house_results.csv".to_string(),
        }
    }
}

/// Browser session options for the registry workflow
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BrowserConfig {
    /// Run Chromium without a visible window
    ///
    /// CAPTCHAs can only be solved by hand with a visible window.
    pub headless: bool,

    /// Connect to an already running Chromium instead of launching one
    pub remote_debugging_url: Option<String>,

    /// Navigation timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            remote_debugging_url: None,
            request_timeout_secs: 30,
        }
    }
}
