use std::fmt;

/// Query parameter names understood by the reporting API.
pub mod keys {
    pub const PROJECT_ID: &str = "projectId";
    pub const NUM_OF_RESULTS: &str = "numOfResults";
    pub const COUNT_TYPE: &str = "countType";
    pub const DEVICE: &str = "device";
    pub const EXTERNAL: &str = "external";
    pub const DATE: &str = "date";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const TIME_ZONE: &str = "timeZone";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
}

/// One report type and its fixed path below `{base}/{version}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UserProjects,
    CreateProject,
    RecentKeywordActivity,
    PopularPages,
    EntryPages,
    ExitPages,
    CameFrom,
    Browsers,
    OperatingSystems,
    RecentPageloadActivity,
    ExitLinkActivity,
    DownloadLinkActivity,
    SummaryStats,
    RecentVisitors,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::UserProjects => "user_projects",
            Endpoint::CreateProject => "add_project",
            Endpoint::RecentKeywordActivity => "keyword-activity",
            Endpoint::PopularPages => "popular",
            Endpoint::EntryPages => "entry",
            Endpoint::ExitPages => "exit",
            Endpoint::CameFrom => "camefrom",
            Endpoint::Browsers => "browsers",
            Endpoint::OperatingSystems => "os",
            Endpoint::RecentPageloadActivity => "pageload",
            Endpoint::ExitLinkActivity => "exit-link-activity",
            Endpoint::DownloadLinkActivity => "download-link-activity",
            Endpoint::SummaryStats => "summary",
            Endpoint::RecentVisitors => "visitor",
        }
    }

    /// Everything except project listing and creation needs a project ID.
    pub fn requires_project(&self) -> bool {
        !matches!(self, Endpoint::UserProjects | Endpoint::CreateProject)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Device filter for the browser/OS/activity reports. `None` at the call site
/// means all devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
