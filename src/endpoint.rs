//! Request URL templates for every resource the client reads.
//!
//! Names are inserted verbatim: nothing is percent-encoded here, so a nested job can be
//! addressed as `"folder/job/inner"`. Callers must supply path-safe names.

/// Query suffix appended to every request.
pub const API_SUFFIX: &str = "/api/json?pretty=true";

/// A readable Jenkins resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource<'a> {
    /// `{base}/job/{job}/api/json?pretty=true`
    Job { job: &'a str },
    /// `{base}/job/{job}/{number}/api/json?pretty=true`
    Build { job: &'a str, number: u64 },
    /// `{base}/api/json?pretty=true`
    AllJobs,
    /// `{base}/job/{folder}/api/json?pretty=true`
    FolderJobs { folder: &'a str },
    /// `{base}/view/{view}/api/json?pretty=true`
    ViewJobs { view: &'a str },
    /// `{base}/user/{user}/my-views/view/{view}/api/json?pretty=true`
    UserViewJobs { user: &'a str, view: &'a str },
}

impl Resource<'_> {
    /// Path and query relative to the base URL, starting with `/`.
    #[must_use]
    pub fn path(&self) -> String {
        let prefix = match self {
            Self::Job { job } => format!("/job/{job}"),
            Self::Build { job, number } => format!("/job/{job}/{number}"),
            Self::AllJobs => String::new(),
            Self::FolderJobs { folder } => format!("/job/{folder}"),
            Self::ViewJobs { view } => format!("/view/{view}"),
            Self::UserViewJobs { user, view } => format!("/user/{user}/my-views/view/{view}"),
        };
        prefix + API_SUFFIX
    }

    /// Short label for the resource kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Job { .. } => "job",
            Self::Build { .. } => "build",
            Self::AllJobs => "all_jobs",
            Self::FolderJobs { .. } => "folder_jobs",
            Self::ViewJobs { .. } => "view_jobs",
            Self::UserViewJobs { .. } => "user_view_jobs",
        }
    }

    /// Full request URL against an already normalized base (no trailing `/` added back).
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{base}{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://ci.example.com";

    #[test]
    fn job_and_build_templates() {
        assert_eq!(
            Resource::Job { job: "demo" }.url(BASE),
            "https://ci.example.com/job/demo/api/json?pretty=true"
        );
        assert_eq!(
            Resource::Build {
                job: "demo",
                number: 42
            }
            .url(BASE),
            "https://ci.example.com/job/demo/42/api/json?pretty=true"
        );
    }

    #[test]
    fn listing_templates() {
        assert_eq!(
            Resource::AllJobs.url(BASE),
            "https://ci.example.com/api/json?pretty=true"
        );
        assert_eq!(
            Resource::FolderJobs { folder: "team" }.url(BASE),
            "https://ci.example.com/job/team/api/json?pretty=true"
        );
        assert_eq!(
            Resource::ViewJobs { view: "nightly" }.url(BASE),
            "https://ci.example.com/view/nightly/api/json?pretty=true"
        );
        assert_eq!(
            Resource::UserViewJobs {
                user: "alice",
                view: "mine"
            }
            .url(BASE),
            "https://ci.example.com/user/alice/my-views/view/mine/api/json?pretty=true"
        );
    }

    #[test]
    fn names_are_not_encoded() {
        assert_eq!(
            Resource::Job {
                job: "team/job/app"
            }
            .path(),
            "/job/team/job/app/api/json?pretty=true"
        );
    }
}
