use super::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};
use std::{ops::Deref, slice, vec};

/// Kind of job, derived from the `_class` discriminator Jenkins attaches to every item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JobType {
    /// Discriminator missing, malformed or not one of the known kinds.
    #[default]
    Unknown,
    /// Pipeline job.
    WorkflowJob,
    /// Freestyle project.
    FreeStyleProject,
    /// Plain folder holding other jobs; not buildable itself.
    Folder,
    /// Multibranch pipeline; holds one job per branch.
    WorkflowMultiBranchProject,
}

impl JobType {
    /// Resolve a fully-qualified class name such as `hudson.model.FreeStyleProject`.
    ///
    /// Only the part after the last `.` is compared, case-sensitively. Anything that does
    /// not match resolves to [`JobType::Unknown`]; this never fails.
    #[must_use]
    pub fn classify(discriminator: &str) -> Self {
        let simple_name = discriminator.rsplit('.').next().unwrap_or(discriminator);
        match simple_name {
            "WorkflowJob" => Self::WorkflowJob,
            "FreeStyleProject" => Self::FreeStyleProject,
            "Folder" => Self::Folder,
            "WorkflowMultiBranchProject" => Self::WorkflowMultiBranchProject,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::WorkflowJob => "workflowJob",
            Self::FreeStyleProject => "freeStyleProject",
            Self::Folder => "folder",
            Self::WorkflowMultiBranchProject => "workflowMultiBranchProject",
        }
    }

    /// Folder-like kinds that carry sub-jobs instead of builds.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Folder | Self::WorkflowMultiBranchProject)
    }
}

fn job_type_from_class<'de, D>(deserializer: D) -> Result<JobType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(JobType::classify)
        .unwrap_or_default())
}

/// Ball color shown for a job: last known stability, `_anime` while a build runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Red,
    RedAnime,
    Yellow,
    YellowAnime,
    Blue,
    BlueAnime,
    Grey,
    GreyAnime,
    Disabled,
    DisabledAnime,
    Aborted,
    AbortedAnime,
    #[serde(rename = "notbuilt")]
    NotBuilt,
    #[serde(rename = "notbuilt_anime")]
    NotBuiltAnime,
}

impl BuildStatus {
    /// `true` for the `_anime` variants, i.e. a build is currently running.
    #[must_use]
    pub fn is_animated(self) -> bool {
        matches!(
            self,
            Self::RedAnime
                | Self::YellowAnime
                | Self::BlueAnime
                | Self::GreyAnime
                | Self::DisabledAnime
                | Self::AbortedAnime
                | Self::NotBuiltAnime
        )
    }

    /// The same color without the running-build animation.
    #[must_use]
    pub fn settled(self) -> Self {
        match self {
            Self::RedAnime => Self::Red,
            Self::YellowAnime => Self::Yellow,
            Self::BlueAnime => Self::Blue,
            Self::GreyAnime => Self::Grey,
            Self::DisabledAnime => Self::Disabled,
            Self::AbortedAnime => Self::Aborted,
            Self::NotBuiltAnime => Self::NotBuilt,
            other => other,
        }
    }
}

/// Reference to one build of a job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Build {
    pub number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Job details from `GET /job/<name>/api/json`, also used for items of job listings.
///
/// Fields the server leaves out take their empty value. Folders, for instance, carry
/// neither `color` nor `nextBuildNumber`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct JobInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    pub display_name: Option<String>,
    pub color: Option<BuildStatus>,
    pub last_build: Option<Build>,
    pub last_failed_build: Option<Build>,
    pub last_successful_build: Option<Build>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "_class", deserialize_with = "job_type_from_class")]
    pub job_type: JobType,
    /// Sub-jobs; only populated for folders and multibranch projects.
    pub jobs: JobCollection,
    /// Recent builds, newest first. Jenkins truncates this list.
    pub builds: BuildCollection,
    pub description: Option<String>,
    pub in_queue: bool,
    pub next_build_number: Option<u64>,
    pub buildable: bool,
    pub disabled: bool,
    pub downstream_projects: JobCollection,
    pub upstream_projects: JobCollection,
    pub concurrent_build: bool,
}

impl JobInfo {
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.job_type.is_container()
    }

    #[must_use]
    pub fn last_build_number(&self) -> Option<u64> {
        self.last_build.as_ref().map(|build| build.number)
    }

    /// `true` while the ball color is animated.
    #[must_use]
    pub fn is_building(&self) -> bool {
        self.color.is_some_and(BuildStatus::is_animated)
    }
}

macro_rules! collection_type {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Vec<$item>);

        impl $name {
            #[must_use]
            pub fn into_inner(self) -> Vec<$item> {
                self.0
            }
        }

        impl Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(value: Vec<$item>) -> Self {
                Self(value)
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

collection_type! {
    /// Ordered jobs, in the order the server listed them.
    JobCollection, JobInfo
}

collection_type! {
    /// Ordered build references, in the order the server listed them.
    BuildCollection, Build
}

impl JobCollection {
    /// First job with the given short name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JobInfo> {
        self.0.iter().find(|job| job.name == name)
    }
}
