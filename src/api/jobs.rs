use crate::{BuildInfo, Error, JobCollection, JobInfo, JobName, Resource, decode};
use std::collections::HashMap;

/// Jenkins jobs and builds (read-only).
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct JobsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl JobsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl JobsService {
    /// `GET /job/<name>/api/json?pretty=true`
    pub async fn info(&self, job: impl Into<JobName>) -> Result<JobInfo, Error> {
        let job = job.into();
        self.client
            .fetch(Resource::Job { job: job.as_str() }, decode::job_info)
            .await
    }

    /// One [`JobsService::info`] per distinct name, strictly one after another in input order.
    ///
    /// Any failure aborts the whole batch with that request's error; no partial map is
    /// returned.
    pub async fn info_many<I, S>(&self, jobs: I) -> Result<HashMap<JobName, JobInfo>, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<JobName>,
    {
        let mut infos = HashMap::new();
        for job in jobs {
            let job = job.into();
            if infos.contains_key(&job) {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(job = %job, fetched = infos.len(), "fetching job info");
            let info = self.info(job.clone()).await?;
            infos.insert(job, info);
        }
        Ok(infos)
    }

    /// `GET /job/<name>/<number>/api/json?pretty=true`
    pub async fn build_info(&self, job: impl Into<JobName>, number: u64) -> Result<BuildInfo, Error> {
        let job = job.into();
        self.client
            .fetch(
                Resource::Build {
                    job: job.as_str(),
                    number,
                },
                decode::build_info,
            )
            .await
    }

    /// `GET /api/json?pretty=true`
    pub async fn all(&self) -> Result<JobCollection, Error> {
        self.client
            .fetch(Resource::AllJobs, decode::job_collection)
            .await
    }

    /// `GET /job/<folder>/api/json?pretty=true`
    pub async fn in_folder(&self, folder: impl Into<JobName>) -> Result<JobCollection, Error> {
        let folder = folder.into();
        self.client
            .fetch(
                Resource::FolderJobs {
                    folder: folder.as_str(),
                },
                decode::job_collection,
            )
            .await
    }
}

/// Jenkins jobs and builds (read-only, blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingJobsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingJobsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingJobsService {
    /// `GET /job/<name>/api/json?pretty=true`
    pub fn info(&self, job: impl Into<JobName>) -> Result<JobInfo, Error> {
        let job = job.into();
        self.client
            .fetch(Resource::Job { job: job.as_str() }, decode::job_info)
    }

    /// Sequential batch lookup; see [`JobsService::info_many`].
    pub fn info_many<I, S>(&self, jobs: I) -> Result<HashMap<JobName, JobInfo>, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<JobName>,
    {
        let mut infos = HashMap::new();
        for job in jobs {
            let job = job.into();
            if infos.contains_key(&job) {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(job = %job, fetched = infos.len(), "fetching job info");
            let info = self.info(job.clone())?;
            infos.insert(job, info);
        }
        Ok(infos)
    }

    /// `GET /job/<name>/<number>/api/json?pretty=true`
    pub fn build_info(&self, job: impl Into<JobName>, number: u64) -> Result<BuildInfo, Error> {
        let job = job.into();
        self.client.fetch(
            Resource::Build {
                job: job.as_str(),
                number,
            },
            decode::build_info,
        )
    }

    /// `GET /api/json?pretty=true`
    pub fn all(&self) -> Result<JobCollection, Error> {
        self.client.fetch(Resource::AllJobs, decode::job_collection)
    }

    /// `GET /job/<folder>/api/json?pretty=true`
    pub fn in_folder(&self, folder: impl Into<JobName>) -> Result<JobCollection, Error> {
        let folder = folder.into();
        self.client.fetch(
            Resource::FolderJobs {
                folder: folder.as_str(),
            },
            decode::job_collection,
        )
    }
}
