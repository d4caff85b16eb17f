use crate::{Error, JobCollection, Resource, UserId, ViewName, decode};

/// Jenkins views (read-only).
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct ViewsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl ViewsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl ViewsService {
    /// `GET /view/<name>/api/json?pretty=true`
    pub async fn jobs(&self, view: impl Into<ViewName>) -> Result<JobCollection, Error> {
        let view = view.into();
        self.client
            .fetch(
                Resource::ViewJobs {
                    view: view.as_str(),
                },
                decode::job_collection,
            )
            .await
    }

    /// `GET /user/<user>/my-views/view/<name>/api/json?pretty=true`
    pub async fn user_view_jobs(
        &self,
        user: impl Into<UserId>,
        view: impl Into<ViewName>,
    ) -> Result<JobCollection, Error> {
        let user = user.into();
        let view = view.into();
        self.client
            .fetch(
                Resource::UserViewJobs {
                    user: user.as_str(),
                    view: view.as_str(),
                },
                decode::job_collection,
            )
            .await
    }
}

/// Jenkins views (read-only, blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingViewsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingViewsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingViewsService {
    /// `GET /view/<name>/api/json?pretty=true`
    pub fn jobs(&self, view: impl Into<ViewName>) -> Result<JobCollection, Error> {
        let view = view.into();
        self.client.fetch(
            Resource::ViewJobs {
                view: view.as_str(),
            },
            decode::job_collection,
        )
    }

    /// `GET /user/<user>/my-views/view/<name>/api/json?pretty=true`
    pub fn user_view_jobs(
        &self,
        user: impl Into<UserId>,
        view: impl Into<ViewName>,
    ) -> Result<JobCollection, Error> {
        let user = user.into();
        let view = view.into();
        self.client.fetch(
            Resource::UserViewJobs {
                user: user.as_str(),
                view: view.as_str(),
            },
            decode::job_collection,
        )
    }
}
