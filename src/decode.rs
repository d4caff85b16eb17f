//! Response mapping: raw `api/json` bodies into typed records.
//!
//! Every body must be a JSON object. Unknown fields are ignored and missing ones take their
//! empty value, but malformed JSON, a non-object body or a mistyped field is an error;
//! nothing is ever mapped to a blank record.

use crate::{BuildInfo, JobCollection, JobInfo};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

/// Map a job document.
pub fn job_info(body: &[u8]) -> Result<JobInfo, serde_json::Error> {
    from_object(parse_object(body)?)
}

/// Map a build document.
pub fn build_info(body: &[u8]) -> Result<BuildInfo, serde_json::Error> {
    from_object(parse_object(body)?)
}

/// Map the `jobs` array of a listing (root, folder or view) document.
///
/// Items are mapped one by one and keep the server's order; a failure names the index.
pub fn job_collection(body: &[u8]) -> Result<JobCollection, serde_json::Error> {
    let mut object = parse_object(body)?;
    let jobs = object
        .remove("jobs")
        .ok_or_else(|| serde_json::Error::missing_field("jobs"))?;
    let Value::Array(items) = jobs else {
        return Err(serde_json::Error::custom(format!(
            "`jobs`: expected an array, found {}",
            describe(&jobs)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            job_info_value(item)
                .map_err(|err| serde_json::Error::custom(format!("jobs[{index}]: {err}")))
        })
        .collect()
}

fn job_info_value(value: Value) -> Result<JobInfo, serde_json::Error> {
    match value {
        Value::Object(object) => from_object(object),
        other => Err(expected_object(&other)),
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(object) => Ok(object),
        other => Err(expected_object(&other)),
    }
}

fn from_object<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(object))
}

fn expected_object(found: &Value) -> serde_json::Error {
    serde_json::Error::custom(format!("expected a JSON object, found {}", describe(found)))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildStatus, JobType};

    #[test]
    fn maps_freestyle_job() {
        let body = br#"{
            "_class": "hudson.model.FreeStyleProject",
            "name": "demo",
            "fullName": "demo",
            "color": "blue",
            "lastBuild": { "_class": "hudson.model.FreeStyleBuild", "number": 5, "url": "https://ci/job/demo/5/" },
            "lastSuccessfulBuild": { "number": 5, "url": "https://ci/job/demo/5/" },
            "builds": [
                { "number": 5, "url": "https://ci/job/demo/5/" },
                { "number": 4, "url": "https://ci/job/demo/4/" }
            ],
            "nextBuildNumber": 6,
            "inQueue": false,
            "concurrentBuild": false,
            "property": [],
            "healthReport": [{ "score": 100 }]
        }"#;

        let job = job_info(body).unwrap();
        assert_eq!(job.name, "demo");
        assert_eq!(job.job_type, JobType::FreeStyleProject);
        assert_eq!(job.color, Some(BuildStatus::Blue));
        assert_eq!(job.last_build_number(), Some(5));
        assert_eq!(job.last_failed_build, None);
        assert_eq!(job.next_build_number, Some(6));
        let numbers: Vec<u64> = job.builds.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [5, 4]);
    }

    #[test]
    fn missing_discriminator_is_unknown_not_an_error() {
        let job = job_info(br#"{"name":"plain"}"#).unwrap();
        assert_eq!(job.job_type, JobType::Unknown);
    }

    #[test]
    fn collection_preserves_order_and_length() {
        let body = br#"{
            "_class": "hudson.model.Hudson",
            "jobs": [
                { "_class": "hudson.model.FreeStyleProject", "name": "c" },
                { "_class": "com.cloudbees.hudson.plugins.folder.Folder", "name": "a" },
                { "_class": "something.Else", "name": "b" }
            ]
        }"#;
        let jobs = job_collection(body).unwrap();
        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
        assert_eq!(jobs[1].job_type, JobType::Folder);
        assert_eq!(jobs[2].job_type, JobType::Unknown);
    }

    #[test]
    fn empty_listing_is_empty_collection() {
        assert!(job_collection(br#"{"jobs":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn listing_errors_name_the_offending_item() {
        let err = job_collection(br#"{"jobs":[{"name":"ok"},{"name":3}]}"#).unwrap_err();
        assert!(err.to_string().starts_with("jobs[1]:"), "{err}");

        let err = job_collection(br#"{"jobs":[{"name":"ok"},"oops"]}"#).unwrap_err();
        assert!(err.to_string().contains("jobs[1]: expected a JSON object"), "{err}");
    }

    #[test]
    fn listing_without_jobs_array_fails() {
        let err = job_collection(br#"{"views":[]}"#).unwrap_err();
        assert!(err.to_string().contains("jobs"), "{err}");

        let err = job_collection(br#"{"jobs":{}}"#).unwrap_err();
        assert!(err.to_string().contains("expected an array"), "{err}");
    }

    #[test]
    fn build_references_tolerate_missing_and_null_url() {
        let job = job_info(br#"{"lastBuild":{"number":5}}"#).unwrap();
        assert_eq!(job.last_build_number(), Some(5));
        assert_eq!(job.last_build.unwrap().url, "");

        let job = job_info(br#"{"builds":[{"number":5,"url":null}]}"#).unwrap();
        assert_eq!(job.builds.len(), 1);
        assert_eq!(job.builds[0].number, 5);
        assert!(job.builds[0].url.is_empty());
    }

    #[test]
    fn non_object_bodies_fail() {
        assert!(job_info(b"[]").is_err());
        assert!(build_info(b"null").is_err());
        assert!(build_info(br#""text""#).is_err());
        assert!(job_info(br#"{"name":"trunc"#).is_err());
        assert!(job_info(b"").is_err());
    }

    #[test]
    fn mistyped_field_fails() {
        assert!(build_info(br#"{"building":"yes"}"#).is_err());
        assert!(job_info(br#"{"color":"purple"}"#).is_err());
    }
}
