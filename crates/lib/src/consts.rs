//! Names shared across the resource: files it writes, environment it reads.

/// Mapping used by `out` when no mapping parameter is given.
pub const IDENTITY_MAPPING: &str = "root = this";

pub const VERSION_FILE: &str = "version.json";
pub const METADATA_FILE: &str = "metadata.json";

pub const ENV_BUILD_ID: &str = "BUILD_ID";
pub const ENV_BUILD_NAME: &str = "BUILD_NAME";
pub const ENV_BUILD_JOB_NAME: &str = "BUILD_JOB_NAME";
pub const ENV_BUILD_PIPELINE_NAME: &str = "BUILD_PIPELINE_NAME";
pub const ENV_BUILD_TEAM_NAME: &str = "BUILD_TEAM_NAME";
pub const ENV_BUILD_PIPELINE_INSTANCE_VARS: &str = "BUILD_PIPELINE_INSTANCE_VARS";
pub const ENV_BUILD_CREATED_BY: &str = "BUILD_CREATED_BY";
pub const ENV_ATC_EXTERNAL_URL: &str = "ATC_EXTERNAL_URL";
