// ABOUTME: Deployment lifecycle: status model, record accessors, and control operations.
// ABOUTME: Exports start_latest, retry, and cancel over the DeploymentClient port.

mod cancel;
mod deployment;
mod error;
mod latest;
mod retry;
mod status;

pub use cancel::{CANCELLED_BY_USER, CancelReport, CancelRequest, cancel};
pub use deployment::{
    CANCELLED_ANNOTATION, CANCELLED_AT_ANNOTATION, CANCELLED_BY_ANNOTATION, CANCELLED_VALUE,
    CONFIG_ANNOTATION, Deployment, DeploymentConfig, STATUS_ANNOTATION, STATUS_REASON_ANNOTATION,
    VERSION_ANNOTATION, config_name_of, deployment_name_for, is_cancellation_requested,
    make_deployment, status_of, version_of,
};
pub use error::{AccessorError, CancelFailure, LifecycleError, UnrecognizedStatus};
pub use latest::start_latest;
pub use retry::retry;
pub use status::{DeploymentStatus, ParseStatusError};
