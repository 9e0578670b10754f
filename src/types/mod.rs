// ABOUTME: Validated identifier newtypes for the deployment domain.
// ABOUTME: Exports ApplicationName, EnvironmentName, and VersionLabel.

mod application_name;
mod environment_name;
mod version_label;

pub use application_name::{ApplicationName, ApplicationNameError};
pub use environment_name::{EnvironmentName, EnvironmentNameError};
pub use version_label::{VersionLabel, VersionLabelError};
