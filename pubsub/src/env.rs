//! Process environment export.
//!
//! Setting variables mutates process-wide state with no synchronization:
//! concurrent exports race and the last writer wins. Nothing here unsets a
//! variable except [`EnvGuard`].

use errors::FixtureError;
use std::ffi::OsString;

/// Variable the Pub/Sub client libraries read the emulator address from.
pub const EMULATOR_HOST_VAR: &str = "PUBSUB_EMULATOR_HOST";

/// Variable the Google Cloud client libraries read the project id from.
pub const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";

/// Names of the variables an instance exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvExport {
    pub host_var: String,
    pub project_var: String
}

impl Default for EnvExport {
    fn default() -> Self {
        Self {
            host_var: EMULATOR_HOST_VAR.to_string(),
            project_var: PROJECT_VAR.to_string()
        }
    }
}

impl EnvExport {
    pub fn new(host_var: impl Into<String>, project_var: impl Into<String>) -> Self {
        Self {
            host_var: host_var.into(),
            project_var: project_var.into()
        }
    }
}

fn rejection(name: &str, value: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.contains('=') {
        Some("name contains '='")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else if value.contains('\0') {
        Some("value contains a NUL byte")
    } else {
        None
    }
}

/// Sets `name` to `value`, refusing assignments the platform would reject.
fn set_var_checked(name: &str, value: &str) -> Result<(), FixtureError> {
    if let Some(reason) = rejection(name, value) {
        return Err(FixtureError::Environment {
            variable: name.to_string(),
            reason: reason.to_string()
        });
    }

    // SAFETY: callers own environment synchronization, see module docs.
    unsafe {
        std::env::set_var(name, value);
    }
    tracing::debug!("Exported {}={}", name, value);
    Ok(())
}

/// Sets the host variable, then the project variable.
///
/// Stops at the first rejected assignment. An earlier assignment that
/// already succeeded stays in place.
pub(crate) fn export(export: &EnvExport, host: &str, project: &str) -> Result<(), FixtureError> {
    set_var_checked(&export.host_var, host)?;
    set_var_checked(&export.project_var, project)?;
    Ok(())
}

/// Restores the exported variables to their previous values on drop.
///
/// Variables that were unset before the export are removed again.
#[derive(Debug)]
#[must_use = "dropping the guard immediately restores the previous environment"]
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>
}

impl EnvGuard {
    pub(crate) fn export(export: &EnvExport, host: &str, project: &str) -> Result<Self, FixtureError> {
        let mut guard = Self {
            previous: Vec::with_capacity(2)
        };

        for (name, value) in [(&export.host_var, host), (&export.project_var, project)] {
            let before = std::env::var_os(name.as_str());
            set_var_checked(name, value)?;
            guard.previous.push((name.clone(), before));
        }

        Ok(guard)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, before) in self.previous.drain(..).rev() {
            // SAFETY: callers own environment synchronization, see module docs.
            unsafe {
                match before {
                    Some(value) => std::env::set_var(&name, value),
                    None => std::env::remove_var(&name)
                }
            }
            tracing::debug!("Restored {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const HOST_VAR: &str = "PUBSUB_FIXTURE_TEST_HOST";
    const PROJECT_TEST_VAR: &str = "PUBSUB_FIXTURE_TEST_PROJECT";

    fn test_export() -> EnvExport {
        EnvExport::new(HOST_VAR, PROJECT_TEST_VAR)
    }

    fn clear() {
        unsafe {
            env::remove_var(HOST_VAR);
            env::remove_var(PROJECT_TEST_VAR);
        }
    }

    #[test]
    fn test_default_names() {
        let export = EnvExport::default();
        assert_eq!(export.host_var, "PUBSUB_EMULATOR_HOST");
        assert_eq!(export.project_var, "GOOGLE_CLOUD_PROJECT");
    }

    #[test]
    fn test_rejection_rules() {
        assert_eq!(rejection("OK_NAME", "value"), None);
        assert!(rejection("", "value").is_some());
        assert!(rejection("BAD=NAME", "value").is_some());
        assert!(rejection("BAD\0NAME", "value").is_some());
        assert!(rejection("OK_NAME", "bad\0value").is_some());
    }

    #[test]
    #[serial]
    fn test_export_sets_both_variables() {
        clear();

        export(&test_export(), "localhost:32768", "__docker_initiator__project-12345678").unwrap();

        assert_eq!(env::var(HOST_VAR).unwrap(), "localhost:32768");
        assert_eq!(
            env::var(PROJECT_TEST_VAR).unwrap(),
            "__docker_initiator__project-12345678"
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_export_stops_at_first_rejection_without_rollback() {
        clear();

        let result = export(
            &EnvExport::new(HOST_VAR, "BROKEN=NAME"),
            "localhost:32768",
            "project",
        );

        match result {
            Err(FixtureError::Environment { variable, .. }) => assert_eq!(variable, "BROKEN=NAME"),
            other => panic!("expected Environment error, got {:?}", other)
        }
        assert_eq!(env::var(HOST_VAR).unwrap(), "localhost:32768");
        clear();
    }

    #[test]
    #[serial]
    fn test_guard_restores_previous_values() {
        clear();
        unsafe {
            env::set_var(HOST_VAR, "previous:1");
        }

        {
            let _guard = EnvGuard::export(&test_export(), "localhost:32768", "project-a").unwrap();
            assert_eq!(env::var(HOST_VAR).unwrap(), "localhost:32768");
            assert_eq!(env::var(PROJECT_TEST_VAR).unwrap(), "project-a");
        }

        assert_eq!(env::var(HOST_VAR).unwrap(), "previous:1");
        assert!(env::var_os(PROJECT_TEST_VAR).is_none());
        clear();
    }

    #[test]
    #[serial]
    fn test_guard_rolls_back_partial_export() {
        clear();

        let result = EnvGuard::export(
            &EnvExport::new(HOST_VAR, "BROKEN=NAME"),
            "localhost:32768",
            "project",
        );

        assert!(result.is_err());
        assert!(env::var_os(HOST_VAR).is_none());
    }
}
