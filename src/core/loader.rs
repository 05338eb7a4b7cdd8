//! Bulk loading of record files
//!
//! List commands need every record of a type; a single bad file must not take
//! the whole listing down, so parse failures are collected alongside the
//! successes and surfaced as warnings by the caller.

use std::path::PathBuf;

use crate::core::entity::Entity;
use crate::core::project::Project;
use crate::yaml::{parse_yaml_file, YamlError};

/// Load every record of type `E`, in file (creation) order
///
/// Returns the parsed records plus the files that failed to parse.
pub fn load_all<E: Entity>(project: &Project) -> (Vec<E>, Vec<(PathBuf, YamlError)>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for path in project.iter_entity_files(E::PREFIX) {
        match parse_yaml_file::<E>(&path) {
            Ok(record) => records.push(record),
            Err(e) => failures.push((path, e)),
        }
    }

    (records, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use crate::entities::Task;
    use crate::yaml::write_yaml_file;
    use tempfile::tempdir;

    #[test]
    fn test_load_all_collects_failures_separately() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let task = Task::new("Call Acme", "test");
        let path = project.entity_path(EntityPrefix::Task, &task.id.to_string());
        write_yaml_file(&path, &task).unwrap();

        let bad = project.entity_path(EntityPrefix::Task, "TASK-BROKEN");
        std::fs::write(&bad, "title: [unclosed").unwrap();

        let (records, failures) = load_all::<Task>(&project);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Call Acme");
        assert_eq!(failures.len(), 1);
        assert!(failures[0].0.to_string_lossy().contains("TASK-BROKEN"));
    }
}
