//! Common test utilities for Jammer integration tests

#![allow(dead_code, clippy::expect_used)]

use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

use assert_cmd::Command;
use tempfile::TempDir;

/// Manifest of the sample project
///
/// Scripts in declared order `util, app, widgets, widgets.menu`; `app`
/// depends on `util` and has an older 1.0 release, `widgets` depends on
/// `app`. Stylesheets `site, site.print`.
pub const SAMPLE_MANIFEST: &str = r"
script:
  modules:
    - name: util
      version: 1.0
      last_modified: 1690000000
      path: js/util.js
      byte_size: 15
    - name: app
      version: 2.0
      last_modified: 1700000500
      path: js/app.js
      byte_size: 11
      dependencies: [util]
      serialized_versions:
        - version: 1.0
          last_modified: 1700000000
    - name: widgets
      version: 1.0
      last_modified: 1700000100
      path: js/widgets.js
      byte_size: 14
      dependencies: [app]
    - name: widgets.menu
      version: 1.5
      last_modified: 1700000200
      path: js/widgets/menu.js
      byte_size: 8
stylesheet:
  modules:
    - name: site
      version: 1.0
      last_modified: 1695000000
      path: css/site.css
      byte_size: 7
    - name: site.print
      version: 1.0
      last_modified: 1695000100
      path: css/site/print.css
      byte_size: 15
";

pub const SAMPLE_SOURCES: &[(&str, &str)] = &[
    ("static/js/util.js", "var util = {};\n"),
    ("static/js/app.js", "app(util);\n"),
    ("static/js/widgets.js", "widgets(app);\n"),
    ("static/js/widgets/menu.js", "menu();\n"),
    ("static/css/site.css", "body{}\n"),
    ("static/css/site/print.css", "@media print{}\n"),
];

/// A temporary project directory with a config, manifest and sources
pub struct TestProject {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create the sample project
    pub fn sample() -> Self {
        let project = Self::new();
        project.write_file("jammer.yaml", "manifest: manifest.yaml\nsource_root: static\n");
        project.write_file("manifest.yaml", SAMPLE_MANIFEST);
        for (path, content) in SAMPLE_SOURCES {
            project.write_file(path, content);
        }
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Set the modification time of a project file, in unix seconds
    pub fn touch(&self, path: &str, modified: u64) {
        std::fs::File::options()
            .write(true)
            .open(self.path.join(path))
            .and_then(|file| file.set_modified(UNIX_EPOCH + Duration::from_secs(modified)))
            .expect("Failed to set modification time");
    }

    /// The jammer binary, run inside this project
    pub fn jammer(&self) -> Command {
        let mut cmd = jammer_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

/// The jammer binary with a clean environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn jammer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("jammer").expect("jammer binary should be built");
    cmd.env_remove("JAMMER_DEBUG")
        .env_remove("JAMMER_ROOT_URI")
        .env_remove("JAMMER_LOG");
    cmd
}
