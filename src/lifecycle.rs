use crate::config::ShellScripts;
use crate::error::{Result, WebApiTestError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Deployment hooks run around a test session.
pub trait Lifecycle {
    /// Drop test data.
    fn clean(&self) -> Result<()>;

    /// Create the schema and seed data.
    fn init(&self) -> Result<()>;

    /// Start the web server under test.
    fn start(&self) -> Result<()>;
}

/// Runs one shell script per hook with `sh`, from the project root.
#[derive(Debug, Clone)]
pub struct ShellLifecycle {
    scripts: ShellScripts,
    root: PathBuf,
}

impl ShellLifecycle {
    pub fn new<P: AsRef<Path>>(scripts: ShellScripts, root: P) -> Self {
        ShellLifecycle {
            scripts,
            root: root.as_ref().to_path_buf(),
        }
    }

    fn run_script(&self, hook: &str, script: &Path) -> Result<()> {
        log::info!("Running {hook} hook in {:?}: sh {script:?}", self.root);

        let status = Command::new("sh")
            .arg(script)
            .current_dir(&self.root)
            .status()
            .map_err(|e| WebApiTestError::Lifecycle {
                hook: hook.to_string(),
                reason: format!("cannot run {}: {e}", script.display()),
            })?;

        log::info!("{hook} hook exited with {status}");
        if !status.success() {
            return Err(WebApiTestError::Lifecycle {
                hook: hook.to_string(),
                reason: format!("{} exited with {status}", script.display()),
            });
        }

        Ok(())
    }
}

impl Lifecycle for ShellLifecycle {
    fn clean(&self) -> Result<()> {
        self.run_script("clean_db", &self.scripts.clean_db)
    }

    fn init(&self) -> Result<()> {
        self.run_script("init_db", &self.scripts.init_db)
    }

    fn start(&self) -> Result<()> {
        self.run_script("start_webserver", &self.scripts.start_webserver)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_hooks_report_exit_status() {
        let dir = tempdir().unwrap();
        let ok_script = dir.path().join("ok.sh");
        let failing_script = dir.path().join("fail.sh");
        fs::write(&ok_script, "exit 0\n").unwrap();
        fs::write(&failing_script, "exit 3\n").unwrap();

        let scripts = ShellScripts {
            clean_db: ok_script.clone(),
            init_db: failing_script,
            start_webserver: dir.path().join("missing.sh"),
        };
        let lifecycle = ShellLifecycle::new(scripts, dir.path());

        assert!(lifecycle.clean().is_ok());
        assert!(matches!(
            lifecycle.init(),
            Err(WebApiTestError::Lifecycle { hook, .. }) if hook == "init_db"
        ));
        // sh itself runs, the missing script makes it exit non-zero
        assert!(lifecycle.start().is_err());
    }

    #[test]
    fn test_relative_scripts_run_from_project_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("shell")).unwrap();
        fs::write(dir.path().join("shell/init_db.sh"), "touch seeded\n").unwrap();

        let lifecycle = ShellLifecycle::new(ShellScripts::default(), dir.path());
        lifecycle.init().unwrap();

        assert!(dir.path().join("seeded").is_file());
    }
}
