// lazykeg-core/src/launcher/script.rs
//! Builder for the shell launcher written next to the installer binary.
//!
//! The generated script checks for the target executable, runs the
//! installer once if it is missing, then `exec`s the target with the
//! caller's arguments. Every value substituted into the script is
//! single-quoted, so paths and names cannot inject shell syntax.

use std::path::{Component, Path, PathBuf};

use lazykeg_common::error::{LazykegError, Result};

const DEFAULT_INTERPRETER: &str = "/bin/bash";

/// Where the wrapped application ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPath {
    /// Resolved against `$HOME` each time the launcher runs.
    HomeRelative(PathBuf),
    /// Fixed at generation time.
    Absolute(PathBuf),
}

impl TargetPath {
    pub fn home_relative(rel: impl Into<PathBuf>) -> Self {
        Self::HomeRelative(rel.into())
    }

    /// The concrete path for a given home directory.
    pub fn resolve(&self, home: &Path) -> PathBuf {
        match self {
            Self::HomeRelative(rel) => home.join(rel),
            Self::Absolute(path) => path.clone(),
        }
    }

    fn render(&self) -> Result<String> {
        match self {
            Self::HomeRelative(rel) => {
                let ok = !rel.as_os_str().is_empty()
                    && rel.components().all(|c| matches!(c, Component::Normal(_)));
                if !ok {
                    return Err(LazykegError::Validation(format!(
                        "Home-relative target must be a plain relative path, got '{}'",
                        rel.display()
                    )));
                }
                Ok(format!("\"$HOME\"/{}", shell_quote(path_str(rel)?)))
            }
            Self::Absolute(path) => {
                require_absolute("target", path)?;
                Ok(shell_quote(path_str(path)?))
            }
        }
    }
}

/// A validated launcher ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherScript {
    text: String,
    installer_path: PathBuf,
    target: TargetPath,
}

impl LauncherScript {
    pub fn builder() -> LauncherScriptBuilder {
        LauncherScriptBuilder::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn installer_path(&self) -> &Path {
        &self.installer_path
    }

    pub fn target(&self) -> &TargetPath {
        &self.target
    }
}

#[derive(Debug, Clone, Default)]
pub struct LauncherScriptBuilder {
    interpreter: Option<PathBuf>,
    installer_path: Option<PathBuf>,
    target: Option<TargetPath>,
    display_name: Option<String>,
    package_label: Option<String>,
}

impl LauncherScriptBuilder {
    pub fn interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    pub fn installer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.installer_path = Some(path.into());
        self
    }

    pub fn target(mut self, target: TargetPath) -> Self {
        self.target = Some(target);
        self
    }

    /// Name shown in the `Installing <name>...` message.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Free-form `name version` recorded in the header comment.
    pub fn package_label(mut self, label: impl Into<String>) -> Self {
        self.package_label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<LauncherScript> {
        let interpreter = self
            .interpreter
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERPRETER));
        require_absolute("interpreter", &interpreter)?;
        let interpreter_str = path_str(&interpreter)?;
        if interpreter_str.contains(char::is_whitespace) {
            return Err(LazykegError::Validation(format!(
                "Interpreter path may not contain whitespace: {interpreter_str:?}"
            )));
        }

        let installer_path = self.installer_path.ok_or_else(|| {
            LazykegError::Validation("Launcher needs an installer path".to_string())
        })?;
        require_absolute("installer", &installer_path)?;

        let target = self
            .target
            .ok_or_else(|| LazykegError::Validation("Launcher needs a target path".to_string()))?;

        let display_name = self
            .display_name
            .ok_or_else(|| LazykegError::Validation("Launcher needs a display name".to_string()))?;
        single_line("display name", &display_name)?;

        let mut text = format!("#!{interpreter_str}\n");
        if let Some(label) = &self.package_label {
            single_line("package label", label)?;
            text.push_str(&format!("# Launcher for {label}, generated by lazykeg.\n"));
        }
        text.push_str(&format!("target={}\n", target.render()?));
        text.push_str("if [ ! -f \"$target\" ]; then\n");
        text.push_str(&format!(
            "  echo {}\n",
            shell_quote(&format!("Installing {display_name}..."))
        ));
        text.push_str(&format!(
            "  {} || exit $?\n",
            shell_quote(path_str(&installer_path)?)
        ));
        text.push_str("fi\n");
        text.push_str("exec \"$target\" \"$@\"\n");

        Ok(LauncherScript {
            text,
            installer_path,
            target,
        })
    }
}

/// Produces the launcher for `installer_path` and `target` with the default interpreter.
pub fn generate_launcher(
    installer_path: &Path,
    target: TargetPath,
    display_name: &str,
) -> Result<LauncherScript> {
    LauncherScript::builder()
        .installer_path(installer_path)
        .target(target)
        .display_name(display_name)
        .build()
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn path_str(path: &Path) -> Result<&str> {
    let s = path.to_str().ok_or_else(|| {
        LazykegError::Validation(format!("Path is not valid UTF-8: {}", path.display()))
    })?;
    single_line("path", s)?;
    Ok(s)
}

fn single_line(what: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r', '\0']) {
        Err(LazykegError::Validation(format!(
            "{what} may not contain line breaks or NUL: {value:?}"
        )))
    } else {
        Ok(())
    }
}

fn require_absolute(what: &str, path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(LazykegError::Validation(format!(
            "{what} path must be absolute, got '{}'",
            path.display()
        )))
    }
}
