use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

pub const DEFAULT_SASS_COMPILER: &str = "sass";

/// Compiles `entry` with an external Dart Sass compatible compiler and
/// returns the CSS it prints.
pub fn compile_sass(compiler: &str, entry: &Path) -> Result<String> {
    log::debug!("compiling {} with {}", entry.display(), compiler);
    let output = Command::new(compiler)
        .arg("--no-source-map")
        .arg(entry)
        .output()
        .map_err(|e| Error::Sass(format!("could not run {}: {}", compiler, e)))?;

    if !output.status.success() {
        return Err(Error::Sass(format!(
            "{} exited with {}: {}",
            compiler,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|e| Error::Sass(format!("compiler output is not UTF-8: {}", e)))
}
