use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::path::Path;

/// Initializes logging; the level is set with `RUST_LOG`. Logs go to stderr
/// so that stdout only carries the report.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Project name of a directory like `/home/user/Projects/CRD`: the last path
/// component, provided the path has a `Projects` component above it.
pub fn project_name(dir: impl AsRef<Path>) -> Result<String, Report> {
    let dir = dir.as_ref();
    let components: Vec<_> = dir
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();
    let (last, parents) = match components.split_last() {
        Some(split) => split,
        None => eyre::bail!("empty project directory"),
    };
    if !parents.iter().any(|component| component == "Projects") {
        eyre::bail!(
            "directory {} should be inside a 'Projects' directory",
            dir.display()
        );
    }
    Ok(last.to_string())
}

/// Project name of the current working directory.
pub fn current_project_name() -> Result<String, Report> {
    let cwd = std::env::current_dir().wrap_err("get current directory")?;
    project_name(cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project() {
        assert_eq!(project_name("/home/user/Projects/CRD").unwrap(), "CRD");
        assert_eq!(
            project_name("/home/user/Projects/group/KD").unwrap(),
            "KD"
        );
        assert!(project_name("/home/user/Projects").is_err());
        assert!(project_name("/home/user/CRD").is_err());
        assert!(project_name("/home/user/MyProjects/CRD").is_err());
    }
}
