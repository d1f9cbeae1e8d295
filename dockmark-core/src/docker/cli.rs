use std::path::PathBuf;
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::resources::{Container, Image, Inventory, Network, Resource, Volume};
use crate::batch::RemoveOptions;
use crate::category::Category;
use crate::error::{DockError, Result};

const JSON_FORMAT: &str = "{{json .}}";

/// Thin wrapper over the `docker` executable
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: PathBuf,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run docker with `args`, returning stdout on success
    fn run(&self, args: &[String]) -> Result<String> {
        debug!(program = %self.program.display(), ?args, "docker");
        let output = Command::new(&self.program).args(args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(DockError::CommandFailed {
                command: format!("docker {}", args.join(" ")),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// List one category
    pub fn list(&self, category: Category) -> Result<Vec<Resource>> {
        let args: Vec<String> = listing_args(category)
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stdout = self.run(&args)?;

        let resources = match category {
            Category::Container => parse_lines::<Container>(&stdout)?
                .into_iter()
                .map(Resource::Container)
                .collect(),
            Category::Image => parse_lines::<Image>(&stdout)?
                .into_iter()
                .map(Resource::Image)
                .collect(),
            Category::Volume => parse_lines::<Volume>(&stdout)?
                .into_iter()
                .map(Resource::Volume)
                .collect(),
            Category::Network => parse_lines::<Network>(&stdout)?
                .into_iter()
                .map(Resource::Network)
                .collect(),
        };
        Ok(resources)
    }

    /// List all four categories
    pub fn inventory(&self) -> Result<Inventory> {
        let mut inventory = Inventory::new();
        for category in Category::ALL {
            inventory.set(category, self.list(category)?);
        }
        Ok(inventory)
    }

    /// Remove one resource by identifier
    pub fn remove(&self, category: Category, id: &str, options: RemoveOptions) -> Result<()> {
        self.run(&removal_args(category, id, options)).map(|_| ())
    }
}

fn listing_args(category: Category) -> &'static [&'static str] {
    match category {
        Category::Container => &["ps", "-a", "--no-trunc", "--format", JSON_FORMAT],
        Category::Image => &["images", "--no-trunc", "--format", JSON_FORMAT],
        Category::Volume => &["volume", "ls", "--format", JSON_FORMAT],
        Category::Network => &["network", "ls", "--no-trunc", "--format", JSON_FORMAT],
    }
}

/// Command line for removing one resource
pub fn removal_args(category: Category, id: &str, options: RemoveOptions) -> Vec<String> {
    let mut args: Vec<String> = match category {
        Category::Container => vec!["rm".into()],
        Category::Image => vec!["rmi".into()],
        Category::Volume => vec!["volume".into(), "rm".into()],
        Category::Network => vec!["network".into(), "rm".into()],
    };
    if options.force && category != Category::Network {
        args.push("--force".into());
    }
    if category == Category::Image && !options.prune_dependents {
        args.push("--no-prune".into());
    }
    args.push(id.to_string());
    args
}

/// Parse one JSON object per non-empty line
fn parse_lines<T: DeserializeOwned>(stdout: &str) -> Result<Vec<T>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(DockError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_args() {
        let force = RemoveOptions {
            force: true,
            prune_dependents: false,
        };
        assert_eq!(
            removal_args(Category::Container, "abc", force),
            vec!["rm", "--force", "abc"]
        );
        assert_eq!(
            removal_args(Category::Image, "sha256:1", force),
            vec!["rmi", "--force", "--no-prune", "sha256:1"]
        );
        assert_eq!(
            removal_args(
                Category::Image,
                "sha256:1",
                RemoveOptions::for_category(Category::Image, true)
            ),
            vec!["rmi", "--force", "sha256:1"]
        );
        assert_eq!(
            removal_args(Category::Volume, "pgdata", force),
            vec!["volume", "rm", "--force", "pgdata"]
        );
        assert_eq!(
            removal_args(Category::Network, "backend", force),
            vec!["network", "rm", "backend"]
        );
    }

    #[test]
    fn test_parse_lines_skips_blank_lines() {
        let stdout = "{\"Name\":\"a\",\"Driver\":\"local\"}\n\n{\"Name\":\"b\",\"Driver\":\"local\"}\n";
        let volumes: Vec<Volume> = parse_lines(stdout).unwrap();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[1].name, "b");
    }

    #[test]
    fn test_parse_lines_rejects_garbage() {
        let result: Result<Vec<Volume>> = parse_lines("not json\n");
        assert!(matches!(result, Err(DockError::Parse(_))));
    }

    #[cfg(unix)]
    mod with_fake_docker {
        use super::*;
        use crate::selection::Item;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Write an executable shell script standing in for docker
        fn fake_docker(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("docker");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_list_containers() {
            let temp = TempDir::new().unwrap();
            let program = fake_docker(
                &temp,
                r#"echo '{"ID":"c1","Names":"web","Image":"nginx","State":"running","Status":"Up"}'
echo '{"ID":"c2","Names":"db","Image":"postgres","State":"exited","Status":"Exited (0)"}'"#,
            );

            let resources = DockerCli::new(program).list(Category::Container).unwrap();
            let names: Vec<&str> = resources.iter().map(|r| r.name()).collect();
            assert_eq!(names, vec!["web", "db"]);
        }

        #[test]
        fn test_failed_removal_reports_stderr() {
            let temp = TempDir::new().unwrap();
            let program = fake_docker(
                &temp,
                "echo 'Error response from daemon: resource busy' >&2\nexit 1",
            );

            let err = DockerCli::new(program)
                .remove(Category::Volume, "pgdata", RemoveOptions::default())
                .unwrap_err();
            match err {
                DockError::CommandFailed { command, stderr } => {
                    assert_eq!(command, "docker volume rm pgdata");
                    assert_eq!(stderr, "Error response from daemon: resource busy");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_missing_binary_is_io_error() {
            let temp = TempDir::new().unwrap();
            let result = DockerCli::new(temp.path().join("nope")).list(Category::Image);
            assert!(matches!(result, Err(DockError::Io(_))));
        }
    }
}
