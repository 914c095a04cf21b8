use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `scaffold` command running inside `dir`, with an empty
/// configuration directory.
fn scaffold(dir: &TempDir, config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").unwrap();
    cmd.current_dir(dir.path())
        .env("SCAFFOLD_CONFIG", config.path())
        .env("CLICOLOR", "0")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn dirs() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn creates_project_from_file() {
    let (dir, config) = dirs();
    fs::write(
        dir.path().join("project.yaml"),
        "name: app\nfolders:\n  - src\n  - test\nfiles:\n  - src/main.txt\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .arg("project.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project scaffold created"));

    assert!(dir.path().join("app/src").is_dir());
    assert!(dir.path().join("app/test").is_dir());
    let main = dir.path().join("app/src/main.txt");
    assert!(main.is_file());
    assert_eq!(fs::metadata(main).unwrap().len(), 0);
}

#[test]
fn dry_run_only_previews() {
    let (dir, config) = dirs();
    fs::write(
        dir.path().join("project.yaml"),
        "name: app\nfolders: [src]\nfiles: [src/main.txt]\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .args(&["--dry-run", "project.yaml"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("app/")
                .and(predicate::str::contains("src/"))
                .and(predicate::str::contains("src/main.txt")),
        );

    assert!(!dir.path().join("app").exists());
}

#[test]
fn builtin_template_with_project_name() {
    let (dir, config) = dirs();
    scaffold(&dir, &config)
        .args(&["--template", "go-api", "my-api"])
        .assert()
        .success();

    assert!(dir.path().join("my-api/cmd/server/main.go").is_file());
    assert!(!dir.path().join("go-api").exists());
}

#[test]
fn location_sets_the_parent_directory() {
    let (dir, config) = dirs();
    let parent = TempDir::new().unwrap();
    scaffold(&dir, &config)
        .args(&["-t", "react-app", "--name", "web", "--location"])
        .arg(parent.path())
        .assert()
        .success();

    assert!(parent.path().join("web/src/App.js").is_file());
    assert!(!dir.path().join("web").exists());
}

#[test]
fn missing_location_is_rejected() {
    let (dir, config) = dirs();
    scaffold(&dir, &config)
        .args(&["-t", "react-app", "--location", "nowhere"])
        .assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn relative_location_is_resolved_against_the_working_directory() {
    let (dir, config) = dirs();
    fs::create_dir(dir.path().join("projects")).unwrap();
    scaffold(&dir, &config)
        .args(&["-t", "go-api", "--location", "./projects/../projects", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("projects/api").or(predicate::str::contains("projects\\api")));

    assert!(dir.path().join("projects/api/go.mod").is_file());
}

#[test]
fn location_must_be_a_directory() {
    let (dir, config) = dirs();
    fs::write(dir.path().join("file.txt"), "").unwrap();
    scaffold(&dir, &config)
        .args(&["-t", "go-api", "--location", "file.txt"])
        .assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("is not a directory"));
    assert!(!dir.path().join("go-api").exists());
}

#[test]
fn unknown_template_fails() {
    let (dir, config) = dirs();
    scaffold(&dir, &config)
        .args(&["--template", "unknown"])
        .assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("template 'unknown' not found"));
}

#[test]
fn validation_errors_are_all_reported() {
    let (dir, config) = dirs();
    fs::write(
        dir.path().join("project.yaml"),
        "name: x\nfolders: [a, b, b]\nfiles: [a]\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .arg("project.yaml")
        .assert()
        .failure()
        .code(exitcode::DATAERR)
        .stderr(
            predicate::str::contains("folders[2]: duplicate folder: b")
                .and(predicate::str::contains("files[0]: file conflicts with folder: a"))
                .and(predicate::str::contains("folders[0]: folder conflicts with file: a")),
        );

    assert!(!dir.path().join("x").exists());
}

#[test]
fn skip_validation_bypasses_checks() {
    let (dir, config) = dirs();
    fs::write(
        dir.path().join("project.yaml"),
        "name: app\nfolders: [src, src]\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .args(&["--skip-validation", "project.yaml"])
        .assert()
        .success();
    assert!(dir.path().join("app/src").is_dir());
}

#[test]
fn existing_project_directory_fails() {
    let (dir, config) = dirs();
    fs::create_dir(dir.path().join("app")).unwrap();
    fs::write(dir.path().join("project.yaml"), "name: app\nfolders: [src]\n").unwrap();

    scaffold(&dir, &config)
        .arg("project.yaml")
        .assert()
        .failure()
        .code(exitcode::CANTCREAT)
        .stderr(predicate::str::contains("failed to create project directory"));

    assert_eq!(fs::read_dir(dir.path().join("app")).unwrap().count(), 0);
}

#[test]
fn malformed_template_fails() {
    let (dir, config) = dirs();
    fs::write(dir.path().join("project.yaml"), "name: [app\n").unwrap();

    scaffold(&dir, &config)
        .arg("project.yaml")
        .assert()
        .failure()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("could not parse template"));
}

#[test]
fn lists_templates_sorted() {
    let (dir, config) = dirs();
    let output = scaffold(&dir, &config)
        .arg("--list-templates")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let go = stdout.find("go-api").unwrap();
    let node = stdout.find("node-express").unwrap();
    let react = stdout.find("react-app").unwrap();
    assert!(go < node && node < react);
}

#[test]
fn lists_user_templates() {
    let (dir, config) = dirs();
    fs::create_dir(config.path().join("templates")).unwrap();
    fs::write(
        config.path().join("templates/mine.yaml"),
        "name: mine\nfolders: [notes]\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .arg("-l")
        .assert()
        .success()
        .stdout(predicate::str::contains("mine"));

    scaffold(&dir, &config)
        .args(&["-t", "mine"])
        .assert()
        .success();
    assert!(dir.path().join("mine/notes").is_dir());
}

#[test]
fn bad_configuration_fails() {
    let (dir, config) = dirs();
    fs::write(config.path().join("config.json"), "{").unwrap();

    scaffold(&dir, &config)
        .arg("-l")
        .assert()
        .failure()
        .code(exitcode::CONFIG);
}

#[test]
fn no_arguments_prints_help() {
    let (dir, config) = dirs();
    scaffold(&dir, &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"));
}

#[test]
fn version_subcommand() {
    let (dir, config) = dirs();
    scaffold(&dir, &config)
        .arg("version")
        .assert()
        .success()
        .stdout(format!("scaffold version {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_git_commits_the_project() {
    if which::which("git").is_err() {
        return;
    }
    let (dir, config) = dirs();
    fs::write(
        dir.path().join("project.yaml"),
        "name: app\nfolders: [src]\nfiles: [src/main.txt]\n",
    )
    .unwrap();

    scaffold(&dir, &config)
        .args(&["--init-git", "project.yaml"])
        .env("HOME", config.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "scaffold")
        .env("GIT_AUTHOR_EMAIL", "scaffold@example.com")
        .env("GIT_COMMITTER_NAME", "scaffold")
        .env("GIT_COMMITTER_EMAIL", "scaffold@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized git repository"));

    let project = dir.path().join("app");
    assert!(project.join(".git").is_dir());
    assert!(project.join(".gitignore").is_file());
    let log = std::process::Command::new("git")
        .args(&["log", "--format=%s"])
        .current_dir(&project)
        .env("HOME", config.path())
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&log.stdout).trim(), "Initial commit");
}
