use crate::agent::claude::{decode_project_path, encode_project_path};
use crate::agent::pi::{decode_directory_name, encode_directory_name};
use crate::session::normalize_directory_path;

#[test]
fn test_normalize_absolute() {
    assert_eq!(
        normalize_directory_path("/nonexistent-agent-sessions/user/project"),
        "/nonexistent-agent-sessions/user/project"
    );
}

#[test]
fn test_normalize_tilde() {
    let result = normalize_directory_path("~/project");
    assert!(result.ends_with("/project"), "got {result}");
    assert!(!result.contains('~'));
}

#[test]
fn test_normalize_relative() {
    let result = normalize_directory_path(".");
    assert!(result.starts_with('/'), "got {result}");
    assert!(!result.ends_with("/."));
}

#[test]
fn test_normalize_missing_path_folds_parent_segments() {
    assert_eq!(
        normalize_directory_path("/nonexistent-agent-sessions/a/./b/../c/"),
        "/nonexistent-agent-sessions/a/c"
    );
}

#[test]
fn test_normalize_resolves_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real");
    std::fs::create_dir(&real).unwrap();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    assert_eq!(
        normalize_directory_path(link.to_str().unwrap()),
        normalize_directory_path(real.to_str().unwrap())
    );
}

#[test]
fn test_encode_project_path() {
    assert_eq!(encode_project_path("/home/lars/project"), "-home-lars-project");

    // Hidden folders use a double dash and drop the dot
    assert_eq!(
        encode_project_path("/Users/ozan/Projects/autogoals-v2/.worktrees/docker-containers"),
        "-Users-ozan-Projects-autogoals-v2--worktrees-docker-containers"
    );
}

#[test]
fn test_decode_project_path() {
    assert_eq!(decode_project_path("-home-lars-project"), "/home/lars/project");
    assert_eq!(
        decode_project_path("-home-lars-project--worktrees-analytics"),
        "/home/lars/project/.worktrees/analytics"
    );
}

#[test]
fn test_project_path_roundtrip() {
    for path in ["/home/user/code", "/tmp/test", "/home/user/.config/app", "/"] {
        assert_eq!(decode_project_path(&encode_project_path(path)), path);
    }
}

#[test]
fn test_encode_pi_directory_name() {
    assert_eq!(encode_directory_name("/home/lars/project"), "--home-lars-project--");
    assert_eq!(encode_directory_name("C:\\work\\app"), "--C--work-app--");
}

#[test]
fn test_decode_pi_directory_name() {
    assert_eq!(decode_directory_name("--home-lars-project--"), "/home/lars/project");
}

#[test]
fn test_pi_directory_roundtrip() {
    for path in ["/home/lars/project", "/tmp/test"] {
        assert_eq!(decode_directory_name(&encode_directory_name(path)), path);
    }
}
