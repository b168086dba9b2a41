use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn debrepo() -> Command {
    Command::cargo_bin("debrepo").unwrap()
}

/// A project directory with `debian/maven.rules` and `debian/maven.ignoreRules`.
fn project(rules: &str, ignore: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("debian")).unwrap();
    std::fs::write(dir.path().join("debian/maven.rules"), rules).unwrap();
    std::fs::write(dir.path().join("debian/maven.ignoreRules"), ignore).unwrap();
    dir
}

fn install(root: &Path, relative: &str, bytes: usize) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, vec![0u8; bytes]).unwrap();
}

#[test]
fn resolve_reports_each_verdict() {
    let dir = project("junit junit * s/.*/4.x/\n", "org.jacoco\n");
    debrepo()
        .args([
            "resolve",
            "junit:junit:4.12",
            "org.jacoco:org.jacoco.agent:0.8.8",
            "asm:asm:4.x",
            "commons-io:commons-io:2.4",
        ])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("junit:junit:jar:4.12 -> junit:junit:jar:4.x"))
        .stdout(predicate::str::contains("org.jacoco:org.jacoco.agent:jar:0.8.8 ignored"))
        .stdout(predicate::str::contains("asm:asm:jar:4.x unchanged"))
        .stdout(predicate::str::contains(
            "commons-io:commons-io:jar:2.4 -> commons-io:commons-io:jar:debian",
        ));
}

#[test]
fn resolve_without_default_rules_leaves_unmatched_alone() {
    let dir = project("", "");
    debrepo()
        .args(["resolve", "--no-default-rules", "commons-io:commons-io:2.4"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-io:commons-io:jar:2.4 unchanged"));
}

#[test]
fn resolve_rejects_bad_coordinate() {
    let dir = project("", "");
    debrepo()
        .args(["resolve", "not-a-coordinate"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn resolve_requires_coordinates() {
    debrepo().args(["resolve"]).assert().failure();
}

#[test]
fn malformed_rule_file_fails() {
    let dir = project("a b c d e f g\n", "");
    debrepo()
        .args(["resolve", "junit:junit:4.12"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("maven.rules:1"));
}

#[test]
fn rules_lists_file_and_default_rules() {
    let dir = project("junit junit * s/.*/4.x/\n", "org.jacoco\n");
    debrepo()
        .args(["rules"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("junit junit * s/.*/4.x/ * *"))
        .stdout(predicate::str::contains("* * * s/.*/debian/ * *"))
        .stdout(predicate::str::contains("ignore-rules:\n  org.jacoco * * * * *"));
}

#[test]
fn rules_paths_can_be_overridden() {
    let dir = project("", "");
    let custom = dir.path().join("custom.rules");
    std::fs::write(&custom, "log4j log4j * s/.*/1.2.x/\n").unwrap();
    debrepo()
        .args(["rules", "--no-default-rules", "--rules"])
        .arg(&custom)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("log4j log4j * s/.*/1.2.x/ * *"))
        .stdout(predicate::str::contains("debian").not());
}

#[test]
fn config_file_sets_repository_and_rules() {
    let dir = project("", "");
    let repo = dir.path().join("repo");
    install(&repo, "asm/asm/debian/asm-debian.pom", 10);
    install(&repo, "asm/asm/debian/asm-debian.jar", 321);
    std::fs::write(
        dir.path().join("debrepo.toml"),
        format!("[repository]\nroot = {:?}\n", repo.display().to_string()),
    )
    .unwrap();

    debrepo()
        .args(["fetch", "asm:asm:3.3.1"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("asm#asm;debian"))
        .stdout(predicate::str::contains("(321 bytes)"));
}

#[test]
fn fetch_reports_requested_artifact_name() {
    let dir = project(
        "s/org.eclipse.jetty.orbit/javax.servlet/ s/javax.servlet/servlet-api/ * * *\n",
        "",
    );
    let repo = dir.path().join("repo");
    install(&repo, "javax/servlet/servlet-api/3.0/servlet-api-3.0.pom", 10);
    install(&repo, "javax/servlet/servlet-api/3.0/servlet-api-3.0.jar", 2048);

    debrepo()
        .args([
            "fetch",
            "org.eclipse.jetty.orbit:javax.servlet:3.0",
            "--artifact",
            "servlet",
            "--type",
            "orbit",
            "--repo",
        ])
        .arg(&repo)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("javax.servlet#servlet-api;3.0!servlet.jar(orbit)"))
        .stdout(predicate::str::contains("servlet-api-3.0.jar (2048 bytes)"));
}

#[test]
fn fetch_ignored_dependency_fails() {
    let dir = project("", "org.jacoco\n");
    debrepo()
        .args(["fetch", "org.jacoco:org.jacoco.agent:0.8.8", "--repo"])
        .arg(dir.path().join("repo"))
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
