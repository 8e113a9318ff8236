//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, application sees only ports, infra never renders output.

use std::path::Path;

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn src(sub: &[&str]) -> std::path::PathBuf {
    sub.iter()
        .fold(Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), |p, s| {
            p.join(s)
        })
}

/// `(file:line: text)` for every non-comment line under `dir` containing one
/// of `needles`.
fn find_imports(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if needles.iter().any(|n| line.contains(n)) {
                violations.push(format!("{rel}:{}: {line}", i + 1));
            }
        }
    }
    violations
}

// ── Layer boundaries ─────────────────────────────────────────────────────────

#[test]
fn domain_has_no_outward_imports() {
    let violations = find_imports(
        &src(&["domain"]),
        &[
            "crate::application",
            "crate::infra",
            "crate::commands",
            "crate::output",
            "tokio::",
        ],
    );

    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O and outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_has_no_imports_from_infra_commands_or_output() {
    let violations = find_imports(
        &src(&["application"]),
        &["crate::infra", "crate::commands", "crate::output"],
    );

    assert!(
        violations.is_empty(),
        "application/ must depend only on domain and its own ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_imports(&src(&["infra"]), &["crate::commands", "crate::output"]);

    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src(&["infra"])) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };

        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            if line.contains("println!") || line.contains("eprintln!") {
                violations.push(format!(
                    "{rel}:{}: print macro in infra/ outside #[cfg(test)]: {line}",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "infra/ must log through the Logger port, not println!/eprintln!:\n{}",
        violations.join("\n")
    );
}

// ── Wiring ───────────────────────────────────────────────────────────────────

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src(&[])) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        if rel.contains("/infra/") || rel.ends_with("app.rs") {
            continue;
        }

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if line.contains("TokioCommandRunner::new") {
                violations.push(format!("{rel}:{}: {line}", i + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "TokioCommandRunner is built once, in app.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_concrete_adapter_types_in_service_signatures() {
    let concrete_types = [
        "TokioCommandRunner",
        "MinikubeCli",
        "DockerCli",
        "KubectlCli",
        "TerraformCli",
    ];

    let mut violations: Vec<String> = Vec::new();
    for file in collect_rs_files(&src(&["application", "services"])) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("fn ") {
                continue;
            }
            for concrete in &concrete_types {
                if line.contains(concrete) {
                    violations.push(format!(
                        "{rel}:{}: concrete type `{concrete}` in function signature: {line}",
                        i + 1
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found concrete adapter types in service signatures; use port trait bounds instead:\n{}",
        violations.join("\n")
    );
}
