//! Integration tests running the analyzer over a small TypeScript project
//! laid out in a temporary directory

use maplint_analyze::baseline::Baseline;
use maplint_analyze::checks::map_access::MESSAGE;
use maplint_analyze::config::{MaplintConfig, CONFIG_FILE_NAME};
use maplint_analyze::output::{format_issues, OutputFormat};
use maplint_analyze::{Analyzer, PARSE_ERROR_ID};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        root,
        "src/cache.ts",
        r#"type Cache = Map<string, number>;

export function lookup(cache: Cache, key: string): number | undefined {
    return cache[key];
}

export function size(cache: Cache): number {
    return Object.keys(cache).length;
}
"#,
    );
    write(
        root,
        "src/clean.ts",
        r#"export class Registry {
    private entries = new Map<string, string>();

    register(name: string, value: string): void {
        this.entries.set(name, value);
    }

    names(): string[] {
        return Array.from(this.entries.keys());
    }
}
"#,
    );
    write(root, "src/broken.mts", "const m = new Map();\ndelete m[\"a\"];\nconst = 3;\n");
    write(root, "src/view.tsx", "const m = new Map();\nm[\"a\"];\n");
    write(root, "src/generated/api.ts", "const m = new Map();\nm[\"a\"] = 1;\n");
    write(root, "README.md", "m[\"a\"]\n");

    temp
}

#[test]
fn test_analyze_project_directory() {
    let temp = project();
    let analyzer = Analyzer::with_defaults();

    let issues = analyzer.analyze_paths(&[temp.path()]).unwrap();
    let found: Vec<_> = issues
        .issues()
        .iter()
        .map(|issue| {
            let relative = issue.file.strip_prefix(temp.path()).unwrap().to_string_lossy().replace('\\', "/");
            (relative, issue.line, issue.check_id.clone())
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("src/broken.mts".to_string(), 2, "map.objectAccess".to_string()),
            ("src/broken.mts".to_string(), 3, PARSE_ERROR_ID.to_string()),
            ("src/cache.ts".to_string(), 4, "map.objectAccess".to_string()),
            ("src/cache.ts".to_string(), 8, "map.objectAccess".to_string()),
            ("src/generated/api.ts".to_string(), 2, "map.objectAccess".to_string()),
        ]
    );
}

#[test]
fn test_configured_project() {
    let temp = project();
    write(
        temp.path(),
        CONFIG_FILE_NAME,
        r#"paths = ["src"]
exclude = ["generated/"]

[[ignore_errors]]
identifier = "parse.error"
"#,
    );

    let config_path = MaplintConfig::find_config(&temp.path().join("src")).unwrap();
    let analyzer = Analyzer::new(MaplintConfig::load(&config_path).unwrap());
    let issues = analyzer.analyze_configured_paths().unwrap();

    assert_eq!(issues.len(), 3);
    assert_eq!(issues.file_count(), 2);
    assert!(issues.issues().iter().all(|issue| issue.check_id == "map.objectAccess"));

    let raw = format_issues(&issues, OutputFormat::Raw);
    assert_eq!(raw.lines().count(), 3);
    let first_line = raw.lines().next().unwrap();
    assert!(first_line.ends_with(&format!("broken.mts:2:{}", MESSAGE)), "{}", first_line);
}

#[test]
fn test_baseline_suppresses_known_issues() {
    let temp = project();
    let analyzer = Analyzer::with_defaults();
    let src = temp.path().join("src");

    let issues = analyzer.analyze_paths(&[src.as_path()]).unwrap();
    let baseline_path = temp.path().join("maplint-baseline.json");
    Baseline::generate(&issues).save(&baseline_path).unwrap();

    write(
        temp.path(),
        "src/added.ts",
        "export function read(m: ReadonlyMap<string, number>) {\n    return m[\"k\"];\n}\n",
    );

    let issues = analyzer.analyze_paths(&[src.as_path()]).unwrap();
    let remaining = Baseline::load(&baseline_path).unwrap().filter(issues);

    assert_eq!(remaining.len(), 1);
    assert!(remaining.issues()[0].file.ends_with("added.ts"));
    assert_eq!(remaining.issues()[0].line, 2);
}

#[test]
fn test_analysis_is_deterministic() {
    let temp = project();
    let analyzer = Analyzer::with_defaults();

    let first = analyzer.analyze_paths(&[temp.path()]).unwrap();
    let second = analyzer.analyze_paths(&[temp.path()]).unwrap();
    assert_eq!(first.issues(), second.issues());
}
