//! Integration tests for clientlib-report
//!
//! These tests create temporary content trees to test the real functionality
//! of the scanner, the measurement and the renderers with actual filesystem
//! operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use flate2::{Compression, write::GzEncoder};
use tempfile::TempDir;

use clientlib_report::clientlib::ClientLibraries;
use clientlib_report::config::{ScanOptions, SortKey, SortOptions, SortOrder};
use clientlib_report::output::{
    JsonReport, SHEET_NAME, render_table, write_csv, write_spreadsheet_file,
};
use clientlib_report::scanner::{ScanError, Scanner};
use clientlib_report::session::{ReportRun, RunState};
use clientlib_report::build_report;

/// Helper function to create a temporary directory structure for testing
fn create_test_directory() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a file with specified content
fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Sidecar document for a folder with the given primary type and extra attributes
fn sidecar(primary_type: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:cq="http://www.day.com/jcr/cq/1.0" xmlns:jcr="http://www.jcp.org/jcr/1.0"
    jcr:primaryType="{primary_type}" {extra}/>
"#
    )
}

/// Create a client library folder with a sidecar and the given files
fn create_clientlib(dir: &Path, extra: &str, files: &[(&str, &str)]) -> PathBuf {
    create_file(
        &dir.join(".content.xml"),
        &sidecar("cq:ClientLibraryFolder", extra),
    );
    for (name, content) in files {
        create_file(&dir.join(name), content);
    }
    dir.to_path_buf()
}

/// Gzip `content` at default settings, independently of the crate under test
fn gzip(content: &[u8]) -> u64 {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).expect("Failed to compress");
    encoder.finish().expect("Failed to finish gzip stream").len() as u64
}

/// JavaScript-like text that grows with `lines`
fn script(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("var value{i} = {};\n", i * 7919 % 10007))
        .collect()
}

fn scanner(options: ScanOptions) -> Scanner {
    Scanner::new(ScanOptions {
        path_prefix: options.path_prefix.or_else(|| Some("ui.apps".to_string())),
        ..options
    })
    .with_quiet(true)
}

fn names(libraries: &ClientLibraries) -> Vec<&str> {
    libraries.iter().map(|lib| lib.name.as_str()).collect()
}

#[test]
fn test_end_to_end_single_qualifying_folder() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let content = "console.log('hello from A');\n".repeat(12);

    create_clientlib(&root.join("A"), "", &[("a.js", &content)]);
    create_file(&root.join("B").join(".content.xml"), &sidecar("nt:folder", ""));
    create_file(&root.join("B").join("b.js"), "console.log('B');");

    let libraries = scanner(ScanOptions::default())
        .collect(root)
        .expect("Failed to scan");

    assert_eq!(libraries.len(), 1);
    let library = &libraries[0];
    assert_eq!(library.name, "A");
    assert!(library.path.ends_with("A"));
    assert_eq!(library.path, "ui.apps/A");
    // The sidecar is a regular file of the folder and is measured as well
    assert_eq!(
        library.compressed_size,
        gzip(sidecar("cq:ClientLibraryFolder", "").as_bytes()) + gzip(content.as_bytes())
    );
}

#[test]
fn test_only_exact_primary_type_qualifies() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(&root.join("exact"), "", &[("x.js", "x")]);
    for (dir, primary_type) in [
        ("lowercase", "cq:clientlibraryfolder"),
        ("suffixed", "cq:ClientLibraryFolderX"),
        ("padded", " cq:ClientLibraryFolder"),
        ("hinted", "{Name}cq:ClientLibraryFolder"),
        ("folder", "sling:Folder"),
    ] {
        create_file(
            &root.join(dir).join(".content.xml"),
            &sidecar(primary_type, ""),
        );
    }
    create_file(
        &root.join("untyped").join(".content.xml"),
        r#"<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" categories="[a]"/>"#,
    );
    create_file(&root.join("no-sidecar").join("y.js"), "y");

    let libraries = scanner(ScanOptions::default())
        .collect(root)
        .expect("Failed to scan");

    let found: Vec<&str> = libraries.iter().map(|lib| lib.name.as_str()).collect();
    assert_eq!(found, vec!["exact"]);
}

#[test]
fn test_malformed_sidecar_does_not_abort_the_walk() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_file(
        &root.join("a-broken").join(".content.xml"),
        "<jcr:root jcr:primaryType=\"cq:ClientLibraryFolder\"",
    );
    create_clientlib(&root.join("b-good"), "", &[("b.js", "b")]);

    let libraries = scanner(ScanOptions::default())
        .collect(root)
        .expect("Failed to scan");

    assert_eq!(libraries.len(), 1);
    assert_eq!(libraries[0].name, "b-good");
}

#[test]
fn test_nested_libraries_are_reported_and_parent_includes_child() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let parent_js = script(40);
    let child_js = script(200);

    let parent = create_clientlib(&root.join("site"), "", &[("site.js", &parent_js)]);
    create_clientlib(&parent.join("vendor"), "", &[("vendor.js", &child_js)]);

    let libraries = scanner(ScanOptions::default())
        .collect(root)
        .expect("Failed to scan");

    assert_eq!(libraries.len(), 2);
    let site = libraries.iter().find(|lib| lib.name == "site").unwrap();
    let vendor = libraries.iter().find(|lib| lib.name == "vendor").unwrap();

    let parent_sidecar = sidecar("cq:ClientLibraryFolder", "");
    assert_eq!(
        vendor.compressed_size,
        gzip(parent_sidecar.as_bytes()) + gzip(child_js.as_bytes())
    );
    assert_eq!(
        site.compressed_size,
        2 * gzip(parent_sidecar.as_bytes())
            + gzip(parent_js.as_bytes())
            + gzip(child_js.as_bytes())
    );
    assert_eq!(vendor.path, "ui.apps/site/vendor");
}

#[test]
fn test_compressed_size_is_reproducible() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let files = [
        ("main.js", script(150)),
        ("main.css", ".a { color: red; }\n".repeat(30)),
        ("empty.txt", String::new()),
    ];
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(n, c)| (*n, c.as_str())).collect();
    create_clientlib(&root.join("lib"), "", &borrowed);

    let expected = gzip(sidecar("cq:ClientLibraryFolder", "").as_bytes())
        + files
            .iter()
            .map(|(_, content)| gzip(content.as_bytes()))
            .sum::<u64>();

    let scanner = scanner(ScanOptions::default());
    let first = scanner.collect(root).expect("Failed to scan");
    let second = scanner.collect(root).expect("Failed to scan");

    assert_eq!(first[0].compressed_size, expected);
    assert_eq!(second[0].compressed_size, expected);
}

#[test]
fn test_exclusion_prunes_folder_and_descendants() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path().join("ui.apps");
    let clientlibs = root.join("apps").join("site").join("clientlibs");

    create_clientlib(&clientlibs.join("base"), "", &[("base.js", "b")]);
    let vendor = create_clientlib(&clientlibs.join("vendor"), "", &[("v.js", "v")]);
    create_clientlib(&vendor.join("jquery"), "", &[("jq.js", "jq")]);
    create_clientlib(&clientlibs.join("vendors"), "", &[("vs.js", "vs")]);

    let options = ScanOptions::default().with_excludes(&["apps/site/clientlibs/vendor"]);

    // Root is the package folder itself
    let libraries: ClientLibraries = scanner(options.clone())
        .collect(&root)
        .expect("Failed to scan")
        .into();
    assert_eq!(names(&libraries), vec!["base", "vendors"]);

    // Root is the parent: the leading `ui.apps` segment is stripped before matching
    let libraries: ClientLibraries = scanner(options)
        .collect(temp_dir.path())
        .expect("Failed to scan")
        .into();
    assert_eq!(names(&libraries), vec!["base", "vendors"]);
}

#[test]
fn test_exclusion_without_prefix_stripping() {
    let temp_dir = create_test_directory();
    let clientlibs = temp_dir.path().join("ui.apps").join("apps").join("clientlibs");
    create_clientlib(&clientlibs.join("legacy"), "", &[("l.js", "l")]);
    create_clientlib(&clientlibs.join("modern"), "", &[("m.js", "m")]);

    let options = ScanOptions {
        strip_prefix: None,
        ..ScanOptions::default()
    }
    .with_excludes(&["apps/clientlibs/legacy"]);
    let libraries: ClientLibraries = scanner(options)
        .collect(temp_dir.path())
        .expect("Failed to scan")
        .into();
    assert_eq!(names(&libraries), vec!["legacy", "modern"]);

    let options = ScanOptions {
        strip_prefix: None,
        ..ScanOptions::default()
    }
    .with_excludes(&["ui.apps/apps/clientlibs/legacy"]);
    let libraries: ClientLibraries = scanner(options)
        .collect(temp_dir.path())
        .expect("Failed to scan")
        .into();
    assert_eq!(names(&libraries), vec!["modern"]);
}

#[test]
fn test_excluded_subtree_still_counts_towards_parent_size() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let child_js = script(100);

    let parent = create_clientlib(&root.join("site"), "", &[]);
    create_clientlib(&parent.join("vendor"), "", &[("v.js", &child_js)]);

    let options = ScanOptions::default().with_excludes(&["site/vendor"]);
    let libraries = scanner(options).collect(root).expect("Failed to scan");

    assert_eq!(libraries.len(), 1);
    let sidecar_size = gzip(sidecar("cq:ClientLibraryFolder", "").as_bytes());
    assert_eq!(
        libraries[0].compressed_size,
        2 * sidecar_size + gzip(child_js.as_bytes())
    );
}

#[test]
fn test_fields_are_extracted_and_normalized() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(
        &root.join("base"),
        r#"categories="[x,y ]" embed="[core.wcm.components.commons.site]" allowProxy="{Boolean}true" channels=" mobile ""#,
        &[("base.js", "b")],
    );

    let options = ScanOptions::default().with_fields(&[
        "categories",
        "embed",
        "allowProxy",
        "channels",
        "dependencies",
    ]);
    let libraries = scanner(options).collect(root).expect("Failed to scan");
    let fields = &libraries[0].fields;

    assert_eq!(fields["categories"].values, vec!["x", "y"]);
    assert_eq!(fields["categories"].display, "x,\ny");
    assert_eq!(
        fields["embed"].values,
        vec!["core.wcm.components.commons.site"]
    );
    assert_eq!(fields["allowProxy"].display, "true");
    assert_eq!(fields["channels"].display, " mobile ");
    assert!(!fields.contains_key("dependencies"));
}

#[test]
fn test_build_report_sorts_by_size() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(&root.join("large"), "", &[("l.js", &script(1000))]);
    create_clientlib(&root.join("small"), "", &[("s.js", "s")]);
    create_clientlib(&root.join("medium"), "", &[("m.js", &script(100))]);

    let scanner = scanner(ScanOptions::default());

    let ascending = build_report(&scanner, root, &SortOptions::default()).unwrap();
    assert_eq!(names(&ascending), vec!["small", "medium", "large"]);

    let descending = build_report(
        &scanner,
        root,
        &SortOptions {
            key: Some(SortKey::Size),
            order: SortOrder::Descending,
        },
    )
    .unwrap();
    assert_eq!(names(&descending), vec!["large", "medium", "small"]);
}

#[test]
fn test_build_report_sorts_by_name() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    for name in ["b", "a", "c"] {
        create_clientlib(&root.join("x").join(name), "", &[]);
    }
    create_clientlib(&root.join("Beta"), "", &[]);

    let scanner = scanner(ScanOptions::default());

    let descending = build_report(
        &scanner,
        &root.join("x"),
        &SortOptions {
            key: Some(SortKey::Name),
            order: SortOrder::Descending,
        },
    )
    .unwrap();
    assert_eq!(names(&descending), vec!["c", "b", "a"]);

    let ascending = build_report(
        &scanner,
        root,
        &SortOptions {
            key: Some(SortKey::Name),
            order: SortOrder::Ascending,
        },
    )
    .unwrap();
    assert_eq!(names(&ascending), vec!["a", "b", "Beta", "c"]);
}

#[test]
fn test_build_report_without_sort_key_keeps_scan_order() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(&root.join("a"), "", &[("a.js", &script(500))]);
    create_clientlib(&root.join("b"), "", &[]);

    let libraries = build_report(
        &scanner(ScanOptions::default()),
        root,
        &SortOptions {
            key: None,
            order: SortOrder::Descending,
        },
    )
    .unwrap();
    assert_eq!(names(&libraries), vec!["a", "b"]);
}

#[test]
fn test_missing_root_is_fatal() {
    let temp_dir = create_test_directory();
    let missing = temp_dir.path().join("does-not-exist");

    let result = build_report(
        &scanner(ScanOptions::default()),
        &missing,
        &SortOptions::default(),
    );

    match result {
        Err(ScanError::RootNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected RootNotFound, got {other:?}"),
    }
}

#[test]
fn test_report_run_collects_only_once() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    create_clientlib(&root.join("lib"), "", &[("lib.js", "x")]);

    let scanner = scanner(ScanOptions::default());
    let mut run = ReportRun::new();
    let mut collected = Vec::new();

    let first = run.run(|| {
        collected.extend(scanner.collect(root).expect("Failed to scan"));
    });
    assert!(first.is_some());

    create_clientlib(&root.join("later"), "", &[("later.js", "y")]);
    let second = run.run(|| {
        collected.extend(scanner.collect(root).expect("Failed to scan"));
    });

    assert!(second.is_none());
    assert_eq!(collected.len(), 1);
    assert_eq!(run.state(), RunState::Completed);
}

#[test]
fn test_spreadsheet_report() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path().join("ui.apps");
    create_clientlib(&root.join("base"), r#"categories="[x,y ]""#, &[("b.js", "b")]);

    let fields = vec!["categories".to_string(), "embed".to_string()];
    let libraries = build_report(
        &scanner(ScanOptions::default().with_fields(&fields)),
        &root,
        &SortOptions::default(),
    )
    .unwrap();

    let output = temp_dir.path().join("reports").join("clientlib-report.xlsx");
    write_spreadsheet_file(&output, &libraries, &fields, false).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&output).expect("Failed to open workbook");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

    let range = workbook
        .worksheet_range(SHEET_NAME)
        .expect("Failed to read sheet");
    assert_eq!(range.get_size(), (2, 5));
    assert_eq!(
        range.get_value((0, 2)),
        Some(&Data::String("Compressed Size (KB)".to_string()))
    );
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("ui.apps/base".to_string()))
    );
    assert_eq!(
        range.get_value((1, 2)),
        Some(&Data::Float(libraries.as_slice()[0].size_kb_rounded()))
    );
    assert_eq!(
        range.get_value((1, 3)),
        Some(&Data::String("x,\ny".to_string()))
    );
}

#[test]
fn test_csv_report() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    create_clientlib(&root.join("base"), r#"categories="[x,y ]""#, &[("b.js", "b")]);

    let fields = vec!["categories".to_string(), "embed".to_string()];
    let libraries = build_report(
        &scanner(ScanOptions::default().with_fields(&fields)),
        root,
        &SortOptions::default(),
    )
    .unwrap();

    let mut out = Vec::new();
    write_csv(&mut out, &libraries, &fields, false).unwrap();
    let csv = String::from_utf8(out).unwrap();

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Path,Compressed Size (KB),categories,embed")
    );
    assert!(csv.contains("base,ui.apps/base,"));
    assert!(csv.contains("\"x,\ny\""));

    let mut out = Vec::new();
    write_csv(&mut out, &libraries, &fields, true).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(
        csv.lines().next(),
        Some("Name,Compressed Size (KB),categories,embed")
    );
    assert!(!csv.contains("ui.apps/base"));
}

#[test]
fn test_table_report() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    create_clientlib(&root.join("base"), r#"categories="site.base""#, &[("b.js", "b")]);

    let fields = vec!["categories".to_string()];
    let libraries = build_report(
        &scanner(ScanOptions::default().with_fields(&fields)),
        root,
        &SortOptions::default(),
    )
    .unwrap();

    let table = render_table(&libraries, &fields, false);
    assert!(table.contains("Compressed Size"));
    assert!(table.contains("ui.apps/base"));
    assert!(table.contains("site.base"));
    assert!(table.contains(" KB"));

    let hidden = render_table(&libraries, &fields, true);
    assert!(!hidden.contains("ui.apps/base"));
    assert!(!hidden.contains("Path"));
}

#[test]
fn test_json_report() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let content = script(20);
    create_clientlib(&root.join("base"), "", &[("b.js", &content)]);

    let libraries = build_report(
        &scanner(ScanOptions::default()),
        root,
        &SortOptions::default(),
    )
    .unwrap();

    let report = JsonReport::from_libraries(&libraries, false);
    let value = serde_json::to_value(&report).unwrap();

    let expected = gzip(sidecar("cq:ClientLibraryFolder", "").as_bytes())
        + gzip(content.as_bytes());
    assert_eq!(value["summary"]["count"], 1);
    assert_eq!(value["summary"]["total_compressed_size"], expected);
    assert_eq!(value["libraries"][0]["name"], "base");
    assert_eq!(value["libraries"][0]["path"], "ui.apps/base");
}

#[test]
fn test_display_prefix_defaults_to_root_name() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path().join("my.package");
    create_clientlib(&root.join("apps").join("lib"), "", &[]);

    let libraries = Scanner::new(ScanOptions::default())
        .with_quiet(true)
        .collect(&root)
        .expect("Failed to scan");

    assert_eq!(libraries[0].path, "my.package/apps/lib");
}

// ═══════════════════════════════════════════════════════════════════════
// Cross-platform path handling tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scanner_with_spaces_and_unicode_in_directory_names() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(&root.join("my clientlibs").join("größe"), "", &[("a.js", "a")]);

    let options = ScanOptions::default().with_excludes(&["my clientlibs/other"]);
    let libraries = scanner(options).collect(root).expect("Failed to scan");

    assert_eq!(libraries.len(), 1);
    assert_eq!(libraries[0].name, "größe");
    assert_eq!(libraries[0].path, "ui.apps/my clientlibs/größe");
}

#[test]
fn test_exclusion_entries_accept_backslashes() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path();

    create_clientlib(&root.join("apps").join("vendor"), "", &[]);
    create_clientlib(&root.join("apps").join("site"), "", &[]);

    let options = ScanOptions::default().with_excludes(&["apps\\vendor\\"]);
    let libraries: ClientLibraries = scanner(options)
        .collect(root)
        .expect("Failed to scan")
        .into();

    assert_eq!(names(&libraries), vec!["site"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Unreadable content
// ═══════════════════════════════════════════════════════════════════════

#[cfg(unix)]
#[test]
fn test_unreadable_policy_skip_and_fail() {
    use clientlib_report::utils::UnreadablePolicy;

    let temp_dir = create_test_directory();
    let root = temp_dir.path();
    let lib = create_clientlib(&root.join("lib"), "", &[("ok.js", "ok")]);
    std::os::unix::fs::symlink(lib.join("missing.js"), lib.join("dangling.js"))
        .expect("Failed to create symlink");

    let skip = scanner(ScanOptions::default())
        .collect(root)
        .expect("Failed to scan");
    assert_eq!(skip.len(), 1);
    assert_eq!(
        skip[0].compressed_size,
        gzip(sidecar("cq:ClientLibraryFolder", "").as_bytes()) + gzip(b"ok")
    );

    let fail = scanner(ScanOptions {
        unreadable: UnreadablePolicy::Fail,
        ..ScanOptions::default()
    })
    .collect(root)
    .expect("Failed to scan");
    assert!(fail.is_empty());
}
