//! End-to-end tests for include resolution, on fixture trees in temp dirs.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use stitcher::config::{Settings, Wrapper};
use stitcher::resolve::{assemble, assemble_tracked};
use stitcher::NotFoundError;

fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn resolves_relative_paths() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "parent.js",
        "include(\"sub/child.js\");\nvar parent = 1;",
    );
    write_file(
        dir.path(),
        "sub/child.js",
        "include(\"../sibling.js\");\nvar child = 1;",
    );
    write_file(dir.path(), "sibling.js", "var sibling = 1;");

    let output = assemble(dir.path().join("parent.js"), &Settings::default()).unwrap();

    assert_eq!(
        output,
        "(function () {\n\
         (function () {\n\
         var sibling = 1;\n\
         }).call(this);\n\
         var child = 1;\n\
         }).call(this);\n\
         var parent = 1;"
    );
}

#[test]
fn interpolates_included_content() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"greeting.js\");\nrun();");
    write_file(
        dir.path(),
        "greeting.js",
        "var greeting = \"Hello, {{name}}!\";",
    );

    let mut settings = Settings::default();
    settings
        .interpolate
        .insert("name".to_owned(), "World".to_owned());

    let output = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(
        output,
        "(function () {\nvar greeting = \"Hello, World!\";\n}).call(this);\nrun();"
    );
}

#[test]
fn identity_wrap_produces_raw_concatenation() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"a.js\");\nvar main = 1;");
    write_file(dir.path(), "a.js", "var a = 1;");

    let mut settings = Settings::default();
    settings.wrap = Wrapper::Custom(Box::new(|content, _| content.to_owned()));

    let output = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(output, "var a = 1;var main = 1;");
}

#[test]
fn handles_whitespace_variance() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "main.js",
        "    include( \"a.js\" );    \nvar x = 2;",
    );
    write_file(dir.path(), "a.js", "var a = 1;");

    let output = assemble(dir.path().join("main.js"), &Settings::default()).unwrap();

    assert_eq!(output, "(function () {\nvar a = 1;\n}).call(this);\nvar x = 2;");
}

#[test]
fn expands_globbed_includes_unwrapped() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"glob/*.js\");\nvar done = 1;");
    write_file(dir.path(), "glob/a.js", "var ga = 1;");
    write_file(dir.path(), "glob/b.js", "var gb = 1;");

    let output = assemble(dir.path().join("main.js"), &Settings::default()).unwrap();

    assert_eq!(output, "var ga = 1;\nvar gb = 1;var done = 1;");
}

#[test]
fn wraps_globbed_includes_when_configured() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"glob/*.js\");\nvar done = 1;");
    write_file(dir.path(), "glob/a.js", "var ga = 1;");
    write_file(dir.path(), "glob/b.js", "var gb = 1;");

    let mut settings = Settings::default();
    settings.wrap_globs = true;

    let output = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(
        output,
        "(function () {\nvar ga = 1;\n}).call(this);\n\
         \n\
         (function () {\nvar gb = 1;\n}).call(this);\n\
         var done = 1;"
    );
}

#[test]
fn empty_glob_expands_to_nothing() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"void/*.js\");\nvar after = 1;");

    let output = assemble(dir.path().join("main.js"), &Settings::default()).unwrap();

    assert_eq!(output, "var after = 1;");
}

#[test]
fn separator_joins_glob_units_only() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"glob/*.js\");\nvar done = 1;");
    write_file(dir.path(), "glob/a.js", "var ga = 1;");
    write_file(dir.path(), "glob/b.js", "var gb = 1;");

    let mut settings = Settings::default();
    settings.separator = "\n\n\n".to_owned();

    let output = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(output, "var ga = 1;\n\n\nvar gb = 1;var done = 1;");
}

#[test]
fn separator_does_not_join_structural_segments() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "main.js",
        "include(\"a.js\");\ninclude(\"b.js\");\nvar tail = 1;",
    );
    write_file(dir.path(), "a.js", "var a = 1;");
    write_file(dir.path(), "b.js", "var b = 1;");

    let mut settings = Settings::default();
    settings.wrap = Wrapper::Raw;
    settings.separator = "\nXX\n".to_owned();

    let output = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(output, "var a = 1;var b = 1;var tail = 1;");
}

#[test]
fn includes_files_at_most_once_per_run() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "main.js",
        "include(\"a.js\");\ninclude(\"a.js\");\nvar end = 1;",
    );
    write_file(dir.path(), "a.js", "var a = 1;");

    let output = assemble(dir.path().join("main.js"), &Settings::default()).unwrap();

    assert_eq!(output, "(function () {\nvar a = 1;\n}).call(this);\nvar end = 1;");
}

#[test]
fn does_not_deduplicate_across_runs() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "main.js",
        "include(\"a.js\");\ninclude(\"a.js\");\nvar end = 1;",
    );
    write_file(dir.path(), "a.js", "var a = 1;");

    let settings = Settings::default();
    let first = assemble(dir.path().join("main.js"), &settings).unwrap();
    let second = assemble(dir.path().join("main.js"), &settings).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("var a = 1;"));
}

#[test]
fn terminates_on_self_inclusion() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "self.js",
        "include(\"self.js\");\nvar self_done = 1;",
    );

    let output = assemble(dir.path().join("self.js"), &Settings::default()).unwrap();

    assert_eq!(output, "var self_done = 1;");
}

#[test]
fn terminates_on_recursive_includes() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.js", "include(\"b.js\");\nvar a = 1;");
    write_file(dir.path(), "b.js", "include(\"a.js\");\nvar b = 1;");

    let output = assemble(dir.path().join("a.js"), &Settings::default()).unwrap();

    assert_eq!(output, "(function () {\nvar b = 1;\n}).call(this);\nvar a = 1;");
}

#[test]
fn falls_back_to_the_including_files_extension() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"mod\");\nboot();");
    write_file(dir.path(), "mod.js", "var mod = 1;");

    let output = assemble(dir.path().join("main.js"), &Settings::default()).unwrap();

    assert_eq!(output, "(function () {\nvar mod = 1;\n}).call(this);\nboot();");
}

#[test]
fn fails_on_missing_include_target() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.js", "include(\"missing.js\");");

    let err = assemble(dir.path().join("main.js"), &Settings::default()).unwrap_err();

    let not_found = err.downcast_ref::<NotFoundError>().unwrap();
    assert!(not_found.0.ends_with("missing.js"));
}

#[test]
fn reports_all_source_files() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "parent.js",
        "include(\"sub/child.js\");\nvar parent = 1;",
    );
    write_file(
        dir.path(),
        "sub/child.js",
        "include(\"../sibling.js\");\nvar child = 1;",
    );
    write_file(dir.path(), "sibling.js", "var sibling = 1;");

    let (_, sources) =
        assemble_tracked(dir.path().join("parent.js"), &Settings::default()).unwrap();

    assert_eq!(sources.len(), 3);
    assert!(sources.contains(&dir.path().join("parent.js")));
    assert!(sources.contains(&dir.path().join("sub/child.js")));
    assert!(sources.contains(&dir.path().join("sibling.js")));
}
