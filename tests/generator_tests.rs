mod common;

use common::{files_under, fixture};
use crudgen::api::load_api_document;
use crudgen::generator::{
    generate_project_with_options, DryRunFs, GenerateError, GenerateOptions, LocalFs, Target,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn options(output: &Path, target: Target) -> GenerateOptions {
    GenerateOptions {
        output: output.to_path_buf(),
        target,
        ..Default::default()
    }
}

fn rel(paths: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = paths
        .iter()
        .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    out.sort();
    out
}

#[test]
fn test_quasar_book_end_to_end() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let mut opts = options(dir.path(), Target::Quasar);
    opts.resources = vec!["books".to_string()];

    let report = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();
    assert!(report.is_success());
    assert_eq!(report.resources.len(), 1);
    let ctx = &report.resources[0].context;
    assert_eq!(ctx.title, "Book");
    assert!(ctx.form_contains_date);

    let root = dir.path();
    for ns in ["create", "delete", "list", "show", "update"] {
        for file in ["actions.js", "getters.js", "index.js", "mutation_types.js", "mutations.js", "state.js"] {
            assert!(
                root.join("store/modules/book").join(ns).join(file).is_file(),
                "missing store/modules/book/{ns}/{file}"
            );
        }
    }
    assert!(!root.join("components/book/Filter.vue").exists());
    for component in ["Create", "Form", "List", "Show", "Update"] {
        assert!(root.join(format!("components/book/{component}.vue")).is_file());
    }

    let router = fs::read_to_string(root.join("router/book.js")).unwrap();
    assert!(router.contains("./components/book/"));

    let entrypoint = fs::read_to_string(root.join("config/entrypoint.js")).unwrap();
    assert!(entrypoint.contains("https://demo.example.com/api"));

    let shared = report.shared.as_ref().unwrap();
    assert_eq!(
        files_under(root).len(),
        shared.created.len() + report.resources[0].report.created.len()
    );
}

#[test]
fn test_quasar_reviews_filter() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let report = generate_project_with_options(&doc, &options(dir.path(), Target::Quasar), &mut LocalFs)
        .unwrap();
    assert!(report.is_success());

    let review = report
        .resources
        .iter()
        .find(|r| r.context.name == "reviews")
        .unwrap();
    let params: Vec<_> = review.context.parameters.iter().map(|p| p.name().to_string()).collect();
    assert_eq!(params, vec!["book".to_string(), "rating".to_string()]);
    assert!(review.context.parameters[0].is_multiple());
    assert!(review.context.params_have_refs);

    let filter = fs::read_to_string(dir.path().join("components/review/Filter.vue")).unwrap();
    assert!(filter.contains("item['book']"));
    assert!(!filter.contains("exists"));
}

#[test]
fn test_write_policy_and_force() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let root = dir.path();
    let mut opts = options(root, Target::Quasar);
    opts.resources = vec!["Book".to_string()];
    generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();

    let shared = root.join("utils/fetch.js");
    let owned = root.join("components/book/List.vue");
    fs::write(&shared, "// customised\n").unwrap();
    fs::write(&owned, "<!-- stale -->\n").unwrap();

    let report = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();
    let kept = report.shared.as_ref().unwrap();
    let files = &report.resources[0].report;
    assert!(kept.created.is_empty());
    assert!(kept.skipped.contains(&shared));
    assert!(files.created.is_empty());
    assert!(files.skipped.is_empty());
    assert!(files.overwritten.contains(&owned));
    assert_eq!(fs::read_to_string(&shared).unwrap(), "// customised\n");
    assert_ne!(fs::read_to_string(&owned).unwrap(), "<!-- stale -->\n");

    opts.force = true;
    let report = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();
    let forced = report.shared.as_ref().unwrap();
    assert!(forced.skipped.is_empty());
    assert_eq!(forced.overwritten.iter().filter(|p| **p == shared).count(), 1);
    assert!(report.resources[0].report.skipped.is_empty());
    assert_ne!(fs::read_to_string(&shared).unwrap(), "// customised\n");
}

#[test]
fn test_fresh_run_writes_each_file_once() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    for target in [Target::Quasar, Target::Next] {
        for force in [false, true] {
            let dir = tempdir().unwrap();
            let mut opts = options(dir.path(), target);
            opts.force = force;
            let report = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();
            assert!(report.is_success());
            assert_eq!(report.resources.len(), 2);

            let shared = report.shared.as_ref().unwrap();
            let mut written: Vec<&PathBuf> = shared.created.iter().collect();
            for outcome in &report.resources {
                assert!(outcome.report.skipped.is_empty(), "{target} kept files on a fresh run");
                assert!(outcome.report.overwritten.is_empty());
                written.extend(&outcome.report.created);
            }
            assert!(shared.skipped.is_empty());
            assert!(shared.overwritten.is_empty());

            let total = written.len();
            written.sort();
            written.dedup();
            assert_eq!(written.len(), total, "{target} wrote a file twice");
            assert_eq!(files_under(dir.path()).len(), total);
        }
    }
}

#[test]
fn test_dry_run_matches_real_run() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let opts = options(dir.path(), Target::Next);

    let mut dry = DryRunFs::new();
    let planned = generate_project_with_options(&doc, &opts, &mut dry).unwrap();
    assert!(files_under(dir.path()).is_empty(), "dry run wrote files");

    let written = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap();
    let (a, b) = (planned.shared.unwrap(), written.shared.unwrap());
    assert_eq!(rel(&a.created, dir.path()), rel(&b.created, dir.path()));
    for (a, b) in planned.resources.iter().zip(&written.resources) {
        assert_eq!(rel(&a.report.created, dir.path()), rel(&b.report.created, dir.path()));
        assert_eq!(rel(&a.report.skipped, dir.path()), rel(&b.report.skipped, dir.path()));
    }
    for (path, contents) in dry.files() {
        assert_eq!(&fs::read_to_string(path).unwrap(), contents);
    }
}

#[test]
fn test_next_reviews() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let report = generate_project_with_options(&doc, &options(dir.path(), Target::Next), &mut LocalFs)
        .unwrap();
    assert!(report.is_success());

    let root = dir.path();
    assert!(root.join("pages/reviews/index.tsx").is_file());
    assert!(root.join("pages/reviews/[id]/edit.tsx").is_file());
    assert!(root.join("components/review/Filter.tsx").is_file());
    assert!(!root.join("components/book/Filter.tsx").exists());

    let types = fs::read_to_string(root.join("types/Review.ts")).unwrap();
    assert!(types.contains("export interface Review {"));
}

#[test]
fn test_unknown_resource_writes_nothing() {
    let doc = load_api_document(&fixture("bookstore.yaml")).unwrap();
    let dir = tempdir().unwrap();
    let mut opts = options(dir.path(), Target::Quasar);
    opts.resources = vec!["magazines".to_string()];

    let err = generate_project_with_options(&doc, &opts, &mut LocalFs).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownResource(ref name) if name == "magazines"));
    assert!(files_under(dir.path()).is_empty());
}
