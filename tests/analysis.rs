mod common;

use std::collections::HashSet;

use common::{app, Fixture};
use depsize_lib::analyzer::{
    analyze, AnalyzeOptions, ChunkSizeInfo, FileSizeInfo, HierarchyNode, PackageSizeInfo,
    SizeMetric,
};
use pretty_assertions::assert_eq;

fn run(fixture: &Fixture) -> Vec<ChunkSizeInfo> {
    analyze(&fixture.snapshot(), &AnalyzeOptions::default()).unwrap()
}

fn file(name: &str, size: u64) -> HierarchyNode {
    HierarchyNode::File(FileSizeInfo {
        name: name.to_string(),
        size,
    })
}

fn package(name: &str, total_size: u64, children: Vec<HierarchyNode>) -> PackageSizeInfo {
    PackageSizeInfo {
        name: name.to_string(),
        total_size,
        children,
    }
}

fn top_level(chunk: &ChunkSizeInfo) -> Vec<(&str, u64)> {
    chunk
        .children
        .iter()
        .map(|p| (p.name.as_str(), p.total_size))
        .collect()
}

// --- scenarios ---

#[test]
fn same_package_files_are_merged() {
    let fixture = Fixture::new()
        .module("./src/index.js", 1, &[])
        .module("./node_modules/lodash/index.js", 100, &["./src/index.js"])
        .module("./node_modules/lodash/map.js", 50, &["./node_modules/lodash/index.js"])
        .module(
            "./node_modules/lodash/internal/base.js",
            30,
            &["./node_modules/lodash/map.js"],
        )
        .chunk(
            "chunk1.js",
            "./src/index.js",
            &[
                "./src/index.js",
                "./node_modules/lodash/index.js",
                "./node_modules/lodash/map.js",
                "./node_modules/lodash/internal/base.js",
            ],
        )
        .chunk("chunk2.js", "./src/other.js", &[]);

    let chunks = run(&fixture);

    assert_eq!(chunks[0].name, "chunk1.js");
    assert_eq!(
        chunks[0].children,
        vec![package(
            "lodash",
            180,
            vec![file("index.js", 100), file("map.js", 50), file("internal/base.js", 30)],
        )]
    );
    assert!(chunks[1].children.is_empty());
}

#[test]
fn other_packages_are_nested() {
    let fixture = Fixture::new()
        .module("./src/index.js", 1, &[])
        .module("./node_modules/a/index.js", 10, &["./src/index.js"])
        .module("./node_modules/b/index.js", 20, &["./node_modules/a/index.js"])
        .chunk("main.js", "./src/index.js", &["./src/index.js"]);

    let chunks = run(&fixture);

    assert_eq!(
        chunks[0].children,
        vec![package(
            "a",
            30,
            vec![
                HierarchyNode::Package(package("b", 20, vec![file("index.js", 20)])),
                file("index.js", 10),
            ],
        )]
    );
}

#[test]
fn unrecognized_package_path_is_pruned() {
    let fixture = Fixture::new()
        .module("./src/index.js", 1, &[])
        .module("./node_modules/a/index.js", 10, &["./src/index.js"])
        .module("./lib/vendored.js", 500, &["./node_modules/a/index.js"])
        .module("./node_modules/a/util.js", 5, &["./node_modules/a/index.js"])
        .module("./node_modules/c/index.js", 7, &["./node_modules/a/index.js"])
        .chunk("main.js", "./src/index.js", &["./src/index.js"]);

    let chunks = run(&fixture);

    assert_eq!(
        chunks[0].children,
        vec![package(
            "a",
            22,
            vec![
                HierarchyNode::Package(package("c", 7, vec![file("index.js", 7)])),
                file("index.js", 10),
                file("util.js", 5),
            ],
        )]
    );
}

#[test]
fn cyclic_packages_terminate_and_count_once() {
    let chunks = run(&app());
    let main = chunks.iter().find(|c| c.name == "main.js").unwrap();

    let x = main.children.iter().find(|p| p.name == "x").unwrap();
    assert_eq!(
        *x,
        package(
            "x",
            40,
            vec![
                HierarchyNode::Package(package("y", 25, vec![file("index.js", 25)])),
                file("index.js", 15),
            ],
        )
    );

    let mut names = Vec::new();
    for p in &main.children {
        collect_package_names(p, &mut names);
    }
    assert_eq!(names.iter().filter(|n| **n == "x").count(), 1);
    assert_eq!(names.iter().filter(|n| **n == "y").count(), 1);
}

#[test]
fn entry_pattern_without_match_leaves_chunk_empty() {
    let options = AnalyzeOptions {
        entry: Some("./src/index.js".to_string()),
        ..Default::default()
    };
    let chunks = analyze(&app().snapshot(), &options).unwrap();

    let main = chunks.iter().find(|c| c.name == "main.js").unwrap();
    let page = chunks.iter().find(|c| c.name == "page.js").unwrap();
    assert!(!main.children.is_empty());
    assert!(page.children.is_empty());
}

// --- whole-app expectations ---

#[test]
fn app_breakdown() {
    let chunks = run(&app());

    let names: Vec<&str> = chunks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["main.js", "page.js"]);

    let main = &chunks[0];
    assert_eq!(main.chunk_size, 76850);
    assert_eq!(main.node_modules_size, 76790);
    assert_eq!(
        top_level(main),
        vec![("lodash", 70000), ("react", 6500), ("@babel/runtime", 250), ("x", 40)]
    );

    let react = &main.children[1];
    assert_eq!(
        *react,
        package(
            "react",
            6500,
            vec![
                HierarchyNode::Package(package("object-assign", 400, vec![file("index.js", 400)])),
                file("cjs/react.js", 6000),
                file("index.js", 100),
            ],
        )
    );

    let page = &chunks[1];
    assert_eq!(page.chunk_size, 70005);
    assert_eq!(top_level(page), vec![("lodash", 70000)]);
}

#[test]
fn size_metric_is_applied_everywhere() {
    let options = AnalyzeOptions {
        size_metric: SizeMetric::Stat,
        ..Default::default()
    };
    let chunks = analyze(&app().snapshot(), &options).unwrap();

    assert_eq!(chunks[0].chunk_size, 76850 * 2);
    assert_eq!(chunks[0].node_modules_size, 76790 * 2);
    assert_eq!(top_level(&chunks[0])[0], ("lodash", 140000));
}

#[test]
fn missing_report_entry_is_an_error() {
    let mut snapshot = app().snapshot();
    snapshot.report.pop();
    assert!(analyze(&snapshot, &AnalyzeOptions::default()).is_err());
}

#[test]
fn invalid_entry_pattern_is_an_error() {
    let options = AnalyzeOptions {
        entry: Some("./src/{index".to_string()),
        ..Default::default()
    };
    assert!(analyze(&app().snapshot(), &options).is_err());
}

// --- properties ---

fn collect_package_names<'a>(package: &'a PackageSizeInfo, names: &mut Vec<&'a str>) {
    names.push(&package.name);
    for child in &package.children {
        if let HierarchyNode::Package(nested) = child {
            collect_package_names(nested, names);
        }
    }
}

fn assert_sizes_add_up(package: &PackageSizeInfo) {
    let sum: u64 = package.children.iter().map(HierarchyNode::size).sum();
    assert_eq!(package.total_size, sum, "sizes of {} do not add up", package.name);

    let mut seen = HashSet::new();
    for child in &package.children {
        if let HierarchyNode::Package(nested) = child {
            assert!(seen.insert(&nested.name), "{} nested twice in {}", nested.name, package.name);
            assert_sizes_add_up(nested);
        }
    }
}

#[test]
fn totals_add_up_and_names_are_unique() {
    for chunk in run(&app()) {
        let mut seen = HashSet::new();
        for package in &chunk.children {
            assert!(seen.insert(&package.name));
            assert_sizes_add_up(package);
        }
    }
}

#[test]
fn children_are_sorted_largest_first() {
    fn check(package: &PackageSizeInfo) {
        let nested: Vec<u64> = package
            .children
            .iter()
            .filter_map(|c| match c {
                HierarchyNode::Package(p) => Some(p.total_size),
                HierarchyNode::File(_) => None,
            })
            .collect();
        assert!(nested.windows(2).all(|w| w[0] >= w[1]));

        let files: Vec<u64> = package
            .children
            .iter()
            .filter_map(|c| match c {
                HierarchyNode::File(f) => Some(f.size),
                HierarchyNode::Package(_) => None,
            })
            .collect();
        assert!(files.windows(2).all(|w| w[0] >= w[1]));
    }

    let chunks = run(&app());
    assert!(chunks.windows(2).all(|w| w[0].chunk_size >= w[1].chunk_size));
    for chunk in &chunks {
        assert!(chunk.children.windows(2).all(|w| w[0].total_size >= w[1].total_size));
        chunk.children.iter().for_each(check);
    }
}

#[test]
fn analysis_is_deterministic() {
    let snapshot = app().snapshot();
    let first = serde_json::to_string(&analyze(&snapshot, &AnalyzeOptions::default()).unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&analyze(&snapshot, &AnalyzeOptions::default()).unwrap()).unwrap();
        assert_eq!(first, again);
    }
}
