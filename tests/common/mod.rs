#![allow(dead_code)]

use std::path::PathBuf;

use depsize_lib::Snapshot;
use serde_json::{json, Value};

/// Builder for a stats snapshot + size report pair.
///
/// Every module becomes a leaf of the size report, so its size is the one
/// given here. Each chunk's report entry holds the chunk's own modules, with
/// dependency-folder modules grouped under `./node_modules`.
#[derive(Default)]
pub struct Fixture {
    modules: Vec<ModuleSpec>,
    chunks: Vec<ChunkSpec>,
}

struct ModuleSpec {
    name: String,
    size: u64,
    reasons: Vec<String>,
}

struct ChunkSpec {
    file: String,
    origins: Vec<String>,
    modules: Vec<String>,
}

/// Snapshot files written to a temporary directory
pub struct FixtureFiles {
    pub dir: tempfile::TempDir,
    pub stats: PathBuf,
    pub report: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module of `size` bytes included because of `reasons`
    pub fn module(mut self, name: &str, size: u64, reasons: &[&str]) -> Self {
        self.modules.push(ModuleSpec {
            name: name.to_string(),
            size,
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    /// Add a chunk emitted as `file`, created by `origin`, bundling `modules`
    pub fn chunk(mut self, file: &str, origin: &str, modules: &[&str]) -> Self {
        self.chunks.push(ChunkSpec {
            file: file.to_string(),
            origins: vec![origin.to_string()],
            modules: modules.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    fn size_of(&self, name: &str) -> u64 {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.size)
            .unwrap_or(0)
    }

    fn id_of(&self, name: &str) -> usize {
        self.modules.iter().position(|m| m.name == name).unwrap_or(usize::MAX)
    }

    fn leaf(&self, name: &str) -> Value {
        let size = self.size_of(name);
        json!({
            "id": self.id_of(name),
            "path": name,
            "statSize": size * 2,
            "parsedSize": size,
            "gzipSize": size / 2,
        })
    }

    pub fn stats_json(&self) -> Value {
        json!({
            "chunks": self.chunks.iter().map(|chunk| json!({
                "files": [chunk.file],
                "modules": chunk.modules.iter().map(|m| json!({ "name": m })).collect::<Vec<_>>(),
                "origins": chunk.origins.iter().map(|o| json!({ "request": o })).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
            "modules": self.modules.iter().map(|module| json!({
                "name": module.name,
                "size": module.size,
                "reasons": module.reasons.iter().map(|r| json!({
                    "moduleName": r,
                    "userRequest": r,
                })).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
        })
    }

    pub fn report_json(&self) -> Value {
        let chunks: Vec<Value> = self
            .chunks
            .iter()
            .map(|chunk| {
                let (vendor, own): (Vec<&String>, Vec<&String>) = chunk
                    .modules
                    .iter()
                    .partition(|m| m.contains("/node_modules/"));
                let vendor_size: u64 = vendor.iter().map(|m| self.size_of(m)).sum();
                let own_size: u64 = own.iter().map(|m| self.size_of(m)).sum();

                let mut groups: Vec<Value> = own.iter().map(|m| self.leaf(m)).collect();
                groups.push(json!({
                    "path": "./node_modules",
                    "statSize": vendor_size * 2,
                    "parsedSize": vendor_size,
                    "gzipSize": vendor_size / 2,
                    "groups": vendor.iter().map(|m| self.leaf(m)).collect::<Vec<_>>(),
                }));

                let total = vendor_size + own_size;
                json!({
                    "label": chunk.file,
                    "isAsset": true,
                    "statSize": total * 2,
                    "parsedSize": total,
                    "gzipSize": total / 2,
                    "groups": groups,
                })
            })
            .collect();
        Value::Array(chunks)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stats: serde_json::from_value(self.stats_json()).unwrap(),
            report: serde_json::from_value(self.report_json()).unwrap(),
        }
    }

    pub fn write(&self) -> FixtureFiles {
        let dir = tempfile::tempdir().unwrap();
        let stats = dir.path().join("stats.json");
        let report = dir.path().join("report.json");
        std::fs::write(&stats, self.stats_json().to_string()).unwrap();
        std::fs::write(&report, self.report_json().to_string()).unwrap();
        FixtureFiles { dir, stats, report }
    }
}

/// A small application with shared, nested, scoped and cyclic packages.
///
///   main.js  <- ./src/index.js
///     ./src/a.js  -> lodash, x (x <-> y cycle)
///     ./src/b.js  -> lodash, @babel/runtime
///     react -> object-assign, @babel/runtime
///   page.js  <- ./src/page.js
///     lodash
pub fn app() -> Fixture {
    Fixture::new()
        .module("./src/index.js", 10, &[])
        .module("./src/a.js", 20, &["./src/index.js"])
        .module("./src/b.js", 30, &["./src/index.js"])
        .module("./node_modules/react/index.js", 100, &["./src/index.js"])
        .module("./node_modules/react/cjs/react.js", 6000, &["./node_modules/react/index.js"])
        .module(
            "./node_modules/object-assign/index.js",
            400,
            &["./node_modules/react/cjs/react.js"],
        )
        .module(
            "./node_modules/@babel/runtime/helpers/extends.js",
            250,
            &["./src/b.js", "./node_modules/react/cjs/react.js"],
        )
        .module("./node_modules/lodash/lodash.js", 70000, &["./src/a.js", "./src/b.js", "./src/page.js"])
        .module("./node_modules/x/index.js", 15, &["./src/a.js", "./node_modules/y/index.js"])
        .module("./node_modules/y/index.js", 25, &["./node_modules/x/index.js"])
        .module("./src/page.js", 5, &[])
        .chunk(
            "main.js",
            "./src/index.js",
            &[
                "./src/index.js",
                "./src/a.js",
                "./src/b.js",
                "./node_modules/react/index.js",
                "./node_modules/react/cjs/react.js",
                "./node_modules/object-assign/index.js",
                "./node_modules/@babel/runtime/helpers/extends.js",
                "./node_modules/lodash/lodash.js",
                "./node_modules/x/index.js",
                "./node_modules/y/index.js",
            ],
        )
        .chunk(
            "page.js",
            "./src/page.js",
            &["./src/page.js", "./node_modules/lodash/lodash.js"],
        )
}
