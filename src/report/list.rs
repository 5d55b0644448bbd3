//! Console package list

use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::analyzer::{ChunkSizeInfo, HierarchyNode, PackageSizeInfo};
use crate::utils::with_unit;

/// Filters applied to the console list
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Package nesting levels to print, 1 = directly required only
    pub depth: usize,

    /// Only print packages larger than this many kilobytes
    pub gt: Option<f64>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self { depth: 1, gt: None }
    }
}

impl ListOptions {
    fn shows(&self, package: &PackageSizeInfo) -> bool {
        self.gt
            .map_or(true, |kb| package.total_size as f64 > kb * 1024.0)
    }
}

/// Size bands used to color sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBand {
    /// 50 KiB and up
    Large,
    /// 20 KiB and up
    Medium,
    /// 10 KiB and up
    Small,
    Tiny,
}

impl SizeBand {
    pub fn of(bytes: u64) -> Self {
        match bytes {
            b if b >= 50 * 1024 => SizeBand::Large,
            b if b >= 20 * 1024 => SizeBand::Medium,
            b if b >= 10 * 1024 => SizeBand::Small,
            _ => SizeBand::Tiny,
        }
    }

    fn paint(self, text: String) -> ColoredString {
        match self {
            SizeBand::Large => text.red(),
            SizeBand::Medium => text.yellow(),
            SizeBand::Small => text.blue(),
            SizeBand::Tiny => text.green(),
        }
    }
}

fn colored_size(bytes: u64) -> ColoredString {
    SizeBand::of(bytes).paint(with_unit(bytes))
}

/// Render the per-chunk package list
pub fn render_list(chunks: &[ChunkSizeInfo], options: &ListOptions) -> String {
    let mut out = String::new();

    for chunk in chunks {
        let _ = writeln!(
            out,
            "{} {} {}",
            chunk.name.bold().cyan(),
            colored_size(chunk.chunk_size),
            format!("(node_modules {})", with_unit(chunk.node_modules_size)).dimmed()
        );

        for package in chunk.children.iter().filter(|p| options.shows(p)) {
            write_package(&mut out, package, 1, options);
        }

        out.push('\n');
    }

    out
}

fn write_package(out: &mut String, package: &PackageSizeInfo, level: usize, options: &ListOptions) {
    if level > options.depth {
        return;
    }

    let _ = writeln!(
        out,
        "{}{} {}",
        "  ".repeat(level),
        package.name,
        colored_size(package.total_size)
    );

    for child in &package.children {
        if let HierarchyNode::Package(nested) = child {
            if options.shows(nested) {
                write_package(out, nested, level + 1, options);
            }
        }
    }
}
