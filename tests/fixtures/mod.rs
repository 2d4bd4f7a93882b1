#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Checked-in workspace with four node packages, two of them without a
/// README, plus packages hidden under `Tests/` and `nested/test/`.
pub fn workspace_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("workspace")
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Creates `<rel>/package.xml` and returns the package directory.
pub fn add_package(root: &Path, rel: &str) -> PathBuf {
    write_file(
        root,
        &format!("{rel}/package.xml"),
        "<?xml version=\"1.0\"?>\n<package format=\"3\"/>\n",
    );
    root.join(rel)
}

pub const PY_NODE: &str = "import rclpy\nfrom rclpy.node import Node\n\n\nclass Foo(Node):\n    pass\n";

pub const CPP_NODE: &str = "class Foo : public rclcpp::Node\n{\n};\n";

pub const PY_PLAIN: &str = "def helper():\n    return 1\n";
