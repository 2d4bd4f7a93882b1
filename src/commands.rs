use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::cli::{Command, Limit};
use crate::detection::{NodeClassifier, PatternCatalog, RulesFile};
use crate::discovery::{aggregate, Criterion, PackageRecord};
use crate::error::RulesError;
use crate::output::{write_index, LinkFarm};

/// Built-in catalog plus any patterns from `rules`.
pub fn build_classifier(rules: Option<&Path>) -> Result<NodeClassifier, RulesError> {
    let mut catalog = PatternCatalog::builtin()?;
    if let Some(path) = rules {
        RulesFile::load(path)?.apply(&mut catalog)?;
    }
    Ok(NodeClassifier::new(catalog))
}

/// Runs one subcommand, writing the report to `out`. Returns the number of
/// admitted packages.
pub fn run(command: &Command, classifier: &NodeClassifier, out: &mut impl Write) -> Result<usize> {
    match command {
        Command::Index {
            search_dir,
            output_json,
            limit,
        } => run_index(search_dir, output_json, *limit, classifier, out),
        Command::LinkNodes {
            search_dir,
            links_dir,
            limit,
        } => run_links(
            search_dir,
            links_dir,
            Criterion::DefinesNode(classifier),
            *limit,
            out,
        ),
        Command::MissingReadme {
            search_dir,
            links_dir,
            limit,
        } => run_links(search_dir, links_dir, Criterion::MissingReadme, *limit, out),
    }
}

fn reached(limit: Limit, count: usize) -> bool {
    limit.max.is_some_and(|max| count >= max)
}

fn report_reached(limit: Limit, out: &mut impl Write) -> Result<()> {
    if let Some(max) = limit.max {
        writeln!(out, "Reached maximum of {max} package(s); stopping search.")?;
    }
    Ok(())
}

fn report_node_files(label: &str, record: &PackageRecord, out: &mut impl Write) -> Result<()> {
    for file in &record.node_files {
        writeln!(out, "{label}  [{file}]")?;
    }
    Ok(())
}

pub fn run_index(
    search_dir: &Path,
    output_json: &Path,
    limit: Limit,
    classifier: &NodeClassifier,
    out: &mut impl Write,
) -> Result<usize> {
    let scan = aggregate(search_dir, Criterion::DefinesNode(classifier), limit.max)?;
    info!(root = %scan.search_root().display(), "indexing node packages");

    let mut results = Vec::new();
    for record in scan {
        report_node_files(&record.package, &record, out)?;
        results.push(record);
        if reached(limit, results.len()) {
            report_reached(limit, out)?;
            break;
        }
    }

    if results.is_empty() {
        writeln!(out, "No ROS packages containing a node were found.")?;
        return Ok(0);
    }

    let path = write_index(&results, output_json)
        .with_context(|| format!("Failed to write index to {}", output_json.display()))?;
    writeln!(
        out,
        "Total: {} package(s) written to {}",
        results.len(),
        path.display()
    )?;
    Ok(results.len())
}

pub fn run_links(
    search_dir: &Path,
    links_dir: &Path,
    criterion: Criterion<'_>,
    limit: Limit,
    out: &mut impl Write,
) -> Result<usize> {
    let scan = aggregate(search_dir, criterion, limit.max)?;
    let farm = LinkFarm::create(links_dir)?;
    info!(
        root = %scan.search_root().display(),
        links = %farm.dir().display(),
        "linking packages"
    );

    let mut count = 0;
    for record in scan {
        let link = farm.link(&record)?;
        match criterion {
            Criterion::DefinesNode(_) => {
                let label = link
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| record.package.clone());
                report_node_files(&label, &record, out)?;
            }
            Criterion::MissingReadme => {
                writeln!(
                    out,
                    "Linked: {} -> {}",
                    link.display(),
                    record.package_dir.display()
                )?;
            }
        }
        count += 1;
        if reached(limit, count) {
            report_reached(limit, out)?;
            break;
        }
    }

    if count == 0 {
        let message = match criterion {
            Criterion::DefinesNode(_) => "No ROS packages containing a node were found.",
            Criterion::MissingReadme => "No ROS packages without a README were found.",
        };
        writeln!(out, "{message}")?;
    } else {
        writeln!(out, "\nTotal: {count} package(s) linked in {}", farm.dir().display())?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn report(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_build_classifier_with_rules_file() {
        let temp_dir = TempDir::new().unwrap();
        let rules = temp_dir.path().join("rules.yaml");
        fs::write(&rules, "python:\n  - 'spin_node\\('\n").unwrap();

        let classifier = build_classifier(Some(&rules)).unwrap();
        assert!(classifier.classify(Path::new("a.py"), "spin_node()"));
        assert!(classifier.classify(Path::new("a.py"), "class A(Node):"));
    }

    #[test]
    fn test_build_classifier_bad_rules_file() {
        let err = build_classifier(Some(Path::new("/nonexistent/rules.json"))).unwrap_err();
        assert!(matches!(err, RulesError::RulesFileReadError { .. }));
    }

    #[test]
    fn test_run_index_reports_each_file() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path().join("ws");
        write(&ws, "pkg_a/package.xml", "<package/>");
        write(&ws, "pkg_a/node.py", "class Foo(Node):\n");
        write(&ws, "pkg_a/src/main.cpp", "auto n = rclcpp::Node::make_shared(\"x\");");

        let classifier = build_classifier(None).unwrap();
        let dest = temp_dir.path().join("index");
        let mut buf = Vec::new();
        let count = run_index(&ws, &dest, Limit::default(), &classifier, &mut buf).unwrap();

        assert_eq!(count, 1);
        let out = report(buf);
        assert!(out.contains("pkg_a  [node.py]\n"));
        assert!(out.contains("pkg_a  [src/main.cpp]\n"));
        assert!(out.contains(&format!(
            "Total: 1 package(s) written to {}",
            temp_dir.path().join("index.json").display()
        )));
    }

    #[test]
    fn test_run_index_empty_skips_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("index.json");
        let classifier = build_classifier(None).unwrap();

        let mut buf = Vec::new();
        let count = run_index(
            &temp_dir.path().join("missing"),
            &dest,
            Limit::default(),
            &classifier,
            &mut buf,
        )
        .unwrap();

        assert_eq!(count, 0);
        assert_eq!(report(buf), "No ROS packages containing a node were found.\n");
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_links_missing_readme() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path().join("ws");
        write(&ws, "bare/package.xml", "<package/>");
        write(&ws, "docs/package.xml", "<package/>");
        write(&ws, "docs/README.md", "");

        let links = temp_dir.path().join("links");
        let mut buf = Vec::new();
        let count = run_links(
            &ws,
            &links,
            Criterion::MissingReadme,
            Limit::default(),
            &mut buf,
        )
        .unwrap();

        assert_eq!(count, 1);
        let out = report(buf);
        assert!(out.starts_with(&format!(
            "Linked: {} -> {}\n",
            links.join("bare").display(),
            ws.join("bare").display()
        )));
        assert!(out.ends_with(&format!(
            "\nTotal: 1 package(s) linked in {}\n",
            links.display()
        )));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_links_uses_link_name_as_label() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path().join("ws");
        write(&ws, "a/demo/package.xml", "<package/>");
        write(&ws, "a/demo/n.py", "rclpy.create_node('a')");
        write(&ws, "b/demo/package.xml", "<package/>");
        write(&ws, "b/demo/n.py", "rclpy.create_node('b')");

        let classifier = build_classifier(None).unwrap();
        let mut buf = Vec::new();
        run_links(
            &ws,
            &temp_dir.path().join("links"),
            Criterion::DefinesNode(&classifier),
            Limit::default(),
            &mut buf,
        )
        .unwrap();

        let out = report(buf);
        assert!(out.starts_with("demo  [n.py]\ndemo_1  [n.py]\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_links_limit_notice() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path().join("ws");
        for name in ["p1", "p2", "p3"] {
            write(&ws, &format!("{name}/package.xml"), "<package/>");
        }

        let mut buf = Vec::new();
        let count = run_links(
            &ws,
            &temp_dir.path().join("links"),
            Criterion::MissingReadme,
            Limit { max: Some(1) },
            &mut buf,
        )
        .unwrap();

        assert_eq!(count, 1);
        assert!(report(buf).contains("Reached maximum of 1 package(s); stopping search.\n"));
        assert!(!temp_dir.path().join("links/p2").exists());
    }
}
