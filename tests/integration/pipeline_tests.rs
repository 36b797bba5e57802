//! End-to-end tests for collection, aggregation and method extraction
//!
//! Each test lays out a fake apktool output tree in a temp directory.

use smalisift::aggregate::{extract_class_name, ClassAggregator};
use smalisift::{App, MethodExtractor, RawFile, SourceCollector};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn smali(class: &str, methods: &[&str]) -> String {
    let mut text = format!(
        ".class public final L{};\n.super Ljava/lang/Object;\n.source \"X.java\"\n",
        class
    );
    for m in methods {
        text.push_str(&format!(
            "\n# virtual methods\n.method public {}()V\n    .locals 0\n\n    return-void\n.end method\n",
            m
        ));
    }
    text
}

// ============================================================================
// Aggregation
// ============================================================================

mod aggregation_tests {
    use super::*;

    #[test]
    fn test_two_files_same_class_join_in_name_order() {
        let a = RawFile::new("A.smali", ".class public Lcom/example/Foo;\n# part a");
        let b = RawFile::new("B.smali", ".class public Lcom/example/Foo;\n# part b");
        let expected = format!("{}\n{}", a.content, b.content);

        let classes = ClassAggregator::new().aggregate(vec![b, a]);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_name, "com.example.Foo");
        assert_eq!(classes[0].content, expected);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let files = vec![
            RawFile::new("Z.smali", smali("org/z/Zed", &["z"])),
            RawFile::new("M.smali", smali("com/m/Mid", &["m"])),
            RawFile::new("A.smali", smali("com/m/Mid", &["a"])),
            RawFile::new("noise.txt", "not smali at all"),
        ];

        let aggregator = ClassAggregator::new();
        let baseline = aggregator.aggregate(files.clone());

        let mut rotated = files.clone();
        rotated.rotate_left(2);
        let mut reversed = files;
        reversed.reverse();

        assert_eq!(aggregator.aggregate(rotated), baseline);
        assert_eq!(aggregator.aggregate(reversed), baseline);
    }

    #[test]
    fn test_class_directive_variants() {
        assert_eq!(
            extract_class_name(".class public abstract interface Lcom/a/Api;"),
            Some("com/a/Api")
        );
        assert_eq!(
            extract_class_name(".class synthetic Lcom/a/B$1;"),
            Some("com/a/B$1")
        );
        assert_eq!(extract_class_name(".super Ljava/lang/Object;"), None);
    }
}

// ============================================================================
// Method extraction
// ============================================================================

mod extraction_tests {
    use super::*;

    #[test]
    fn test_class_without_methods_yields_none() {
        let classes = ClassAggregator::new().aggregate(vec![RawFile::new(
            "R.smali",
            ".class public final Lcom/app/R;\n.super Ljava/lang/Object;\n",
        )]);
        let methods = MethodExtractor::new().extract(&classes);
        assert!(methods.is_empty());
    }

    #[test]
    fn test_methods_belong_to_listed_classes() {
        let classes = ClassAggregator::new().aggregate(vec![
            RawFile::new("A.smali", smali("com/app/A", &["one", "two"])),
            RawFile::new("B.smali", smali("com/app/B", &["three"])),
        ]);
        let methods = MethodExtractor::new().extract(&classes);

        assert_eq!(methods.len(), 3);
        for method in &methods {
            assert!(classes.iter().any(|c| c.class_name == method.class_name));
            assert!(method.method_signature.starts_with(".method public "));
            assert!(method.content.ends_with(".end method"));
        }
        assert_eq!(methods[2].class_name, "com.app.B");
    }
}

// ============================================================================
// Whole pipeline over a directory tree
// ============================================================================

mod tree_tests {
    use super::*;

    fn sample_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "apktool.yml", "version: 2.9.3\n");
        write(
            dir.path(),
            "AndroidManifest.xml",
            r#"<?xml version="1.0" encoding="utf-8"?><manifest package="com.app"/>"#,
        );
        write(dir.path(), "smali/com/app/Main.smali", &smali("com/app/Main", &["onCreate"]));
        write(
            dir.path(),
            "smali/com/app/Main$1.smali",
            &smali("com/app/Main$1", &["run"]),
        );
        write(
            dir.path(),
            "smali_classes2/okhttp3/Call.smali",
            &smali("okhttp3/Call", &["execute", "cancel"]),
        );
        write(dir.path(), "res/values/strings.xml", "<resources/>");
        dir
    }

    #[test]
    fn test_load_counts() {
        let dir = sample_tree();
        let mut app = App::from_decompiled(dir.path());
        app.load(&SourceCollector::default());

        assert_eq!(app.num_classes(), Some(3));
        assert_eq!(app.num_methods(), Some(4));
        assert_eq!(app.num_classes(), Some(app.classes().len()));
        assert_eq!(app.num_methods(), Some(app.methods().len()));

        let names: Vec<_> = app.classes().iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, vec!["com.app.Main", "com.app.Main$1", "okhttp3.Call"]);
    }

    #[test]
    fn test_list_source_files() {
        let dir = sample_tree();
        let files = SourceCollector::default().list_source_files(dir.path());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_package_from_manifest() {
        let dir = sample_tree();
        let app = App::from_decompiled(dir.path());
        assert_eq!(app.package_name().as_deref(), Some("com.app"));
    }

    #[test]
    fn test_parallel_load_matches_sequential() {
        let dir = sample_tree();

        let mut sequential = App::from_decompiled(dir.path());
        sequential.load(&SourceCollector::default());
        let mut parallel = App::from_decompiled(dir.path()).with_parallel(true);
        parallel.load(&SourceCollector::default());

        assert_eq!(sequential.classes(), parallel.classes());
        assert_eq!(sequential.methods(), parallel.methods());
    }

    #[test]
    fn test_custom_marker() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "disasm/a/B.txt", ".class La/B;\n");
        write(dir.path(), "smali/c/D.smali", ".class Lc/D;\n");

        let mut app = App::from_decompiled(dir.path());
        app.load(&SourceCollector::new("disasm", "txt"));

        assert_eq!(app.num_classes(), Some(1));
        assert_eq!(app.classes()[0].class_name, "a.B");
    }
}
