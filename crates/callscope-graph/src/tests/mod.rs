//! Unit tests for the callscope-graph crate.

#![expect(
    clippy::similar_names,
    reason = "caller/callee are domain terms for tests"
)]

mod support;

mod builder_tests {
    use rstest::rstest;

    use super::support::{SnapshotFixture, build, outline, symbol, two_file_callers};
    use crate::{Direction, OverrideLookupShape, SymbolKind};

    #[test]
    fn callers_sort_by_resource_then_name_then_offset() {
        let index = two_file_callers().index();
        let root = symbol(&index, "F", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        let names: Vec<_> = hierarchy
            .children()
            .iter()
            .map(|node| node.symbol().name())
            .collect();
        assert_eq!(names, ["bar", "baz", "qux"]);
    }

    #[test]
    fn calls_from_one_caller_sort_by_offset() {
        let index = SnapshotFixture::new()
            .function(1, "f")
            .function(2, "g")
            .definition(10, 1, "lib", 0)
            .definition(20, 2, "lib", 40)
            .call(22, 1, "lib", 60, 20)
            .call(21, 1, "lib", 50, 20)
            .index();
        let root = symbol(&index, "lib", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        let offsets: Vec<_> = hierarchy
            .children()
            .iter()
            .map(|node| node.occurrence().offset())
            .collect();
        assert_eq!(offsets, [50, 60]);
        assert!(hierarchy.children().iter().any(|node| node.is_expanded()));
        assert!(hierarchy.children().iter().any(|node| !node.is_expanded()));
    }

    #[test]
    fn record_order_does_not_change_the_hierarchy() {
        let forward = two_file_callers().index();
        let backward = two_file_callers().reversed().index();

        let left = build(&forward, &symbol(&forward, "F", 0), Direction::Callers);
        let right = build(&backward, &symbol(&backward, "F", 0), Direction::Callers);

        assert_eq!(left, right);
    }

    #[test]
    fn direct_recursion_appears_as_a_leaf() {
        let index = SnapshotFixture::new()
            .function(1, "fact")
            .definition(10, 1, "math", 0)
            .call(11, 1, "math", 30, 10)
            .index();
        let root = symbol(&index, "math", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        assert_eq!(outline(&hierarchy), ["fact", " fact*"]);
    }

    #[test]
    fn mutual_recursion_terminates() {
        let index = SnapshotFixture::new()
            .function(1, "even")
            .function(2, "odd")
            .definition(10, 1, "parity", 0)
            .definition(20, 2, "parity", 100)
            .call(11, 2, "parity", 40, 10)
            .call(21, 1, "parity", 140, 20)
            .index();
        let root = symbol(&index, "parity", 0);

        let hierarchy = build(&index, &root, Direction::Callees);

        assert_eq!(outline(&hierarchy), ["even", " odd", "  even*"]);
    }

    #[test]
    fn shared_callee_is_expanded_once() {
        let index = SnapshotFixture::new()
            .function(1, "main")
            .function(2, "left")
            .function(3, "right")
            .function(4, "shared")
            .function(5, "leaf")
            .definition(10, 1, "app", 0)
            .definition(20, 2, "app", 100)
            .definition(30, 3, "app", 200)
            .definition(40, 4, "app", 300)
            .definition(50, 5, "app", 400)
            .call(11, 2, "app", 10, 10)
            .call(12, 3, "app", 20, 10)
            .call(21, 4, "app", 110, 20)
            .call(31, 4, "app", 210, 30)
            .call(41, 5, "app", 310, 40)
            .index();
        let root = symbol(&index, "app", 0);

        let hierarchy = build(&index, &root, Direction::Callees);

        assert_eq!(
            outline(&hierarchy),
            ["main", " left", "  shared", "   leaf", " right", "  shared*"]
        );
    }

    #[test]
    fn callees_skip_non_callable_references() {
        let index = SnapshotFixture::new()
            .function(1, "run")
            .binding(2, "counter", SymbolKind::Variable)
            .binding(3, "Config", SymbolKind::Type)
            .function(4, "step")
            .definition(10, 1, "loop", 0)
            .definition(20, 2, "loop", 200)
            .definition(30, 3, "loop", 300)
            .definition(40, 4, "loop", 400)
            .call(11, 2, "loop", 10, 10)
            .call(12, 3, "loop", 20, 10)
            .call(13, 4, "loop", 30, 10)
            .index();
        let root = symbol(&index, "loop", 0);

        let hierarchy = build(&index, &root, Direction::Callees);

        assert_eq!(outline(&hierarchy), ["run", " step"]);
    }

    #[test]
    fn references_outside_any_definition_are_skipped() {
        let index = SnapshotFixture::new()
            .function(1, "init")
            .function(2, "boot")
            .definition(10, 1, "start", 0)
            .definition(20, 2, "start", 50)
            .top_level_reference(11, 1, "start", 30)
            .call(12, 1, "start", 60, 20)
            .index();
        let root = symbol(&index, "start", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        assert_eq!(outline(&hierarchy), ["init", " boot"]);
    }

    #[test]
    fn external_callee_without_definition_is_skipped() {
        let index = SnapshotFixture::new()
            .function(1, "main")
            .function(2, "puts")
            .definition(10, 1, "hello", 0)
            .call(11, 2, "hello", 10, 10)
            .index();
        let root = symbol(&index, "hello", 0);

        let hierarchy = build(&index, &root, Direction::Callees);

        assert!(hierarchy.children().is_empty());
    }

    fn shapes() -> SnapshotFixture {
        SnapshotFixture::new()
            .binding(1, "Shape::area", SymbolKind::Method)
            .binding(2, "Circle::area", SymbolKind::Method)
            .function(3, "render")
            .function(4, "measure")
            .function(5, "direct")
            .overrides(2, 1)
            .definition(10, 1, "shape", 0)
            .definition(20, 2, "circle", 0)
            .definition(30, 3, "main", 0)
            .definition(40, 4, "main", 100)
            .definition(50, 5, "main", 200)
            .polymorphic_call(31, 1, "main", 10, 30)
            .call(41, 1, "main", 110, 40)
            .call(51, 2, "main", 210, 50)
    }

    #[rstest]
    #[case::direct(OverrideLookupShape::Direct, &["Circle::area", " direct", " render"])]
    #[case::contextual(OverrideLookupShape::Contextual, &["Circle::area", " direct", " render"])]
    #[case::unavailable(OverrideLookupShape::Unavailable, &["Circle::area", " direct"])]
    fn overriding_method_gains_polymorphic_callers_of_its_ancestor(
        #[case] shape: OverrideLookupShape,
        #[case] expected: &[&str],
    ) {
        let index = shapes().index().with_override_shape(shape);
        let root = symbol(&index, "circle", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        assert_eq!(outline(&hierarchy), expected);
    }

    #[test]
    fn ancestor_method_does_not_gain_descendant_callers() {
        let index = shapes().index();
        let root = symbol(&index, "shape", 0);

        let hierarchy = build(&index, &root, Direction::Callers);

        assert_eq!(outline(&hierarchy), ["Shape::area", " measure", " render"]);
    }

    #[test]
    fn functions_ignore_recorded_overrides() {
        let index = SnapshotFixture::new()
            .function(1, "base")
            .function(2, "shadow")
            .function(3, "user")
            .overrides(2, 1)
            .definition(10, 1, "lib", 0)
            .definition(20, 2, "lib", 100)
            .definition(30, 3, "lib", 200)
            .polymorphic_call(31, 1, "lib", 210, 30)
            .index();
        let root = symbol(&index, "lib", 100);

        let hierarchy = build(&index, &root, Direction::Callers);

        assert_eq!(outline(&hierarchy), ["shadow"]);
    }

    #[test]
    fn root_without_callers_has_empty_children() {
        let index = SnapshotFixture::new()
            .function(1, "lonely")
            .definition(10, 1, "lib", 0)
            .index();
        let root = symbol(&index, "lib", 0);

        for direction in [Direction::Callers, Direction::Callees] {
            let hierarchy = build(&index, &root, direction);
            assert!(hierarchy.children().is_empty());
            assert_eq!(hierarchy.direction(), direction);
        }
    }
}

mod response_tests {
    use std::io::Write;

    use camino::{Utf8Path, Utf8PathBuf};
    use insta::assert_snapshot;
    use rstest::rstest;

    use super::support::{SnapshotFixture, build, symbol, two_file_callers};
    use crate::{
        Direction, FileLineResolver, HierarchyResponse, LineTable, PositionResolver,
        ResultFormatter,
    };

    #[test]
    fn formats_callers_as_nested_json() {
        let index = two_file_callers().index();
        let hierarchy = build(&index, &symbol(&index, "F", 0), Direction::Callers);

        let node = ResultFormatter::new().format(&hierarchy);
        let json = serde_json::to_string_pretty(&node).expect("serialise response");

        assert_snapshot!(json, @r#"
        {
          "name": "f()",
          "position": {
            "file": "F",
            "offset": 0
          },
          "callers": [
            {
              "name": "bar()",
              "position": {
                "file": "A",
                "offset": 10
              },
              "callers": []
            },
            {
              "name": "baz()",
              "position": {
                "file": "A",
                "offset": 5
              },
              "callers": []
            },
            {
              "name": "qux()",
              "position": {
                "file": "B",
                "offset": 20
              },
              "callers": []
            }
          ]
        }
        "#);
    }

    #[test]
    fn leaves_omit_child_lists() {
        let index = SnapshotFixture::new()
            .function(1, "walk")
            .parameters(1, &["Node*", "int"])
            .definition(10, 1, "tree.c", 0)
            .call(11, 1, "tree.c", 40, 10)
            .index();
        let hierarchy = build(&index, &symbol(&index, "tree.c", 0), Direction::Callees);

        let node = ResultFormatter::new().format(&hierarchy);
        let json = serde_json::to_value(&node).expect("serialise response");

        assert_eq!(json["name"], "walk(Node*, int)");
        assert_eq!(json["callees"][0]["name"], "walk(Node*, int)");
        assert!(json["callees"][0].get("callees").is_none());
        assert!(json.get("callers").is_none());
    }

    #[test]
    fn unresolved_selection_serialises_as_empty_object() {
        let json = serde_json::to_string(&HierarchyResponse::unresolved())
            .expect("serialise response");

        assert_eq!(json, "{}");
    }

    #[test]
    fn backslashes_in_paths_become_forward_slashes() {
        let index = SnapshotFixture::new()
            .function(1, "main")
            .definition(10, 1, r"src\main.c", 4)
            .index();
        let hierarchy = build(
            &index,
            &symbol(&index, r"src\main.c", 4),
            Direction::Callers,
        );

        let node = ResultFormatter::new().format(&hierarchy);

        let position = node.position.expect("root position");
        assert_eq!(position.file, "src/main.c");
    }

    #[rstest]
    #[case(0, Some((1, 1)))]
    #[case(3, Some((1, 4)))]
    #[case(4, Some((2, 1)))]
    #[case(6, Some((2, 3)))]
    #[case(7, Some((3, 1)))]
    #[case(8, Some((4, 1)))]
    #[case(9, Some((4, 2)))]
    #[case(10, None)]
    fn line_table_maps_offsets(#[case] offset: u32, #[case] expected: Option<(u32, u32)>) {
        let table = LineTable::new(b"abc\nde\n\nz");

        assert_eq!(table.line_column(offset), expected);
    }

    #[test]
    fn file_resolver_adds_lines_and_columns() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "int f;\nint g() {{ return f; }}\n").expect("write source");
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("utf-8 path");
        let index = SnapshotFixture::new()
            .function(1, "g")
            .function(2, "h")
            .definition(10, 1, path.as_str(), 11)
            .definition(20, 2, "other", 0)
            .call(21, 1, "other", 5, 20)
            .index();
        let hierarchy = build(&index, &symbol(&index, path.as_str(), 11), Direction::Callers);

        let node = ResultFormatter::with_resolver(FileLineResolver::new()).format(&hierarchy);

        let root = node.position.as_ref().expect("root position");
        assert_eq!((root.line, root.column), (Some(2), Some(5)));
        let caller = node
            .children()
            .and_then(|children| children.first())
            .and_then(|child| child.position.as_ref())
            .expect("caller position");
        assert_eq!((caller.line, caller.column), (None, None));
    }

    #[test]
    fn rooted_resolver_reads_relative_resources_beneath_its_root() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("lib.c"), "\n\n  f();\n").expect("write source");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let resolver = FileLineResolver::rooted(root);

        assert_eq!(resolver.line_column(Utf8Path::new("lib.c"), 4), Some((3, 3)));
        assert_eq!(resolver.line_column(Utf8Path::new("missing.c"), 0), None);
    }
}

mod snapshot_tests {
    use camino::Utf8Path;

    use super::support::SnapshotFixture;
    use crate::{GraphError, SnapshotIndex, SymbolIndex};

    #[test]
    fn parses_the_documented_json_layout() {
        let index = SnapshotIndex::from_json(
            r#"{
                "bindings": [
                    { "id": 1, "name": "Shape::area", "kind": "method", "parameters": ["int"] },
                    { "id": 2, "name": "main", "kind": "function" }
                ],
                "names": [
                    { "id": 10, "binding": 1, "resource": "/src/shape.cpp", "offset": 120,
                      "length": 4, "role": "definition" },
                    { "id": 20, "binding": 2, "resource": "/src/main.cpp", "offset": 0,
                      "length": 4, "role": "definition" },
                    { "id": 11, "binding": 1, "resource": "/src/main.cpp", "offset": 48,
                      "length": 4, "role": "reference", "polymorphic": true, "enclosing": 20 }
                ]
            }"#,
        )
        .expect("snapshot should parse");

        let symbol = index
            .symbol_at(Utf8Path::new("/src/main.cpp"), 49, 1)
            .expect("lookup")
            .expect("symbol under cursor");

        assert_eq!(symbol.signature(), "Shape::area(int)");
        assert_eq!(symbol.location().resource().as_str(), "/src/shape.cpp");
        assert_eq!(symbol.location().offset(), 120);
    }

    #[test]
    fn selection_outside_any_name_resolves_to_nothing() {
        let index = SnapshotFixture::new()
            .function(1, "f")
            .definition(10, 1, "lib", 0)
            .index();

        let symbol = index
            .symbol_at(Utf8Path::new("lib"), 50, 2)
            .expect("lookup");

        assert!(symbol.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SnapshotIndex::from_json("{ not json").expect_err("should fail");

        assert!(matches!(err, GraphError::Snapshot { .. }));
    }

    #[test]
    fn rejects_duplicate_binding_ids() {
        let snapshot = SnapshotFixture::new()
            .function(1, "f")
            .function(1, "g")
            .snapshot();

        let err = SnapshotIndex::from_snapshot(snapshot).expect_err("should fail");

        assert!(matches!(err, GraphError::Snapshot { .. }));
    }

    #[test]
    fn rejects_names_of_unknown_bindings() {
        let snapshot = SnapshotFixture::new()
            .function(1, "f")
            .definition(10, 9, "lib", 0)
            .snapshot();

        let err = SnapshotIndex::from_snapshot(snapshot).expect_err("should fail");

        assert!(err.to_string().contains('9'), "unexpected message: {err}");
    }

    #[test]
    fn rejects_enclosing_references() {
        let snapshot = SnapshotFixture::new()
            .function(1, "f")
            .definition(10, 1, "lib", 0)
            .top_level_reference(11, 1, "lib", 20)
            .call(12, 1, "lib", 30, 11)
            .snapshot();

        let err = SnapshotIndex::from_snapshot(snapshot).expect_err("should fail");

        assert!(matches!(err, GraphError::Snapshot { .. }));
    }

    #[test]
    fn rejects_unknown_override_targets() {
        let snapshot = SnapshotFixture::new()
            .binding(1, "A::m", crate::SymbolKind::Method)
            .overrides(1, 7)
            .snapshot();

        let err = SnapshotIndex::from_snapshot(snapshot).expect_err("should fail");

        assert!(matches!(err, GraphError::Snapshot { .. }));
    }

    #[test]
    fn load_reports_missing_files_as_io_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8Path::from_path(dir.path())
            .expect("utf-8 path")
            .join("missing.json");

        let err = SnapshotIndex::load(&path).expect_err("should fail");

        assert!(matches!(err, GraphError::Io { .. }));
    }
}
