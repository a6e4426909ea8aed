use chatmark_engine::parsing::{ParseOptions, parse_with, snapshot};

#[test]
fn fixture_chat_reply() {
    assert_fixture("chat_reply");
}

#[test]
fn fixture_table_ragged_rows() {
    assert_fixture("table_ragged_rows");
}

#[test]
fn fixture_nested_collapsible() {
    assert_fixture("nested_collapsible");
}

#[test]
fn fixture_chart_and_image() {
    assert_fixture("chart_and_image");
}

#[test]
fn fixture_partial_stream() {
    assert_fixture("partial_stream");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let blocks = parse_with(&md, false, &ParseOptions::default());
    snapshot::invariants(&blocks);

    let outline = snapshot::outline(&blocks);
    let outline = outline.trim_end();
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, outline);
    });
}

/// Every prefix of a fixture, parsed as a stream, keeps the tree well formed.
#[test]
fn every_prefix_is_well_formed() {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    for name in [
        "chat_reply",
        "table_ragged_rows",
        "nested_collapsible",
        "chart_and_image",
        "partial_stream",
    ] {
        let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();
        for (end, _) in md.char_indices() {
            let prefix = &md[..end];
            let blocks = parse_with(prefix, true, &ParseOptions::default());
            assert_eq!(
                blocks.is_empty(),
                prefix.is_empty(),
                "{name}: unexpected block count for prefix {prefix:?}"
            );
            snapshot::invariants(&blocks);
        }
    }
}
