mod util;

use std::fs;

use blog_search::indexer::statement::{CONFLICT_CLAUSE, generate_insert, sanitize_text};
use blog_search::indexer::{IndexError, IndexOptions, run_index};
use blog_search::model::types::ContentRecord;
use proptest::prelude::*;
use tempfile::TempDir;
use util::write_post;

fn my_post() -> ContentRecord {
    ContentRecord {
        title: Some("My Post".into()),
        description: Some("A desc".into()),
        category: Some("rails".into()),
        published_date: Some("2021-08-15".into()),
        slug: Some("/blog/my-post".into()),
        body: Some("Line one\nLine two #hashtag".into()),
        excerpt: Some("preview".into()),
    }
}

#[test]
fn generates_expected_statement_for_post() {
    let sql = generate_insert(&my_post()).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO documents(title, description, category, published_at, slug, body, \
         created_at, updated_at, excerpt) VALUES('My Post', 'A desc', 'rails', '2021-08-15', \
         '/blog/my-post', 'Line one Line two hashtag', now(), now(), 'preview') \
         ON CONFLICT (title) DO NOTHING;"
    );
}

#[test]
fn statement_is_deterministic() {
    let record = my_post();
    assert_eq!(
        generate_insert(&record).unwrap(),
        generate_insert(&record).unwrap()
    );
}

#[test]
fn statement_is_single_line_with_conflict_clause() {
    let mut record = my_post();
    record.description = Some("first\r\nsecond\rthird".into());
    let sql = generate_insert(&record).unwrap();
    assert!(!sql.contains('\n') && !sql.contains('\r'));
    assert!(sql.ends_with(CONFLICT_CLAUSE));
    assert_eq!(sql.matches(CONFLICT_CLAUSE).count(), 1);
}

#[test]
fn missing_description_is_rejected() {
    let mut record = my_post();
    record.description = None;
    assert!(matches!(
        generate_insert(&record),
        Err(IndexError::InvalidRecord {
            field: "description"
        })
    ));
}

proptest! {
    #[test]
    fn sanitized_text_has_no_breaks_or_quotes(text in "\\PC*|[a-z'\"#`\\r\\n ]{0,40}") {
        let out = sanitize_text(&text);
        for c in ['\r', '\n', '\'', '"', '#', '`'] {
            prop_assert!(!out.contains(c), "{c:?} survived in {out:?}");
        }
    }

    #[test]
    fn sanitize_keeps_plain_text(text in "[a-zA-Z0-9 .,!?-]{0,60}") {
        prop_assert_eq!(sanitize_text(&text), text);
    }
}

#[test]
fn run_index_replaces_stale_artifact() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write_post(
        &content,
        "blog/first.md",
        "title: First\ndescription: One\ncategory: rails\ndate: 2021-08-15\n",
        "First body\n",
    );
    write_post(
        &content,
        "blog/second.md",
        "title: Second\ndescription: Two\ncategory: ruby\ndate: 2022-02-01\n",
        "Second body\n",
    );
    let output = tmp.path().join("out/search-inserts.sql");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "stale line\nanother stale line\n").unwrap();

    let report = run_index(&IndexOptions {
        content_dir: content.clone(),
        output: output.clone(),
    })
    .unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(report.statements, 2);

    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("stale"));
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("VALUES('First', 'One', 'rails', '2021-08-15', '/blog/first/'"));
    assert!(lines[1].contains("VALUES('Second', 'Two', 'ruby', '2022-02-01', '/blog/second/'"));
    assert!(written.ends_with('\n'));
}

#[test]
fn run_index_over_empty_tree_leaves_empty_artifact() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    fs::create_dir_all(&content).unwrap();
    let output = tmp.path().join("search-inserts.sql");
    fs::write(&output, "stale\n").unwrap();

    let report = run_index(&IndexOptions {
        content_dir: content,
        output: output.clone(),
    })
    .unwrap();

    assert_eq!(report.statements, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn run_index_fails_on_post_without_category() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write_post(
        &content,
        "draft.md",
        "title: Draft\ndescription: Missing category\ndate: 2021-08-15\n",
        "Body\n",
    );

    let err = run_index(&IndexOptions {
        content_dir: content,
        output: tmp.path().join("search-inserts.sql"),
    })
    .unwrap_err();

    let invalid = err
        .chain()
        .find_map(|e| e.downcast_ref::<IndexError>())
        .expect("index error in chain");
    assert!(matches!(
        invalid,
        IndexError::InvalidRecord { field: "category" }
    ));
    assert!(format!("{err:#}").contains("draft.md"));
}

#[test]
fn failed_run_keeps_previous_artifact() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write_post(
        &content,
        "a.md",
        "title: A\ndescription: d\ncategory: c\ndate: 2021-01-01\n",
        "body\n",
    );
    write_post(
        &content,
        "b.md",
        "description: d\ncategory: c\ndate: 2021-01-02\n",
        "body\n",
    );
    let output = tmp.path().join("search-inserts.sql");
    fs::write(&output, "PREVIOUS GOOD BUILD\n").unwrap();

    let err = run_index(&IndexOptions {
        content_dir: content,
        output: output.clone(),
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("b.md"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "PREVIOUS GOOD BUILD\n");
    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn run_index_fails_when_content_dir_missing() {
    let tmp = TempDir::new().unwrap();
    let err = run_index(&IndexOptions {
        content_dir: tmp.path().join("nope"),
        output: tmp.path().join("search-inserts.sql"),
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("does not exist"));
}
