//! End-to-end CLI test suite.
//!
//! Tests organized by command group. Each test verifies CLI behavior through
//! the public interface.

mod common;

use common::harness::{FolioCommand, TestEnv, TestNote};
use predicates::prelude::*;

// ===========================================
// new command tests
// ===========================================
mod new_tests {
    use super::*;

    #[test]
    fn test_new_root_notes_are_numbered() {
        let env = TestEnv::new();

        env.cmd()
            .new_note("Ethics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: 1  Ethics"));

        env.cmd()
            .new_note("Politics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: 2  Politics"));
    }

    #[test]
    fn test_new_child_by_parent_index() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("One"));
        env.add_note(&TestNote::new("Two"));

        env.cmd()
            .new_note("Two A")
            .args(["--parent", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: 2.1  Two A"));

        env.cmd()
            .new_note("Two B")
            .args(["--parent", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: 2.2  Two B"));

        env.cmd()
            .new_note("Two A i")
            .args(["--parent", "2.1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: 2.1.1  Two A i"));
    }

    #[test]
    fn test_new_with_keywords_and_edition() {
        let env = TestEnv::new();
        let edition = env.add_edition("Oxford World's Classics");

        env.cmd()
            .new_note("Book I")
            .args(["-k", "happiness", "-k", "function"])
            .args(["-e", &format!("{}:1097b", edition.id)])
            .assert()
            .success();

        env.cmd()
            .show("1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Keywords: function, happiness"))
            .stdout(predicate::str::contains("Oxford World's Classics (1097b)"));
    }

    #[test]
    fn test_new_inherit_copies_parent_keywords() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Parent").keyword("virtue"));

        env.cmd()
            .new_note("Child")
            .args(["--parent", "1", "--inherit"])
            .assert()
            .success();

        env.cmd()
            .show("1.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Keywords: virtue"));
    }

    #[test]
    fn test_new_json_output() {
        let env = TestEnv::new();

        let output: serde_json::Value = env
            .cmd()
            .new_note("JSON Note")
            .args(["--text", "body"])
            .format_json()
            .output_json();

        assert_eq!(output["data"]["index"], "1");
        assert_eq!(output["data"]["topic"], "JSON Note");
        assert_eq!(output["data"]["text"], "body");
        assert_eq!(output["data"]["id"].as_str().unwrap().len(), 26);
    }

    #[test]
    fn test_new_rejects_blank_topic() {
        let env = TestEnv::new();

        env.cmd()
            .new_note("   ")
            .assert()
            .failure()
            .stderr(predicate::str::contains("topic is required"));
    }

    #[test]
    fn test_new_rejects_overlong_topic() {
        let env = TestEnv::new();
        let topic = "x".repeat(256);

        env.cmd()
            .new_note(&topic)
            .assert()
            .failure()
            .stderr(predicate::str::contains("255"));
    }

    #[test]
    fn test_new_unknown_parent_fails() {
        let env = TestEnv::new();

        env.cmd()
            .new_note("Orphan")
            .args(["--parent", "9"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("note not found: '9'"));
    }

    #[test]
    fn test_new_unknown_edition_fails() {
        let env = TestEnv::new();

        env.cmd()
            .new_note("Cited")
            .args(["-e", "42"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("book edition not found: 42"));

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("No notes found."));
    }
}

// ===========================================
// show command tests
// ===========================================
mod show_tests {
    use super::*;

    #[test]
    fn test_show_by_index() {
        let env = TestEnv::new();
        let parent = env.add_note(&TestNote::new("Parent").text("Parent body."));
        env.add_note(&TestNote::new("Child").under(&parent));

        env.cmd()
            .show("1")
            .assert()
            .success()
            .stdout(predicate::str::contains("# 1  Parent"))
            .stdout(predicate::str::contains("Children:"))
            .stdout(predicate::str::contains("1.1  Child"))
            .stdout(predicate::str::contains("Parent body."));
    }

    #[test]
    fn test_show_by_id_prefix() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("By Prefix"));

        env.cmd()
            .show(&note.id().prefix())
            .assert()
            .success()
            .stdout(predicate::str::contains("By Prefix"));
    }

    #[test]
    fn test_show_child_names_parent() {
        let env = TestEnv::new();
        let parent = env.add_note(&TestNote::new("Parent"));
        env.add_note(&TestNote::new("Child").under(&parent));

        env.cmd()
            .show("1.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Parent: 1  Parent"));
    }

    #[test]
    fn test_show_json_lists_children() {
        let env = TestEnv::new();
        let parent = env.add_note(&TestNote::new("Parent"));
        env.add_note(&TestNote::new("Child").under(&parent));

        let output: serde_json::Value = env.cmd().show("1").format_json().output_json();

        assert_eq!(output["data"]["topic"], "Parent");
        assert_eq!(output["data"]["children"][0]["index"], "1.1");
    }

    #[test]
    fn test_show_missing_note_fails() {
        let env = TestEnv::new();

        env.cmd()
            .show("3.1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("note not found"));
    }
}

// ===========================================
// edit command tests
// ===========================================
mod edit_tests {
    use super::*;

    #[test]
    fn test_edit_topic_keeps_index() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("One"));
        env.add_note(&TestNote::new("Two"));

        env.cmd()
            .edit("2")
            .args(["--topic", "Two, revised"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated: 2  Two, revised"));

        env.cmd()
            .show("2")
            .assert()
            .success()
            .stdout(predicate::str::contains("# 2  Two, revised"));
    }

    #[test]
    fn test_edit_self_parent_is_circular() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Alone"));

        env.cmd()
            .edit("1")
            .args(["--parent", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("circular"));

        env.cmd()
            .show("1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Parent:").not());
    }

    #[test]
    fn test_edit_descendant_parent_is_circular() {
        let env = TestEnv::new();
        let parent = env.add_note(&TestNote::new("Parent"));
        let child = env.add_note(&TestNote::new("Child").under(&parent));
        env.add_note(&TestNote::new("Grandchild").under(&child));

        env.cmd()
            .edit("1")
            .args(["--parent", "1.1.1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("circular"))
            .stderr(predicate::str::contains("descendant"));
    }

    #[test]
    fn test_edit_reparent_and_detach() {
        let env = TestEnv::new();
        let a = env.add_note(&TestNote::new("A"));
        env.add_note(&TestNote::new("B"));
        env.add_note(&TestNote::new("A1").under(&a));

        env.cmd()
            .edit("1.1")
            .args(["--parent", "2"])
            .assert()
            .success();
        env.cmd()
            .show("1.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Parent: 2  B"));

        env.cmd().edit("1.1").args(["--no-parent"]).assert().success();
        env.cmd()
            .show("1.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Parent:").not());
    }

    #[test]
    fn test_edit_related_is_symmetric() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Plato"));
        env.add_note(&TestNote::new("Aristotle"));

        env.cmd().edit("2").args(["--related", "1"]).assert().success();

        env.cmd()
            .show("1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Related:"))
            .stdout(predicate::str::contains("2  Aristotle"));
    }
}

// ===========================================
// rm command tests
// ===========================================
mod rm_tests {
    use super::*;

    #[test]
    fn test_rm_childless_note() {
        let env = TestEnv::new();
        let edition = env.add_edition("Loeb");
        env.add_note(&TestNote::new("Doomed").edition(edition.id, "p. 1"));

        env.cmd()
            .rm("1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted: 1  Doomed"));

        env.cmd()
            .show("1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("note not found"));
    }

    #[test]
    fn test_rm_with_children_is_refused() {
        let env = TestEnv::new();
        let parent = env.add_note(&TestNote::new("Parent"));
        env.add_note(&TestNote::new("Child").under(&parent));

        env.cmd()
            .rm("1")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "cannot delete a note with child notes",
            ));

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("1  Parent"))
            .stdout(predicate::str::contains("1.1  Child"));
    }
}

// ===========================================
// ls command tests
// ===========================================
mod ls_tests {
    use super::*;

    #[test]
    fn test_ls_empty() {
        let env = TestEnv::new();

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("No notes found."));
    }

    #[test]
    fn test_ls_indents_subtrees() {
        let env = TestEnv::new();
        let one = env.add_note(&TestNote::new("One"));
        let one_a = env.add_note(&TestNote::new("One A").under(&one));
        env.add_note(&TestNote::new("One A i").under(&one_a));
        env.add_note(&TestNote::new("Two"));

        let output = env.cmd().ls().output_success();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "1  One");
        assert_eq!(lines[1], "  1.1  One A");
        assert_eq!(lines[2], "    1.1.1  One A i");
        assert_eq!(lines[3], "2  Two");
        assert!(output.contains("Page 1 of 1 (2 top-level note(s))"));
    }

    #[test]
    fn test_ls_paginates() {
        let env = TestEnv::new();
        for n in 1..=3 {
            env.add_note(&TestNote::new(format!("Root {}", n)));
        }

        env.cmd()
            .ls()
            .args(["--per-page", "2", "--page", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("3  Root 3"))
            .stdout(predicate::str::contains("Root 1").not())
            .stdout(predicate::str::contains("Page 2 of 2"));
    }

    #[test]
    fn test_ls_huge_page_number_is_empty() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Only"));

        let output: serde_json::Value = env
            .cmd()
            .ls()
            .args(["--page", "9223372036854775807"])
            .format_json()
            .output_json();

        assert_eq!(output["data"]["items"], serde_json::json!([]));
        assert_eq!(output["data"]["total"], 1);
    }

    #[test]
    fn test_ls_json_format() {
        let env = TestEnv::new();
        let one = env.add_note(&TestNote::new("One"));
        env.add_note(&TestNote::new("One A").under(&one));

        let output: serde_json::Value = env.cmd().ls().format_json().output_json();

        assert_eq!(output["data"]["total"], 1);
        assert_eq!(output["data"]["page"], 1);
        assert_eq!(output["data"]["items"][0]["index"], "1");
        assert_eq!(output["data"]["items"][0]["children"][0]["topic"], "One A");
    }
}

// ===========================================
// find command tests
// ===========================================
mod find_tests {
    use super::*;

    #[test]
    fn test_find_by_topic_case_insensitive() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Über Gewissheit"));
        env.add_note(&TestNote::new("On Certainty"));

        env.cmd()
            .find()
            .args(["--topic", "ÜBER"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Über Gewissheit"))
            .stdout(predicate::str::contains("On Certainty").not());
    }

    #[test]
    fn test_find_by_index_subtree() {
        let env = TestEnv::new();
        let one = env.add_note(&TestNote::new("One"));
        env.add_note(&TestNote::new("One A").under(&one));
        env.add_note(&TestNote::new("Two"));

        let output: serde_json::Value = env
            .cmd()
            .find()
            .args(["--index", "1"])
            .format_json()
            .output_json();

        let indices: Vec<&str> = output["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["index"].as_str().unwrap())
            .collect();
        assert_eq!(indices, vec!["1", "1.1"]);
    }

    #[test]
    fn test_find_by_keyword_and_edition() {
        let env = TestEnv::new();
        let edition = env.add_edition("Hackett");
        env.add_note(
            &TestNote::new("Both")
                .keyword("Stoa")
                .edition(edition.id, ""),
        );
        env.add_note(&TestNote::new("Keyword only").keyword("Stoa"));

        env.cmd()
            .find()
            .args(["--keyword", "stoa", "--edition", &edition.id.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Both"))
            .stdout(predicate::str::contains("Keyword only").not())
            .stdout(predicate::str::contains("1 note(s)"));
    }

    #[test]
    fn test_find_without_criteria_fails() {
        let env = TestEnv::new();

        env.cmd()
            .find()
            .assert()
            .failure()
            .stderr(predicate::str::contains("at least one of"));
    }
}

// ===========================================
// complete command tests
// ===========================================
mod complete_tests {
    use super::*;

    #[test]
    fn test_complete_notes_newest_first() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Stoics"));
        env.add_note(&TestNote::new("Sceptics"));
        env.add_note(&TestNote::new("stoa"));

        let output = env
            .cmd()
            .args(["complete", "notes", "sto"])
            .output_success();

        assert_eq!(output, "3\tstoa\n1\tStoics\n");
    }

    #[test]
    fn test_complete_keywords_alphabetical() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Note").keyword("logic").keyword("language"));

        env.cmd()
            .args(["complete", "keywords", "L", "--limit", "1"])
            .assert()
            .success()
            .stdout("language\n");
    }
}

// ===========================================
// edition command tests
// ===========================================
mod edition_tests {
    use super::*;

    #[test]
    fn test_edition_add_and_list() {
        let env = TestEnv::new();

        env.cmd()
            .args(["edition", "add", "Penguin Classics"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added edition: [1] Penguin Classics"));

        env.cmd()
            .args(["edition", "ls"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[1] Penguin Classics"));
    }

    #[test]
    fn test_edition_show_lists_citing_notes() {
        let env = TestEnv::new();
        let edition = env.add_edition("Cambridge Texts");
        env.add_note(&TestNote::new("Cited").edition(edition.id, "§ 12"));

        env.cmd()
            .args(["edition", "show", &edition.id.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cambridge Texts"))
            .stdout(predicate::str::contains("1  Cited (§ 12)"));
    }

    #[test]
    fn test_edition_show_missing() {
        let env = TestEnv::new();

        env.cmd()
            .args(["edition", "show", "7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("edition not found: 7"));
    }
}

// ===========================================
// configuration tests
// ===========================================
mod config_tests {
    use super::*;

    #[test]
    fn test_folio_db_env_selects_database() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("From env"));

        FolioCommand::new()
            .config_home(&env.config_home())
            .env("FOLIO_DB", env.db_path().to_string_lossy())
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("From env"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_config_page_size() {
        let env = TestEnv::new();
        env.write_config("page_size = 1\n");
        env.add_note(&TestNote::new("First"));
        env.add_note(&TestNote::new("Second"));

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("Page 1 of 2"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_config_db_path() {
        let env = TestEnv::new();
        env.write_config(&format!(
            "db = \"{}\"\n",
            env.db_path().to_string_lossy()
        ));
        env.add_note(&TestNote::new("From config"));

        FolioCommand::new()
            .config_home(&env.config_home())
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("From config"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_invalid_config_is_reported() {
        let env = TestEnv::new();
        env.write_config("page_size = \"many\"\n");

        env.cmd()
            .ls()
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }
}

// ===========================================
// completions command tests
// ===========================================
mod completions_tests {
    use super::*;

    #[test]
    fn test_completions_bash() {
        FolioCommand::new()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("folio"));
    }
}
