//! List command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, NoteTree, Output, OutputFormat};
use crate::domain::Note;
use crate::store::{NoteRepository, Page, PageRequest};

/// Widest topic shown before truncation.
const TOPIC_WIDTH: usize = 60;

pub fn handle_list(args: &ListArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;

    let per_page = args.per_page.unwrap_or_else(|| config.page_size());
    let request = PageRequest::new(args.page, per_page);
    let roots = store
        .top_level(request)
        .with_context(|| "failed to list top-level notes")?;

    let mut trees = Vec::with_capacity(roots.items.len());
    for root in &roots.items {
        trees.push(build_tree(&store, root)?);
    }
    let page = Page::new(trees, request, roots.total);

    match args.format {
        OutputFormat::Human => {
            if page.items.is_empty() {
                println!("No notes found.");
            } else {
                for line in render_tree(&page.items) {
                    println!("{}", line);
                }
                println!();
                println!(
                    "Page {} of {} ({} top-level note(s))",
                    page.page,
                    page.page_count(),
                    page.total
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(page))?);
        }
    }

    Ok(())
}

/// Loads `note` and everything below it.
fn build_tree<R: NoteRepository>(store: &R, note: &Note) -> Result<NoteTree> {
    let children = store
        .children(note.id())
        .with_context(|| format!("failed to list children of {}", note.index()))?;

    let mut subtrees = Vec::with_capacity(children.len());
    for child in &children {
        subtrees.push(build_tree(store, child)?);
    }

    Ok(NoteTree {
        note: NoteListing::from(note),
        children: subtrees,
    })
}

/// One line per note, indented two spaces per level.
pub(crate) fn render_tree(trees: &[NoteTree]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack: Vec<(usize, &NoteTree)> = trees.iter().rev().map(|t| (0, t)).collect();

    while let Some((depth, tree)) = stack.pop() {
        lines.push(format!(
            "{}{}  {}",
            "  ".repeat(depth),
            tree.note.index,
            truncate_str(&tree.note.topic, TOPIC_WIDTH)
        ));
        stack.extend(tree.children.iter().rev().map(|c| (depth + 1, c)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(index: &str, topic: &str) -> NoteTree {
        NoteTree {
            note: NoteListing {
                id: String::new(),
                index: index.to_string(),
                topic: topic.to_string(),
            },
            children: Vec::new(),
        }
    }

    #[test]
    fn renders_depth_first_with_indentation() {
        let mut one = leaf("1", "One");
        let mut one_one = leaf("1.1", "One A");
        one_one.children.push(leaf("1.1.1", "One A i"));
        one.children.push(one_one);
        one.children.push(leaf("1.2", "One B"));
        let trees = vec![one, leaf("2", "Two")];

        assert_eq!(
            render_tree(&trees),
            vec![
                "1  One".to_string(),
                "  1.1  One A".to_string(),
                "    1.1.1  One A i".to_string(),
                "  1.2  One B".to_string(),
                "2  Two".to_string(),
            ]
        );
    }

    #[test]
    fn long_topics_are_truncated() {
        let long = "x".repeat(100);
        let lines = render_tree(&[leaf("1", &long)]);
        assert_eq!(lines[0].chars().count(), "1  ".len() + TOPIC_WIDTH);
    }
}
