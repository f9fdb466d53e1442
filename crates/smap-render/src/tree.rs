//! Tree rendering of listed entries into `<li>` markup.
//!
//! Entries are kept in a flat slice with index-based parent/children links,
//! built once per render. Hierarchical output walks the links depth-first;
//! a visited set guards against parent cycles in the store data.

use std::collections::HashMap;
use std::fmt::Write;

use crate::html::{class_token, write_link};
use crate::lister::Entry;

/// Options controlling how one section's entries are rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeOptions<'a> {
    /// Source name used in the `sitemap-item-<source>` class.
    pub source_name: &'a str,
    /// Nest entries under their parents.
    pub hierarchical: bool,
    /// Deepest level to render, `None` for unlimited. Ignored in flat mode.
    pub depth_limit: Option<usize>,
    /// Add `rel="nofollow"` to every anchor.
    pub nofollow: bool,
    /// Entry to mark with `current-item`.
    pub current: Option<u64>,
}

/// Rendered `<li>` sequence for one section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedTree {
    /// Concatenated `<li>` elements, without the enclosing list.
    pub html: String,
    /// Number of `<li>` elements emitted across all levels.
    pub entry_count: usize,
}

impl RenderedTree {
    /// True if nothing was rendered.
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Render entries as list items.
pub fn render_tree(entries: &[Entry], options: &TreeOptions<'_>) -> RenderedTree {
    let mut renderer = TreeRenderer::new(entries, options);
    if options.hierarchical {
        renderer.render_hierarchy();
    } else {
        for idx in 0..entries.len() {
            renderer.render_entry(idx, false);
        }
    }
    RenderedTree {
        html: renderer.out,
        entry_count: renderer.count,
    }
}

struct TreeRenderer<'a> {
    entries: &'a [Entry],
    options: &'a TreeOptions<'a>,
    item_class: String,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    orphans: Vec<usize>,
    visited: Vec<bool>,
    out: String,
    count: usize,
}

impl<'a> TreeRenderer<'a> {
    fn new(entries: &'a [Entry], options: &'a TreeOptions<'a>) -> Self {
        let item_class = format!(
            "sitemap-item sitemap-item-{}",
            class_token(options.source_name)
        );
        let mut renderer = Self {
            entries,
            options,
            item_class,
            children: vec![Vec::new(); entries.len()],
            roots: Vec::new(),
            orphans: Vec::new(),
            visited: vec![false; entries.len()],
            out: String::new(),
            count: 0,
        };
        if options.hierarchical {
            renderer.link();
        }
        renderer
    }

    /// Resolve parent links into index lists.
    fn link(&mut self) {
        let mut index: HashMap<u64, usize> = HashMap::with_capacity(self.entries.len());
        for (idx, entry) in self.entries.iter().enumerate() {
            index.entry(entry.id).or_insert(idx);
        }

        // A listing of children only starts at the first entry's parent.
        let root_parent = if self.entries.iter().any(|e| e.parent.is_none()) {
            None
        } else {
            self.entries.first().and_then(|e| e.parent)
        };

        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.parent == root_parent {
                self.roots.push(idx);
                continue;
            }
            match entry.parent.and_then(|p| index.get(&p)) {
                Some(&parent_idx) if parent_idx != idx => self.children[parent_idx].push(idx),
                _ => self.orphans.push(idx),
            }
        }
    }

    fn render_hierarchy(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        for idx in roots {
            self.render_entry(idx, true);
        }
        // Orphans are only promoted when every level is rendered anyway.
        if self.options.depth_limit.is_none() {
            let orphans = std::mem::take(&mut self.orphans);
            for idx in orphans {
                self.render_entry(idx, true);
            }
        }
    }

    /// Render one entry and, when `nested`, its subtree.
    ///
    /// Walks with an explicit stack so parent chains of any depth render.
    fn render_entry(&mut self, root: usize, nested: bool) {
        let mut stack = vec![Step::Open { idx: root, level: 1 }];
        while let Some(step) = stack.pop() {
            let (idx, level) = match step {
                Step::Open { idx, level } => (idx, level),
                Step::Close => {
                    self.out.push_str("</ul></li>");
                    continue;
                }
            };
            if self.visited[idx] {
                continue;
            }
            self.visited[idx] = true;
            self.count += 1;

            let entries = self.entries;
            let entry = &entries[idx];
            let descend = nested && self.options.depth_limit.is_none_or(|limit| level < limit);
            let kids: Vec<usize> = if descend {
                self.children[idx]
                    .iter()
                    .copied()
                    .filter(|&c| !self.visited[c])
                    .collect()
            } else {
                Vec::new()
            };

            write!(self.out, r#"<li class="{} {}"#, self.item_class, entry.record_class).unwrap();
            if !kids.is_empty() {
                self.out.push_str(" has-children");
            }
            if self.options.current == Some(entry.id) {
                self.out.push_str(" current-item");
            }
            self.out.push_str("\">");
            write_link(&mut self.out, &entry.url, &entry.label, self.options.nofollow);

            if kids.is_empty() {
                self.out.push_str("</li>");
            } else {
                self.out.push_str(r#"<ul class="children">"#);
                stack.push(Step::Close);
                stack.extend(kids.into_iter().rev().map(|idx| Step::Open {
                    idx,
                    level: level + 1,
                }));
            }
        }
    }
}

/// Pending work while walking the tree.
enum Step {
    /// Emit an entry opening at the given level.
    Open { idx: usize, level: usize },
    /// Close a nested list and its owning item.
    Close,
}
