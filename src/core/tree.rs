//! Directory tree rendering for collected paths

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, Node>,
}

impl Node {
    fn insert(&mut self, path: &str) {
        let mut current = self;
        for part in path.split('/').filter(|p| !p.is_empty() && *p != ".") {
            current = current.children.entry(part.to_string()).or_default();
        }
    }

    fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Render `/`-separated relative paths as a sorted box-drawing tree.
///
/// Top-level entries have no connector; directories end in `/`.
pub fn render_tree<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = Node::default();
    for path in paths {
        root.insert(path.as_ref());
    }

    let mut lines = Vec::new();
    for (name, node) in &root.children {
        lines.push(display_name(name, node));
        render_children(node, "    ", &mut lines);
    }
    lines.join("\n")
}

fn display_name(name: &str, node: &Node) -> String {
    if node.is_dir() {
        format!("{}/", name)
    } else {
        name.to_string()
    }
}

fn render_children(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    let count = node.children.len();
    for (idx, (name, child)) in node.children.iter().enumerate() {
        let last = idx + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, display_name(name, child)));

        if child.is_dir() {
            let extension = if last { "    " } else { "│   " };
            render_children(child, &format!("{}{}", prefix, extension), lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tree() {
        let tree = render_tree(["src/main.rs", "src/core/mod.rs", "src/core/error.rs", "Cargo.toml"]);
        let expected = "\
Cargo.toml
src/
    ├── core/
    │   ├── error.rs
    │   └── mod.rs
    └── main.rs";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_duplicate_paths_collapse() {
        assert_eq!(render_tree(["a.py", "./a.py"]), "a.py");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_tree(Vec::<String>::new()), "");
    }
}
