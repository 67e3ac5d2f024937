use core::fmt;

use crate::raw::{Handle, RawTree};

/// Graphviz rendering of an [`OrderStatisticTree`](crate::OrderStatisticTree), created by
/// [`OrderStatisticTree::dot`](crate::OrderStatisticTree::dot).
///
/// Red nodes are filled red; every node is labelled `key (size)`.
pub struct Dot<'a, K, V> {
    pub(crate) raw: &'a RawTree<K, V>,
}

impl<K: fmt::Debug, V> Dot<'_, K, V> {
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, node: Handle) -> fmt::Result {
        let id = node.to_index();
        let fill = if self.raw.color(node).is_red() { "red" } else { "black" };
        writeln!(
            f,
            r#"    {id} [label="{key:?} ({size})", style=filled, fillcolor={fill}, fontcolor=white];"#,
            key = self.raw.key(node),
            size = self.raw.subtree_len(node),
        )?;

        for (side, child) in [("L", self.raw.left(node)), ("R", self.raw.right(node))] {
            if child.is_nil() {
                continue;
            }
            writeln!(f, r#"    {id} -> {} [label="{side}"];"#, child.to_index())?;
            self.node_fmt(f, child)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V> fmt::Display for Dot<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {\n")?;
        let root = self.raw.root();
        if !root.is_nil() {
            self.node_fmt(f, root)?;
        }
        f.write_str("}\n")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::string::ToString;

    use crate::OrderStatisticTree;

    #[test]
    fn renders_every_node_and_edge() {
        let tree: OrderStatisticTree<_, _> = [2, 1, 3].into_iter().map(|k| (k, ())).collect();
        let dot = tree.dot().to_string();
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains(r#"label="2 (3)", style=filled, fillcolor=black"#));
        assert!(dot.contains(r#"label="1 (1)", style=filled, fillcolor=red"#));
        assert_eq!(dot.matches(" -> ").count(), 2);
    }

    #[test]
    fn empty_tree() {
        let tree: OrderStatisticTree<i32, ()> = OrderStatisticTree::new();
        assert_eq!(tree.dot().to_string(), "digraph {\n}\n");
    }
}
