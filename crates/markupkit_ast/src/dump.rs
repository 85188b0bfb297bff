//! Debug dumps of tree shape.

use std::fmt::Write;
use std::ops::Range;

use crate::SyntaxTreeNode;
use crate::visitor::{VisitResult, Visitor, walk_node};

impl SyntaxTreeNode {
    /// S-expression of the tree shape, e.g. `(paragraph text (emphasis text))`.
    ///
    /// Terminals print as their type name; lengths are omitted.
    pub fn compact_structure(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    fn write_compact(&self, out: &mut String) {
        if self.is_terminal() {
            out.push_str(self.node_type().name());
            return;
        }
        out.push('(');
        out.push_str(self.node_type().name());
        for child in self.children() {
            out.push(' ');
            child.write_compact(out);
        }
        out.push(')');
    }

    /// One line per node with its absolute range, indented by depth.
    pub fn debug_description(&self, start: usize) -> String {
        self.describe(start, None::<fn(Range<usize>) -> String>)
    }

    /// Like [`debug_description`](Self::debug_description), with the text of
    /// each terminal (as returned by `text`) appended to its line.
    pub fn debug_description_with<F>(&self, start: usize, text: F) -> String
    where
        F: FnMut(Range<usize>) -> String,
    {
        self.describe(start, Some(text))
    }

    fn describe<F>(&self, start: usize, text: Option<F>) -> String
    where
        F: FnMut(Range<usize>) -> String,
    {
        let mut writer = DescriptionWriter {
            out: String::new(),
            depth: 0,
            text,
        };
        let _ = walk_node(&mut writer, self, start);
        writer.out
    }
}

struct DescriptionWriter<F> {
    out: String,
    depth: usize,
    text: Option<F>,
}

impl<'a, F> Visitor<'a> for DescriptionWriter<F>
where
    F: FnMut(Range<usize>) -> String,
{
    fn enter(&mut self, node: &'a SyntaxTreeNode, start: usize) -> VisitResult {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        let end = start + node.length();
        let _ = write!(
            self.out,
            "{:indent$}{}: [{}, {})",
            "",
            node.node_type(),
            start,
            end,
            indent = self.depth * 2
        );
        if node.is_terminal()
            && let Some(text) = self.text.as_mut()
        {
            let _ = write!(self.out, " {:?}", text(start..end));
        }
        self.depth += 1;
        VisitResult::Continue(())
    }

    fn leave(&mut self, _node: &'a SyntaxTreeNode, _start: usize) -> VisitResult {
        self.depth -= 1;
        VisitResult::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeBuilder, NodeRef, NodeType};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    const TEXT: NodeType = NodeType::new("text");

    /// "Hi *there*" as (paragraph text (emphasis delimiter text delimiter))
    fn sample() -> NodeRef {
        let mut emphasis = NodeBuilder::new(NodeType::new("emphasis"));
        emphasis.append_terminal(NodeType::new("delimiter"), 1);
        emphasis.append_terminal(TEXT, 5);
        emphasis.append_terminal(NodeType::new("delimiter"), 1);

        let mut paragraph = NodeBuilder::new(NodeType::new("paragraph"));
        paragraph.append_terminal(TEXT, 3);
        paragraph.append_child(emphasis.finish());
        paragraph.finish()
    }

    #[test]
    fn test_compact_structure() {
        assert_eq!(
            sample().compact_structure(),
            "(paragraph text (emphasis delimiter text delimiter))"
        );
    }

    #[test]
    fn test_compact_structure_terminal() {
        let mut builder = NodeBuilder::new(TEXT);
        builder.append_terminal(TEXT, 1);
        assert_eq!(builder.finish().children()[0].compact_structure(), "text");
    }

    #[test]
    fn test_debug_description() {
        assert_snapshot!(sample().debug_description(0), @r"
        paragraph: [0, 10)
          text: [0, 3)
          emphasis: [3, 10)
            delimiter: [3, 4)
            text: [4, 9)
            delimiter: [9, 10)
        ");
    }

    #[test]
    fn test_debug_description_with_text() {
        let source = "Hi *there*";
        let description =
            sample().debug_description_with(0, |range| source[range].to_string());
        assert_snapshot!(description, @r#"
        paragraph: [0, 10)
          text: [0, 3) "Hi "
          emphasis: [3, 10)
            delimiter: [3, 4) "*"
            text: [4, 9) "there"
            delimiter: [9, 10) "*"
        "#);
    }
}
