//! Event-stream renderer: canonical Markdown out of a parsed AST
//!
//! Consumes the depth-first walk exactly once, left to right, holding an
//! append-only output buffer, a prefix stack, and a "first block in the
//! current container" flag. No backtracking into the tree; the only
//! upward lookup is the tight-list query on an item's parent.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeCodeBlock, NodeValue};

use crate::escape::escape_text;
use crate::parser::{WalkEvent, walk};
use crate::prefix::PrefixStack;

/// Render the tree rooted at `root` as canonical Markdown.
pub fn render<'a>(root: &'a AstNode<'a>) -> String {
    let mut writer = Writer::new();
    for event in walk(root) {
        writer.handle(&event);
    }
    writer.output
}

/// Renderer state for one pass over the event stream.
struct Writer {
    /// Append-only; fragments are never revised once pushed.
    output: String,
    prefix: PrefixStack,
    /// True until the first block inside the current container is seen.
    first_block: bool,
}

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
            prefix: PrefixStack::new(),
            first_block: true,
        }
    }

    fn handle(&mut self, event: &WalkEvent<'_>) {
        let data = event.node.data.borrow();
        if event.entering && is_block(&data.value) {
            self.separate_block(event.node, &data.value);
        }

        match &data.value {
            NodeValue::Document => {}
            NodeValue::Paragraph => {
                if !event.entering {
                    self.output.push('\n');
                }
            }
            NodeValue::Text(literal) => {
                if event.entering {
                    self.output.push_str(&escape_text(literal));
                }
            }
            NodeValue::SoftBreak => {
                // The central unwrap behavior: a wrapped source line
                // collapses into a single space.
                if event.entering {
                    self.output.push(' ');
                }
            }
            NodeValue::LineBreak => {
                if event.entering {
                    self.output.push_str("\\\n");
                    self.output.push_str(&self.prefix.current());
                }
            }
            NodeValue::ThematicBreak => {
                if event.entering {
                    self.output.push_str("---\n");
                }
            }
            NodeValue::Emph => self.output.push('*'),
            NodeValue::Strong => self.output.push_str("**"),
            NodeValue::Code(code) => {
                if event.entering {
                    self.output.push('`');
                    self.output.push_str(&code.literal);
                    self.output.push('`');
                }
            }
            NodeValue::Link(link) => {
                if event.entering {
                    self.output.push('[');
                } else {
                    self.output.push_str("](");
                    self.output.push_str(&link.url);
                    self.output.push(')');
                }
            }
            NodeValue::Image(link) => {
                if event.entering {
                    self.output.push_str("![");
                } else {
                    self.output.push_str("](");
                    self.output.push_str(&link.url);
                    self.output.push(')');
                }
            }
            NodeValue::Heading(heading) => {
                if event.entering {
                    for _ in 0..heading.level {
                        self.output.push('#');
                    }
                    self.output.push(' ');
                } else {
                    self.output.push('\n');
                }
            }
            NodeValue::CodeBlock(block) => {
                if event.entering {
                    self.write_code_block(block);
                }
            }
            NodeValue::List(_) => {
                // Carries no text of its own; brackets the first-block
                // flag around its items.
                self.first_block = event.entering;
            }
            NodeValue::Item(item) => {
                if event.entering {
                    match item.list_type {
                        ListType::Bullet => {
                            self.output.push_str("- ");
                            self.prefix.push("  ");
                        }
                        ListType::Ordered => {
                            let numbering = item.start.to_string();
                            let delimiter = match item.delimiter {
                                ListDelimType::Period => '.',
                                ListDelimType::Paren => ')',
                            };
                            self.output.push_str(&numbering);
                            self.output.push(delimiter);
                            self.output.push(' ');
                            // Continuation lines align under the text,
                            // past "N. ".
                            self.prefix.push(" ".repeat(numbering.len() + 2));
                        }
                    }
                    self.first_block = true;
                } else {
                    self.first_block = false;
                    self.prefix.pop();
                }
            }
            NodeValue::BlockQuote => {
                if event.entering {
                    self.output.push_str("> ");
                    self.prefix.push("> ");
                    self.first_block = true;
                } else {
                    self.prefix.pop();
                    self.first_block = false;
                }
            }
            other => {
                // Unsupported kinds degrade to an inert placeholder
                // instead of aborting the render.
                if event.entering {
                    self.output.push_str(&placeholder(other));
                }
            }
        }
    }

    /// Block boundary policy: decide whether a separator line goes in
    /// front of a block that is about to open.
    fn separate_block(&mut self, node: &AstNode<'_>, value: &NodeValue) {
        if self.first_block {
            self.first_block = false;
            return;
        }
        // Tight list items run together with no blank line between them.
        if matches!(value, NodeValue::Item(_)) && !in_loose_list(node) {
            return;
        }
        self.output.push_str(&self.prefix.for_blank_line());
        self.output.push('\n');
        self.output.push_str(&self.prefix.current());
    }

    /// Re-emit a code block's literal line by line under the current
    /// prefix. Fenced blocks keep their fence and info string; indented
    /// blocks keep their four-space form. One trailing newline of the
    /// literal is dropped so the final line does not double.
    fn write_code_block(&mut self, block: &NodeCodeBlock) {
        if block.fenced {
            self.output.push_str("```");
            self.output.push_str(&block.info);
            self.output.push('\n');
        }
        let contents = block.literal.strip_suffix('\n').unwrap_or(&block.literal);
        let mut first = true;
        for line in contents.split('\n') {
            if line.is_empty() {
                if !first || block.fenced {
                    self.output.push_str(&self.prefix.for_blank_line());
                } else {
                    first = false;
                }
                self.output.push('\n');
                continue;
            }
            if !first || block.fenced {
                self.output.push_str(&self.prefix.current());
            } else {
                first = false;
            }
            if !block.fenced {
                self.output.push_str("    ");
            }
            self.output.push_str(line);
            self.output.push('\n');
        }
        if block.fenced {
            self.output.push_str(&self.prefix.current());
            self.output.push_str("```\n");
        }
    }
}

/// Block kinds that participate in blank-line separation. `document` is
/// deliberately excluded.
fn is_block(value: &NodeValue) -> bool {
    matches!(
        value,
        NodeValue::BlockQuote
            | NodeValue::CodeBlock(_)
            | NodeValue::Heading(_)
            | NodeValue::HtmlBlock(_)
            | NodeValue::Item(_)
            | NodeValue::List(_)
            | NodeValue::Paragraph
            | NodeValue::ThematicBreak
    )
}

/// Whether `item`'s parent is a list explicitly marked loose.
fn in_loose_list(item: &AstNode<'_>) -> bool {
    item.parent().is_some_and(|parent| {
        matches!(&parent.data.borrow().value, NodeValue::List(list) if !list.tight)
    })
}

/// Diagnostic placeholder for node kinds the renderer does not handle.
/// Deliberately not valid Markdown: unknown kinds should degrade visibly.
fn placeholder(value: &NodeValue) -> String {
    format!(
        "<{} {} ({})>",
        kind_name(value),
        literal_text(value).unwrap_or("null"),
        info_text(value).unwrap_or("")
    )
}

fn kind_name(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Document => "document",
        NodeValue::FrontMatter(_) => "front_matter",
        NodeValue::BlockQuote => "block_quote",
        NodeValue::List(_) => "list",
        NodeValue::Item(_) => "item",
        NodeValue::CodeBlock(_) => "code_block",
        NodeValue::HtmlBlock(_) => "html_block",
        NodeValue::Paragraph => "paragraph",
        NodeValue::Heading(_) => "heading",
        NodeValue::ThematicBreak => "thematic_break",
        NodeValue::Table(_) => "table",
        NodeValue::TableRow(_) => "table_row",
        NodeValue::TableCell => "table_cell",
        NodeValue::Text(_) => "text",
        NodeValue::TaskItem(_) => "task_item",
        NodeValue::SoftBreak => "softbreak",
        NodeValue::LineBreak => "linebreak",
        NodeValue::Code(_) => "code",
        NodeValue::HtmlInline(_) => "html_inline",
        NodeValue::Emph => "emph",
        NodeValue::Strong => "strong",
        NodeValue::Strikethrough => "strikethrough",
        NodeValue::Superscript => "superscript",
        NodeValue::Link(_) => "link",
        NodeValue::Image(_) => "image",
        NodeValue::FootnoteDefinition(_) => "footnote_definition",
        NodeValue::FootnoteReference(_) => "footnote_reference",
        NodeValue::DescriptionList => "description_list",
        NodeValue::DescriptionItem(_) => "description_item",
        NodeValue::DescriptionTerm => "description_term",
        NodeValue::DescriptionDetails => "description_details",
        _ => "unknown",
    }
}

fn literal_text(value: &NodeValue) -> Option<&str> {
    match value {
        NodeValue::Text(literal)
        | NodeValue::HtmlInline(literal)
        | NodeValue::FrontMatter(literal) => Some(literal),
        NodeValue::CodeBlock(block) => Some(&block.literal),
        NodeValue::HtmlBlock(block) => Some(&block.literal),
        NodeValue::Code(code) => Some(&code.literal),
        _ => None,
    }
}

fn info_text(value: &NodeValue) -> Option<&str> {
    match value {
        NodeValue::CodeBlock(block) => Some(&block.info),
        _ => None,
    }
}
