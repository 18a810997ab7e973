//! Paragraph grouping
//!
//! The final parsing stage. Section content arrives as a flat run of nodes;
//! this pass groups it into paragraphs at blank lines. A line is blank when
//! it carries nothing but whitespace. Blank lines attach to the paragraph
//! they follow, so no node is dropped and the section still round-trips.

use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::ast::sections::{DocParagraph, DocSection};
use crate::tsdoc::config::configuration::TsdocConfiguration;

/// Group the loose content of every section in the comment into paragraphs.
pub fn split_paragraphs(comment: &mut DocComment, configuration: &TsdocConfiguration) {
    split_section(&mut comment.summary_section, configuration);

    let blocks = comment
        .remarks_block
        .iter_mut()
        .chain(comment.private_remarks.iter_mut())
        .chain(comment.deprecated_block.iter_mut())
        .chain(comment.returns_block.iter_mut())
        .chain(comment.see_blocks.iter_mut())
        .chain(comment.custom_blocks.iter_mut());
    for block in blocks {
        split_section(block.content_mut(), configuration);
    }

    for block in comment.params.blocks_mut() {
        split_section(block.content_mut(), configuration);
    }
    for block in comment.type_params.blocks_mut() {
        split_section(block.content_mut(), configuration);
    }
}

fn split_section(section: &mut DocSection, configuration: &TsdocConfiguration) {
    if section.is_empty() {
        return;
    }
    // A section built from paragraph nodes is already grouped.
    if section
        .nodes()
        .iter()
        .any(|node| matches!(node, DocNode::Paragraph(_)))
    {
        return;
    }
    let nodes = section.nodes().to_vec();
    section.replace_nodes(group_into_paragraphs(nodes, configuration));
}

enum SplitState {
    /// Nothing but blank lines so far; they will join the first paragraph.
    Start,
    /// Inside a paragraph, no blank line seen since its content began.
    AwaitingTrailer,
    /// Reading the blank lines that trail the current paragraph.
    ReadingTrailer,
}

fn group_into_paragraphs(nodes: Vec<DocNode>, configuration: &TsdocConfiguration) -> Vec<DocNode> {
    let mut paragraphs: Vec<DocNode> = Vec::new();
    let mut current = DocParagraph::new();
    let mut state = SplitState::Start;

    for line in split_into_lines(nodes) {
        let blank = line_is_blank(&line);
        match state {
            SplitState::Start => {
                if !blank {
                    state = SplitState::AwaitingTrailer;
                }
            }
            SplitState::AwaitingTrailer => {
                if blank {
                    state = SplitState::ReadingTrailer;
                }
            }
            SplitState::ReadingTrailer => {
                if !blank {
                    paragraphs.push(DocNode::Paragraph(std::mem::take(&mut current)));
                    state = SplitState::AwaitingTrailer;
                }
            }
        }
        current.append_nodes(line, configuration);
    }
    if !current.is_empty() {
        paragraphs.push(DocNode::Paragraph(current));
    }
    paragraphs
}

/// Cut the node list at soft breaks; each line keeps its trailing break.
fn split_into_lines(nodes: Vec<DocNode>) -> Vec<Vec<DocNode>> {
    let mut lines: Vec<Vec<DocNode>> = Vec::new();
    let mut current: Vec<DocNode> = Vec::new();
    for node in nodes {
        let is_break = matches!(node, DocNode::SoftBreak(_));
        current.push(node);
        if is_break {
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn line_is_blank(line: &[DocNode]) -> bool {
    line.iter().all(|node| match node {
        DocNode::SoftBreak(_) => true,
        DocNode::PlainText(text) => text.text().trim().is_empty(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsdoc::ast::text_nodes::{DocPlainText, DocSoftBreak};

    fn text(value: &str) -> DocNode {
        DocNode::PlainText(DocPlainText::new(value))
    }

    fn soft_break() -> DocNode {
        DocNode::SoftBreak(DocSoftBreak::new())
    }

    fn section_of(nodes: Vec<DocNode>, configuration: &TsdocConfiguration) -> DocSection {
        DocSection::from_nodes(nodes, configuration)
    }

    fn paragraph_count(section: &DocSection) -> usize {
        section
            .nodes()
            .iter()
            .filter(|node| matches!(node, DocNode::Paragraph(_)))
            .count()
    }

    fn flattened_node_count(section: &DocSection) -> usize {
        section
            .nodes()
            .iter()
            .map(|node| match node {
                DocNode::Paragraph(paragraph) => paragraph.nodes().len(),
                _ => 1,
            })
            .sum()
    }

    #[test]
    fn test_single_paragraph() {
        let configuration = TsdocConfiguration::new();
        let mut section = section_of(
            vec![text("one"), soft_break(), text("two"), soft_break()],
            &configuration,
        );
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 1);
        assert_eq!(flattened_node_count(&section), 4);
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let configuration = TsdocConfiguration::new();
        let mut section = section_of(
            vec![
                text("first"),
                soft_break(),
                soft_break(),
                text("second"),
                soft_break(),
            ],
            &configuration,
        );
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 2);
        // The blank line trails the first paragraph.
        match &section.nodes()[0] {
            DocNode::Paragraph(paragraph) => assert_eq!(paragraph.nodes().len(), 3),
            node => panic!("expected a paragraph, got {:?}", node.kind_id()),
        }
        assert_eq!(flattened_node_count(&section), 5);
    }

    #[test]
    fn test_whitespace_only_line_counts_as_blank() {
        let configuration = TsdocConfiguration::new();
        let mut section = section_of(
            vec![
                text("first"),
                soft_break(),
                text("   "),
                soft_break(),
                text("second"),
            ],
            &configuration,
        );
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 2);
    }

    #[test]
    fn test_leading_blank_lines_join_the_first_paragraph() {
        let configuration = TsdocConfiguration::new();
        let mut section = section_of(
            vec![soft_break(), soft_break(), text("content"), soft_break()],
            &configuration,
        );
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 1);
        assert_eq!(flattened_node_count(&section), 4);
    }

    #[test]
    fn test_all_blank_content_stays_in_one_paragraph() {
        let configuration = TsdocConfiguration::new();
        let mut section = section_of(vec![soft_break(), soft_break()], &configuration);
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 1);
        assert_eq!(flattened_node_count(&section), 2);
    }

    #[test]
    fn test_empty_section_is_left_alone() {
        let configuration = TsdocConfiguration::new();
        let mut section = DocSection::new();
        split_section(&mut section, &configuration);
        assert!(section.is_empty());
    }

    #[test]
    fn test_already_grouped_section_is_left_alone() {
        let configuration = TsdocConfiguration::new();
        let mut paragraph = DocParagraph::new();
        paragraph.append_node(text("grouped"), &configuration);
        let mut section = DocSection::new();
        section.append_node(DocNode::Paragraph(paragraph), &configuration);
        split_section(&mut section, &configuration);
        assert_eq!(paragraph_count(&section), 1);
        assert_eq!(flattened_node_count(&section), 1);
    }
}
