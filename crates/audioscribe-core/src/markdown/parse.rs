//! Block and inline parsing for the supported markdown subset.

/// Block-level markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, inlines: Vec<Inline> },
    List { ordered: bool, items: Vec<Vec<Inline>> },
}

/// Inline markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
}

/// Parse markdown text into a block tree.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph_lines: Vec<&str> = Vec::new();
    let mut list_ordered = false;
    let mut list_items: Vec<Vec<Inline>> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph_lines);
            flush_list(&mut blocks, list_ordered, &mut list_items);
            continue;
        }

        if let Some((level, rest)) = heading_marker(line) {
            flush_paragraph(&mut blocks, &mut paragraph_lines);
            flush_list(&mut blocks, list_ordered, &mut list_items);
            blocks.push(Block::Heading {
                level,
                inlines: parse_inlines(rest),
            });
            continue;
        }

        if let Some(item) = bullet_marker(line) {
            flush_paragraph(&mut blocks, &mut paragraph_lines);
            if list_ordered {
                flush_list(&mut blocks, true, &mut list_items);
            }
            list_ordered = false;
            list_items.push(parse_inlines(item));
            continue;
        }

        if let Some(item) = ordered_marker(line) {
            flush_paragraph(&mut blocks, &mut paragraph_lines);
            if !list_ordered {
                flush_list(&mut blocks, false, &mut list_items);
            }
            list_ordered = true;
            list_items.push(parse_inlines(item));
            continue;
        }

        flush_list(&mut blocks, list_ordered, &mut list_items);
        paragraph_lines.push(line);
    }

    flush_paragraph(&mut blocks, &mut paragraph_lines);
    flush_list(&mut blocks, list_ordered, &mut list_items);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    let joined = lines.join(" ");
    lines.clear();
    blocks.push(Block::Paragraph(parse_inlines(&joined)));
}

fn flush_list(blocks: &mut Vec<Block>, ordered: bool, items: &mut Vec<Vec<Inline>>) {
    if items.is_empty() {
        return;
    }
    blocks.push(Block::List {
        ordered,
        items: std::mem::take(items),
    });
}

/// `# `..`### ` prefixes; deeper levels fall through as plain text
fn heading_marker(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 3 {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim()))
}

fn bullet_marker(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn ordered_marker(line: &str) -> Option<&str> {
    let (number, rest) = line.split_once(". ")?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(rest.trim())
}

/// Split a line into text runs and `**bold**` spans. Unmatched markers stay
/// literal.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        match rest[start + 2..].find("**") {
            Some(len) => {
                if start > 0 {
                    inlines.push(Inline::Text(rest[..start].to_string()));
                }
                let inner = &rest[start + 2..start + 2 + len];
                inlines.push(Inline::Strong(vec![Inline::Text(inner.to_string())]));
                rest = &rest[start + 2 + len + 2..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        inlines.push(Inline::Text(rest.to_string()));
    }
    inlines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let blocks = parse("first paragraph\n\nsecond paragraph");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![text("first paragraph")]),
                Block::Paragraph(vec![text("second paragraph")]),
            ]
        );
    }

    #[test]
    fn adjacent_lines_join_into_one_paragraph() {
        let blocks = parse("one\ntwo");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("one two")])]);
    }

    #[test]
    fn heading_levels_one_through_three() {
        let blocks = parse("# top\n## middle\n### small");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    inlines: vec![text("top")]
                },
                Block::Heading {
                    level: 2,
                    inlines: vec![text("middle")]
                },
                Block::Heading {
                    level: 3,
                    inlines: vec![text("small")]
                },
            ]
        );
    }

    #[test]
    fn four_hashes_are_not_a_heading() {
        let blocks = parse("#### too deep");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("#### too deep")])]);
    }

    #[test]
    fn bullet_and_ordered_lists() {
        let blocks = parse("- a\n- b\n\n1. one\n2. two");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: vec![vec![text("a")], vec![text("b")]],
                },
                Block::List {
                    ordered: true,
                    items: vec![vec![text("one")], vec![text("two")]],
                },
            ]
        );
    }

    #[test]
    fn switching_list_kind_starts_a_new_list() {
        let blocks = parse("- a\n1. one");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: vec![vec![text("a")]],
                },
                Block::List {
                    ordered: true,
                    items: vec![vec![text("one")]],
                },
            ]
        );
    }

    #[test]
    fn bold_spans_split_the_line() {
        let blocks = parse("plant **tomatoes** early");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("plant "),
                Inline::Strong(vec![text("tomatoes")]),
                text(" early"),
            ])]
        );
    }

    #[test]
    fn unmatched_bold_marker_stays_literal() {
        let blocks = parse("a ** b");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("a ** b")])]);
    }

    #[test]
    fn decimal_number_is_not_an_ordered_item() {
        let blocks = parse("3.14. is pi");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("3.14. is pi")])]);
    }
}
