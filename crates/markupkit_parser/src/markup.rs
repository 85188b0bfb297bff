//! A small lightweight-markup grammar.
//!
//! Paragraphs are runs of non-empty lines separated by blank lines. Inside a
//! line the grammar recognizes hashtags (`#word`) and emphasis (`*text*`);
//! everything else is plain text. A `#` or `*` that does not start either
//! construct is plain text too, and merges with the text around it.
//!
//! ```text
//! document   := (paragraph | blank_line)*
//! paragraph  := line+
//! line       := inline+ (newline | end of input)
//! inline     := hashtag | emphasis | text | [#*]
//! hashtag    := '#' word+
//! emphasis   := '*' (!('*' | newline) .)+ '*'
//! ```

use markupkit_ast::NodeType;

use crate::rules::{
    RuleExt, character, character_set, choice, dot, end_of_input, in_order, literal,
};
use crate::{Grammar, GrammarBuilder};

/// The whole buffer.
pub const DOCUMENT: NodeType = NodeType::new("document");
/// Consecutive non-empty lines.
pub const PARAGRAPH: NodeType = NodeType::new("paragraph");
/// A line break between paragraphs.
pub const BLANK_LINE: NodeType = NodeType::new("blank_line");
/// A line break ending a paragraph line.
pub const NEWLINE: NodeType = NodeType::new("newline");
/// Plain text.
pub const TEXT: NodeType = NodeType::new("text");
/// `#` followed by word characters.
pub const HASHTAG: NodeType = NodeType::new("hashtag");
/// Text between asterisks.
pub const EMPHASIS: NodeType = NodeType::new("emphasis");
/// The asterisks around emphasis.
pub const DELIMITER: NodeType = NodeType::new("delimiter");

/// Returns true for units that may appear in a hashtag after the `#`.
///
/// Every unit outside ASCII counts, surrogates included, so hashtags can
/// hold any non-ASCII word.
pub fn is_word_unit(unit: u16) -> bool {
    match u8::try_from(unit) {
        Ok(byte) if byte.is_ascii() => byte.is_ascii_alphanumeric() || byte == b'_',
        _ => true,
    }
}

fn is_plain_unit(unit: u16) -> bool {
    !matches!(unit, 0x0A | 0x23 | 0x2A)
}

/// Builds the markup grammar.
pub fn grammar() -> Grammar {
    let mut builder = GrammarBuilder::new();

    let newline = literal("\n");

    let hashtag = builder.memoize(
        in_order([literal("#"), character("word", is_word_unit).one_or_more()]).as_node(HASHTAG),
    );

    let emphasis = builder.memoize(
        in_order([
            literal("*").as_node(DELIMITER),
            in_order([character_set("*\n").not(), dot()])
                .one_or_more()
                .as_node(TEXT),
            literal("*").as_node(DELIMITER),
        ])
        .wrapping_in(EMPHASIS),
    );

    let text = builder.memoize(character("plain", is_plain_unit).one_or_more().as_node(TEXT));
    let stray = character_set("#*").as_node(TEXT);

    let inline = choice([hashtag, emphasis, text, stray]);
    let line = in_order([
        inline.one_or_more(),
        choice([newline.as_node(NEWLINE), end_of_input()]),
    ]);

    let paragraph = builder.memoize(line.one_or_more().wrapping_in(PARAGRAPH));
    let blank_line = builder.memoize(newline.as_node(BLANK_LINE));

    builder.build(
        choice([paragraph, blank_line])
            .zero_or_more()
            .wrapping_in(DOCUMENT),
    )
}
