//! Base-file grammar: parse and serialize.
//!
//! A node token is its value text wrapped in a sigil at both ends, `'` for
//! characters and `?` for features. A character token is a complete node; a
//! feature token is followed by its "no" subtree and then its "yes" subtree,
//! in preorder. Whitespace separates tokens and is otherwise insignificant.
//!
//! A token closes at the first sigil character that is followed by whitespace
//! or end of input, so value text may itself contain sigils (`?Is it
//! alive??`). Values therefore must not contain a sigil immediately followed
//! by whitespace; the serializer emits one token per line, which the scanning
//! rule round-trips for every value obeying that constraint.

use tracing::instrument;

use crate::domain::arena::{Answer, NodeValue};
use crate::domain::error::ParseError;
use crate::domain::tree::DecisionTree;

/// Wraps character values in the base file.
pub const CHARACTER_SIGIL: char = '\'';
/// Wraps feature values in the base file.
pub const FEATURE_SIGIL: char = '?';

fn is_sigil(c: char) -> bool {
    c == CHARACTER_SIGIL || c == FEATURE_SIGIL
}

/// Render a single value as its base-file token.
pub fn token(value: &NodeValue) -> String {
    match value {
        NodeValue::Character(text) => format!("{CHARACTER_SIGIL}{text}{CHARACTER_SIGIL}"),
        NodeValue::Feature(text) => format!("{FEATURE_SIGIL}{text}{FEATURE_SIGIL}"),
    }
}

/// Parse base text into a tree named "default".
///
/// Iterative with an explicit frame stack, so arbitrarily deep (near-linear)
/// bases cannot exhaust the call stack.
#[instrument(level = "debug", skip(text))]
pub fn parse(text: &str) -> Result<DecisionTree, ParseError> {
    let mut scanner = Scanner::new(text);
    let mut tree = DecisionTree::new("default");

    // A frame is an open feature node still waiting for children.
    struct Frame {
        node: generational_arena::Index,
        no_filled: bool,
    }

    let root_value = scanner.next_token()?;
    let root_is_feature = root_value.is_feature();
    let root_idx = tree.arena.insert_node(root_value, None);
    let mut frames = Vec::new();
    if root_is_feature {
        frames.push(Frame {
            node: root_idx,
            no_filled: false,
        });
    }

    while let Some(top) = frames.last() {
        let (parent, slot) = (
            top.node,
            if top.no_filled { Answer::Yes } else { Answer::No },
        );
        let value = scanner.next_token()?;
        let is_feature = value.is_feature();
        let idx = tree.arena.insert_node(value, Some((parent, slot)));

        match slot {
            Answer::No => {
                if let Some(top) = frames.last_mut() {
                    top.no_filled = true;
                }
            }
            Answer::Yes => {
                frames.pop();
            }
        }
        if is_feature {
            frames.push(Frame {
                node: idx,
                no_filled: false,
            });
        }
    }

    scanner.expect_end()?;
    tree.arena.recompute_depths();
    Ok(tree)
}

/// Serialize a tree back to base text: preorder, one token per line, children
/// indented two spaces per level.
#[instrument(level = "debug", skip(tree))]
pub fn serialize(tree: &DecisionTree) -> String {
    let mut out = String::new();
    let Some(root) = tree.arena.root() else {
        return out;
    };
    let mut stack = vec![(root, 0usize)];
    while let Some((idx, indent)) = stack.pop() {
        let Some(node) = tree.arena.get_node(idx) else {
            continue;
        };
        for _ in 0..indent {
            out.push_str("  ");
        }
        out.push_str(&token(&node.value));
        out.push('\n');
        if let Some(right) = node.right {
            stack.push((right, indent + 1));
        }
        if let Some(left) = node.left {
            stack.push((left, indent + 1));
        }
    }
    out
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    /// Scan the next sigil-wrapped token.
    fn next_token(&mut self) -> Result<NodeValue, ParseError> {
        self.skip_whitespace();
        let token_start = self.pos;
        let opening = self.bump().ok_or(ParseError::UnexpectedEof {
            offset: token_start,
        })?;
        if !is_sigil(opening) {
            return Err(ParseError::MissingSigil {
                found: opening,
                offset: token_start,
            });
        }

        let mut value = String::new();
        loop {
            let char_start = self.pos;
            let c = self
                .bump()
                .ok_or(ParseError::UnexpectedEof { offset: self.pos })?;
            let closes = is_sigil(c) && self.peek().map_or(true, |next| next.is_whitespace());
            if !closes {
                value.push(c);
                continue;
            }
            if c != opening {
                return Err(ParseError::UnmatchedSigil {
                    expected: opening,
                    found: c,
                    offset: char_start,
                });
            }
            if value.is_empty() {
                return Err(ParseError::EmptyValue {
                    offset: token_start,
                });
            }
            return Ok(match opening {
                CHARACTER_SIGIL => NodeValue::Character(value),
                _ => NodeValue::Feature(value),
            });
        }
    }

    /// After the root subtree completes, only whitespace may remain.
    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(ParseError::TrailingContent { offset: self.pos });
        }
        Ok(())
    }
}
