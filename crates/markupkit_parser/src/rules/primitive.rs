//! Rules that look at code units directly.

use std::fmt;

use crate::{ParseContext, ParsingResult, ParsingRule};

/// Matches one code unit accepted by a predicate.
pub struct Character {
    name: String,
    predicate: Box<dyn Fn(u16) -> bool + Send + Sync>,
}

impl Character {
    pub(crate) fn new(
        name: impl Into<String>,
        predicate: impl Fn(u16) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Character").field(&self.name).finish()
    }
}

impl ParsingRule for Character {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        match cx.utf16_at(index) {
            Some(unit) if (self.predicate)(unit) => ParsingResult::success(1, 1, None),
            _ => ParsingResult::failure(1),
        }
    }
}

/// Matches an exact sequence of code units.
#[derive(Debug)]
pub struct Literal {
    units: Vec<u16>,
}

impl Literal {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }
}

impl ParsingRule for Literal {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        for (offset, &expected) in self.units.iter().enumerate() {
            if cx.utf16_at(index + offset) != Some(expected) {
                return ParsingResult::failure(offset + 1);
            }
        }
        ParsingResult::success(self.units.len(), self.units.len(), None)
    }
}

/// Matches any single code unit.
#[derive(Debug)]
pub struct Dot;

impl ParsingRule for Dot {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        if index < cx.len() {
            ParsingResult::success(1, 1, None)
        } else {
            ParsingResult::failure(1)
        }
    }
}

/// Succeeds without consuming only at the end of input.
#[derive(Debug)]
pub struct EndOfInput;

impl ParsingRule for EndOfInput {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        if index >= cx.len() {
            ParsingResult::success(0, 1, None)
        } else {
            ParsingResult::failure(1)
        }
    }
}
