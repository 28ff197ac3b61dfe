//! Lexical analyzer for identifier text.
//!
//! The lexer is a small state machine over the expected token class:
//!
//! 1. the prefix `FN`,
//! 2. the `-` after the prefix,
//! 3. the category code, any run of letters (the parser decides whether the
//!    code is known),
//! 4. the body: part markers, digit runs, two-letter codes, `-` and `,`.
//!
//! Whitespace is discarded directly after a comma and rejected everywhere
//! else. Lexing stops at the first error; identifiers are never repaired.

use log::trace;
use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, dispatch, fail, not, peek, preceded},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{any, one_of, take_while},
};

use folio_core::part::PartCode;

use crate::{
    error::LexError,
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Description of what the lexer expected, attached via `.context()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Expected(&'static str);

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<Expected>>;

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Parse the `FN` prefix one character at a time, so a truncated prefix is
/// reported at the end of input rather than at its first character.
fn prefix<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    ('F', 'N')
        .value(Token::Prefix)
        .context(Expected("prefix `FN`"))
        .parse_next(input)
}

fn dash<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '-'.value(Token::Dash)
        .context(Expected("`-`"))
        .parse_next(input)
}

/// Parse the category code as a raw run of letters.
fn category<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., is_letter)
        .map(Token::Category)
        .context(Expected("category code"))
        .parse_next(input)
}

/// Parse a part marker `P1`..`P3`.
///
/// Backtracks if `P` is not followed by a digit, so `PL` can still lex as a
/// code. A digit outside `1..=3` is a hard error at the digit.
fn part_marker<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(
        ('P', peek(one_of(is_digit))),
        cut_err(
            any.verify_map(PartCode::from_digit)
                .context(Expected("part number 1, 2 or 3")),
        ),
    )
    .map(Token::Part)
    .parse_next(input)
}

/// Parse a code of exactly two letters.
fn code<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(is_letter),
        cut_err(one_of(is_letter)).context(Expected("a second letter")),
        cut_err(not(one_of(is_letter))).context(Expected("a two-letter code")),
    )
        .take()
        .map(Token::Code)
        .parse_next(input)
}

/// Parse a single token of the identifier body.
fn body_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    dispatch! {peek(any);
        '-' => '-'.value(Token::Dash),
        ',' => ','.value(Token::Comma),
        '0'..='9' => take_while(1.., is_digit).map(Token::Number),
        'P' => alt((part_marker, code)),
        c if is_letter(c) => code,
        _ => fail,
    }
    .parse_next(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Prefix,
    Separator,
    Category,
    Body,
}

impl State {
    fn next(self) -> Self {
        match self {
            State::Prefix => State::Separator,
            State::Separator => State::Category,
            State::Category | State::Body => State::Body,
        }
    }

    /// Fallback description when a parser failed without context.
    fn expected(self) -> &'static str {
        match self {
            State::Prefix => "prefix `FN`",
            State::Separator => "`-`",
            State::Category => "category code",
            State::Body => "part marker, number, code, `-` or `,`",
        }
    }
}

/// Lexer that accumulates tokens while walking the state machine.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    state: State,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            state: State::Prefix,
        }
    }

    fn tokenize(&mut self, input: &mut Input<'a>) -> Result<(), LexError> {
        while !input.is_empty() {
            let start = input.current_token_start();

            let result = match self.state {
                State::Prefix => prefix.parse_next(input),
                State::Separator => dash.parse_next(input),
                State::Category => category.parse_next(input),
                State::Body => body_token.parse_next(input),
            };
            let token = result.map_err(|err| self.convert_err_mode(err, input))?;

            let end = input.current_token_start();
            self.tokens
                .push(PositionedToken::new(token, Span::new(start..end)));
            self.state = self.state.next();

            if token == Token::Comma {
                let _: IResult<&str> = space0.parse_next(input);
            }
        }

        if self.state == State::Prefix {
            return Err(LexError::UnexpectedEnd {
                position: input.current_token_start(),
                expected: State::Prefix.expected(),
            });
        }

        Ok(())
    }

    /// Convert a winnow error into a [`LexError`] at the current position.
    ///
    /// Uses the innermost `Expected` context if there is one, otherwise the
    /// description of the current state.
    fn convert_err_mode(&self, err: ErrMode<ContextError<Expected>>, input: &Input<'a>) -> LexError {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        let expected = context_error
            .context()
            .next()
            .map_or(self.state.expected(), |Expected(expected)| *expected);
        let position = input.current_token_start();

        match input.chars().next() {
            Some(found) => LexError::UnexpectedCharacter {
                position,
                found,
                expected,
            },
            None => LexError::UnexpectedEnd { position, expected },
        }
    }
}

/// Tokenize identifier text.
///
/// # Errors
///
/// Returns the first [`LexError`]: a character outside the alphabet of the
/// current token class, or the end of input inside the prefix.
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, LexError> {
    let mut located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(&mut located_input)?;

    trace!(tokens = lexer.tokens.len(); "Tokenized identifier");
    Ok(lexer.tokens)
}
