//! Parser for identifier tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into
//! an [`IdentifierTree`]. It reads the prefix and the category code, then
//! dispatches to the grammar of that category:
//!
//! ```text
//! PG  PART "-" NUM ("-" NUM)? ("," (PART "-")? NUM ("-" NUM)?)*
//! TR  PART "-" NUM
//! TL  PART "-" NUM "-" CODE
//! F   NUM
//! FG  NUM "-" NUM
//! GR  CODE "-" NUM
//! L   NUM
//! ```
//!
//! A page item without a part marker takes the part of the nearest preceding
//! item. The parser checks shape only: widths, ordering, repetition and
//! lookups belong to the [`validate`](super::validate) phase.
//!
//! The public entry point is [`build_identifier`].

use log::debug;
use winnow::{
    Parser as _,
    combinator::{opt, peek},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{Stream, TokenSlice},
    token::any,
};

use folio_core::{
    identifier::{Category, GraphicType},
    part::PartCode,
};

use crate::{
    error::SyntaxError,
    parser_types::{IdentifierTree, Numeral, PageItem, PageSpec},
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {
    /// A fully described syntax error.
    Error(SyntaxError),
    /// The tokens ran out while `expected` was still required.
    End(&'static str),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = ModalResult<O, ContextError<Context>>;

/// Create a Cut error carrying `context`.
fn cut(input: &Input<'_>, context: Context) -> ErrMode<ContextError<Context>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), context))
}

fn syntax_error(input: &Input<'_>, err: SyntaxError) -> ErrMode<ContextError<Context>> {
    cut(input, Context::Error(err))
}

/// Error for a token that does not fit, or for running out of tokens.
fn unexpected(
    input: &Input<'_>,
    next: Option<&PositionedToken<'_>>,
    expected: &'static str,
) -> ErrMode<ContextError<Context>> {
    match next {
        Some(token) => syntax_error(
            input,
            SyntaxError::UnexpectedToken {
                span: token.span,
                expected,
                found: token.token.describe(),
            },
        ),
        None => cut(input, Context::End(expected)),
    }
}

fn describe(next: Option<&PositionedToken<'_>>) -> String {
    next.map_or_else(|| "end of input".to_string(), |token| token.token.describe())
}

/// Look at the next token without consuming it.
fn peek_next<'src>(input: &mut Input<'src>) -> IResult<Option<&'src PositionedToken<'src>>> {
    opt(peek(any)).parse_next(input)
}

/// Consume the next token if `accept` maps it to a value.
///
/// Leaves the input untouched and returns `None` otherwise.
fn next_if<'src, O>(
    input: &mut Input<'src>,
    accept: impl Fn(&Token<'src>) -> Option<O>,
) -> IResult<Option<Spanned<O>>> {
    opt(any.verify_map(|token: &PositionedToken<'src>| {
        accept(&token.token).map(|value| Spanned::new(value, token.span))
    }))
    .parse_next(input)
}

/// Consume the next token if `accept` maps it, or fail with `expected`.
fn expect<'src, O>(
    input: &mut Input<'src>,
    expected: &'static str,
    accept: impl Fn(&Token<'src>) -> Option<O>,
) -> IResult<Spanned<O>> {
    if let Some(value) = next_if(input, accept)? {
        return Ok(value);
    }
    let next = peek_next(input)?;
    Err(unexpected(input, next, expected))
}

fn dash_token(token: &Token<'_>) -> Option<()> {
    matches!(token, Token::Dash).then_some(())
}

fn comma_token(token: &Token<'_>) -> Option<()> {
    matches!(token, Token::Comma).then_some(())
}

fn part_token(token: &Token<'_>) -> Option<PartCode> {
    match token {
        Token::Part(part) => Some(*part),
        _ => None,
    }
}

fn is_comma_or_end(next: Option<&PositionedToken<'_>>) -> bool {
    next.is_none_or(|token| token.token == Token::Comma)
}

fn separator(input: &mut Input<'_>) -> IResult<Span> {
    expect(input, "`-`", dash_token).map(|dash| dash.span())
}

fn numeral<'src>(input: &mut Input<'src>, expected: &'static str) -> IResult<Numeral<'src>> {
    expect(input, expected, |token| match token {
        Token::Number(digits) => Some(*digits),
        _ => None,
    })
}

/// Parse `FN "-" CATEGORY` and resolve the category code.
fn header(input: &mut Input<'_>) -> IResult<Spanned<Category>> {
    expect(input, "prefix `FN`", |token| {
        matches!(token, Token::Prefix).then_some(())
    })?;
    separator(input)?;

    let code = expect(input, "category code", |token| match token {
        Token::Category(code) => Some(*code),
        _ => None,
    })?;

    match Category::from_code(code.inner()) {
        Some(category) => Ok(Spanned::new(category, code.span())),
        None => Err(syntax_error(
            input,
            SyntaxError::UnknownCategory {
                span: code.span(),
                expected: "category code",
                found: code.inner().to_string(),
            },
        )),
    }
}

fn missing_part(input: &mut Input<'_>) -> ErrMode<ContextError<Context>> {
    match peek_next(input) {
        Ok(Some(token)) => syntax_error(
            input,
            SyntaxError::MissingPart {
                span: token.span,
                expected: "part marker",
                found: token.token.describe(),
            },
        ),
        Ok(None) => cut(input, Context::End("part marker")),
        Err(err) => err,
    }
}

/// Parse the `"-" NUM` after a part marker.
///
/// A marker followed by a comma or by the end of input, with or without
/// its dash, is incomplete.
fn part_page<'src>(input: &mut Input<'src>, marker: Spanned<PartCode>) -> IResult<Numeral<'src>> {
    let incomplete = |input: &Input<'_>| {
        syntax_error(
            input,
            SyntaxError::PartIncomplete {
                span: marker.span(),
                expected: "`-` and a page number",
                found: marker.inner().to_string(),
            },
        )
    };

    if is_comma_or_end(peek_next(input)?) {
        return Err(incomplete(input));
    }
    separator(input)?;
    if is_comma_or_end(peek_next(input)?) {
        return Err(incomplete(input));
    }
    numeral(input, "page number")
}

/// Parse one page item, resolving its part against `inherited`.
fn page_item<'src>(input: &mut Input<'src>, inherited: Option<PartCode>) -> IResult<PageItem<'src>> {
    let marker = next_if(input, part_token)?;

    let (part, start) = match (marker, inherited) {
        (Some(marker), _) => (*marker.inner(), part_page(input, marker)?),
        (None, Some(part)) => (part, numeral(input, "page number or part marker")?),
        (None, None) => return Err(missing_part(input)),
    };

    let Some(dash) = next_if(input, dash_token)? else {
        return Ok(PageItem {
            marker,
            part,
            start,
            end: None,
        });
    };

    let next = peek_next(input)?;
    if !matches!(next, Some(PositionedToken { token: Token::Number(_), .. })) {
        let span = next.map_or(dash.span(), |token| dash.span().union(token.span));
        return Err(syntax_error(
            input,
            SyntaxError::MalformedRange {
                span,
                expected: "page number after `-`",
                found: describe(next),
            },
        ));
    }
    let end = numeral(input, "page number")?;

    if let Some(extra) = next_if(input, dash_token)? {
        let third = peek_next(input)?;
        let span = third.map_or(start.span().union(extra.span()), |token| {
            start.span().union(token.span)
        });
        return Err(syntax_error(
            input,
            SyntaxError::MalformedRange {
                span,
                expected: "`,` or end of input",
                found: "a third endpoint".to_string(),
            },
        ));
    }

    Ok(PageItem {
        marker,
        part,
        start,
        end: Some(end),
    })
}

/// Parse a comma-separated page list.
fn pages<'src>(input: &mut Input<'src>) -> IResult<Vec<PageItem<'src>>> {
    let mut items = vec![page_item(input, None)?];

    while next_if(input, comma_token)?.is_some() {
        let inherited = items.last().map(|item| item.part);
        items.push(page_item(input, inherited)?);
    }

    Ok(items)
}

/// Parse a single page with a mandatory part marker.
fn page_spec<'src>(input: &mut Input<'src>) -> IResult<PageSpec<'src>> {
    let Some(part) = next_if(input, part_token)? else {
        return Err(missing_part(input));
    };
    let page = part_page(input, part)?;
    Ok(PageSpec { part, page })
}

fn translation<'src>(input: &mut Input<'src>) -> IResult<IdentifierTree<'src>> {
    let page = page_spec(input)?;
    let missing = |input: &Input<'_>, span: Span, next: Option<&PositionedToken<'_>>| {
        syntax_error(
            input,
            SyntaxError::MissingLanguageCode {
                span,
                expected: "`-` and a language code",
                found: describe(next),
            },
        )
    };

    match peek_next(input)? {
        None => return Err(missing(input, Span::point(page.page.span().end()), None)),
        Some(token) if token.token != Token::Dash => {
            return Err(unexpected(input, Some(token), "`-` and a language code"));
        }
        Some(_) => {}
    }
    let dash = separator(input)?;

    let code = next_if(input, |token| match token {
        Token::Code(code) => Some(*code),
        _ => None,
    })?;
    match code {
        Some(language) => Ok(IdentifierTree::Translation { page, language }),
        None => {
            let next = peek_next(input)?;
            let span = next.map_or(Span::point(dash.end()), |token| token.span);
            Err(missing(input, span, next))
        }
    }
}

fn glyph<'src>(input: &mut Input<'src>) -> IResult<IdentifierTree<'src>> {
    let font = numeral(input, "font number")?;
    separator(input)?;
    let glyph = numeral(input, "glyph number")?;
    Ok(IdentifierTree::Glyph { font, glyph })
}

fn graphic<'src>(input: &mut Input<'src>) -> IResult<IdentifierTree<'src>> {
    let code = expect(input, "graphic type code", |token| match token {
        Token::Code(code) => Some(*code),
        _ => None,
    })?;
    let Some(kind) = GraphicType::from_code(code.inner()) else {
        return Err(syntax_error(
            input,
            SyntaxError::UnknownGraphicType {
                span: code.span(),
                expected: "graphic type code",
                found: code.inner().to_string(),
            },
        ));
    };

    separator(input)?;
    let index = numeral(input, "graphic number")?;
    Ok(IdentifierTree::Graphic {
        kind: Spanned::new(kind, code.span()),
        index,
    })
}

fn end_of_input(input: &mut Input<'_>, expected: &'static str) -> IResult<()> {
    match peek_next(input)? {
        None => Ok(()),
        next => Err(unexpected(input, next, expected)),
    }
}

/// Parse a complete identifier, dispatching on its category.
fn identifier<'src>(input: &mut Input<'src>) -> IResult<IdentifierTree<'src>> {
    let category = header(input)?;
    separator(input)?;

    let tree = match category.inner() {
        Category::Page => IdentifierTree::Pages(pages(input)?),
        Category::Transcription => IdentifierTree::Transcription(page_spec(input)?),
        Category::Translation => translation(input)?,
        Category::Font => IdentifierTree::Font(numeral(input, "font number")?),
        Category::Glyph => glyph(input)?,
        Category::Graphic => graphic(input)?,
        Category::Layout => IdentifierTree::Layout(numeral(input, "layout number")?),
    };

    let expected = match category.inner() {
        Category::Page => "`,` or end of input",
        _ => "end of input",
    };
    end_of_input(input, expected)?;

    Ok(tree)
}

/// Convert a parser error into a [`SyntaxError`].
///
/// End-of-input errors are placed at the end of the last token.
fn convert_error(error: ErrMode<ContextError<Context>>, tokens: &[PositionedToken<'_>]) -> SyntaxError {
    let end = tokens.last().map_or(0, |token| token.span.end());

    let context = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().next().cloned(),
        ErrMode::Incomplete(_) => None,
    };

    match context {
        Some(Context::Error(err)) => err,
        Some(Context::End(expected)) => SyntaxError::UnexpectedEnd {
            span: Span::point(end),
            expected,
            found: "end of input".to_string(),
        },
        None => SyntaxError::UnexpectedEnd {
            span: Span::point(end),
            expected: "a complete identifier",
            found: "end of input".to_string(),
        },
    }
}

/// Build an identifier tree from tokens.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] met while reading the tokens.
pub fn build_identifier<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Spanned<IdentifierTree<'src>>, SyntaxError> {
    let mut token_slice = TokenSlice::new(tokens);

    match identifier.parse_next(&mut token_slice) {
        Ok(tree) => {
            let total_span = tokens
                .first()
                .and_then(|first| tokens.last().map(|last| first.span.union(last.span)))
                .unwrap_or_default();

            debug!(tree:?; "Parsed identifier tree");
            Ok(Spanned::new(tree, total_span))
        }
        Err(e) => Err(convert_error(e, tokens)),
    }
}
