//! The packrat parser engine
//!
//! [`Parser`] owns the token buffer, the cursor and the memo table of one
//! parse session. Grammar rules are plain functions
//! `fn(&mut Parser) -> ParseResult<T>` that drive it:
//!
//! - alternatives are tried in order; each one marks the cursor, runs a
//!   short-circuiting sequence of `expect` calls and sub-rules, and resets to
//!   its mark when the sequence fails;
//! - a rule wraps its body in [`Parser::memoize`] (or
//!   [`Parser::memoize_left_rec`] for left-recursive rules) so that a second
//!   visit at the same position replays the cached outcome;
//! - once an alternative has committed, [`Parser::expect_forced`] turns a soft
//!   failure into a fatal [`ParseError::Forced`] that ends the parse.
//!
//! The whole buffer is materialized up front, so `reset` can rewind anywhere.

use super::error::{ParseError, ParseResult};
use super::memo::{Mark, MemoEntry, MemoStore, ParserProfile, RuleId};
use crate::kiwi::ast::Position;
use crate::kiwi::config::ParserConfig;
use crate::kiwi::lexing::{Token, TokenKind};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Memoize plain rules. Left-recursive rules memoize regardless.
    pub packrat: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { packrat: true }
    }
}

impl From<&ParserConfig> for ParserOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            packrat: config.packrat,
        }
    }
}

/// Something a token can be matched against
pub trait TokenMatch {
    fn matches(&self, token: &Token) -> bool;
}

impl TokenMatch for TokenKind {
    fn matches(&self, token: &Token) -> bool {
        token.kind == *self
    }
}

/// A literal matches on the token text: keywords, operators
impl TokenMatch for &str {
    fn matches(&self, token: &Token) -> bool {
        token.kind != TokenKind::EndMarker && token.text == *self
    }
}

#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Furthest position any `expect` reached, for error reporting
    furthest: usize,
    keywords: HashSet<&'static str>,
    memo: MemoStore,
    profile: ParserProfile,
    options: ParserOptions,
}

impl Parser {
    /// A parser over `tokens`. A buffer that does not end with `ENDMARKER`
    /// gets one at the end of its last token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndMarker) {
            let here = tokens.last().map_or(Position::new(1, 1), |t| t.end);
            tokens.push(Token::new(TokenKind::EndMarker, "", here, here));
        }
        Self {
            tokens,
            position: 0,
            furthest: 0,
            keywords: HashSet::new(),
            memo: MemoStore::new(),
            profile: ParserProfile::default(),
            options,
        }
    }

    /// Reserves `keywords`: [`Parser::name`] no longer matches them
    pub fn with_keywords(mut self, keywords: &[&'static str]) -> Self {
        self.keywords.extend(keywords.iter().copied());
        self
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.keywords.contains(text)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn profile(&self) -> &ParserProfile {
        &self.profile
    }

    /// Number of (rule, position) outcomes cached so far
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn mark(&self) -> Mark {
        Mark::new(self.position)
    }

    pub fn reset(&mut self, mark: Mark) {
        if mark.index() < self.position {
            self.profile.backtracks += 1;
        }
        self.position = mark.index();
    }

    /// The token under the cursor; `ENDMARKER` once the cursor is past it
    pub fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len() - 1
    }

    /// Consumes the current token if it matches
    pub fn expect<M: TokenMatch>(&mut self, matcher: M) -> Option<Token> {
        let token = self.tokens.get(self.position)?;
        if !matcher.matches(token) {
            return None;
        }
        let token = token.clone();
        self.position += 1;
        self.furthest = self.furthest.max(self.position);
        Some(token)
    }

    /// A `NAME` that is not a reserved keyword
    pub fn name(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position)?;
        if token.kind != TokenKind::Name || self.is_keyword(&token.text) {
            return None;
        }
        self.expect(TokenKind::Name)
    }

    /// A `NAME` spelled exactly `text`
    pub fn keyword(&mut self, text: &str) -> Option<Token> {
        let token = self.tokens.get(self.position)?;
        if token.kind != TokenKind::Name || token.text != text {
            return None;
        }
        self.expect(TokenKind::Name)
    }

    pub fn number(&mut self) -> Option<Token> {
        self.expect(TokenKind::Number)
    }

    pub fn string(&mut self) -> Option<Token> {
        self.expect(TokenKind::String)
    }

    pub fn cname(&mut self) -> Option<Token> {
        self.expect(TokenKind::CName)
    }

    /// Runs `rule` and puts the cursor back where it was. `Ok(true)` when the
    /// outcome agrees with `positive`.
    pub fn lookahead<T>(
        &mut self,
        positive: bool,
        rule: impl FnOnce(&mut Parser) -> ParseResult<T>,
    ) -> Result<bool, ParseError> {
        let mark = self.mark();
        let matched = rule(self)?.is_some();
        self.position = mark.index();
        Ok(matched == positive)
    }

    /// Escalates a soft failure after a committed alternative
    pub fn expect_forced<T>(&self, result: Option<T>, expected: &str) -> Result<T, ParseError> {
        match result {
            Some(value) => Ok(value),
            None => {
                let position = self.peek().start;
                log::debug!("forced match failed at {}: expected {}", position, expected);
                Err(ParseError::Forced {
                    expected: expected.to_string(),
                    position,
                    mark: self.mark(),
                })
            }
        }
    }

    /// [`Parser::expect_forced`] applied to the outcome of `rule`
    pub fn forced<T>(
        &mut self,
        rule: impl FnOnce(&mut Parser) -> ParseResult<T>,
        expected: &str,
    ) -> Result<T, ParseError> {
        let result = rule(self)?;
        self.expect_forced(result, expected)
    }

    /// Caches the outcome of `body` at the current position under `rule`.
    ///
    /// A repeated visit restores the cached end mark and returns a clone of
    /// the cached value without running `body`. Fatal errors are never cached.
    pub fn memoize<T: Clone + 'static>(
        &mut self,
        rule: RuleId,
        body: impl FnOnce(&mut Parser) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if !self.options.packrat {
            self.profile.record_invocation(rule);
            return body(self);
        }
        let start = self.mark();
        if let Some(hit) = self.replay(rule, start)? {
            return Ok(hit);
        }

        self.profile.memo_misses += 1;
        self.profile.record_invocation(rule);
        log::trace!("memo miss {} at {}", rule, start);
        let result = body(self)?;
        let entry = match &result {
            Some(value) => MemoEntry::Success {
                value: Box::new(value.clone()),
                end: self.mark(),
            },
            None => {
                self.position = start.index();
                MemoEntry::Failure
            }
        };
        self.memo.insert((rule, start), entry);
        Ok(result)
    }

    /// Memoization for a left-recursive rule.
    ///
    /// Seeds the memo with a failure so the recursive call bottoms out, then
    /// re-runs `body` as long as each run ends strictly further than the last
    /// accepted one. The first run that does not advance stops the loop; the
    /// last accepted result stays cached. Every accepted run consumes at least
    /// one token, so the loop cannot run more than `tokens.len()` times.
    pub fn memoize_left_rec<T: Clone + 'static>(
        &mut self,
        rule: RuleId,
        body: impl Fn(&mut Parser) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let start = self.mark();
        if let Some(hit) = self.replay(rule, start)? {
            return Ok(hit);
        }

        self.profile.memo_misses += 1;
        log::trace!("memo miss {} at {}, growing seed", rule, start);
        self.memo.insert((rule, start), MemoEntry::Failure);

        let limit = self.tokens.len() - start.index() + 1;
        let mut accepted: Option<T> = None;
        let mut last_end = start;
        let mut iterations = 0;
        loop {
            if iterations > limit {
                return Err(ParseError::Internal(format!(
                    "left-recursive rule {} kept growing past the end of input",
                    rule
                )));
            }
            iterations += 1;

            self.position = start.index();
            self.profile.record_invocation(rule);
            let Some(value) = body(self)? else {
                break;
            };
            let end = self.mark();
            if end <= last_end {
                break;
            }
            log::trace!("{} at {} grew to {}", rule, start, end);
            self.profile.left_recursion_iterations += 1;
            self.memo.insert(
                (rule, start),
                MemoEntry::Success {
                    value: Box::new(value.clone()),
                    end,
                },
            );
            accepted = Some(value);
            last_end = end;
        }

        self.position = last_end.index();
        Ok(accepted)
    }

    /// Top-level entry: `rule` has to succeed and leave the cursor at the end
    /// of input. Anything else is reported at the furthest token reached.
    pub fn parse_with<T>(
        &mut self,
        rule: impl FnOnce(&mut Parser) -> ParseResult<T>,
    ) -> Result<T, ParseError> {
        match rule(self)? {
            Some(value) if self.at_end() => Ok(value),
            _ => {
                let last = self.tokens.len() - 1;
                let position = self.tokens[self.furthest.min(last)].start;
                log::debug!("parse failed, furthest token at {}", position);
                Err(ParseError::InvalidSyntax { position })
            }
        }
    }

    /// Replays a cached outcome: `Ok(Some(outcome))` on a hit
    fn replay<T: Clone + 'static>(
        &mut self,
        rule: RuleId,
        start: Mark,
    ) -> Result<Option<Option<T>>, ParseError> {
        let hit = match self.memo.get(&(rule, start)) {
            None => return Ok(None),
            Some(MemoEntry::Failure) => None,
            Some(MemoEntry::Success { value, end }) => {
                let value = value.downcast_ref::<T>().cloned().ok_or_else(|| {
                    ParseError::Internal(format!("memo entry of {} holds another type", rule))
                })?;
                Some((value, *end))
            }
        };
        self.profile.memo_hits += 1;
        log::trace!("memo hit {} at {}", rule, start);
        Ok(Some(hit.map(|(value, end)| {
            self.position = end.index();
            value
        })))
    }
}
