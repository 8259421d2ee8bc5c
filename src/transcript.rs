//! Protocol messages exchanged in one authentication round.
//!
//! The reader sends the challenge `A || B || C`, the tag answers with
//! `D || E`. A [`Transcript`] is what an eavesdropper on the air interface
//! sees for one accepted round.

use crate::width::Word;

/// Reader-to-tag messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub a: Word,
    pub b: Word,
    pub c: Word,
}

impl Challenge {
    pub fn new(a: Word, b: Word, c: Word) -> Self {
        Self { a, b, c }
    }
}

/// Tag-to-reader messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Response {
    pub d: Word,
    pub e: Word,
}

impl Response {
    pub fn new(d: Word, e: Word) -> Self {
        Self { d, e }
    }

    pub fn into_pair(self) -> (Word, Word) {
        (self.d, self.e)
    }
}

/// All five messages of one accepted round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transcript {
    pub a: Word,
    pub b: Word,
    pub c: Word,
    pub d: Word,
    pub e: Word,
}

impl Transcript {
    pub fn new(challenge: Challenge, response: Response) -> Self {
        Self {
            a: challenge.a,
            b: challenge.b,
            c: challenge.c,
            d: response.d,
            e: response.e,
        }
    }

    pub fn challenge(&self) -> Challenge {
        Challenge::new(self.a, self.b, self.c)
    }

    pub fn response(&self) -> Response {
        Response::new(self.d, self.e)
    }
}
