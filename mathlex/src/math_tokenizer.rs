use crate::scanner::Scanner;
use std::fmt;


#[derive(Clone, PartialEq, Debug)]
pub enum MathToken {
    Number(String), // literal text, parsed by the evaluator
    BOp(char),
    Function(String),
    OParen, CParen,
}

impl fmt::Display for MathToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathToken::Number(text) => write!(f, "{}", text),
            MathToken::BOp(op) => write!(f, "{}", op),
            MathToken::Function(name) => write!(f, "{}", name),
            MathToken::OParen => write!(f, "("),
            MathToken::CParen => write!(f, ")"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct LexError {
    pub position: usize,
    pub found: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unexpected character '{}' at position {}", self.found, self.position)
    }
}

impl std::error::Error for LexError {}

pub struct MathTokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
    failed: bool,
}

impl<I: Iterator<Item=char>> MathTokenizer<I> {
    pub fn new(source: I) -> Self {
        MathTokenizer{src: Scanner::new(source), failed: false}
    }

    fn get_token(&mut self) -> Option<Result<MathToken, LexError>> {
        self.src.ignore_ws();
        // order matters: number, paren, operator, function
        if let Some(num) = self.src.scan_number() {
            Some(Ok(MathToken::Number(num)))
        } else if let Some(paren) = self.src.scan_paren() {
            match paren {
                '(' => Some(Ok(MathToken::OParen)),
                _ => Some(Ok(MathToken::CParen)),
            }
        } else if let Some(op) = self.src.scan_math_op() {
            Some(Ok(MathToken::BOp(op)))
        } else if let Some(name) = self.src.scan_function() {
            Some(Ok(MathToken::Function(name)))
        } else {
            let position = self.src.offset();
            self.src.peek().map(|found| Err(LexError{position, found}))
        }
    }
}

impl<I: Iterator<Item=char>> Iterator for MathTokenizer<I> {
    type Item = Result<MathToken, LexError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.get_token();
        match token {
            Some(Ok(ref t)) => tracing::trace!("token {:?}", t),
            Some(Err(ref e)) => {
                tracing::trace!("lex error: {}", e);
                self.failed = true;
            }
            None => (),
        }
        token
    }
}

pub fn tokenize(source: &str) -> Result<Vec<MathToken>, LexError> {
    MathTokenizer::new(source.chars()).collect()
}
