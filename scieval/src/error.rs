use mathlex::LexError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum EvalErr {
    UnmatchedParens,
    EmptyGroup,
    MissingOperand(String),
    MissingArgument(String),
    UnexpectedToken(String),
    Domain(String),
    // broken evaluator invariant, never caused by input alone
    Internal(String),
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalErr::UnmatchedParens => write!(f, "unmatched parentheses"),
            EvalErr::EmptyGroup => write!(f, "empty expression"),
            EvalErr::MissingOperand(found) => write!(f, "missing operand before {}", found),
            EvalErr::MissingArgument(func) => write!(f, "function '{}' needs a parenthesized argument", func),
            EvalErr::UnexpectedToken(found) => write!(f, "unexpected '{}'", found),
            EvalErr::Domain(what) => write!(f, "{} is not a finite number", what),
            EvalErr::Internal(what) => write!(f, "internal error: {}", what),
        }
    }
}

impl std::error::Error for EvalErr {}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Lex(LexError),
    Eval(EvalErr),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Eval(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self { Error::Lex(e) }
}

impl From<EvalErr> for Error {
    fn from(e: EvalErr) -> Self { Error::Eval(e) }
}
