use crate::error::EvalErr;
use mathlex::MathToken;
use std::fmt;

// Lexemes only live until prepare() rewrites them
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Lexeme(MathToken),
    Number(f64),
    BOp(char),
    Function(String),
    OParen(usize), // handle of the matching CParen
    CParen(usize), // handle of the matching OParen
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Lexeme(token) => write!(f, "{}", token),
            Cell::Number(x) => write!(f, "{}", x),
            Cell::BOp(op) => write!(f, "{}", op),
            Cell::Function(name) => write!(f, "{}", name),
            Cell::OParen(_) => write!(f, "("),
            Cell::CParen(_) => write!(f, ")"),
        }
    }
}

struct Slot {
    cell: Cell,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list of `Cell`s stored in an arena.
///
/// Handles are indices into the arena and stay valid for the life of the
/// sequence; a removed cell is unlinked but keeps its slot, so handles are
/// never reused. All edits are O(1).
pub struct TokenSequence {
    slots: Vec<Slot>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl TokenSequence {
    pub fn new() -> Self {
        TokenSequence{slots: Vec::new(), head: None, tail: None, len: 0}
    }

    // Link parens, parse numbers and wrap everything in an outer group
    pub fn prepare(tokens: Vec<MathToken>) -> Result<Self, EvalErr> {
        let mut seq = TokenSequence::new();
        for token in tokens {
            seq.push_back(Cell::Lexeme(token));
        }
        seq.link_parens()?;
        seq.materialize()?;
        seq.enclose();
        Ok(seq)
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn head(&self) -> Option<usize> { self.head }

    pub fn next(&self, at: usize) -> Option<usize> { self.slots[at].next }

    pub fn prev(&self, at: usize) -> Option<usize> { self.slots[at].prev }

    pub fn cell(&self, at: usize) -> &Cell { &self.slots[at].cell }

    pub fn set(&mut self, at: usize, cell: Cell) {
        self.slots[at].cell = cell;
    }

    pub fn iter(&self) -> Cells<'_> {
        Cells{seq: self, at: self.head}
    }

    fn alloc(&mut self, cell: Cell, prev: Option<usize>, next: Option<usize>) -> usize {
        let at = self.slots.len();
        self.slots.push(Slot{cell, prev, next});
        match prev {
            Some(p) => self.slots[p].next = Some(at),
            None => self.head = Some(at),
        }
        match next {
            Some(n) => self.slots[n].prev = Some(at),
            None => self.tail = Some(at),
        }
        self.len += 1;
        at
    }

    pub fn push_back(&mut self, cell: Cell) -> usize {
        self.alloc(cell, self.tail, None)
    }

    pub fn push_front(&mut self, cell: Cell) -> usize {
        self.alloc(cell, None, self.head)
    }

    pub fn insert_after(&mut self, at: usize, cell: Cell) -> usize {
        let next = self.slots[at].next;
        self.alloc(cell, Some(at), next)
    }

    pub fn insert_before(&mut self, at: usize, cell: Cell) -> usize {
        let prev = self.slots[at].prev;
        self.alloc(cell, prev, Some(at))
    }

    // removing an already unlinked cell is a no-op
    pub fn remove(&mut self, at: usize) {
        let (prev, next) = (self.slots[at].prev, self.slots[at].next);
        if prev.is_none() && next.is_none() && self.head != Some(at) {
            return;
        }
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[at].prev = None;
        self.slots[at].next = None;
        self.len -= 1;
    }

    // Pair up parentheses with a stack and cross-link each pair
    fn link_parens(&mut self) -> Result<(), EvalErr> {
        let mut open = Vec::new();
        let mut at = self.head;
        while let Some(i) = at {
            match self.slots[i].cell {
                Cell::Lexeme(MathToken::OParen) => open.push(i),
                Cell::Lexeme(MathToken::CParen) => {
                    let o = open.pop().ok_or(EvalErr::UnmatchedParens)?;
                    self.slots[o].cell = Cell::OParen(i);
                    self.slots[i].cell = Cell::CParen(o);
                }
                _ => (),
            }
            at = self.slots[i].next;
        }
        if !open.is_empty() {
            return Err(EvalErr::UnmatchedParens);
        }
        Ok(())
    }

    // Parse number literals once and unwrap the remaining lexemes
    fn materialize(&mut self) -> Result<(), EvalErr> {
        let mut at = self.head;
        while let Some(i) = at {
            let cell = match self.slots[i].cell {
                Cell::Lexeme(MathToken::Number(ref text)) => match text.parse::<f64>() {
                    Ok(x) if x.is_finite() => Cell::Number(x),
                    Ok(_) => return Err(EvalErr::Domain(text.clone())),
                    Err(_) => return Err(invariant(format!("bad number literal '{}'", text))),
                },
                Cell::Lexeme(MathToken::BOp(op)) => Cell::BOp(op),
                Cell::Lexeme(MathToken::Function(ref name)) => Cell::Function(name.clone()),
                Cell::Lexeme(ref token) => {
                    return Err(invariant(format!("unlinked parenthesis '{}'", token)));
                }
                ref other => other.clone(),
            };
            self.slots[i].cell = cell;
            at = self.slots[i].next;
        }
        Ok(())
    }

    // Surround everything with a synthetic group
    fn enclose(&mut self) {
        let open = self.push_front(Cell::OParen(0));
        let close = self.push_back(Cell::CParen(open));
        self.slots[open].cell = Cell::OParen(close);
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = self.iter().map(|c| c.to_string()).collect::<Vec<String>>();
        write!(f, "{}", cells.join(" "))
    }
}

pub struct Cells<'a> {
    seq: &'a TokenSequence,
    at: Option<usize>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a Cell;
    fn next(&mut self) -> Option<Self::Item> {
        let at = self.at?;
        self.at = self.seq.next(at);
        Some(self.seq.cell(at))
    }
}

// aborts debug builds
pub fn invariant(what: String) -> EvalErr {
    debug_assert!(false, "{}", what);
    EvalErr::Internal(what)
}
