use crate::error::EvalErr;
use crate::sequence::{invariant, Cell, TokenSequence};
use mathlex::MathToken;

const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;
const POWER: u8 = 3;

pub fn priority(op: char) -> Option<u8> {
    match op {
        '+' | '-' => Some(ADDITIVE),
        '*' | '/' => Some(MULTIPLICATIVE),
        '&' => Some(POWER),
        _ => None,
    }
}

fn right_assoc(prio: u8) -> bool {
    prio == POWER
}

fn call(func: &str, x: f64) -> Option<f64> {
    let y = match func {
        "log" => x.log10(),
        "ln" => x.ln(),
        "exp" => x.exp(),
        "sqrt" => x.sqrt(),
        "abs" => x.abs(),
        "atan" => x.atan(),
        "acos" => x.acos(),
        "asin" => x.asin(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "tan" => x.tan(),
        "sin" => x.sin(),
        "cos" => x.cos(),
        _ => return None,
    };
    Some(y)
}

fn finite(value: f64, what: impl FnOnce() -> String) -> Result<f64, EvalErr> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalErr::Domain(what()))
    }
}

pub struct Evaluator {
    seq: TokenSequence,
}

impl Evaluator {
    pub fn new(tokens: Vec<MathToken>) -> Result<Self, EvalErr> {
        Ok(Evaluator{seq: TokenSequence::prepare(tokens)?})
    }

    pub fn evaluate(mut self) -> Result<f64, EvalErr> {
        tracing::debug!("reducing {}", self.seq);
        let root = self.seq.head().ok_or_else(|| invariant(format!("missing outer group")))?;
        let result = self.reduce_group(root)?;
        if self.seq.len() != 1 {
            return Err(invariant(format!("leftover cells: {}", self.seq)));
        }
        let value = self.number(result)?;
        tracing::debug!("result {}", value);
        Ok(value)
    }

    fn number(&self, at: usize) -> Result<f64, EvalErr> {
        match *self.seq.cell(at) {
            Cell::Number(x) => Ok(x),
            ref other => Err(invariant(format!("expected a number, found '{}'", other))),
        }
    }

    // The outer group's CParen is the tail and stands for the end of input
    fn missing_operand(&self, at: Option<usize>) -> EvalErr {
        match at {
            Some(at) if self.seq.next(at).is_some() => {
                EvalErr::MissingOperand(format!("'{}'", self.seq.cell(at)))
            }
            _ => EvalErr::MissingOperand(format!("end of input")),
        }
    }

    // The operator right after `at` and its priority, if there's one
    fn operator_after(&self, at: usize) -> Option<(usize, u8)> {
        let next = self.seq.next(at)?;
        match *self.seq.cell(next) {
            Cell::BOp(op) => priority(op).map(|prio| (next, prio)),
            _ => None,
        }
    }

    // Collapse a group into the value it holds, dropping both parens
    fn reduce_group(&mut self, open: usize) -> Result<usize, EvalErr> {
        let close = match *self.seq.cell(open) {
            Cell::OParen(close) => close,
            ref other => return Err(invariant(format!("group starts at '{}'", other))),
        };
        let first = match self.seq.next(open) {
            Some(at) if at != close => at,
            _ => return Err(EvalErr::EmptyGroup),
        };
        let value = self.resolve_value(first)?;
        let value = self.reduce_expr(value, ADDITIVE)?;
        match self.seq.next(value) {
            Some(at) if at == close => (),
            Some(at) => return Err(EvalErr::UnexpectedToken(self.seq.cell(at).to_string())),
            None => return Err(invariant(format!("group without closing parenthesis"))),
        }
        self.seq.remove(open);
        self.seq.remove(close);
        Ok(value)
    }

    fn resolve_value(&mut self, at: usize) -> Result<usize, EvalErr> {
        match self.seq.cell(at).clone() {
            Cell::Number(_) => Ok(at),
            Cell::OParen(_) => self.reduce_group(at),
            Cell::Function(name) => self.apply_function(at, &name),
            Cell::BOp('-') => self.negate(at),
            _ => Err(self.missing_operand(Some(at))),
        }
    }

    // A run of unary minus becomes '-1 *' or '1 *' depending on its parity.
    // The product binds looser than '&' so '-2&2' is -4.
    fn negate(&mut self, at: usize) -> Result<usize, EvalErr> {
        let mut negative = true;
        while let Some(next) = self.seq.next(at) {
            if *self.seq.cell(next) != Cell::BOp('-') {
                break;
            }
            self.seq.remove(next);
            negative = !negative;
        }
        let operand = self.seq.next(at).ok_or_else(|| self.missing_operand(None))?;
        let sign = if negative { -1.0 } else { 1.0 };
        tracing::trace!("unary minus run -> {} *", sign);
        self.seq.set(at, Cell::Number(sign));
        self.seq.insert_before(operand, Cell::BOp('*'));
        Ok(at)
    }

    // A binary '-' followed by more '-': an even total count is an addition
    fn collapse_minus_run(&mut self, op: usize) {
        if *self.seq.cell(op) != Cell::BOp('-') {
            return;
        }
        let mut subtract = true;
        while let Some(next) = self.seq.next(op) {
            if *self.seq.cell(next) != Cell::BOp('-') {
                break;
            }
            self.seq.remove(next);
            subtract = !subtract;
        }
        if !subtract {
            tracing::trace!("binary minus run -> +");
            self.seq.set(op, Cell::BOp('+'));
        }
    }

    fn apply_function(&mut self, at: usize, name: &str) -> Result<usize, EvalErr> {
        let open = self.seq.next(at)
            .filter(|&next| matches!(self.seq.cell(next), Cell::OParen(_)))
            .ok_or_else(|| EvalErr::MissingArgument(name.to_string()))?;
        let arg = self.reduce_group(open)?;
        let x = self.number(arg)?;
        let y = call(name, x).ok_or_else(|| invariant(format!("unknown function '{}'", name)))?;
        let y = finite(y, || format!("{}({})", name, x))?;
        tracing::trace!("{}({}) = {}", name, x, y);
        self.seq.set(at, Cell::Number(y));
        self.seq.remove(arg);
        Ok(at)
    }

    // Precedence climbing: fold every operator of priority >= min_prio into lhs
    fn reduce_expr(&mut self, mut lhs: usize, min_prio: u8) -> Result<usize, EvalErr> {
        while let Some((op, prio)) = self.operator_after(lhs) {
            if prio < min_prio {
                break;
            }
            self.collapse_minus_run(op);
            let next = self.seq.next(op);
            let mut rhs = match next {
                Some(at) => self.resolve_value(at)?,
                None => return Err(self.missing_operand(None)),
            };
            // let tighter operators (or a right associative chain) take rhs first
            while let Some((_, next_prio)) = self.operator_after(rhs) {
                if next_prio > prio || (next_prio == prio && right_assoc(prio)) {
                    rhs = self.reduce_expr(rhs, next_prio)?;
                } else {
                    break;
                }
            }
            lhs = self.combine(lhs, op, rhs)?;
        }
        Ok(lhs)
    }

    // Splice 'lhs op rhs' into lhs
    fn combine(&mut self, lhs: usize, op: usize, rhs: usize) -> Result<usize, EvalErr> {
        let (l, r) = (self.number(lhs)?, self.number(rhs)?);
        let symbol = match *self.seq.cell(op) {
            Cell::BOp(symbol) => symbol,
            ref other => return Err(invariant(format!("expected an operator, found '{}'", other))),
        };
        let value = match symbol {
            '+' => l + r,
            '-' => l - r,
            '*' => l * r,
            '/' => l / r,
            '&' => l.powf(r),
            _ => return Err(invariant(format!("unknown operator '{}'", symbol))),
        };
        let value = finite(value, || format!("{} {} {}", l, symbol, r))?;
        tracing::trace!("{} {} {} = {}", l, symbol, r, value);
        self.seq.set(lhs, Cell::Number(value));
        self.seq.remove(op);
        self.seq.remove(rhs);
        Ok(lhs)
    }
}

pub fn evaluate(tokens: Vec<MathToken>) -> Result<f64, EvalErr> {
    Evaluator::new(tokens)?.evaluate()
}
