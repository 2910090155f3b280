use crate::scanner::Scanner;

static WHITE: &[char] = &[' ', '\n', '\r', '\t'];
static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
static PARENS: &[char] = &['(', ')'];
static OPS: &[char] = &['+', '-', '*', '/', '&'];

pub static FUNCTIONS: &[&str] = &[
    "log", "ln", "exp", "sqrt", "abs", "atan", "acos", "asin",
    "sinh", "cosh", "tanh", "tan", "sin", "cos",
];

/*
 * The scan_* rules expect the scanner to be at a clear start, ie: right
 * after ignore_ws() or a previous successful rule. A failed rule leaves
 * the scanner where it found it.
 */
impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    pub fn ignore_ws(&mut self) {
        self.skip_all(WHITE);
        self.ignore();
    }

    // scan numbers like [0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?
    pub fn scan_number(&mut self) -> Option<String> {
        // require integer part
        if !self.skip_all(DIGITS) {
            return None;
        }
        // a dot not followed by digits isn't part of the number
        let backtrack = self.pos();
        if self.accept(&'.').is_some() && !self.skip_all(DIGITS) {
            self.set_pos(backtrack);
            return Some(self.extract_string()); // integer
        }
        // same for an exponent marker without digits
        let backtrack = self.pos();
        if self.accept_any(&['e', 'E']).is_some() {
            self.accept_any(&['+', '-']); // exponent sign is optional
            if !self.skip_all(DIGITS) {
                self.set_pos(backtrack);
            }
        }
        Some(self.extract_string())
    }

    pub fn scan_paren(&mut self) -> Option<char> {
        let paren = self.accept_any(PARENS)?;
        self.ignore();
        Some(paren)
    }

    pub fn scan_math_op(&mut self) -> Option<char> {
        let op = self.accept_any(OPS)?;
        self.ignore();
        Some(op)
    }

    // Case-insensitive match against FUNCTIONS keeping the longest name
    // found while growing the window. Word boundaries aren't checked, so
    // 'tangent' scans as 'tan' and leaves 'gent' behind.
    pub fn scan_function(&mut self) -> Option<String> {
        let longest = FUNCTIONS.iter().map(|f| f.len()).max().unwrap_or(0);
        let backtrack = self.pos();
        let mut window = String::new();
        let mut matched = None;
        while window.len() < longest {
            match self.next() {
                Some(c) if c.is_ascii_alphabetic() => window.push(c.to_ascii_lowercase()),
                _ => break,
            }
            if FUNCTIONS.contains(&window.as_str()) {
                matched = Some((self.pos(), window.clone()));
            }
        }
        match matched {
            Some((end, name)) => {
                self.set_pos(end);
                self.ignore();
                Some(name)
            }
            None => {
                self.set_pos(backtrack);
                None
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::scanner::Scanner;

    #[test]
    fn scan_number() {
        let tests = vec![
            ("123 text", "123"),
            ("123.0123", "123.0123"),
            ("123.+123", "123"),
            ("123e10 text", "123e10"),
            ("123e+10text", "123e+10"),
            ("555.77e-7 else", "555.77e-7"),
            ("1e5.8", "1e5"),
            ("7E", "7"),
            ("42e-", "42"),
            ("0.5E-3", "0.5E-3"),
        ];
        for (input, expected) in tests.iter() {
            let result = Scanner::new(input.chars()).scan_number();
            assert_eq!(Some(expected.to_string()), result);
        }
    }

    #[test]
    fn scan_number_needs_digit() {
        for input in [".5", "-3", "e10", ""].iter() {
            assert_eq!(None, Scanner::new(input.chars()).scan_number());
        }
    }

    #[test]
    fn scan_number_leaves_rest() {
        let mut s = Scanner::new("123.+123".chars());
        assert_eq!(s.scan_number(), Some(format!("123")));
        assert_eq!(s.offset(), 3);
        assert_eq!(s.peek(), Some('.'));
    }

    #[test]
    fn scan_parens() {
        assert_eq!(Scanner::new("(8131)".chars()).scan_paren(), Some('('));
        assert_eq!(Scanner::new(")dsds".chars()).scan_paren(), Some(')'));
        assert_eq!(Scanner::new("123()".chars()).scan_paren(), None);
    }

    #[test]
    fn scan_math_ops() {
        let tests = vec![
            ("+123", Some('+')), ("-", Some('-')), ("**", Some('*')),
            ("/123", Some('/')), ("&123", Some('&')), ("123", None),
            ("^2", None), ("%", None),
        ];
        for (input, expected) in tests.iter() {
            assert_eq!(*expected, Scanner::new(input.chars()).scan_math_op());
        }
    }

    #[test]
    fn scan_functions() {
        let tests = vec![
            ("logn", Some("log")),
            ("Ln", Some("ln")),
            ("ExP", Some("exp")),
            ("Sq_rt", None),
            ("ABStraction", Some("abs")),
            ("sIn", Some("sin")),
            ("AsiN", Some("asin")),
            ("tanh(1)", Some("tanh")),
            ("tangent", Some("tan")),
            ("COSH", Some("cosh")),
            ("si  n", None),
            ("x", None),
        ];
        for (input, expected) in tests.iter() {
            let result = Scanner::new(input.chars()).scan_function();
            assert_eq!(expected.map(|s| s.to_string()), result);
        }
    }

    #[test]
    fn failed_function_rewinds() {
        let mut s = Scanner::new("sq_rt".chars());
        assert_eq!(s.scan_function(), None);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.peek(), Some('s'));
    }
}
