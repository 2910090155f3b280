use crate::scanner::Scanner;

#[test]
fn extremes() {
    let mut s = Scanner::new("just a test buffer@".chars());
    assert_eq!(s.curr(), None);
    assert_eq!(s.next(), Some('j'));
    while s.next() != Some('@') {}
    assert_eq!(s.curr(), Some('@'));
    assert_eq!(s.next(), None);
    assert_eq!(s.next(), None);
    assert_eq!(s.curr(), None);
}

#[test]
fn extract() {
    let mut s = Scanner::new("just a test buffer@".chars());
    for _ in 0..4 { assert!(s.next().is_some()); }
    assert_eq!(s.extract().iter().cloned().collect::<String>(), "just");
    assert_eq!(s.offset(), 4);
    assert_eq!(s.peek(), Some(' '));
    assert_eq!(s.next(), Some(' '));
    for _ in 0..6 { assert!(s.next().is_some()); }
    assert_eq!(s.extract_string(), " a test");
    assert_eq!(s.offset(), 11);
    assert_eq!(s.next(), Some(' '));
}

#[test]
fn extract_at_end() {
    let mut s = Scanner::new("ab".chars());
    while s.next().is_some() {}
    assert_eq!(s.extract_string(), "ab");
    assert_eq!(s.offset(), 2);
    assert_eq!(s.peek(), None);
}

#[test]
fn backtrack() {
    let mut s = Scanner::new("heey".chars());
    let start = s.pos();
    assert_eq!(s.next(), Some('h'));
    assert_eq!(s.next(), Some('e'));
    assert!(s.set_pos(start));
    assert_eq!(s.peek(), Some('h'));
    assert!(!s.set_pos(10));
}

#[test]
fn accept() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept_any(&['h', 'e']), Some('h'));
    assert_eq!(s.curr(), Some('h'));
    assert_eq!(s.accept_any(&['h', 'e']), Some('e'));
    assert_eq!(s.accept(&'e'), Some('e'));
    assert_eq!(s.accept(&'e'), None);
    assert_eq!(s.accept_any(&['h', 'e', 'y']), Some('y'));
    assert_eq!(s.curr(), Some('y'));
    assert_eq!(s.peek(), Some(' '));
}

#[test]
fn skips() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept(&'h'), Some('h'));
    assert!(s.skip_all(&['h', 'e', 'y']));
    assert!(!s.skip_all(&['h', 'e', 'y']));
    assert_eq!(s.curr(), Some('y'));
    s.ignore_ws();
    assert_eq!(s.offset(), 6);
    assert_eq!(s.extract_string(), "");
    assert_eq!(s.next(), Some('y'));
}

#[test]
fn ignore_ws() {
    let mut s = Scanner::new(" \t\r\n 7".chars());
    s.ignore_ws();
    assert_eq!(s.offset(), 5);
    assert_eq!(s.next(), Some('7'));
}
