mod scanner;
mod char_scanner;
mod math_tokenizer;

pub use scanner::Scanner;
pub use char_scanner::FUNCTIONS;
pub use math_tokenizer::{tokenize, LexError, MathToken, MathTokenizer};

#[cfg(test)]
mod scanner_test;
