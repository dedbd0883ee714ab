use itertools::Itertools;

use super::{LoadErrorType, Result, BYTE_ORDER_MARK};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Nonterminal(char),
    Terminal(char),
    Epsilon
}

// Uppercase letters name nonterminals, everything else that is not
// whitespace is a terminal
pub fn classify(c: char) -> Token {
    if c == 'ε' {
        Token::Epsilon
    } else if c.is_uppercase() {
        Token::Nonterminal(c)
    } else {
        Token::Terminal(c)
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let line = line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(line);
    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.next() {
        if c == '-' && line_chars.next_if_eq(&'>').is_some() {
            tokens.push(Token::Arrow);
        } else if c.is_whitespace() {
            // Skip the whole run at once
            line_chars.peeking_take_while(|c| c.is_whitespace()).for_each(drop);
        } else if c.is_control() {
            return Err(LoadErrorType::UnexpectedCharacter(c));
        } else {
            tokens.push(classify(c));
        }
    }

    Ok(tokens)
}
