//! Arithmetic over sanitized input.
//!
//! Tokenizes numbers, `+ - * / %` and parentheses, then evaluates with a
//! shunting-yard pass over explicit stacks. `* / %` share one left
//! associative level above `+ -`; prefix `+`/`-` bind tighter than both.
//! Literals follow strict-mode rules: no leading zeros (`05`) and no
//! adjacent `++`/`--`.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

/// Why an expression could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl ParseError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let token = match c {
            b' ' => {
                pos += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                let start = pos;
                while pos < bytes.len() && matches!(bytes[pos], b'0'..=b'9' | b'.') {
                    pos += 1;
                }
                let literal = &input[start..pos];
                tokens.push((start, Token::Number(parse_literal(literal, start)?)));
                continue;
            }
            b'+' | b'-' => {
                if bytes.get(pos + 1) == Some(&c) {
                    return Err(ParseError::new(pos, "increment/decrement operator"));
                }
                if c == b'+' { Token::Plus } else { Token::Minus }
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'%' => Token::Percent,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            _ => {
                return Err(ParseError::new(pos, "unexpected character"));
            }
        };
        tokens.push((pos, token));
        pos += 1;
    }

    Ok(tokens)
}

fn parse_literal(literal: &str, position: usize) -> Result<f64, ParseError> {
    let mut digits = literal.bytes();
    if let (Some(b'0'), Some(b'0'..=b'9')) = (digits.next(), digits.next()) {
        return Err(ParseError::new(position, "leading zero in number"));
    }

    literal
        .parse::<f64>()
        .map_err(|_| ParseError::new(position, format!("invalid number '{}'", literal)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,
    Pos,
    Open,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Neg | Self::Pos => 3,
        }
    }
}

fn apply(op: Op, values: &mut Vec<f64>, position: usize) -> Result<(), ParseError> {
    let missing = || ParseError::new(position, "missing operand");

    let value = match op {
        Op::Neg => -values.pop().ok_or_else(missing)?,
        Op::Pos => values.pop().ok_or_else(missing)?,
        Op::Open => return Err(ParseError::new(position, "unclosed parenthesis")),
        _ => {
            let rhs = values.pop().ok_or_else(missing)?;
            let lhs = values.pop().ok_or_else(missing)?;
            match op {
                Op::Add => lhs + rhs,
                Op::Sub => lhs - rhs,
                Op::Mul => lhs * rhs,
                Op::Div => lhs / rhs,
                // Remainder takes the sign of the dividend.
                _ => lhs % rhs,
            }
        }
    };

    values.push(value);
    Ok(())
}

/// Evaluate a sanitized arithmetic expression.
///
/// Division by zero is not an error here; it produces an infinite or NaN
/// value for the caller to reject.
pub fn eval_arithmetic(input: &str) -> Result<f64, ParseError> {
    let tokens = tokenize(input)?;
    let mut values: Vec<f64> = Vec::new();
    let mut ops: Vec<(usize, Op)> = Vec::new();
    let mut expect_operand = true;

    for (pos, token) in tokens {
        if expect_operand {
            match token {
                Token::Number(n) => {
                    values.push(n);
                    expect_operand = false;
                }
                Token::Plus => ops.push((pos, Op::Pos)),
                Token::Minus => ops.push((pos, Op::Neg)),
                Token::LParen => ops.push((pos, Op::Open)),
                _ => return Err(ParseError::new(pos, "expected a number")),
            }
            continue;
        }

        let op = match token {
            Token::Plus => Op::Add,
            Token::Minus => Op::Sub,
            Token::Star => Op::Mul,
            Token::Slash => Op::Div,
            Token::Percent => Op::Rem,
            Token::RParen => {
                loop {
                    match ops.pop() {
                        Some((_, Op::Open)) => break,
                        Some((op_pos, op)) => apply(op, &mut values, op_pos)?,
                        None => return Err(ParseError::new(pos, "unmatched ')'")),
                    }
                }
                continue;
            }
            Token::Number(_) | Token::LParen => {
                return Err(ParseError::new(pos, "expected an operator"));
            }
        };

        // Left associative: pop everything at the same level or tighter.
        while let Some(&(op_pos, top)) = ops.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            ops.pop();
            apply(top, &mut values, op_pos)?;
        }
        ops.push((pos, op));
        expect_operand = true;
    }

    if expect_operand {
        return Err(ParseError::new(input.len(), "unexpected end of input"));
    }

    while let Some((op_pos, op)) = ops.pop() {
        apply(op, &mut values, op_pos)?;
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(ParseError::new(0, "malformed expression")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        eval_arithmetic(input).unwrap()
    }

    #[test]
    fn test_multiplicative_level_is_left_associative() {
        assert_eq!(eval("2*3%4"), 2.0);
        assert_eq!(eval("100*2%7"), 4.0);
        assert_eq!(eval("1-2*3%4"), -1.0);
        assert_eq!(eval("9%4/2"), 0.5);
        assert_eq!(eval("8/4/2"), 1.0);
        assert_eq!(eval("10-4-3"), 3.0);
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval("-7%3"), -1.0);
        assert_eq!(eval("-2*3"), -6.0);
        assert_eq!(eval("2*-3"), -6.0);
        assert_eq!(eval("1- -1"), 2.0);
        assert_eq!(eval("-+5"), -5.0);
        assert_eq!(eval("-(2+3)"), -5.0);
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval(" ( 1 + 2 ) * ( 3 ) "), 9.0);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(eval("0.5+.5"), 1.0);
        assert_eq!(eval("3."), 3.0);
        assert_eq!(eval("0"), 0.0);
    }

    #[test]
    fn test_strict_mode_rejections() {
        for input in ["1--1", "--5", "++5", "1+05", "00", "1.2.3", "."] {
            assert!(eval_arithmetic(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_malformed_input_rejected() {
        for input in ["", "2+", "*2", "()", "(1+2", "1+2)", "1 2", "(2)(3)", "2(3)"] {
            assert!(eval_arithmetic(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_division_by_zero_is_not_finite() {
        assert!(eval("5/0").is_infinite());
        assert!(eval("0/0").is_nan());
        assert!(eval("5%0").is_nan());
    }

    #[test]
    fn test_no_length_or_depth_limit() {
        let long_sum = vec!["1"; 3000].join("+");
        assert!(long_sum.len() > 4096);
        assert_eq!(eval(&long_sum), 3000.0);

        let nested = format!("{}7{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(eval(&nested), 7.0);
    }

    #[test]
    fn test_error_position() {
        let err = eval_arithmetic("1+*2").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
