// File: crates/hubchart-core/src/expr.rs
// Summary: Restricted arithmetic evaluator for per-series Y adjustments.
// Only numeric literals, unary minus and + - * / ** ^ are accepted.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("unsupported construct {0}")]
    Unsupported(String),
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token at offset {0}")]
    UnexpectedToken(usize),
    #[error("division by zero")]
    DivisionByZero,
    #[error("^ requires integer operands")]
    NonIntegerXor,
    #[error("result is not a finite real number")]
    NotFinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    BitXor,
}

/// Literal value; integer-ness matters for `^` and survives + - * and integer powers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Num),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
enum Tok {
    Num(Num),
    Op(BinOp),
    // '-' and '+' are ambiguous until the parser sees their position.
    Minus,
    Plus,
    LParen,
    RParen,
}

fn tokenize(src: &str) -> Result<Vec<(usize, Tok)>, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        match c {
            ' ' | '\t' => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let mut j = i;
                let mut is_float = false;
                while j < chars.len() && (chars[j].is_ascii_digit() || chars[j] == '.') {
                    is_float |= chars[j] == '.';
                    j += 1;
                }
                if j < chars.len() && (chars[j] == 'e' || chars[j] == 'E') {
                    let mut k = j + 1;
                    if k < chars.len() && (chars[k] == '+' || chars[k] == '-') {
                        k += 1;
                    }
                    if k < chars.len() && chars[k].is_ascii_digit() {
                        while k < chars.len() && chars[k].is_ascii_digit() {
                            k += 1;
                        }
                        is_float = true;
                        j = k;
                    }
                }
                let text: String = chars[i..j].iter().collect();
                let num = if is_float {
                    text.parse::<f64>().map(Num::Float)
                        .map_err(|_| ExprError::BadNumber(text.clone()))?
                } else {
                    match text.parse::<i64>() {
                        Ok(v) => Num::Int(v),
                        Err(_) => Num::Float(text.parse::<f64>().map_err(|_| ExprError::BadNumber(text.clone()))?),
                    }
                };
                out.push((start, Tok::Num(num)));
                i = j;
                continue;
            }
            '+' => out.push((start, Tok::Plus)),
            '-' => out.push((start, Tok::Minus)),
            '*' if chars.get(i + 1) == Some(&'*') => {
                out.push((start, Tok::Op(BinOp::Pow)));
                i += 1;
            }
            '*' => out.push((start, Tok::Op(BinOp::Mul))),
            '/' if chars.get(i + 1) == Some(&'/') => {
                return Err(ExprError::Unsupported("floor division".into()));
            }
            '/' => out.push((start, Tok::Op(BinOp::Div))),
            '^' => out.push((start, Tok::Op(BinOp::BitXor))),
            '(' => out.push((start, Tok::LParen)),
            ')' => out.push((start, Tok::RParen)),
            c if c.is_alphabetic() || c == '_' => {
                let name: String = chars[i..].iter().take_while(|c| c.is_alphanumeric() || **c == '_').collect();
                return Err(ExprError::Unsupported(format!("name '{name}'")));
            }
            other => return Err(ExprError::Unsupported(format!("'{other}'"))),
        }
        i += 1;
    }
    Ok(out)
}

struct Parser {
    toks: Vec<(usize, Tok)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|(_, t)| t)
    }

    fn bump(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).map(|(_, t)| t.clone());
        self.pos += 1;
        t
    }

    fn offset(&self) -> usize {
        self.toks.get(self.pos).map(|(o, _)| *o).unwrap_or(usize::MAX)
    }

    // Lowest precedence: bitwise xor.
    fn xor(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.sum()?;
        while self.peek() == Some(&Tok::Op(BinOp::BitXor)) {
            self.bump();
            let rhs = self.sum()?;
            lhs = Expr::Binary(BinOp::BitXor, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Plus) => BinOp::Add,
                Some(Tok::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Op(BinOp::Mul)) => BinOp::Mul,
                Some(Tok::Op(BinOp::Div)) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            Some(Tok::Minus) => {
                self.bump();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Tok::Plus) => Err(ExprError::Unsupported("unary plus".into())),
            _ => self.power(),
        }
    }

    // `**` binds tighter than a unary minus on its left and is right-associative.
    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        if self.peek() == Some(&Tok::Op(BinOp::Pow)) {
            self.bump();
            let exp = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        let at = self.offset();
        match self.bump() {
            Some(Tok::Num(n)) => Ok(Expr::Literal(n)),
            Some(Tok::LParen) => {
                let inner = self.xor()?;
                match self.bump() {
                    Some(Tok::RParen) => Ok(inner),
                    Some(_) => Err(ExprError::UnexpectedToken(at)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(_) => Err(ExprError::UnexpectedToken(at)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

impl Expr {
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        let mut p = Parser { toks: tokenize(src)?, pos: 0 };
        let expr = p.xor()?;
        if p.pos < p.toks.len() {
            return Err(ExprError::UnexpectedToken(p.offset()));
        }
        Ok(expr)
    }

    pub fn eval(&self) -> Result<Num, ExprError> {
        let out = match self {
            Expr::Literal(n) => *n,
            Expr::Neg(inner) => match inner.eval()? {
                Num::Int(i) => i.checked_neg().map(Num::Int).ok_or(ExprError::NotFinite)?,
                Num::Float(f) => Num::Float(-f),
            },
            Expr::Binary(op, l, r) => apply(*op, l.eval()?, r.eval()?)?,
        };
        match out {
            Num::Float(f) if !f.is_finite() => Err(ExprError::NotFinite),
            n => Ok(n),
        }
    }
}

fn apply(op: BinOp, a: Num, b: Num) -> Result<Num, ExprError> {
    use Num::{Float, Int};
    let int_or_float = |checked: Option<i64>, float: f64| checked.map(Int).unwrap_or(Float(float));
    Ok(match (op, a, b) {
        (BinOp::Add, Int(x), Int(y)) => int_or_float(x.checked_add(y), x as f64 + y as f64),
        (BinOp::Sub, Int(x), Int(y)) => int_or_float(x.checked_sub(y), x as f64 - y as f64),
        (BinOp::Mul, Int(x), Int(y)) => int_or_float(x.checked_mul(y), x as f64 * y as f64),
        (BinOp::Add, x, y) => Float(x.as_f64() + y.as_f64()),
        (BinOp::Sub, x, y) => Float(x.as_f64() - y.as_f64()),
        (BinOp::Mul, x, y) => Float(x.as_f64() * y.as_f64()),
        (BinOp::Div, x, y) => {
            if y.as_f64() == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Float(x.as_f64() / y.as_f64())
        }
        (BinOp::Pow, Int(x), Int(y)) if y >= 0 => {
            let checked = u32::try_from(y).ok().and_then(|e| x.checked_pow(e));
            int_or_float(checked, (x as f64).powf(y as f64))
        }
        (BinOp::Pow, x, y) => {
            if x.as_f64() == 0.0 && y.as_f64() < 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Float(x.as_f64().powf(y.as_f64()))
        }
        (BinOp::BitXor, Int(x), Int(y)) => Int(x ^ y),
        (BinOp::BitXor, _, _) => return Err(ExprError::NonIntegerXor),
    })
}

/// Parse and evaluate an expression string.
pub fn eval_expr(src: &str) -> Result<f64, ExprError> {
    Ok(Expr::parse(src)?.eval()?.as_f64())
}

/// Apply an adjuster such as `*2+1` to every observation by evaluating
/// `<observation><adjuster>`. NaN observations stay NaN. Any failure
/// rejects the whole adjustment so the caller can keep the series as is.
pub fn adjust_values(values: &[f64], adjuster: &str) -> Result<Vec<f64>, ExprError> {
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return Ok(v);
            }
            // Debug formatting keeps the float/int distinction of the stored text ("3.0").
            eval_expr(&format!("{v:?}{adjuster}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_and_precedence() {
        assert_eq!(eval_expr("obs").unwrap_err(), ExprError::Unsupported("name 'obs'".into()));
        assert_eq!(eval_expr("2*3+4").unwrap(), 10.0);
        assert_eq!(eval_expr("2+3*4").unwrap(), 14.0);
        assert_eq!(eval_expr("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval_expr("-2**2").unwrap(), -4.0);
        assert_eq!(eval_expr("2**-1").unwrap(), 0.5);
        assert_eq!(eval_expr("2**3**2").unwrap(), 512.0);
        assert_eq!(eval_expr("7/2").unwrap(), 3.5);
        assert_eq!(eval_expr("1.5e1-5").unwrap(), 10.0);
    }

    #[test]
    fn xor_only_on_integers() {
        assert_eq!(eval_expr("6^3").unwrap(), 5.0);
        assert_eq!(eval_expr("1+1^1").unwrap(), 3.0);
        assert_eq!(eval_expr("6.0^3"), Err(ExprError::NonIntegerXor));
    }

    #[test]
    fn rejects_everything_else() {
        for src in ["__import__('os')", "2 % 3", "7 // 2", "+3", "abs(-1)", "1 if 1 else 0", "[1]", "1,2", "2 <  3", ""] {
            assert!(eval_expr(src).is_err(), "{src} should be rejected");
        }
        assert_eq!(eval_expr("1/0"), Err(ExprError::DivisionByZero));
        assert_eq!(eval_expr("(1+2"), Err(ExprError::UnexpectedEnd));
    }

    #[test]
    fn adjuster_applies_per_observation() {
        assert_eq!(adjust_values(&[1.0, 2.0, 3.0], "*2+1").unwrap(), vec![3.0, 5.0, 7.0]);
        let out = adjust_values(&[f64::NAN, 10.0], "/2").unwrap();
        assert!(out[0].is_nan());
        assert_eq!(out[1], 5.0);
        assert!(adjust_values(&[1.0, 0.0], "/0").is_err());
        assert!(adjust_values(&[1.0], "; rm -rf /").is_err());
    }
}
