//! TextGrid読み込み
//!
//! Praatのテキスト形式（ロング・ショートとも）を読む。どちらの形式も
//! 値の並び順は同じなので、`xmin =` や `item [1]:` などのラベルを
//! 読み飛ばし、数値・文字列・フラグだけを順に取り出して解釈する。
//! UTF-8 と BOM付きUTF-16 に対応。バイナリ形式は扱わない。

mod types;

pub use types::{Interval, Point, TextGrid, Tier, TierItems};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{line}行目: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Text(String),
    Flag(String),
}

/// バイト列を文字列にする（UTF-16はBOMで判定）
pub fn decode(bytes: &[u8]) -> Result<String, ParseError> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }

    let content = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::new(0, format!("UTF-8として読めません: {}", e)))?;
    Ok(content.trim_start_matches('\u{feff}').to_string())
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, ParseError> {
    if bytes.len() % 2 != 0 {
        return Err(ParseError::new(0, "UTF-16のバイト数が奇数です"));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| ParseError::new(0, format!("UTF-16として読めません: {}", e)))
}

fn tokenize(content: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            // コメント
            '!' => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            '"' => {
                let start = line;
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            text.push('"');
                        }
                        Some('"') => break,
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            text.push(ch);
                        }
                        None => return Err(ParseError::new(start, "文字列が閉じていません")),
                    }
                }
                tokens.push((start, Token::Text(text)));
            }
            // `item [1]:` などの添字
            '[' => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        line += 1;
                    }
                    if n == ']' {
                        break;
                    }
                }
            }
            '<' => {
                let mut flag = String::new();
                for n in chars.by_ref() {
                    if n == '>' {
                        break;
                    }
                    flag.push(n);
                }
                tokens.push((line, Token::Flag(flag)));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut number = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_whitespace() {
                        break;
                    }
                    number.push(n);
                    chars.next();
                }
                let value = number
                    .parse::<f64>()
                    .map_err(|e| ParseError::new(line, format!("数値を解釈できません: '{}' ({})", number, e)))?;
                tokens.push((line, Token::Number(value)));
            }
            // ラベル（xmin, intervals, size など）
            c if c.is_alphabetic() || c == '_' => {
                while chars.peek().is_some_and(|&n| n.is_alphanumeric() || n == '_') {
                    chars.next();
                }
            }
            _ => {}
        }
    }

    Ok(tokens)
}

struct Cursor {
    tokens: std::vec::IntoIter<(usize, Token)>,
    line: usize,
}

impl Cursor {
    fn next(&mut self, what: &str) -> Result<Token, ParseError> {
        let (line, token) = self
            .tokens
            .next()
            .ok_or_else(|| ParseError::new(self.line, format!("{} がありません（ファイル末尾）", what)))?;
        self.line = line;
        Ok(token)
    }

    fn number(&mut self, what: &str) -> Result<f64, ParseError> {
        match self.next(what)? {
            Token::Number(value) => Ok(value),
            other => Err(ParseError::new(self.line, format!("{} は数値のはずです: {:?}", what, other))),
        }
    }

    fn count(&mut self, what: &str) -> Result<usize, ParseError> {
        let value = self.number(what)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(ParseError::new(self.line, format!("{} が不正です: {}", what, value)));
        }
        Ok(value as usize)
    }

    fn text(&mut self, what: &str) -> Result<String, ParseError> {
        match self.next(what)? {
            Token::Text(text) => Ok(text),
            other => Err(ParseError::new(self.line, format!("{} は文字列のはずです: {:?}", what, other))),
        }
    }

    fn flag(&mut self, what: &str) -> Result<String, ParseError> {
        match self.next(what)? {
            Token::Flag(flag) => Ok(flag),
            other => Err(ParseError::new(self.line, format!("{} は <...> のはずです: {:?}", what, other))),
        }
    }
}

/// テキスト形式のTextGridを解釈する
pub fn parse(content: &str) -> Result<TextGrid, ParseError> {
    let mut cursor = Cursor {
        tokens: tokenize(content)?.into_iter(),
        line: 1,
    };

    let file_type = cursor.text("File type")?;
    if !file_type.starts_with("ooTextFile") {
        return Err(ParseError::new(cursor.line, format!("未対応のファイル形式: {}", file_type)));
    }
    let object_class = cursor.text("Object class")?;
    if object_class != "TextGrid" {
        return Err(ParseError::new(cursor.line, format!("TextGridではありません: {}", object_class)));
    }

    let xmin = cursor.number("xmin")?;
    let xmax = cursor.number("xmax")?;
    let size = match cursor.flag("tiers?")?.as_str() {
        "exists" => cursor.count("size")?,
        "absent" => 0,
        other => return Err(ParseError::new(cursor.line, format!("不明なフラグ: <{}>", other))),
    };

    let tiers = (0..size)
        .map(|_| parse_tier(&mut cursor))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TextGrid { xmin, xmax, tiers })
}

fn parse_tier(cursor: &mut Cursor) -> Result<Tier, ParseError> {
    let class = cursor.text("class")?;
    let name = cursor.text("name")?;
    let xmin = cursor.number("xmin")?;
    let xmax = cursor.number("xmax")?;
    let size = cursor.count("size")?;

    let items = match class.as_str() {
        "IntervalTier" => TierItems::Intervals(
            (0..size)
                .map(|_| -> Result<Interval, ParseError> {
                    Ok(Interval {
                        xmin: cursor.number("xmin")?,
                        xmax: cursor.number("xmax")?,
                        text: cursor.text("text")?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "TextTier" => TierItems::Points(
            (0..size)
                .map(|_| -> Result<Point, ParseError> {
                    Ok(Point {
                        time: cursor.number("number")?,
                        mark: cursor.text("mark")?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => return Err(ParseError::new(cursor.line, format!("不明なティア: {}", other))),
    };

    Ok(Tier { name, xmin, xmax, items })
}
