//! Parser for the transform pipeline language
//!
//! ```text
//! pipeline := stage ('|' stage)*
//! stage    := NAME arg*
//! arg      := WORD | "quoted text" | OP | ','
//! ```
//!
//! Columns are addressed by letter (`A`, `AB`). Quoted text uses `""` to
//! embed a quote. The value of `filter` and `fill` is the rest of the stage
//! exactly as typed, unless it is a single quoted string.

use std::ops::Range;

use super::{CompareOp, Stage, TextOp, TransformError};
use crate::table::column_index;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
    Op(CompareOp),
    Comma,
    Pipe,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Quoted(q) => format!("\"{}\"", q),
            Token::Op(op) => format!("'{}'", op.symbol()),
            Token::Comma => "','".to_string(),
            Token::Pipe => "'|'".to_string(),
        }
    }
}

/// A token and the byte range it was read from
#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    span: Range<usize>,
}

fn tokenize(source: &str) -> Result<Vec<Spanned>, TransformError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        chars.next();
        let token = match ch {
            c if c.is_whitespace() => continue,
            '|' => Token::Pipe,
            ',' => Token::Comma,
            '"' => {
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) if matches!(chars.peek(), Some((_, '"'))) => {
                            chars.next();
                            text.push('"');
                        }
                        Some((_, '"')) => break,
                        Some((_, c)) => text.push(c),
                        None => return Err(TransformError::new("unterminated quoted text")),
                    }
                }
                Token::Quoted(text)
            }
            '=' | '!' | '<' | '>' => {
                let followed_by_eq = matches!(chars.peek(), Some((_, '=')));
                if followed_by_eq {
                    chars.next();
                }
                let op = match (ch, followed_by_eq) {
                    ('=', _) => CompareOp::Eq,
                    ('!', true) => CompareOp::Ne,
                    ('<', false) => CompareOp::Lt,
                    ('<', true) => CompareOp::Le,
                    ('>', false) => CompareOp::Gt,
                    ('>', true) => CompareOp::Ge,
                    _ => return Err(TransformError::new("expected '!=' after '!'")),
                };
                Token::Op(op)
            }
            _ => {
                let mut word = ch.to_string();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '|' | ',' | '"' | '=' | '!' | '<' | '>') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                Token::Word(word)
            }
        };
        let end = chars.peek().map_or(source.len(), |&(i, _)| i);
        tokens.push(Spanned {
            token,
            span: start..end,
        });
    }

    Ok(tokens)
}

/// Cursor over the tokens of one stage
struct StageArgs<'a> {
    name: String,
    source: &'a str,
    tokens: std::vec::IntoIter<Spanned>,
}

impl StageArgs<'_> {
    fn error(&self, message: impl std::fmt::Display) -> TransformError {
        TransformError::new(format!("{}: {}", self.name, message))
    }

    fn next(&mut self) -> Option<Token> {
        self.tokens.next().map(|s| s.token)
    }

    fn column(&mut self) -> Result<usize, TransformError> {
        match self.next() {
            Some(Token::Word(w)) => parse_column(&w)
                .ok_or_else(|| self.error(format!("'{}' is not a column letter", w))),
            Some(other) => Err(self.error(format!(
                "expected a column, found {}",
                other.describe()
            ))),
            None => Err(self.error("missing column")),
        }
    }

    fn optional_column(&mut self) -> Result<Option<usize>, TransformError> {
        if self.tokens.as_slice().is_empty() {
            return Ok(None);
        }
        self.column().map(Some)
    }

    fn columns(&mut self) -> Result<Vec<usize>, TransformError> {
        let mut columns = vec![self.column()?];
        while let Some(token) = self.next() {
            match token {
                Token::Comma => columns.push(self.column()?),
                Token::Word(w) => columns.push(
                    parse_column(&w)
                        .ok_or_else(|| self.error(format!("'{}' is not a column letter", w)))?,
                ),
                other => return Err(self.error(format!("unexpected {}", other.describe()))),
            }
        }
        Ok(columns)
    }

    fn count(&mut self) -> Result<usize, TransformError> {
        match self.next() {
            Some(Token::Word(w)) => w
                .parse()
                .map_err(|_| self.error(format!("'{}' is not a row count", w))),
            Some(other) => Err(self.error(format!(
                "expected a number, found {}",
                other.describe()
            ))),
            None => Err(self.error("missing row count")),
        }
    }

    /// The rest of the stage as typed, or the text of a single quoted string
    fn value(&mut self) -> Result<String, TransformError> {
        let rest: Vec<Spanned> = self.tokens.by_ref().collect();
        if let [Spanned {
            token: Token::Quoted(text),
            ..
        }] = rest.as_slice()
        {
            return Ok(text.clone());
        }
        match (rest.first(), rest.last()) {
            (Some(first), Some(last)) => {
                Ok(self.source[first.span.start..last.span.end].to_string())
            }
            _ => Err(self.error("missing value")),
        }
    }

    fn finish(mut self) -> Result<(), TransformError> {
        match self.next() {
            Some(extra) => Err(self.error(format!("unexpected {}", extra.describe()))),
            None => Ok(()),
        }
    }
}

fn parse_column(word: &str) -> Option<usize> {
    column_index(word).map(|i| i - 1)
}

fn parse_stage(source: &str, tokens: Vec<Spanned>) -> Result<Stage, TransformError> {
    let mut iter = tokens.into_iter();
    let name = match iter.next().map(|s| s.token) {
        Some(Token::Word(w)) => w.to_lowercase(),
        Some(other) => {
            return Err(TransformError::new(format!(
                "expected a stage name, found {}",
                other.describe()
            )))
        }
        None => return Err(TransformError::new("empty stage")),
    };
    let mut args = StageArgs {
        name: name.clone(),
        source,
        tokens: iter,
    };

    let stage = match name.as_str() {
        "upper" | "lower" | "trim" | "title" => {
            let op = match name.as_str() {
                "upper" => TextOp::Upper,
                "lower" => TextOp::Lower,
                "trim" => TextOp::Trim,
                _ => TextOp::Title,
            };
            Stage::Map {
                op,
                column: args.optional_column()?,
            }
        }
        "sort" => {
            let column = args.column()?;
            let descending = match args.next() {
                None => false,
                Some(Token::Word(w)) if w.eq_ignore_ascii_case("desc") => true,
                Some(Token::Word(w)) if w.eq_ignore_ascii_case("asc") => false,
                Some(other) => {
                    return Err(args.error(format!(
                        "expected 'asc' or 'desc', found {}",
                        other.describe()
                    )))
                }
            };
            Stage::Sort { column, descending }
        }
        "filter" | "where" => {
            let column = args.column()?;
            let op = match args.next() {
                Some(Token::Op(op)) => op,
                Some(Token::Word(w)) if w.eq_ignore_ascii_case("contains") => CompareOp::Contains,
                Some(other) => {
                    return Err(args.error(format!(
                        "expected a comparison, found {}",
                        other.describe()
                    )))
                }
                None => return Err(args.error("missing comparison")),
            };
            Stage::Filter {
                column,
                op,
                value: args.value()?,
            }
        }
        "select" => Stage::Select(args.columns()?),
        "drop" => Stage::Drop(args.columns()?),
        "head" => Stage::Head(args.count()?),
        "tail" => Stage::Tail(args.count()?),
        "transpose" => Stage::Transpose,
        "dedupe" => Stage::Dedupe,
        "fill" => {
            let column = args.column()?;
            Stage::Fill {
                column,
                value: args.value()?,
            }
        }
        "count" => Stage::Count,
        "sum" => Stage::Sum(args.column()?),
        "mean" => Stage::Mean(args.column()?),
        "unique" => Stage::Unique(args.column()?),
        other => return Err(TransformError::new(format!("unknown stage '{}'", other))),
    };

    args.finish()?;
    Ok(stage)
}

/// Parse a pipeline into stages
pub fn parse(source: &str) -> Result<Vec<Stage>, TransformError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(TransformError::new("empty pipeline"));
    }

    let mut stages = Vec::new();
    for (index, group) in tokens.split(|t| t.token == Token::Pipe).enumerate() {
        let stage = parse_stage(source, group.to_vec()).map_err(|e| e.at_stage(index))?;
        stages.push(stage);
    }

    if let Some(pos) = stages.iter().position(Stage::produces_text) {
        if pos + 1 != stages.len() {
            return Err(TransformError::new(
                "count, sum, mean and unique must be the last stage",
            )
            .at_stage(pos));
        }
    }

    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_operators_without_spaces() {
        let tokens: Vec<Token> = tokenize("filter B>=10")
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Word("filter".to_string()),
                Token::Word("B".to_string()),
                Token::Op(CompareOp::Ge),
                Token::Word("10".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_text() {
        let tokens = tokenize(r#"fill A "a | b ""x""""#).unwrap();
        assert_eq!(tokens[2].token, Token::Quoted("a | b \"x\"".to_string()));
        assert_eq!(tokens[2].span, 7..20);
        assert!(tokenize("fill A \"open").is_err());
    }

    #[test]
    fn test_parse_pipeline() {
        let stages = parse("filter C contains ann | sort B desc | select A, B | head 2").unwrap();
        assert_eq!(
            stages,
            vec![
                Stage::Filter {
                    column: 2,
                    op: CompareOp::Contains,
                    value: "ann".to_string(),
                },
                Stage::Sort {
                    column: 1,
                    descending: true,
                },
                Stage::Select(vec![0, 1]),
                Stage::Head(2),
            ]
        );
    }

    #[test]
    fn test_parse_map_with_and_without_column() {
        assert_eq!(
            parse("upper").unwrap(),
            vec![Stage::Map {
                op: TextOp::Upper,
                column: None,
            }]
        );
        assert_eq!(
            parse("TITLE aa").unwrap(),
            vec![Stage::Map {
                op: TextOp::Title,
                column: Some(26),
            }]
        );
    }

    #[test]
    fn test_parse_multi_word_value() {
        assert_eq!(
            parse("filter A = new york").unwrap(),
            vec![Stage::Filter {
                column: 0,
                op: CompareOp::Eq,
                value: "new york".to_string(),
            }]
        );
    }

    #[test]
    fn test_value_keeps_spacing_as_typed() {
        let value = |source: &str| match parse(source).unwrap().remove(0) {
            Stage::Filter { value, .. } | Stage::Fill { value, .. } => value,
            other => panic!("unexpected stage {:?}", other),
        };
        assert_eq!(value("filter A = a  b"), "a  b");
        assert_eq!(value("fill B x=y, z  | upper"), "x=y, z");
        assert_eq!(value("filter A contains \" padded \""), " padded ");
        assert_eq!(value("fill A caf\u{e9}  ol\u{e9}"), "caf\u{e9}  ol\u{e9}");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("explode A").is_err());
        assert!(parse("sort").is_err());
        assert!(parse("sort 1").is_err());
        assert!(parse("head many").is_err());
        assert!(parse("transpose A").is_err());
        assert!(parse("filter A").is_err());
        assert!(parse("upper A |").is_err());
    }

    #[test]
    fn test_text_stage_must_be_last() {
        assert!(parse("sort A | count").is_ok());
        let err = parse("count | sort A").unwrap_err();
        assert_eq!(err.stage, Some(0));
    }

    #[test]
    fn test_error_reports_stage() {
        let err = parse("upper | head x").unwrap_err();
        assert_eq!(err.stage, Some(1));
        assert!(err.to_string().contains("head"));
    }
}
