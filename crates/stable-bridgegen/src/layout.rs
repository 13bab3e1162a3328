//! 生成文件排版：把 Token 流还原成可供评审的源码布局。
//!
//! 只调整空白，不改动任何 Token：
//! - 花括号块换行并按四空格缩进，块内语句与字段各占一行；
//! - 属性独占一行，同级的块状条目之间空一行；
//! - 圆括号与方括号内容保持单行，路径、引用与泛型按常见写法紧凑拼接。

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};

/// 排版整段 Token 流，结果以换行结尾。
pub(crate) fn format_tokens(tokens: TokenStream) -> String {
    let mut printer = Printer::default();
    printer.stream(tokens, true);
    let mut out = printer.out.trim_end().to_string();
    out.push('\n');
    out
}

/// 上一个输出单元的类别，决定下一个单元前是否需要空格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Prev {
    #[default]
    Start,
    Word,
    Open,
    Joiner,
    Spaced,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Break {
    #[default]
    None,
    Line,
    Blank,
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
    prev: Prev,
    pending: Break,
}

impl Printer {
    fn stream(&mut self, tokens: TokenStream, block: bool) {
        let mut tokens = tokens.into_iter().peekable();
        let mut after_pound = false;
        while let Some(token) = tokens.next() {
            let was_pound = after_pound;
            after_pound = false;
            match token {
                TokenTree::Ident(ident) => self.word(&ident.to_string()),
                TokenTree::Literal(literal) => self.word(&literal.to_string()),
                TokenTree::Punct(punct) => {
                    let first = punct.as_char();
                    let next = match tokens.peek() {
                        Some(TokenTree::Punct(next)) if punct.spacing() == Spacing::Joint => {
                            Some(next.as_char())
                        }
                        _ => None,
                    };
                    let mut op = String::from(first);
                    if let Some(second) = next
                        && matches!((first, second), (':', ':') | ('-', '>') | ('=', '>'))
                    {
                        tokens.next();
                        op.push(second);
                    }
                    after_pound = op == "#";
                    self.punct(&op, block);
                }
                TokenTree::Group(group) => match group.delimiter() {
                    Delimiter::Brace => self.brace(group.stream(), block),
                    Delimiter::Parenthesis => self.inline_group("(", group.stream(), ")"),
                    Delimiter::Bracket => {
                        self.inline_group("[", group.stream(), "]");
                        if was_pound && block {
                            self.pending = Break::Line;
                            self.prev = Prev::Start;
                        }
                    }
                    Delimiter::None => self.stream(group.stream(), block),
                },
            }
        }
    }

    fn word(&mut self, text: &str) {
        let space = matches!(self.prev, Prev::Word | Prev::Close | Prev::Spaced);
        self.emit(text, space, false);
        self.prev = Prev::Word;
    }

    fn punct(&mut self, op: &str, block: bool) {
        let prev = self.prev;
        let (space, glue, next) = match op {
            ";" | "," => (false, true, Prev::Spaced),
            "::" => (prev == Prev::Spaced, false, Prev::Joiner),
            "." | "!" => (false, false, Prev::Joiner),
            ":" => (false, false, Prev::Spaced),
            "?" | ">" => (false, false, Prev::Close),
            "<" => (prev == Prev::Spaced, false, Prev::Joiner),
            "&" | "*" | "#" | "'" | "-" => (
                matches!(prev, Prev::Word | Prev::Spaced | Prev::Close),
                false,
                Prev::Joiner,
            ),
            _ => (!matches!(prev, Prev::Start | Prev::Open), false, Prev::Spaced),
        };
        self.emit(op, space, glue);
        self.prev = next;
        if block && (op == ";" || op == ",") {
            self.pending = Break::Line;
            self.prev = Prev::Start;
        }
    }

    fn inline_group(&mut self, open: &str, inner: TokenStream, close: &str) {
        let space = self.prev == Prev::Spaced;
        self.emit(open, space, false);
        self.prev = Prev::Open;
        self.stream(inner, false);
        self.emit(close, false, false);
        self.prev = Prev::Close;
    }

    fn brace(&mut self, inner: TokenStream, block: bool) {
        let space = !matches!(self.prev, Prev::Start | Prev::Open | Prev::Joiner);
        if inner.is_empty() {
            self.emit("{}", space, false);
        } else if block {
            self.emit("{", space, false);
            self.indent += 1;
            self.pending = Break::Line;
            self.prev = Prev::Start;
            self.stream(inner, true);
            self.indent -= 1;
            self.pending = Break::Line;
            self.emit("}", false, false);
        } else {
            self.emit("{", space, false);
            self.prev = Prev::Spaced;
            self.stream(inner, false);
            self.emit("}", true, false);
        }
        self.prev = Prev::Close;
        if block {
            // 块后的空行会被外层 `}` 的换行覆盖，因此只出现在同级条目之间。
            self.pending = Break::Blank;
            self.prev = Prev::Start;
        }
    }

    /// 输出一个单元；`glue` 为真时吞掉挂起的换行（如 `}` 之后紧跟的 `;`）。
    fn emit(&mut self, text: &str, space: bool, glue: bool) {
        let pending = std::mem::take(&mut self.pending);
        if glue || pending == Break::None {
            if space && !glue {
                self.out.push(' ');
            }
        } else {
            if pending == Break::Blank {
                self.out.push('\n');
            }
            self.out.push('\n');
            for _ in 0..self.indent {
                self.out.push_str("    ");
            }
        }
        self.out.push_str(text);
    }
}
