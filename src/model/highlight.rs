//! 基于正则的轻量语法高亮
//!
//! 按行切分（只认 `\n`），每行产出若干 `Span`；同一行所有 span 拼接后与原文完全一致。
//! 跨行的注释/字符串按行独立着色。

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::output_format::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Tag,
    Attribute,
    String,
    Comment,
    Keyword,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// 从 1 开始的行号
    pub number: usize,
    pub spans: Vec<Span>,
}

impl HighlightedLine {
    /// 还原该行原文
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

pub trait SyntaxHighlighter: Send + Sync {
    fn language(&self) -> Language;

    fn highlight_line(&self, line: &str) -> Vec<Span>;

    fn highlight(&self, code: &str) -> Vec<HighlightedLine> {
        code.split('\n')
            .enumerate()
            .map(|(index, line)| HighlightedLine {
                number: index + 1,
                spans: self.highlight_line(line),
            })
            .collect()
    }
}

static MARKUP_RULES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<comment><!--.*?(?:-->|$))"#,
        r#"|(?P<string>"[^"]*"|'[^']*')"#,
        r#"|(?P<tag></?[A-Za-z!][\w:.-]*|/?>)"#,
        r#"|(?P<attr>[A-Za-z_:][\w:.-]*)(?P<eq>=)"#,
    ))
    .expect("markup 高亮规则无效")
});

static JSX_RULES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<comment>//.*$|/\*.*?(?:\*/|$)|<!--.*?(?:-->|$))"#,
        r#"|(?P<string>"[^"]*"|'[^']*'|`[^`]*`)"#,
        r#"|(?P<keyword>\b(?:import|from|export|default|const|let|var|return|function|if|else|new|true|false|null)\b)"#,
        r#"|(?P<tag></?[A-Za-z][\w.]*|/?>)"#,
        r#"|(?P<attr>[A-Za-z_][\w-]*)(?P<eq>=)"#,
        r#"|(?P<punct>=>|[{}()\[\];,])"#,
    ))
    .expect("jsx 高亮规则无效")
});

/// 用给定规则切分一行，未命中的间隙记为 Plain
fn tokenize_line(rules: &Regex, line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for caps in rules.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Span {
                text: line[cursor..whole.start()].to_string(),
                kind: TokenKind::Plain,
            });
        }
        push_match(&mut spans, &caps);
        cursor = whole.end();
    }
    if cursor < line.len() || spans.is_empty() {
        spans.push(Span {
            text: line[cursor..].to_string(),
            kind: TokenKind::Plain,
        });
    }
    spans
}

fn push_match(spans: &mut Vec<Span>, caps: &Captures<'_>) {
    let single = [
        ("comment", TokenKind::Comment),
        ("string", TokenKind::String),
        ("keyword", TokenKind::Keyword),
        ("tag", TokenKind::Tag),
        ("punct", TokenKind::Punctuation),
    ];
    for (name, kind) in single {
        if let Some(m) = caps.name(name) {
            spans.push(Span { text: m.as_str().to_string(), kind });
            return;
        }
    }
    // 属性名与等号分开着色
    if let (Some(attr), Some(eq)) = (caps.name("attr"), caps.name("eq")) {
        spans.push(Span { text: attr.as_str().to_string(), kind: TokenKind::Attribute });
        spans.push(Span { text: eq.as_str().to_string(), kind: TokenKind::Punctuation });
    }
}

/// HTML 高亮
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupHighlighter;

impl SyntaxHighlighter for MarkupHighlighter {
    fn language(&self) -> Language {
        Language::Html
    }

    fn highlight_line(&self, line: &str) -> Vec<Span> {
        tokenize_line(&MARKUP_RULES, line)
    }
}

/// JSX 高亮：标记规则 + JS 关键字、模板字符串与行注释
#[derive(Debug, Default, Clone, Copy)]
pub struct JsxHighlighter;

impl SyntaxHighlighter for JsxHighlighter {
    fn language(&self) -> Language {
        Language::Jsx
    }

    fn highlight_line(&self, line: &str) -> Vec<Span> {
        tokenize_line(&JSX_RULES, line)
    }
}

pub fn highlighter_for(language: Language) -> &'static dyn SyntaxHighlighter {
    static MARKUP: MarkupHighlighter = MarkupHighlighter;
    static JSX: JsxHighlighter = JsxHighlighter;
    match language {
        Language::Html => &MARKUP,
        Language::Jsx => &JSX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::generator::MockGenerator;

    fn kinds(spans: &[Span]) -> Vec<(&str, TokenKind)> {
        spans.iter().map(|s| (s.text.as_str(), s.kind)).collect()
    }

    #[test]
    fn test_markup_tag_and_attribute() {
        let spans = MarkupHighlighter.highlight_line(r#"<html lang="en">"#);
        assert_eq!(
            kinds(&spans),
            vec![
                ("<html", TokenKind::Tag),
                (" ", TokenKind::Plain),
                ("lang", TokenKind::Attribute),
                ("=", TokenKind::Punctuation),
                ("\"en\"", TokenKind::String),
                (">", TokenKind::Tag),
            ]
        );
    }

    #[test]
    fn test_markup_comment() {
        let spans = MarkupHighlighter.highlight_line("  <!-- note --> text");
        assert_eq!(spans[1], Span { text: "<!-- note -->".into(), kind: TokenKind::Comment });
        assert_eq!(spans[2].kind, TokenKind::Plain);
    }

    #[test]
    fn test_jsx_keywords_and_strings() {
        let spans = JsxHighlighter.highlight_line("import React from 'react';");
        assert_eq!(spans[0], Span { text: "import".into(), kind: TokenKind::Keyword });
        assert!(spans.iter().any(|s| s.text == "'react'" && s.kind == TokenKind::String));
        assert!(spans.iter().any(|s| s.text == ";" && s.kind == TokenKind::Punctuation));
    }

    #[test]
    fn test_jsx_template_literal_and_comment() {
        let spans = JsxHighlighter.highlight_line("const s = `a \"b\"`; // done");
        assert!(spans.iter().any(|s| s.text == "`a \"b\"`" && s.kind == TokenKind::String));
        assert_eq!(spans.last().unwrap().text, "// done");
        assert_eq!(spans.last().unwrap().kind, TokenKind::Comment);
    }

    #[test]
    fn test_lines_reassemble_exactly() {
        for id in ["html-tailwind", "react-tailwind", "html-css"] {
            let code = MockGenerator::body_for(id);
            let language = Language::for_format_id(id);
            let lines = highlighter_for(language).highlight(code);
            let rebuilt: Vec<String> = lines.iter().map(|l| l.text()).collect();
            assert_eq!(rebuilt.join("\n"), code, "格式 {} 的高亮结果应可还原原文", id);
            assert_eq!(lines.len(), code.lines().count());
        }
    }

    #[test]
    fn test_line_numbers_start_at_one() {
        let lines = MarkupHighlighter.highlight("<a>\n\n</a>");
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(lines[1].spans, vec![Span { text: String::new(), kind: TokenKind::Plain }]);
    }

    #[test]
    fn test_highlighter_selection() {
        assert_eq!(highlighter_for(Language::Html).language(), Language::Html);
        assert_eq!(highlighter_for(Language::Jsx).language(), Language::Jsx);
    }
}
