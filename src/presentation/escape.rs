//! 不可信文本的转义
//!
//! 题干、分类、选项都来自题库，输出到任何界面之前都要先经过这里。

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// 转义 HTML 特殊字符 `& < > " '`
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn ansi_sequence() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|.)").ok()
    })
    .as_ref()
}

/// 清理终端输出：去掉 ANSI 转义序列和控制字符，制表符替换为空格
pub fn sanitize_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| c.is_control() && c != '\n') {
        return Cow::Borrowed(text);
    }

    let stripped = match ansi_sequence() {
        Some(re) => re.replace_all(text, ""),
        None => Cow::Borrowed(text),
    };

    Cow::Owned(
        stripped
            .chars()
            .filter_map(|c| match c {
                '\t' => Some(' '),
                '\n' => Some('\n'),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect(),
    )
}
