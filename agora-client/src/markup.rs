//! Lightweight markup used in comment bodies
//!
//! This is a small subset of markdown: paragraphs, headings, lists, quotes,
//! fenced code blocks and rules, with bold, italic, code spans, links and
//! images inline. The result is a view tree: nothing in a comment body is
//! ever interpreted as HTML.

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    BulletList(Vec<Vec<Inline>>),
    OrderedList { start: u64, items: Vec<Vec<Inline>> },
    Quote(Vec<Block>),
    Code { lang: Option<String>, text: String },
    Rule,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    Link { label: Vec<Inline>, url: String },
    Image { alt: String, url: String },
    LineBreak,
}

mod inline_parser {
    #[derive(pest_derive::Parser)]
    #[grammar = "markup.pest"]
    pub struct Parser;
}

use inline_parser::Rule;

/// Quotes nested deeper than this are kept as literal `>` text
pub const MAX_QUOTE_DEPTH: usize = 16;

/// Whether `url` may be put in a link or image source
///
/// Browsers drop tabs and newlines anywhere in a url and leading control
/// characters, so the scheme is read after doing the same. Only web and mail
/// schemes are allowed, urls without a scheme are relative.
pub fn is_safe_url(url: &str) -> bool {
    let url = url
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .skip_while(|c| c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .to_ascii_lowercase();
    match url.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(i) if url[i..].starts_with(':') => ["http", "https", "mailto"].contains(&&url[..i]),
        _ => true,
    }
}

pub fn parse(text: &str) -> Vec<Block> {
    let lines = text.lines().collect::<Vec<_>>();
    parse_lines(&lines, 0)
}

fn parse_lines(lines: &[&str], depth: usize) -> Vec<Block> {
    let mut res = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        // Fenced code block, runs until the closing fence or the end of the text
        if let Some(lang) = trimmed.strip_prefix("```") {
            let lang = Some(lang.trim()).filter(|l| !l.is_empty()).map(String::from);
            let mut body = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                body.push(lines[i]);
                i += 1;
            }
            i += 1; // closing fence
            res.push(Block::Code {
                lang,
                text: body.join("\n"),
            });
            continue;
        }

        if is_rule(trimmed) {
            res.push(Block::Rule);
            i += 1;
            continue;
        }

        if let Some((level, content)) = heading(trimmed) {
            res.push(Block::Heading {
                level,
                content: parse_inlines(content),
            });
            i += 1;
            continue;
        }

        if depth < MAX_QUOTE_DEPTH && quote_line(trimmed).is_some() {
            let mut inner = Vec::new();
            while let Some(l) = lines.get(i).and_then(|l| quote_line(l.trim_start())) {
                inner.push(l);
                i += 1;
            }
            res.push(Block::Quote(parse_lines(&inner, depth + 1)));
            continue;
        }

        if let Some(item) = list_item(trimmed) {
            let ordered = item.number;
            let mut items = Vec::new();
            while let Some(item) = lines.get(i).and_then(|l| list_item(l.trim_start())) {
                if item.number.is_some() != ordered.is_some() {
                    break;
                }
                items.push(parse_inlines(item.content));
                i += 1;
            }
            res.push(match ordered {
                None => Block::BulletList(items),
                Some(start) => Block::OrderedList { start, items },
            });
            continue;
        }

        // Paragraph, until a blank line or the start of another block
        let mut content = Vec::new();
        while let Some(line) = lines.get(i) {
            let trimmed = line.trim_start();
            if !content.is_empty() && starts_block(trimmed, depth) {
                break;
            }
            if trimmed.is_empty() {
                break;
            }
            if !content.is_empty() {
                content.push(Inline::LineBreak);
            }
            for inline in parse_inlines(line.trim()) {
                push_inline(&mut content, inline);
            }
            i += 1;
        }
        res.push(Block::Paragraph(content));
    }
    res
}

fn starts_block(trimmed: &str, depth: usize) -> bool {
    trimmed.starts_with("```")
        || is_rule(trimmed)
        || heading(trimmed).is_some()
        || (depth < MAX_QUOTE_DEPTH && quote_line(trimmed).is_some())
        || list_item(trimmed).is_some()
}

fn is_rule(trimmed: &str) -> bool {
    let trimmed = trimmed.trim_end();
    ['-', '*', '_'].iter().any(|&c| {
        trimmed.chars().filter(|&x| x == c).count() >= 3
            && trimmed.chars().all(|x| x == c || x == ' ')
    })
}

fn heading(trimmed: &str) -> Option<(u8, &str)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    match rest.chars().next() {
        None => Some((level as u8, "")),
        Some(' ') => Some((level as u8, rest.trim())),
        Some(_) => None,
    }
}

fn quote_line(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

struct ListItem<'a> {
    number: Option<u64>,
    content: &'a str,
}

fn list_item(trimmed: &str) -> Option<ListItem<'_>> {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(content) = trimmed.strip_prefix(bullet) {
            return Some(ListItem {
                number: None,
                content: content.trim(),
            });
        }
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let content = trimmed[digits..].strip_prefix(". ")?;
    Some(ListItem {
        number: Some(trimmed[..digits].parse().ok()?),
        content: content.trim(),
    })
}

fn push_inline(res: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(new) = &inline {
        if let Some(Inline::Text(last)) = res.last_mut() {
            last.push_str(new);
            return;
        }
    }
    res.push(inline);
}

fn parse_inlines(s: &str) -> Vec<Inline> {
    use pest::Parser;
    let pairs = match inline_parser::Parser::parse(Rule::inlines, s) {
        Ok(mut pairs) => pairs
            .next()
            .expect("Rule::inlines result without inlines")
            .into_inner(),
        Err(err) => {
            // The grammar accepts any input, but better render text than nothing
            tracing::warn!(?err, "failed parsing inline markup");
            return vec![Inline::Text(String::from(s))];
        }
    };
    let mut res = Vec::new();
    for p in pairs {
        let inline = match p.as_rule() {
            Rule::EOI => continue,
            Rule::text | Rule::lone => Inline::Text(String::from(p.as_str())),
            Rule::escaped => Inline::Text(String::from(&p.as_str()[1..])),
            Rule::code => Inline::Code(String::from(first_inner(p))),
            Rule::strong => Inline::Strong(parse_inlines(first_inner(p))),
            Rule::emphasis => Inline::Emphasis(parse_inlines(first_inner(p))),
            Rule::link => {
                let src = p.as_str();
                let mut inner = p.into_inner();
                let label = inner.next().map(|l| l.as_str()).unwrap_or("");
                let url = inner.next().map(|u| u.as_str()).unwrap_or("");
                if !is_safe_url(url) {
                    tracing::debug!(url, "dropping link with unsafe url");
                    push_inline(&mut res, Inline::Text(String::from(src)));
                    continue;
                }
                Inline::Link {
                    label: parse_inlines(label),
                    url: String::from(url),
                }
            }
            Rule::image => {
                let mut inner = p.into_inner();
                let alt = inner.next().map(|l| l.as_str()).unwrap_or("");
                let url = inner.next().map(|u| u.as_str()).unwrap_or("");
                if !is_safe_url(url) {
                    tracing::debug!(url, "dropping image with unsafe url");
                    Inline::Text(String::from(alt))
                } else {
                    Inline::Image {
                        alt: String::from(alt),
                        url: String::from(url),
                    }
                }
            }
            r => unreachable!("inline markup unexpected rule: {:?}", r),
        };
        push_inline(&mut res, inline);
    }
    res
}

fn first_inner(p: pest::iterators::Pair<'_, Rule>) -> &str {
    p.into_inner().next().map(|p| p.as_str()).unwrap_or("")
}
