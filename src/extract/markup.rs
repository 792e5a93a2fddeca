//! 标记树工具（基于 scraper）
//!
//! `rendered_text` 近似浏览器的 innerText：块级元素换行、`<br>` 换行、
//! 脚本与样式不输出、行内空白折叠。

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractError, ExtractResult};

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "table", "tbody",
    "thead", "tfoot", "tr", "ul",
];

/// 解析 CSS 选择器
pub fn selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// 解析一段区域标记
pub fn parse_region(html: &str) -> Html {
    Html::parse_fragment(html)
}

/// 在元素内查找第一个匹配
pub fn select_first<'a>(root: ElementRef<'a>, css: &str) -> ExtractResult<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(root.select(&sel).next())
}

/// 在元素内查找全部匹配
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> ExtractResult<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(root.select(&sel).collect())
}

/// class 属性中是否包含指定片段
pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|classes| classes.contains(class))
}

/// 直接子元素中带指定 class 的元素
pub fn children_with_class<'a>(el: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().classes().any(|c| c == class))
        .collect()
}

/// 元素是否为粗体（`<b>`、`<strong>` 或内联 font-weight）
pub fn is_bold(el: &ElementRef<'_>) -> bool {
    let name = el.value().name();
    if name == "b" || name == "strong" {
        return true;
    }
    el.value().attr("style").is_some_and(|style| {
        let style: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        style.contains("font-weight:bold") || style.contains("font-weight:700")
    })
}

/// 原始文本内容（textContent）
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// 近似 innerText
pub fn rendered_text(el: ElementRef<'_>) -> String {
    rendered_text_with_markers(el, |_| false, '\n')
}

/// 近似 innerText，`is_marker` 命中的元素整体替换为单独一行的 `marker`
pub fn rendered_text_with_markers<F>(el: ElementRef<'_>, is_marker: F, marker: char) -> String
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    let mut out = String::new();
    walk(el, &is_marker, marker, &mut out);
    tidy_lines(&out)
}

fn walk<F>(el: ElementRef<'_>, is_marker: &F, marker: char, out: &mut String)
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.replace(['\n', '\r', '\t'], " "));
            continue;
        }
        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child_el.value().name();
        if SKIPPED_TAGS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }
        if is_marker(&child_el) {
            out.push('\n');
            out.push(marker);
            out.push('\n');
            continue;
        }

        let block = BLOCK_TAGS.contains(&name);
        if block {
            out.push('\n');
        }
        walk(child_el, is_marker, marker, out);
        if name == "td" || name == "th" {
            out.push(' ');
        }
        if block {
            out.push('\n');
        }
    }
}

/// 每行折叠空白、去首尾，丢弃空行
fn tidy_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 元素前面最近的非空文本节点（下拉框的提示语）
pub fn preceding_text(el: ElementRef<'_>) -> String {
    el.prev_siblings()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_text_breaks_blocks() {
        let doc = parse_region(
            "<div id='x'>Intro <b>bold</b> text<p>Para one</p><br>after break\
             <script>var x = 1;</script><ul><li>item 1</li><li>item 2</li></ul></div>",
        );
        let root = select_first(doc.root_element(), "#x").unwrap().unwrap();
        assert_eq!(
            rendered_text(root),
            "Intro bold text\nPara one\nafter break\nitem 1\nitem 2"
        );
    }

    #[test]
    fn test_markers_are_replaced() {
        let doc = parse_region(
            "<div id='q'>Header<span style='font-weight: bold'>Question 1</span>Stem one\
             <span style='font-weight:bold'>Question 2</span>Stem two</div>",
        );
        let root = select_first(doc.root_element(), "#q").unwrap().unwrap();
        let text = rendered_text_with_markers(root, |el| is_bold(el), '\u{1e}');
        assert_eq!(text, "Header\n\u{1e}\nStem one\n\u{1e}\nStem two");
    }

    #[test]
    fn test_preceding_text_skips_blank_nodes() {
        let doc = parse_region("<p>The growth rate was <select id='s'><option>a</option></select></p>");
        let select = select_first(doc.root_element(), "#s").unwrap().unwrap();
        assert_eq!(preceding_text(select), "The growth rate was");
    }

    #[test]
    fn test_children_with_class_is_direct_only() {
        let doc = parse_region(
            "<div class='bbcodeBoxOut'><div class='bbcodeBoxIn'>one\
             <div class='bbcodeBoxIn'>nested</div></div><div class='bbcodeBoxIn'>two</div></div>",
        );
        let wrapper = select_first(doc.root_element(), ".bbcodeBoxOut").unwrap().unwrap();
        assert_eq!(children_with_class(wrapper, "bbcodeBoxIn").len(), 2);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(matches!(
            selector("td[[["),
            Err(ExtractError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_has_class_substring() {
        let doc = parse_region("<table><tr><td id='c' class='cell official_answer'></td></tr></table>");
        let cell = select_first(doc.root_element(), "#c").unwrap().unwrap();
        assert!(has_class(&cell, "official_answer"));
        assert!(!has_class(&cell, "missing"));
    }
}
