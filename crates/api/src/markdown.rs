//! Markdown rendering for CMS content
//!
//! Authors write plain markdown with a few site-specific extensions:
//! - `[^text](url)` opens the link in a new tab
//! - `[@text](url)` opens in a new tab with `rel="nofollow"`
//! - `[button:text](url)` renders the link as a button
//! - `[youtube=ID,width=W,height=H]` embeds a video
//! - `{covid-dashboard}` embeds the travel restrictions dashboard
//!
//! Variable tokens and modal links are expanded by the CMS token services.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^<>]*>").expect("tag regex should compile"));

#[allow(clippy::expect_used)]
static NEW_TAB_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<a [^<>]+)>\^").expect("new tab regex should compile"));

#[allow(clippy::expect_used)]
static NOFOLLOW_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<a [^<>]+)>@").expect("nofollow regex should compile"));

#[allow(clippy::expect_used)]
static BUTTON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)<(a[^<>]+)>button:([^<>]+)(</a>)").expect("button regex should compile")
});

#[allow(clippy::expect_used)]
static YOUTUBE_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[youtube=([^,]+),width=(\d+),height=(\d+)\]")
        .expect("youtube regex should compile")
});

const COVID_DASHBOARD_TOKEN: &str = "{covid-dashboard}";

const COVID_DASHBOARD_EMBED: &str = r#"<iframe width="100%" height="825" src="https://www.arcgis.com/apps/opsdashboard/index.html#/bda7594740fd40299423467b48e9ecf6" scrolling="no"></iframe>"#;

/// Markdown to HTML engine
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// CMS token expansion hooks; the defaults leave content untouched
pub trait TokenExpander {
    /// Replace variable tokens in markdown source
    fn expand_variables(&self, markdown: &str) -> String {
        markdown.to_string()
    }

    /// Turn modal tokens in rendered HTML into modal links
    fn expand_modal_links(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Expander that leaves every token in place
pub struct NoTokens;

impl TokenExpander for NoTokens {}

/// Render CMS markdown to HTML with the site extensions applied
pub fn markdown_to_html(
    markdown: &str,
    renderer: &dyn MarkdownRenderer,
    tokens: &dyn TokenExpander,
) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let markdown = HTML_TAG.replace_all(markdown, "");
    if markdown.is_empty() {
        return String::new();
    }

    let markdown = tokens.expand_variables(&markdown);
    let html = renderer.render(&markdown);
    if html.is_empty() {
        return String::new();
    }

    let html = tokens.expand_modal_links(&html);
    let html = strip_outer_paragraph(html);
    apply_extensions(&html)
}

/// Drop the wrapping `<p>` of single-paragraph content
fn strip_outer_paragraph(html: String) -> String {
    if !html.starts_with("<p>") || html.matches("<p>").count() != 1 {
        return html;
    }

    let html = html.replacen("<p>", "", 1);
    match html.rfind("</p>") {
        Some(idx) => format!("{}{}", &html[..idx], &html[idx + "</p>".len()..]),
        None => html,
    }
}

/// Link markers and embeds
pub fn apply_extensions(html: &str) -> String {
    let mut html = html.to_string();

    if html.contains("<a") {
        html = NEW_TAB_LINK
            .replace_all(&html, r#"$1 target="_blank">"#)
            .into_owned();
        html = NOFOLLOW_LINK
            .replace_all(&html, r#"$1 target="_blank" rel="nofollow">"#)
            .into_owned();
        html = BUTTON_LINK
            .replace_all(
                &html,
                r#"<div class="markdown-button-wrapper" style="margin: 45px 0;text-align: center;"><$1 class="btn btn-success">$2$3</div>"#,
            )
            .into_owned();
    }

    if html.contains("[youtube=") {
        html = YOUTUBE_EMBED
            .replace_all(
                &html,
                r#"<iframe width="$2" height="$3" src="https://www.youtube.com/embed/$1" frameborder="0" allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>"#,
            )
            .into_owned();
    }

    if html.contains(COVID_DASHBOARD_TOKEN) {
        html = html.replace(COVID_DASHBOARD_TOKEN, COVID_DASHBOARD_EMBED);
    }

    html
}
