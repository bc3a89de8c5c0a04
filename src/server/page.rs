const TEMPLATE: &str = include_str!("static/index.html");

/// What the output slot of the page shows.
pub(super) enum PageOutput<'a> {
    Empty,
    Download { href: &'a str, file_name: &'a str },
    Message(&'a str),
}

pub(super) fn render(repo_url: &str, output: PageOutput<'_>) -> String {
    let output_html = match output {
        PageOutput::Empty => String::new(),
        PageOutput::Download { href, file_name } => format!(
            "<p><a href=\"{}\" download>{}</a></p>",
            escape_html(href),
            escape_html(file_name)
        ),
        PageOutput::Message(message) => {
            format!("<p class=\"error\">{}</p>", escape_html(message))
        }
    };

    let repo_url = escape_html(repo_url);
    fill(
        TEMPLATE,
        &[("repo_url", repo_url.as_str()), ("output", output_html.as_str())],
    )
}

/// Substitutes `{{name}}` placeholders in one pass. Substituted text is never
/// scanned again, and unknown placeholders are left as they are.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
