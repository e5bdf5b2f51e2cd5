use minijinja::{context, Environment};

use crate::profile::ProfileRecord;
use crate::Result;

const TEMPLATE_NAME: &str = "profile.html";

// `.html` template names get HTML auto-escaping in minijinja.
const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ username }} on {{ platform }}</title>
<style>
body { font-family: sans-serif; margin: 40px; color: #0f172a; }
.card { border: 1px solid #cbd5e1; border-radius: 12px; padding: 24px; }
.avatar { width: 96px; height: 96px; border-radius: 48px; }
.label { color: #64748b; font-size: 12px; text-transform: uppercase; }
</style>
</head>
<body>
<div class="card">
{% if avatar %}<img class="avatar" src="{{ avatar }}" alt="avatar">
{% endif %}<h1>@{{ username }}</h1>
{% if display_name %}<p>{{ display_name }}</p>
{% endif %}<p>{{ platform }} &middot; {{ input_type }}</p>
<p>{{ bio }}</p>
<p><span class="label">Status</span> {{ followers }}</p>
<p><span class="label">Data</span> {{ stats }}</p>
{% if link %}<p><a href="{{ link }}">{{ link }}</a></p>
{% endif %}<p class="label">Scanned {{ scan_date }}</p>
</div>
</body>
</html>
"#;

/// Render `record` as a standalone HTML document, ready for printing.
pub fn render_html(record: &ProfileRecord) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let template = env.get_template(TEMPLATE_NAME)?;
    let link = record
        .outbound_link()
        .map(|url| url.to_string())
        .ok();
    let html = template.render(context! {
        username => &record.username,
        platform => record.platform.name(),
        input_type => record.input_type.to_string(),
        avatar => &record.avatar,
        display_name => &record.display_name,
        bio => &record.bio,
        followers => record.followers_label(),
        stats => record.stats_label(),
        link => link,
        scan_date => &record.scan_date,
    })?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::profile::tests::record;
    use crate::profile::Metric;

    #[test]
    fn renders_record_fields() {
        let mut r = record("octocat", Platform::GitHub);
        r.followers = Metric::Count(4000);
        r.stats = Metric::Count(8);
        r.avatar = Some("https://avatars.example/u/1".to_owned());
        r.display_name = Some("The Octocat".to_owned());
        let html = render_html(&r).unwrap();
        assert!(html.contains("<h1>@octocat</h1>"));
        assert!(html.contains("<p>The Octocat</p>"));
        assert!(html.contains("4000 followers"));
        assert!(html.contains("8 Repos"));
        assert!(html.contains("https:&#x2f;&#x2f;github.com&#x2f;octocat")
            || html.contains("https://github.com/octocat"));
        assert!(html.contains("class=\"avatar\""));
    }

    #[test]
    fn escapes_user_text() {
        let mut r = record("octocat", Platform::GitHub);
        r.bio = "<script>alert(1)</script>".to_owned();
        let html = render_html(&r).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn avatar_block_is_optional() {
        let html = render_html(&record("jane", Platform::Instagram)).unwrap();
        assert!(!html.contains("class=\"avatar\""));
        assert!(html.contains("Pending"));
    }
}
