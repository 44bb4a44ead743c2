use crate::config::{
    NUM_STARS_MAX, NUM_STARS_MIN, PageConfig, STAR_SIZE_MAX, STAR_SIZE_MIN, SceneParams,
    WAVE_HEIGHT_MAX, WAVE_HEIGHT_MIN, WAVE_HEIGHT_STEP,
};

const TEMPLATE: &str = include_str!("../templates/index.html");

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn favicon_url(icon: &str) -> String {
    format!(
        "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>\
         <text y='.9em' font-size='90'>{icon}</text></svg>"
    )
}

/// Fill the dashboard template. `title` goes to the document title and the
/// heading, `icon` to the favicon and heading glyph, `layout` to the body
/// class. Slider bounds and initial values come from `params`.
pub fn render_page(config: &PageConfig, params: &SceneParams) -> String {
    let vars: [(&str, String); 15] = [
        ("title", escape_html(&config.title)),
        ("icon", escape_html(&config.icon)),
        ("layout_class", config.layout.css_class().to_string()),
        ("num_stars", params.num_stars.to_string()),
        ("num_stars_min", NUM_STARS_MIN.to_string()),
        ("num_stars_max", NUM_STARS_MAX.to_string()),
        ("star_size", params.star_size.to_string()),
        ("star_size_min", STAR_SIZE_MIN.to_string()),
        ("star_size_max", STAR_SIZE_MAX.to_string()),
        ("wave_height", format!("{:.1}", params.wave_height)),
        ("wave_height_min", WAVE_HEIGHT_MIN.to_string()),
        ("wave_height_max", WAVE_HEIGHT_MAX.to_string()),
        ("wave_height_step", WAVE_HEIGHT_STEP.to_string()),
        ("ocean_color", escape_html(&params.ocean_color)),
        ("icon_url", escape_html(&favicon_url(&config.icon))),
    ];

    let mut html = TEMPLATE.to_string();
    for (key, value) in &vars {
        html = html.replace(&format!("{{{{{key}}}}}"), value);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageLayout;

    #[test]
    fn page_config_reaches_markup() {
        let cfg = PageConfig {
            title: "Night & Sea".into(),
            icon: "✨".into(),
            layout: PageLayout::Centered,
        };
        let html = render_page(&cfg, &SceneParams::default());
        assert!(html.contains("<title>Night &amp; Sea</title>"));
        assert!(html.contains("class=\"layout-centered\""));
        assert!(html.contains("✨"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn controls_use_slider_bounds() {
        let html = render_page(&PageConfig::default(), &SceneParams::default());
        assert!(html.contains(r#"id="num_stars" type="range" min="50" max="500" value="200""#));
        assert!(html.contains(r#"id="star_size" type="range" min="1" max="10" value="3""#));
        assert!(html.contains(r##"id="ocean_color" type="color" value="#1e3a5f""##));
        assert!(html.contains("class=\"layout-wide\""));
    }

    #[test]
    fn served_assets_are_not_templates() {
        // frontend/ is served as-is, so nothing in it may carry placeholders
        let assets = [
            include_str!("../frontend/style.css"),
            include_str!("../frontend/app.js"),
        ];
        for asset in assets {
            assert!(!asset.contains("{{"));
        }
        let html = render_page(&PageConfig::default(), &SceneParams::default());
        assert!(html.contains(r#"href="/style.css""#));
        assert!(html.contains(r#"src="/app.js""#));
        let favicon_text = "&lt;text y=&#39;.9em&#39; font-size=&#39;90&#39;&gt;🌊&lt;/text&gt;";
        assert!(html.contains(favicon_text));
    }
}
